//! Output path policy for CMYK rasters.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extensions that can carry CMYK data and are kept as-is.
const CMYK_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "tif", "tiff"];

/// Returns the path a CMYK raster requested at `path` is actually written to.
///
/// PNG cannot store four-channel ink data, so `.png` becomes `.jpg`.
/// `.jpg`, `.jpeg`, `.tif` and `.tiff` are kept; any other extension (or none)
/// gets `.jpg` appended. Comparison is case-insensitive.
///
/// ```rust
/// use press_io::cmyk_output_path;
/// use std::path::Path;
///
/// assert_eq!(cmyk_output_path(Path::new("out.png")), Path::new("out.jpg"));
/// assert_eq!(cmyk_output_path(Path::new("out.tiff")), Path::new("out.tiff"));
/// assert_eq!(cmyk_output_path(Path::new("out.bmp")), Path::new("out.bmp.jpg"));
/// ```
pub fn cmyk_output_path(path: &Path) -> PathBuf {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => path.with_extension("jpg"),
        Some(e) if CMYK_EXTENSIONS.contains(&e) => path.to_path_buf(),
        _ => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".jpg");
            PathBuf::from(name)
        }
    }
}
