//! Image info command.
//!
//! Reports container, size and color mode, flagging anything that is not
//! yet CMYK.

use super::Session;
use crate::InfoArgs;
use anyhow::{Context, Result};
use press_core::units::{MIN_EFFECTIVE_DPI, PREFERRED_DPI, MM_PER_INCH};
use press_core::ColorMode;
use press_io::Format;
use std::fs;

pub fn run(args: InfoArgs, session: &Session) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let image = press_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;

        println!("{}", path.display());
        println!("  Format:     {}", format);
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Mode:       {}", image.mode());
        println!("  File size:  {}", format_size(size));
        if image.mode() != ColorMode::Cmyk {
            println!("  Print:      not CMYK, run `press cmyk` first");
        }

        if session.verbose {
            for dpi in [MIN_EFFECTIVE_DPI, PREFERRED_DPI] {
                let w = image.width() as f64 / dpi as f64 * MM_PER_INCH;
                let h = image.height() as f64 / dpi as f64 * MM_PER_INCH;
                println!("  At {} dpi:  {:.1} x {:.1} mm", dpi, w, h);
            }
        }
    }
    Ok(())
}

/// Format file size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
