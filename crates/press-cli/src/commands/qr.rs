//! QR code command.

use super::{report, Session};
use crate::QrArgs;
use anyhow::Result;
use press_assets::QrRequest;

pub fn run(args: QrArgs, session: &Session) -> Result<()> {
    let mut request = QrRequest::new(args.payload);
    request.size_px = args.size;
    request.border_modules = args.border;
    request.foreground = session.color(&args.fg)?;
    request.background = session.color(&args.bg)?;

    let pipeline = session.pipeline()?;
    let path = pipeline.prepare_qr(&request)?;
    report(&path, &pipeline, session.verbose);
    Ok(())
}
