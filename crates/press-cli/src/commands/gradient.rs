//! Gradient command.

use super::{report, Session};
use crate::GradientArgs;
use anyhow::{bail, Result};
use press_assets::GradientRequest;
use press_core::units::pixels_for_size;

/// Prepares a vertical gradient, sized in pixels or millimetres.
pub fn run(args: GradientArgs, session: &Session) -> Result<()> {
    let (width, height) = match (args.width_mm, args.height_mm, args.width, args.height) {
        (Some(w_mm), Some(h_mm), _, _) => pixels_for_size(w_mm, h_mm, args.dpi),
        (_, _, Some(w), Some(h)) => (w, h),
        _ => bail!("Give --width/--height in pixels or --width-mm/--height-mm"),
    };

    let request = GradientRequest::new(width, height, session.color(&args.top)?, session.color(&args.bottom)?);
    let pipeline = session.pipeline()?;
    let path = pipeline.prepare_gradient(&request)?;
    report(&path, &pipeline, session.verbose);
    Ok(())
}
