//! Vignette command.

use super::{report, Session};
use crate::VignetteArgs;
use anyhow::{Context, Result};
use press_assets::VignetteRequest;
use press_ops::VignetteParams;

pub fn run(args: VignetteArgs, session: &Session) -> Result<()> {
    let params = VignetteParams::new(args.edge, args.bottom, args.top).context("Invalid fade fractions")?;
    let mut request = VignetteRequest::new(&args.source).with_params(params);
    if let Some(name) = args.name {
        request = request.with_output_name(name);
    }

    let pipeline = session.pipeline()?;
    let path = pipeline
        .prepare_vignette(&request)
        .with_context(|| format!("Failed to vignette: {}", args.source.display()))?;
    report(&path, &pipeline, session.verbose);
    Ok(())
}
