//! CMYK conversion command.

use super::{report, Session};
use crate::CmykArgs;
use anyhow::{Context, Result};
use press_assets::CmykConversionRequest;

pub fn run(args: CmykArgs, session: &Session) -> Result<()> {
    let mut request = CmykConversionRequest::new(&args.source);
    if let Some(profile) = args.profile {
        request = request.with_profile(profile);
    }
    if let Some(name) = args.name {
        request = request.with_output_name(name);
    }

    let pipeline = session.pipeline()?;
    let path = pipeline
        .prepare_cmyk(&request)
        .with_context(|| format!("Failed to convert: {}", args.source.display()))?;
    report(&path, &pipeline, session.verbose);
    Ok(())
}
