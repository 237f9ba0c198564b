//! Logo command.

use super::{report, Session};
use crate::LogoArgs;
use anyhow::{Context, Result};
use press_assets::LogoRequest;
use press_ops::Filter;

pub fn run(args: LogoArgs, session: &Session) -> Result<()> {
    let filter: Filter = args.filter.parse().context("Invalid --filter")?;
    let request = LogoRequest::new(&args.source, args.width)
        .preserve_transparency(!args.flatten)
        .with_filter(filter);

    let pipeline = session.pipeline()?;
    let path = pipeline
        .prepare_logo(&request)
        .with_context(|| format!("Failed to prepare logo: {}", args.source.display()))?;
    report(&path, &pipeline, session.verbose);
    Ok(())
}
