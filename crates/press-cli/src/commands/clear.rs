//! Cache clearing.

use super::Session;
use anyhow::{Context, Result};

pub fn run(session: &Session) -> Result<()> {
    let pipeline = session.pipeline()?;
    let removed = pipeline.store().entry_count().unwrap_or(0);
    pipeline.clear().context("Failed to clear cache")?;
    println!("{} ({} entries removed)", pipeline.store().root().display(), removed);
    Ok(())
}
