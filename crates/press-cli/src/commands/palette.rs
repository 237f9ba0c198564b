//! Palette listing.

use super::Session;
use anyhow::Result;

pub fn run(session: &Session) -> Result<()> {
    let width = session.palette.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, color) in session.palette.iter() {
        let [c, m, y, k] = color.channels();
        println!("{:<width$}  C{:>5.1} M{:>5.1} Y{:>5.1} K{:>5.1}", name, c, m, y, k, width = width);
    }
    Ok(())
}
