//! `add` / `remove` subcommands — edit the managed light set.

use std::path::Path;

use super::{Config, LightId, Result};

pub(super) fn cmd_add(path: &Path, id: LightId) -> Result<()> {
    let mut config = Config::load_from(path)?;
    if !config.add_light(id) {
        log::warn!("light {id} is already managed");
        return Ok(());
    }
    config.save_to(path)?;
    println!("Added light {id}");
    Ok(())
}

pub(super) fn cmd_remove(path: &Path, id: LightId) -> Result<()> {
    let mut config = Config::load_from(path)?;
    if !config.remove_light(id) {
        log::warn!("light {id} is not managed");
        return Ok(());
    }
    config.save_to(path)?;
    println!("Removed light {id}");
    Ok(())
}
