//! `init` subcommand — discover the bridge and register this app on it.

use std::path::Path;

use huecli_lib::http::HttpLocator;

use super::{Config, Result, context};

pub(super) fn cmd_init(path: &Path) -> Result<()> {
    let mut config = Config::load_from(path)?;
    if config.is_initialized() {
        log::warn!(
            "replacing existing registration with bridge {}",
            config.bridge_host
        );
    }
    println!("Searching for a Hue bridge (its link button must have been pressed)...");
    context::register(&HttpLocator::new(), &mut config)?;
    config.save_to(path)?;
    println!("Registered with bridge at {}", config.bridge_host);
    Ok(())
}
