//! `switch` subcommand — toggle power on every managed light.

use std::path::Path;

use super::{BridgeContext, Config, Light, Result, context};

fn format_power(l: &Light) -> String {
    format!(
        "Light {}: {}",
        l.id,
        if l.state.on { "ON" } else { "OFF" }
    )
}

pub(super) fn cmd_switch(path: &Path) -> Result<()> {
    let config = Config::load_from(path)?;
    let bridge = context::open_bridge(&config)?;
    let mut ctx = BridgeContext::resolve(bridge, &config.lights)?;
    ctx.switch_all()?;
    for l in &ctx.lights {
        println!("{}", format_power(l));
    }
    Ok(())
}
