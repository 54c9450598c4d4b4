//! `change` subcommand — apply a named color to one or all managed lights.

use std::path::Path;

use super::{BridgeClient, BridgeContext, Config, LightId, Result, context, light};

/// Apply `color` to the managed lights in `ctx`. `brightness` and `id` use 0
/// for "not given". Returns how many lights changed.
fn change_lights<B: BridgeClient>(
    ctx: &mut BridgeContext<B>,
    color: &str,
    brightness: u8,
    id: LightId,
) -> Result<usize> {
    let resolved = light::resolve_color(color);
    let brightness = (brightness != 0).then_some(brightness);
    let target = (id != 0).then_some(id);
    Ok(ctx.change(resolved, brightness, target)?)
}

pub(super) fn cmd_change(path: &Path, color: &str, brightness: u8, id: LightId) -> Result<()> {
    let config = Config::load_from(path)?;
    let bridge = context::open_bridge(&config)?;
    let mut ctx = BridgeContext::resolve(bridge, &config.lights)?;
    let changed = change_lights(&mut ctx, color, brightness, id)?;
    println!(
        "Changed {changed} light{}",
        if changed == 1 { "" } else { "s" }
    );
    Ok(())
}
