//! Light operations — power toggle and attribute writes with the ensure-on policy.
//!
//! Every attribute write goes through [`ensure_on`] first: a light whose cached
//! state is off gets an explicit power-on command before anything else. The
//! cached [`Light::state`] is updated after each successful remote call.

use crate::bridge::{BridgeClient, Light, LightSummary, Result};

use super::color::Color;

/// Power the light on if its cached state says it is off.
pub fn ensure_on(bridge: &impl BridgeClient, light: &mut Light) -> Result<()> {
    if !light.state.on {
        log::info!("light {} is off, switching on", light.id);
        bridge.set_on(light.id, true)?;
        light.state.on = true;
    }
    Ok(())
}

/// Toggle power: on → off, off → on, based on the cached state.
pub fn switch_power(bridge: &impl BridgeClient, light: &mut Light) -> Result<()> {
    let target = !light.state.on;
    log::debug!(
        "light {}: power {}",
        light.id,
        if target { "on" } else { "off" }
    );
    bridge.set_on(light.id, target)?;
    light.state.on = target;
    Ok(())
}

/// Apply a color, optionally overriding its brightness with a 1–100 percentage.
///
/// Writes hue, saturation and brightness in that order, then the color
/// temperature if it is nonzero. Each write is its own remote call. A failure
/// stops the sequence and is returned as-is: attributes already written stay
/// applied on the light (there is no rollback).
pub fn apply_color(
    bridge: &impl BridgeClient,
    light: &mut Light,
    color: Color,
    brightness_percent: Option<u8>,
) -> Result<()> {
    let color = match brightness_percent {
        Some(p) => color.with_brightness_percent(p),
        None => color,
    };
    ensure_on(bridge, light)?;

    let id = light.id;
    log::debug!("light {id}: applying {color:?}");
    bridge.set_hue(id, color.hue)?;
    light.state.hue = color.hue;
    bridge.set_saturation(id, color.saturation)?;
    light.state.saturation = color.saturation;
    bridge.set_brightness(id, color.brightness)?;
    light.state.brightness = color.brightness;
    if color.color_temperature != 0 {
        bridge.set_color_temperature(id, color.color_temperature)?;
        light.state.color_temperature = color.color_temperature;
    }
    Ok(())
}

pub fn set_hue(bridge: &impl BridgeClient, light: &mut Light, hue: u16) -> Result<()> {
    ensure_on(bridge, light)?;
    bridge.set_hue(light.id, hue)?;
    light.state.hue = hue;
    Ok(())
}

pub fn set_saturation(bridge: &impl BridgeClient, light: &mut Light, saturation: u8) -> Result<()> {
    ensure_on(bridge, light)?;
    bridge.set_saturation(light.id, saturation)?;
    light.state.saturation = saturation;
    Ok(())
}

pub fn set_brightness(bridge: &impl BridgeClient, light: &mut Light, brightness: u8) -> Result<()> {
    ensure_on(bridge, light)?;
    bridge.set_brightness(light.id, brightness)?;
    light.state.brightness = brightness;
    Ok(())
}

pub fn set_color_temperature(
    bridge: &impl BridgeClient,
    light: &mut Light,
    mired: u16,
) -> Result<()> {
    ensure_on(bridge, light)?;
    bridge.set_color_temperature(light.id, mired)?;
    light.state.color_temperature = mired;
    Ok(())
}

/// Every light the bridge knows, managed or not.
pub fn list_remote_lights(bridge: &impl BridgeClient) -> Result<Vec<LightSummary>> {
    Ok(bridge.lights()?.iter().map(LightSummary::from).collect())
}
