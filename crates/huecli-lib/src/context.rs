//! Bridge context — a bridge handle plus the managed lights fetched from it.
//!
//! Consolidates the pattern every light command follows: check that `init`
//! has run → open the bridge → fetch each managed light → act on them one at
//! a time, in config order.

use crate::bridge::{BridgeClient, BridgeLocator, Light, LightId};
use crate::config::Config;
use crate::error::{HuecliError, Result};
use crate::http::HttpBridge;
use crate::light::{self, Color};

/// Display name registered with the bridge by `init`.
pub const DEVICE_TYPE: &str = "Philips Hue CLI app";

/// Discover a bridge, register this application on it, and store the
/// resulting host and credential in `config`.
///
/// `config` is left untouched if either step fails.
pub fn register(locator: &impl BridgeLocator, config: &mut Config) -> Result<()> {
    let host = locator.discover()?;
    log::info!("found bridge at {host}");
    let username = locator.create_user(&host, DEVICE_TYPE)?;
    config.bridge_host = host;
    config.application_id = username;
    Ok(())
}

/// Open an HTTP bridge handle from the stored host and credential.
pub fn open_bridge(config: &Config) -> Result<HttpBridge> {
    if !config.is_initialized() {
        return Err(HuecliError::NotInitialized);
    }
    Ok(HttpBridge::new(&config.bridge_host, &config.application_id))
}

/// Resolved bridge context with the managed lights' cached state.
#[derive(Debug)]
pub struct BridgeContext<B> {
    pub bridge: B,
    /// Managed lights, in config order.
    pub lights: Vec<Light>,
}

impl<B: BridgeClient> BridgeContext<B> {
    /// Fetch every managed light. Fails on the first light the bridge can't return.
    pub fn resolve(bridge: B, ids: &[LightId]) -> Result<Self> {
        let lights = ids
            .iter()
            .map(|&id| bridge.light(id))
            .collect::<crate::bridge::Result<Vec<_>>>()?;
        Ok(BridgeContext { bridge, lights })
    }

    /// Apply `color` to one managed light, or to all of them when `target` is
    /// `None`. Returns how many lights were changed.
    ///
    /// Lights are changed sequentially; the first failure stops the loop.
    pub fn change(
        &mut self,
        color: Color,
        brightness_percent: Option<u8>,
        target: Option<LightId>,
    ) -> Result<usize> {
        let mut changed = 0;
        for l in self
            .lights
            .iter_mut()
            .filter(|l| target.is_none_or(|id| id == l.id))
        {
            light::apply_color(&self.bridge, l, color, brightness_percent)?;
            changed += 1;
        }
        if changed == 0
            && let Some(id) = target
        {
            log::warn!("light {id} is not managed (add it with `huecli add --id {id}`)");
        }
        Ok(changed)
    }

    /// Toggle every managed light independently.
    pub fn switch_all(&mut self) -> Result<()> {
        for l in &mut self.lights {
            light::switch_power(&self.bridge, l)?;
        }
        Ok(())
    }
}
