//! Bridge communication — capability traits, light types, and a mock backend.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Error type ──

/// Bridge and light remote-call errors.
///
/// String payloads follow the convention **"context: details"** where *context*
/// names the request (e.g. `"GET lights/3"`) and *details* is the underlying
/// transport or decode failure.
#[derive(Debug)]
pub enum DeviceError {
    /// Discovery returned no bridges on the local network.
    NoBridgeFound,
    /// The request never produced a usable HTTP response.
    Transport(String),
    /// The bridge answered with an error object.
    Api {
        kind: u32,
        address: String,
        description: String,
    },
    /// The bridge answered, but not with the shape we expected.
    Decode(String),
    /// The bridge does not know a light with this ID.
    LightNotFound(LightId),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NoBridgeFound => write!(f, "No Hue bridge found on the local network"),
            DeviceError::Transport(e) => write!(f, "Bridge request failed: {e}"),
            DeviceError::Api {
                kind,
                address,
                description,
            } => {
                if address.is_empty() {
                    write!(f, "Bridge error {kind}: {description}")
                } else {
                    write!(f, "Bridge error {kind} at {address}: {description}")
                }
            }
            DeviceError::Decode(e) => write!(f, "Unexpected bridge reply: {e}"),
            DeviceError::LightNotFound(id) => write!(f, "Light {id} not found on bridge"),
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Light types ──

/// Bridge-assigned light identifier.
pub type LightId = u32;

/// Last known state of a light, as reported by the bridge.
///
/// Attributes a light does not support (e.g. `hue` on a white-only bulb) are
/// absent from the bridge reply and default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,
    #[serde(default)]
    pub hue: u16,
    #[serde(default, rename = "sat")]
    pub saturation: u8,
    #[serde(default, rename = "bri")]
    pub brightness: u8,
    #[serde(default, rename = "ct")]
    pub color_temperature: u16,
    #[serde(default)]
    pub reachable: bool,
}

/// A light fetched from the bridge, with its cached state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Light {
    pub id: LightId,
    pub name: String,
    pub state: LightState,
}

/// ID and display name of a light, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightSummary {
    pub id: LightId,
    pub name: String,
}

impl From<&Light> for LightSummary {
    fn from(light: &Light) -> Self {
        LightSummary {
            id: light.id,
            name: light.name.clone(),
        }
    }
}

// ── Capabilities ──

/// A bridge handle bound to a host and application credential.
///
/// Every mutator is a single blocking remote call. Implementations never retry.
pub trait BridgeClient {
    /// Fetch one light by ID.
    fn light(&self, id: LightId) -> Result<Light>;
    /// Fetch every light the bridge knows, ordered by ID.
    fn lights(&self) -> Result<Vec<Light>>;
    fn set_on(&self, id: LightId, on: bool) -> Result<()>;
    fn set_hue(&self, id: LightId, hue: u16) -> Result<()>;
    fn set_saturation(&self, id: LightId, saturation: u8) -> Result<()>;
    fn set_brightness(&self, id: LightId, brightness: u8) -> Result<()>;
    fn set_color_temperature(&self, id: LightId, mired: u16) -> Result<()>;
}

/// Finds a bridge and registers an application user on it.
pub trait BridgeLocator {
    /// Return the network address of a bridge on the local network.
    fn discover(&self) -> Result<String>;
    /// Register `devicetype` on the bridge at `host`, returning the issued credential.
    ///
    /// The bridge's link button must have been pressed shortly before.
    fn create_user(&self, host: &str, devicetype: &str) -> Result<String>;
}

// ── Mock backend ──

/// In-memory bridge for tests.
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    /// A recorded call against [`MockBridge`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Call {
        Light(LightId),
        Lights,
        SetOn(LightId, bool),
        SetHue(LightId, u16),
        SetSaturation(LightId, u8),
        SetBrightness(LightId, u8),
        SetColorTemperature(LightId, u16),
    }

    /// Which mutator a failure should be injected into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Write {
        On,
        Hue,
        Saturation,
        Brightness,
        ColorTemperature,
    }

    /// Bridge whose lights live in a map. Mutators update the stored state
    /// and every call is appended to `calls`.
    #[derive(Debug, Default)]
    pub struct MockBridge {
        pub lights: RefCell<BTreeMap<LightId, Light>>,
        pub calls: RefCell<Vec<Call>>,
        /// If set, the matching mutator returns an error instead of applying.
        pub fail_on: Cell<Option<Write>>,
        /// If true, `lights()` returns an error.
        pub fail_list: Cell<bool>,
    }

    impl MockBridge {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a light in the given power state.
        pub fn with_light(self, id: LightId, name: &str, on: bool) -> Self {
            self.lights.borrow_mut().insert(
                id,
                Light {
                    id,
                    name: name.into(),
                    state: LightState {
                        on,
                        reachable: true,
                        ..LightState::default()
                    },
                },
            );
            self
        }

        /// Recorded mutator calls only (reads filtered out).
        pub fn writes(&self) -> Vec<Call> {
            self.calls
                .borrow()
                .iter()
                .copied()
                .filter(|c| !matches!(c, Call::Light(_) | Call::Lights))
                .collect()
        }

        pub fn state(&self, id: LightId) -> Option<LightState> {
            self.lights.borrow().get(&id).map(|l| l.state.clone())
        }

        fn write(
            &self,
            call: Call,
            kind: Write,
            id: LightId,
            apply: impl FnOnce(&mut LightState),
        ) -> Result<()> {
            self.calls.borrow_mut().push(call);
            if self.fail_on.get() == Some(kind) {
                return Err(DeviceError::Transport(format!(
                    "mock: {kind:?} failure injected"
                )));
            }
            let mut lights = self.lights.borrow_mut();
            let light = lights.get_mut(&id).ok_or(DeviceError::LightNotFound(id))?;
            apply(&mut light.state);
            Ok(())
        }
    }

    impl BridgeClient for MockBridge {
        fn light(&self, id: LightId) -> Result<Light> {
            self.calls.borrow_mut().push(Call::Light(id));
            self.lights
                .borrow()
                .get(&id)
                .cloned()
                .ok_or(DeviceError::LightNotFound(id))
        }

        fn lights(&self) -> Result<Vec<Light>> {
            self.calls.borrow_mut().push(Call::Lights);
            if self.fail_list.get() {
                return Err(DeviceError::Transport("mock: list failure injected".into()));
            }
            Ok(self.lights.borrow().values().cloned().collect())
        }

        fn set_on(&self, id: LightId, on: bool) -> Result<()> {
            self.write(Call::SetOn(id, on), Write::On, id, |s| s.on = on)
        }

        fn set_hue(&self, id: LightId, hue: u16) -> Result<()> {
            self.write(Call::SetHue(id, hue), Write::Hue, id, |s| s.hue = hue)
        }

        fn set_saturation(&self, id: LightId, saturation: u8) -> Result<()> {
            self.write(
                Call::SetSaturation(id, saturation),
                Write::Saturation,
                id,
                |s| s.saturation = saturation,
            )
        }

        fn set_brightness(&self, id: LightId, brightness: u8) -> Result<()> {
            self.write(
                Call::SetBrightness(id, brightness),
                Write::Brightness,
                id,
                |s| s.brightness = brightness,
            )
        }

        fn set_color_temperature(&self, id: LightId, mired: u16) -> Result<()> {
            self.write(
                Call::SetColorTemperature(id, mired),
                Write::ColorTemperature,
                id,
                |s| s.color_temperature = mired,
            )
        }
    }

    /// Locator that hands out a fixed host and credential.
    pub struct MockLocator {
        pub host: Option<String>,
        pub username: std::result::Result<String, String>,
        pub registrations: RefCell<Vec<(String, String)>>,
    }

    impl MockLocator {
        pub fn new(host: &str, username: &str) -> Self {
            MockLocator {
                host: Some(host.into()),
                username: Ok(username.into()),
                registrations: RefCell::new(Vec::new()),
            }
        }
    }

    impl BridgeLocator for MockLocator {
        fn discover(&self) -> Result<String> {
            self.host.clone().ok_or(DeviceError::NoBridgeFound)
        }

        fn create_user(&self, host: &str, devicetype: &str) -> Result<String> {
            self.registrations
                .borrow_mut()
                .push((host.into(), devicetype.into()));
            self.username.clone().map_err(|description| DeviceError::Api {
                kind: 101,
                address: String::new(),
                description,
            })
        }
    }
}
