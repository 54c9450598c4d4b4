//! Hue bridge v1 REST client — blocking `reqwest` backend for [`BridgeClient`].
//!
//! Replies from the bridge are JSON. Failures come back as HTTP 200 with an
//! array of `{"error": {type, address, description}}` objects, so every reply
//! goes through [`check_reply`] before it is decoded.

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::bridge::{BridgeClient, BridgeLocator, DeviceError, Light, LightId, LightState, Result};

/// Philips' N-UPnP discovery endpoint.
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// Bridge error type for "resource not available".
const API_RESOURCE_NOT_AVAILABLE: u32 = 3;

// ── Reply decoding ──

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    kind: u32,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiLight {
    #[serde(default)]
    name: String,
    #[serde(default)]
    state: LightState,
}

#[derive(Debug, Deserialize)]
struct DiscoveredBridge {
    internalipaddress: String,
}

/// Return the first error object in a reply, or the reply itself.
pub fn check_reply(value: Value) -> Result<Value> {
    if let Some(items) = value.as_array() {
        for item in items {
            if let Some(err) = item.get("error") {
                let err: ApiError = serde_json::from_value(err.clone())
                    .map_err(|e| DeviceError::Decode(format!("error object: {e}")))?;
                return Err(DeviceError::Api {
                    kind: err.kind,
                    address: err.address,
                    description: err.description,
                });
            }
        }
    }
    Ok(value)
}

/// Decode the `GET lights` map (`{"1": {...}, "2": {...}}`), ordered by ID.
pub fn parse_lights(value: Value) -> Result<Vec<Light>> {
    let map: std::collections::HashMap<String, ApiLight> =
        serde_json::from_value(value).map_err(|e| DeviceError::Decode(format!("lights: {e}")))?;
    let mut lights = map
        .into_iter()
        .map(|(key, api)| {
            let id = key
                .parse::<LightId>()
                .map_err(|_| DeviceError::Decode(format!("lights: bad light id {key:?}")))?;
            Ok(Light {
                id,
                name: api.name,
                state: api.state,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    lights.sort_by_key(|l| l.id);
    Ok(lights)
}

/// Decode a single `GET lights/{id}` reply.
pub fn parse_light(id: LightId, value: Value) -> Result<Light> {
    let api: ApiLight = serde_json::from_value(value)
        .map_err(|e| DeviceError::Decode(format!("lights/{id}: {e}")))?;
    Ok(Light {
        id,
        name: api.name,
        state: api.state,
    })
}

/// Extract the issued username from a `POST /api` reply.
pub fn parse_username(value: &Value) -> Result<String> {
    value
        .as_array()
        .and_then(|items| {
            items
                .iter()
                .find_map(|item| item.pointer("/success/username")?.as_str())
        })
        .map(str::to_string)
        .ok_or_else(|| DeviceError::Decode(format!("create user: no username in {value}")))
}

/// Pick the first bridge from a discovery reply.
pub fn parse_discovery(value: Value) -> Result<String> {
    let bridges: Vec<DiscoveredBridge> = serde_json::from_value(value)
        .map_err(|e| DeviceError::Decode(format!("discovery: {e}")))?;
    bridges
        .into_iter()
        .next()
        .map(|b| b.internalipaddress)
        .ok_or(DeviceError::NoBridgeFound)
}

/// `http://host` for a bare host; scheme-qualified hosts are kept as-is.
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

fn send(request: RequestBuilder, context: &str) -> Result<Value> {
    log::debug!("{context}");
    let response = request
        .send()
        .map_err(|e| DeviceError::Transport(format!("{context}: {e}")))?;
    let value: Value = response
        .json()
        .map_err(|e| DeviceError::Decode(format!("{context}: {e}")))?;
    check_reply(value)
}

// ── Bridge handle ──

/// A bridge handle bound to `(host, username)`.
pub struct HttpBridge {
    client: Client,
    /// `http://host/api/username`
    api: String,
}

/// One writable light-state attribute, as sent in a `PUT lights/{id}/state` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAttribute {
    On(bool),
    Hue(u16),
    Saturation(u8),
    Brightness(u8),
    ColorTemperature(u16),
}

impl StateAttribute {
    /// Single-key body using the bridge's field names.
    pub fn body(self) -> Value {
        match self {
            StateAttribute::On(on) => json!({ "on": on }),
            StateAttribute::Hue(hue) => json!({ "hue": hue }),
            StateAttribute::Saturation(sat) => json!({ "sat": sat }),
            StateAttribute::Brightness(bri) => json!({ "bri": bri }),
            StateAttribute::ColorTemperature(ct) => json!({ "ct": ct }),
        }
    }
}

/// Turn a "resource not available" reply for a single light into `LightNotFound`.
pub fn map_light_error(id: LightId, err: DeviceError) -> DeviceError {
    match err {
        DeviceError::Api { kind, .. } if kind == API_RESOURCE_NOT_AVAILABLE => {
            DeviceError::LightNotFound(id)
        }
        other => other,
    }
}

impl HttpBridge {
    pub fn new(host: &str, username: &str) -> Self {
        HttpBridge {
            client: Client::new(),
            api: format!("{}/api/{username}", base_url(host)),
        }
    }

    fn lights_url(&self) -> String {
        format!("{}/lights", self.api)
    }

    fn light_url(&self, id: LightId) -> String {
        format!("{}/lights/{id}", self.api)
    }

    fn state_url(&self, id: LightId) -> String {
        format!("{}/lights/{id}/state", self.api)
    }

    fn put_state(&self, id: LightId, attribute: StateAttribute) -> Result<()> {
        let body = attribute.body();
        let context = format!("PUT lights/{id}/state {body}");
        send(self.client.put(self.state_url(id)).json(&body), &context)?;
        Ok(())
    }
}

impl BridgeClient for HttpBridge {
    fn light(&self, id: LightId) -> Result<Light> {
        let context = format!("GET lights/{id}");
        let value = send(self.client.get(self.light_url(id)), &context)
            .map_err(|e| map_light_error(id, e))?;
        parse_light(id, value)
    }

    fn lights(&self) -> Result<Vec<Light>> {
        let value = send(self.client.get(self.lights_url()), "GET lights")?;
        parse_lights(value)
    }

    fn set_on(&self, id: LightId, on: bool) -> Result<()> {
        self.put_state(id, StateAttribute::On(on))
    }

    fn set_hue(&self, id: LightId, hue: u16) -> Result<()> {
        self.put_state(id, StateAttribute::Hue(hue))
    }

    fn set_saturation(&self, id: LightId, saturation: u8) -> Result<()> {
        self.put_state(id, StateAttribute::Saturation(saturation))
    }

    fn set_brightness(&self, id: LightId, brightness: u8) -> Result<()> {
        self.put_state(id, StateAttribute::Brightness(brightness))
    }

    fn set_color_temperature(&self, id: LightId, mired: u16) -> Result<()> {
        self.put_state(id, StateAttribute::ColorTemperature(mired))
    }
}

// ── Discovery + registration ──

/// Finds bridges through the discovery service and registers users over HTTP.
pub struct HttpLocator {
    client: Client,
    discovery_url: String,
}

impl Default for HttpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpLocator {
    pub fn new() -> Self {
        HttpLocator {
            client: Client::new(),
            discovery_url: DISCOVERY_URL.into(),
        }
    }
}

impl BridgeLocator for HttpLocator {
    fn discover(&self) -> Result<String> {
        let value = send(self.client.get(&self.discovery_url), "GET discovery")?;
        parse_discovery(value)
    }

    fn create_user(&self, host: &str, devicetype: &str) -> Result<String> {
        let value = send(
            self.client
                .post(format!("{}/api", base_url(host)))
                .json(&json!({ "devicetype": devicetype })),
            "POST api",
        )?;
        parse_username(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── check_reply ──

    #[test]
    fn check_reply_passes_success() {
        let value = json!([{ "success": { "/lights/1/state/on": true } }]);
        assert_eq!(check_reply(value.clone()).unwrap(), value);
    }

    #[test]
    fn check_reply_passes_objects() {
        let value = json!({ "1": { "name": "Desk" } });
        assert!(check_reply(value).is_ok());
    }

    #[test]
    fn check_reply_surfaces_error() {
        let value = json!([{
            "error": {
                "type": 1,
                "address": "/lights",
                "description": "unauthorized user"
            }
        }]);
        match check_reply(value) {
            Err(DeviceError::Api {
                kind,
                address,
                description,
            }) => {
                assert_eq!(kind, 1);
                assert_eq!(address, "/lights");
                assert_eq!(description, "unauthorized user");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn check_reply_finds_error_after_success() {
        let value = json!([
            { "success": { "/lights/1/state/on": true } },
            { "error": { "type": 7, "address": "/lights/1/state/ct", "description": "invalid value" } }
        ]);
        assert!(matches!(
            check_reply(value),
            Err(DeviceError::Api { kind: 7, .. })
        ));
    }

    // ── lights ──

    #[test]
    fn parse_lights_sorted_by_id() {
        let value = json!({
            "10": { "name": "Porch", "state": { "on": false } },
            "2": { "name": "Desk", "state": { "on": true, "bri": 100, "hue": 300, "sat": 20 } }
        });
        let lights = parse_lights(value).unwrap();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0].id, 2);
        assert_eq!(lights[0].name, "Desk");
        assert!(lights[0].state.on);
        assert_eq!(lights[0].state.brightness, 100);
        assert_eq!(lights[1].id, 10);
    }

    #[test]
    fn parse_lights_rejects_non_numeric_id() {
        let value = json!({ "abc": { "name": "X" } });
        assert!(matches!(parse_lights(value), Err(DeviceError::Decode(_))));
    }

    #[test]
    fn parse_light_reads_state() {
        let value = json!({
            "name": "Kitchen",
            "type": "Extended color light",
            "state": { "on": true, "bri": 254, "hue": 8418, "sat": 140, "ct": 366, "reachable": true }
        });
        let light = parse_light(4, value).unwrap();
        assert_eq!(light.id, 4);
        assert_eq!(light.name, "Kitchen");
        assert_eq!(light.state.color_temperature, 366);
    }

    // ── registration + discovery ──

    #[test]
    fn parse_username_from_success() {
        let value = json!([{ "success": { "username": "83b7780291a6ceffbe0bd049104df" } }]);
        assert_eq!(
            parse_username(&value).unwrap(),
            "83b7780291a6ceffbe0bd049104df"
        );
    }

    #[test]
    fn parse_username_missing_is_decode_error() {
        assert!(matches!(
            parse_username(&json!([])),
            Err(DeviceError::Decode(_))
        ));
    }

    #[test]
    fn parse_discovery_takes_first() {
        let value = json!([
            { "id": "001788fffe100491", "internalipaddress": "192.168.2.23" },
            { "id": "001788fffe09a168", "internalipaddress": "192.168.88.252" }
        ]);
        assert_eq!(parse_discovery(value).unwrap(), "192.168.2.23");
    }

    #[test]
    fn parse_discovery_empty_is_no_bridge() {
        assert!(matches!(
            parse_discovery(json!([])),
            Err(DeviceError::NoBridgeFound)
        ));
    }

    // ── urls ──

    #[test]
    fn base_url_adds_scheme() {
        assert_eq!(base_url("192.168.1.2"), "http://192.168.1.2");
    }

    #[test]
    fn base_url_keeps_scheme_and_trims_slash() {
        assert_eq!(base_url("https://bridge.local/"), "https://bridge.local");
    }

    #[test]
    fn bridge_api_prefix() {
        let bridge = HttpBridge::new("10.0.0.5", "user1");
        assert_eq!(bridge.api, "http://10.0.0.5/api/user1");
    }

    #[test]
    fn bridge_request_urls() {
        let bridge = HttpBridge::new("10.0.0.5", "user1");
        assert_eq!(bridge.lights_url(), "http://10.0.0.5/api/user1/lights");
        assert_eq!(bridge.light_url(3), "http://10.0.0.5/api/user1/lights/3");
        assert_eq!(
            bridge.state_url(3),
            "http://10.0.0.5/api/user1/lights/3/state"
        );
    }

    // ── state bodies ──

    #[test]
    fn state_bodies_use_bridge_field_names() {
        assert_eq!(StateAttribute::On(true).body(), json!({ "on": true }));
        assert_eq!(StateAttribute::Hue(46000).body(), json!({ "hue": 46000 }));
        assert_eq!(StateAttribute::Saturation(254).body(), json!({ "sat": 254 }));
        assert_eq!(StateAttribute::Brightness(127).body(), json!({ "bri": 127 }));
        assert_eq!(
            StateAttribute::ColorTemperature(550).body(),
            json!({ "ct": 550 })
        );
    }

    #[test]
    fn state_body_carries_one_attribute() {
        let body = StateAttribute::Saturation(10).body();
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    // ── light error mapping ──

    #[test]
    fn resource_not_available_maps_to_light_not_found() {
        let reply = json!([{
            "error": {
                "type": 3,
                "address": "/lights/9",
                "description": "resource, /lights/9, not available"
            }
        }]);
        let err = check_reply(reply).unwrap_err();
        assert!(matches!(
            map_light_error(9, err),
            DeviceError::LightNotFound(9)
        ));
    }

    #[test]
    fn other_api_errors_pass_through() {
        let err = DeviceError::Api {
            kind: 1,
            address: "/lights/2".into(),
            description: "unauthorized user".into(),
        };
        assert!(matches!(
            map_light_error(2, err),
            DeviceError::Api { kind: 1, .. }
        ));
    }

    #[test]
    fn transport_errors_pass_through() {
        let err = DeviceError::Transport("GET lights/2: connection refused".into());
        assert!(matches!(
            map_light_error(2, err),
            DeviceError::Transport(_)
        ));
    }
}
