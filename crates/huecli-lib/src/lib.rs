//! huecli — command-line control for Philips Hue lights over a local bridge.

pub mod bridge;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod light;

pub use error::HuecliError;
