//! Unified error type for the huecli-lib crate.
//!
//! [`HuecliError`] wraps [`DeviceError`] (anything the bridge reports or the
//! transport fails on) and the local I/O and config failures of the config
//! store. `From` impls allow `?` to propagate across module boundaries.

use std::fmt;

use crate::bridge::DeviceError;

/// Unified error type for huecli-lib operations.
#[derive(Debug)]
pub enum HuecliError {
    /// Bridge or light remote-call error.
    Device(DeviceError),
    /// Standard I/O error (config directory or file access).
    Io(std::io::Error),
    /// Config (de)serialization error.
    Config(String),
    /// A bridge command was issued before `init` stored a host and credential.
    NotInitialized,
}

impl fmt::Display for HuecliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuecliError::Device(e) => write!(f, "{e}"),
            HuecliError::Io(e) => write!(f, "I/O error: {e}"),
            HuecliError::Config(e) => write!(f, "Config error: {e}"),
            HuecliError::NotInitialized => {
                write!(f, "No bridge configured (run `huecli init` first)")
            }
        }
    }
}

impl std::error::Error for HuecliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HuecliError::Device(e) => Some(e),
            HuecliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for HuecliError {
    fn from(e: DeviceError) -> Self {
        HuecliError::Device(e)
    }
}

impl From<std::io::Error> for HuecliError {
    fn from(e: std::io::Error) -> Self {
        HuecliError::Io(e)
    }
}

/// Crate-level Result alias using [`HuecliError`].
pub type Result<T> = std::result::Result<T, HuecliError>;
