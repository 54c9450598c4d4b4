//! Application configuration — TOML snapshot under the user's home directory.
//!
//! The whole file is rewritten on every save. There is no schema version and
//! no file lock: two invocations racing on the same file is unsupported.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bridge::LightId;
use crate::error::{HuecliError, Result};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# huecli configuration — rewritten by `huecli init`, `add` and `remove`.\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Credential issued by the bridge during `init`. Empty until registered.
    #[serde(default)]
    pub application_id: String,

    /// Network address of the bridge. Empty until registered.
    #[serde(default)]
    pub bridge_host: String,

    /// Managed light IDs in insertion order. Never contains duplicates.
    #[serde(default)]
    pub lights: Vec<LightId>,
}

impl Config {
    /// Per-user config directory (`~/hue/config`).
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join("hue").join("config"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// True once `init` has stored both a host and a credential.
    pub fn is_initialized(&self) -> bool {
        !self.application_id.is_empty() && !self.bridge_host.is_empty()
    }

    /// Add a light to the managed set. Returns false if it was already present.
    pub fn add_light(&mut self, id: LightId) -> bool {
        if self.lights.contains(&id) {
            return false;
        }
        self.lights.push(id);
        true
    }

    /// Remove a light from the managed set, keeping the order of the rest.
    /// Returns false if it was not present.
    pub fn remove_light(&mut self, id: LightId) -> bool {
        let before = self.lights.len();
        self.lights.retain(|&l| l != id);
        self.lights.len() != before
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// Parent directories are created as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized =
            toml::to_string_pretty(self).map_err(|e| HuecliError::Config(e.to_string()))?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result.map_err(Into::into)
            }
        }
    }

    /// Load config from an arbitrary path.
    ///
    /// If the file does not exist a default config is written there first and
    /// then read back, so the file always exists after a successful load.
    /// Repeated light IDs in a hand-edited file are dropped, keeping the first.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.try_exists()? {
            log::info!("creating default config at {}", path.display());
            Self::default().save_to(path)?;
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| HuecliError::Config(format!("{}: {e}", path.display())))?;
        config.dedup_lights();
        Ok(config)
    }

    fn dedup_lights(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let before = self.lights.len();
        self.lights.retain(|&id| seen.insert(id));
        if self.lights.len() != before {
            log::warn!("config lists some lights more than once; ignoring repeats");
        }
    }

    /// [`Config::path`], or an I/O error when the home directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        Self::path().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not resolve home directory",
            )
            .into()
        })
    }
}
