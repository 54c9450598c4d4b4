//! CLI subcommands — registration, managed-light bookkeeping, light control.

mod change;
mod info;
mod init;
mod lights;
mod manage;
mod switch;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use clap::error::ErrorKind;
use serde::Serialize;

pub(super) use huecli_lib::HuecliError;
pub(super) use huecli_lib::bridge::{BridgeClient, Light, LightId, LightSummary};
pub(super) use huecli_lib::config::Config;
pub(super) use huecli_lib::context::{self, BridgeContext};
pub(super) use huecli_lib::light;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_PARSE: i32 = 5;

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn format_kv_indent(key: &str, value: impl fmt::Display, w: usize) -> String {
    format!("  {key:<width$}{value}", width = w.saturating_sub(2))
}

/// Pretty-print a JSON output struct to stdout.
pub(super) fn print_json(output: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(output).map_err(json_error)?;
    println!("{json}");
    Ok(())
}

fn json_error(e: serde_json::Error) -> HuecliError {
    HuecliError::Io(std::io::Error::other(e))
}

// ── Errors ──

/// Dispatcher error: either the invocation itself was wrong, or running it failed.
#[derive(Debug)]
pub enum CliError {
    /// Missing or invalid argument for `command`. Reported with its usage line.
    Usage {
        command: &'static str,
        message: String,
    },
    /// Config store or bridge failure.
    Run(HuecliError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => EXIT_USAGE,
            CliError::Run(_) => EXIT_FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage { message, .. } => write!(f, "argument error: {message}"),
            CliError::Run(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<HuecliError> for CliError {
    fn from(e: HuecliError) -> Self {
        CliError::Run(e)
    }
}

impl From<huecli_lib::bridge::DeviceError> for CliError {
    fn from(e: huecli_lib::bridge::DeviceError) -> Self {
        CliError::Run(e.into())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for a clap parse failure.
///
/// Help and version are successes; a missing or unknown subcommand is a
/// usage error; anything else (bad value, unknown flag) is a flag-parsing error.
pub fn parse_error_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => EXIT_USAGE,
        _ => EXIT_PARSE,
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct LightsOutput {
    pub count: usize,
    pub lights: Vec<LightSummary>,
}

#[derive(Serialize)]
pub(super) struct InfoOutput {
    pub config_file: String,
    pub application_id: String,
    pub bridge_host: String,
    pub lights: Vec<LightInfoJson>,
}

#[derive(Serialize)]
pub(super) struct LightInfoJson {
    pub id: LightId,
    pub name: String,
    pub on: bool,
    pub hue: u16,
    pub saturation: u8,
    pub brightness: u8,
    pub color_temperature: u16,
}

impl From<&Light> for LightInfoJson {
    fn from(light: &Light) -> Self {
        LightInfoJson {
            id: light.id,
            name: light.name.clone(),
            on: light.state.on,
            hue: light.state.hue,
            saturation: light.state.saturation,
            brightness: light.state.brightness,
            color_temperature: light.state.color_temperature,
        }
    }
}

// ── Commands ──

/// Global options shared by every subcommand.
pub struct Options {
    pub json: bool,
    pub config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Discover the bridge and register this app (press the bridge's link button first)
    Init,

    /// List every light known to the bridge
    Lights,

    /// Add a light to the managed set
    Add {
        /// ID of the light to add
        #[arg(long)]
        id: Option<LightId>,
    },

    /// Remove a light from the managed set
    Remove {
        /// ID of the light to remove
        #[arg(long)]
        id: Option<LightId>,
    },

    /// Change the color of managed lights
    Change {
        /// Color name: red, orange, yellow, green, cyan, blue, purple, pink, white, mood
        #[arg(long, default_value = "")]
        color: String,
        /// Brightness percentage (1-100; 0 keeps the color's own brightness)
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
        brightness: u8,
        /// Only change this light (0 = every managed light)
        #[arg(long, default_value_t = 0)]
        id: LightId,
    },

    /// Toggle power on every managed light
    Switch,

    /// Show app registration and managed light state
    Info,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

/// Require a nonzero `--id` for `command`.
fn require_id(command: &'static str, id: Option<LightId>) -> Result<LightId> {
    match id {
        Some(id) if id != 0 => Ok(id),
        _ => Err(CliError::Usage {
            command,
            message: "light id missing".into(),
        }),
    }
}

/// Resolve the config file path: `--config` if given, else the per-user default.
fn config_path(custom: Option<&Path>) -> Result<PathBuf> {
    match custom {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(Config::default_path()?),
    }
}

pub fn run(cmd: Command, opts: &Options) -> Result<()> {
    let json = opts.json;
    match cmd {
        Command::Init => {
            if json {
                warn_json_unsupported("init");
            }
            init::cmd_init(&config_path(opts.config_path.as_deref())?)
        }
        Command::Lights => lights::cmd_lights(&config_path(opts.config_path.as_deref())?, json),
        Command::Add { id } => {
            if json {
                warn_json_unsupported("add");
            }
            let id = require_id("add", id)?;
            manage::cmd_add(&config_path(opts.config_path.as_deref())?, id)
        }
        Command::Remove { id } => {
            if json {
                warn_json_unsupported("remove");
            }
            let id = require_id("remove", id)?;
            manage::cmd_remove(&config_path(opts.config_path.as_deref())?, id)
        }
        Command::Change {
            color,
            brightness,
            id,
        } => {
            if json {
                warn_json_unsupported("change");
            }
            change::cmd_change(
                &config_path(opts.config_path.as_deref())?,
                &color,
                brightness,
                id,
            )
        }
        Command::Switch => {
            if json {
                warn_json_unsupported("switch");
            }
            switch::cmd_switch(&config_path(opts.config_path.as_deref())?)
        }
        Command::Info => info::cmd_info(&config_path(opts.config_path.as_deref())?, json),
    }
}
