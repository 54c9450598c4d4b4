//! huecli — control Philips Hue lights through a local bridge.
//!
//! One subcommand per invocation. Exit codes: 0 success, 1 bridge or config
//! failure, 2 usage error, 5 flag-parsing failure.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

mod cli;

#[derive(Parser)]
#[command(
    name = "huecli",
    version,
    about = "Control Philips Hue lights through a local bridge"
)]
struct Args {
    /// Output as JSON (for lights, info)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/hue/config/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Command,
}

/// Print the usage line of a single subcommand to stderr.
fn print_usage(command: &str) {
    let mut cmd = Args::command();
    if let Some(sub) = cmd.find_subcommand_mut(command) {
        eprintln!("{}", sub.render_usage());
    }
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = cli::parse_error_exit_code(e.kind());
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        config_path: args.config,
    };

    if let Err(e) = cli::run(args.command, &opts) {
        if let cli::CliError::Usage { command, .. } = &e {
            print_usage(command);
        }
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
