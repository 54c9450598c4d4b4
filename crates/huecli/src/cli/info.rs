//! `info` subcommand — show registration and the state of managed lights.

use std::path::Path;

use super::{
    BridgeContext, Config, InfoOutput, Light, LightInfoJson, Result, context, format_kv,
    format_kv_indent, kv_width, print_json,
};

/// Human-readable info lines.
fn format_info(config: &Config, lights: &[Light]) -> Vec<String> {
    let w = kv_width(
        &["App ID:", "Bridge host:"],
        &["Name:", "Power:", "Hue:", "Saturation:", "Brightness:", "Temperature:"],
    );
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(not registered)".to_string()
        } else {
            s.to_string()
        }
    };

    let mut out = vec![
        format_kv("App ID:", or_unset(&config.application_id), w),
        format_kv("Bridge host:", or_unset(&config.bridge_host), w),
    ];
    if lights.is_empty() {
        out.push(String::new());
        out.push("No managed lights (add one with `huecli add --id N`).".into());
    }
    for l in lights {
        out.push(String::new());
        out.push(format!("Light {}:", l.id));
        out.push(format_kv_indent("Name:", &l.name, w));
        out.push(format_kv_indent(
            "Power:",
            if l.state.on { "ON" } else { "OFF" },
            w,
        ));
        out.push(format_kv_indent("Hue:", l.state.hue, w));
        out.push(format_kv_indent("Saturation:", l.state.saturation, w));
        out.push(format_kv_indent("Brightness:", l.state.brightness, w));
        out.push(format_kv_indent("Temperature:", l.state.color_temperature, w));
    }
    out
}

fn print_info(path: &Path, config: &Config, lights: &[Light], json: bool) -> Result<()> {
    if json {
        return print_json(&InfoOutput {
            config_file: path.display().to_string(),
            application_id: config.application_id.clone(),
            bridge_host: config.bridge_host.clone(),
            lights: lights.iter().map(LightInfoJson::from).collect(),
        });
    }
    for line in format_info(config, lights) {
        println!("{line}");
    }
    Ok(())
}

pub(super) fn cmd_info(path: &Path, json: bool) -> Result<()> {
    let config = Config::load_from(path)?;
    // Nothing to fetch when no lights are managed, so skip the bridge.
    let lights = if config.lights.is_empty() {
        Vec::new()
    } else {
        let bridge = context::open_bridge(&config)?;
        BridgeContext::resolve(bridge, &config.lights)?.lights
    };
    print_info(path, &config, &lights, json)
}
