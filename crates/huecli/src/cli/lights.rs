//! `lights` subcommand — list every light the bridge knows.

use std::path::Path;

use super::{Config, LightSummary, LightsOutput, Result, context, light, print_json};

fn format_light(l: &LightSummary) -> String {
    format!("ID: {}  name: {}", l.id, l.name)
}

fn print_lights(lights: Vec<LightSummary>, json: bool) -> Result<()> {
    if json {
        return print_json(&LightsOutput {
            count: lights.len(),
            lights,
        });
    }
    if lights.is_empty() {
        println!("The bridge reports no lights.");
        return Ok(());
    }
    for l in &lights {
        println!("{}", format_light(l));
    }
    Ok(())
}

pub(super) fn cmd_lights(path: &Path, json: bool) -> Result<()> {
    let config = Config::load_from(path)?;
    let bridge = context::open_bridge(&config)?;
    let lights = light::list_remote_lights(&bridge)?;
    print_lights(lights, json)
}
