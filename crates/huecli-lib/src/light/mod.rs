//! Light control — named colors and ensure-on attribute writes.

mod color;
mod ops;

pub use color::{Color, ColorName, MAX_LEVEL, brightness_from_percent, resolve_color};
pub use ops::{
    apply_color, ensure_on, list_remote_lights, set_brightness, set_color_temperature, set_hue,
    set_saturation, switch_power,
};
