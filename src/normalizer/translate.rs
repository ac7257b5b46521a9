//! Per-family delta rules.
//!
//! Every function here is a pure policy over one raw event; the normalizer owns the
//! state (baseline touch point, totals) and decides when to dispatch.

use crate::config::Config;
use crate::event::{
    DeltaMode, MouseWheelEvent, Point, WheelEvent, KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP,
};

/// Horizontal and vertical movement attributed to one raw event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

impl Delta {
    pub const ZERO: Delta = Delta { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// Hosts leave prefixed wheel fields at zero when they carry no information.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Standard wheel: prefer the prefixed deltas, otherwise invert the standard ones.
pub fn wheel_delta(event: &WheelEvent, config: &Config, line_delta_quirk: bool) -> Delta {
    let mut delta = Delta::new(
        present(event.wheel_delta_x).unwrap_or(-event.delta_x),
        present(event.wheel_delta_y).unwrap_or(-event.delta_y),
    );

    if line_delta_quirk && event.delta_mode == DeltaMode::Line {
        delta.x *= config.firefox_multiplier;
        delta.y *= config.firefox_multiplier;
    }

    delta.x *= config.mouse_multiplier;
    delta.y *= config.mouse_multiplier;
    delta
}

/// Legacy mouse wheel, taken as reported.
pub fn mouse_wheel_delta(event: &MouseWheelEvent) -> Delta {
    Delta::new(
        present(event.wheel_delta_x).unwrap_or(0.0),
        present(event.wheel_delta_y).unwrap_or(event.wheel_delta),
    )
}

/// Incremental drag between the previous and the current primary touch point.
pub fn touch_delta(baseline: Point, current: Point, touch_multiplier: f64) -> Delta {
    Delta::new(
        (current.x - baseline.x) * touch_multiplier,
        (current.y - baseline.y) * touch_multiplier,
    )
}

/// Arrow keys move one step along their axis; every other key yields zero.
pub fn key_delta(key_code: u32, key_step: f64) -> Delta {
    let mut delta = Delta::ZERO;
    match key_code {
        KEY_LEFT => delta.x = -key_step,
        KEY_RIGHT => delta.x = key_step,
        KEY_UP => delta.y = key_step,
        KEY_DOWN => delta.y = -key_step,
        _ => {}
    }
    delta
}

/// Key presses only dispatch when both axes moved.
///
/// A single key code can only ever set one axis, so keyboard input never dispatches.
/// This mirrors long-standing behavior that downstream users may depend on; it is
/// pinned by tests until the intended rule is confirmed.
pub fn key_dispatches(delta: Delta) -> bool {
    delta.x != 0.0 && delta.y != 0.0
}
