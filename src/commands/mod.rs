//! Command handlers, one function per verb.
//!
//! Handlers validate and normalize `params`, invoke desktop capabilities,
//! and return their action-specific success fields as a JSON map. Every
//! optional parameter's default is declared once here, never inline at a
//! call site.

pub mod keyboard;
pub mod mouse;
pub mod screen;

use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

use crate::desktop::MouseButton;
use crate::error::{AppError, Result};

// ============ Parameter Defaults ============

pub(crate) const DEFAULT_BUTTON: &str = "left";
pub(crate) const DEFAULT_CLICK_COUNT: u32 = 1;
pub(crate) const DEFAULT_MOVE_DURATION: f64 = 0.2;
pub(crate) const DEFAULT_DRAG_DURATION: f64 = 0.5;
pub(crate) const DEFAULT_TYPE_INTERVAL: f64 = 0.02;
pub(crate) const DEFAULT_SCROLL_AMOUNT: i32 = 3;
pub(crate) const DEFAULT_CONFIDENCE: f64 = 0.8;
pub(crate) const DEFAULT_SLEEP_SECONDS: f64 = 1.0;

// ============ Handlers Without OS Interaction ============

/// `sleep` - block this command's processing for `seconds`.
pub fn sleep(params: &Value) -> Result<Value> {
    let seconds = opt_f64(params, "seconds", DEFAULT_SLEEP_SECONDS)?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(AppError::invalid("seconds must be a non-negative number"));
    }
    thread::sleep(Duration::from_secs_f64(seconds));
    Ok(empty())
}

/// `ping` - liveness probe.
pub fn ping() -> Result<Value> {
    Ok(json!({ "pong": true }))
}

// ============ Parameter Extraction ============

pub(crate) fn empty() -> Value {
    json!({})
}

fn int_value(value: &Value) -> Option<i32> {
    if let Some(n) = value.as_i64() {
        return i32::try_from(n).ok();
    }
    // Controllers routinely send fractional coordinates; round them.
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i32)
}

pub(crate) fn require_i32(params: &Value, key: &'static str) -> Result<i32> {
    match params.get(key) {
        None | Some(Value::Null) => Err(AppError::MissingParam(key)),
        Some(value) => {
            int_value(value).ok_or_else(|| AppError::invalid(format!("{key} must be an integer")))
        }
    }
}

pub(crate) fn opt_i32(params: &Value, key: &'static str) -> Result<Option<i32>> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => int_value(value)
            .map(Some)
            .ok_or_else(|| AppError::invalid(format!("{key} must be an integer"))),
    }
}

pub(crate) fn opt_f64(params: &Value, key: &'static str, default: f64) -> Result<f64> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| AppError::invalid(format!("{key} must be a number"))),
    }
}

pub(crate) fn opt_bool(params: &Value, key: &'static str, default: bool) -> Result<bool> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| AppError::invalid(format!("{key} must be a boolean"))),
    }
}

pub(crate) fn opt_u32(params: &Value, key: &'static str, default: u32) -> Result<u32> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| AppError::invalid(format!("{key} must be a non-negative integer"))),
    }
}

pub(crate) fn require_str<'a>(params: &'a Value, key: &'static str) -> Result<&'a str> {
    match params.get(key) {
        None | Some(Value::Null) => Err(AppError::MissingParam(key)),
        Some(value) => value
            .as_str()
            .ok_or_else(|| AppError::invalid(format!("{key} must be a string"))),
    }
}

pub(crate) fn opt_str<'a>(params: &'a Value, key: &'static str, default: &'a str) -> Result<&'a str> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_str()
            .ok_or_else(|| AppError::invalid(format!("{key} must be a string"))),
    }
}

/// `(x, y)` when both are present; a lone coordinate means "current
/// pointer position", mirroring the controller-facing contract.
pub(crate) fn point_opt(params: &Value) -> Result<Option<(i32, i32)>> {
    match (opt_i32(params, "x")?, opt_i32(params, "y")?) {
        (Some(x), Some(y)) => Ok(Some((x, y))),
        _ => Ok(None),
    }
}

pub(crate) fn button_param(params: &Value) -> Result<MouseButton> {
    let name = opt_str(params, "button", DEFAULT_BUTTON)?;
    MouseButton::from_name(name)
        .ok_or_else(|| AppError::invalid(format!("unknown mouse button: {name}")))
}
