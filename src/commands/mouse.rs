//! Pointer verbs: click variants, movement, scrolling, dragging.

use serde_json::{json, Value};

use super::{
    button_param, empty, opt_f64, opt_i32, opt_u32, point_opt, require_i32, DEFAULT_CLICK_COUNT,
    DEFAULT_DRAG_DURATION, DEFAULT_MOVE_DURATION, DEFAULT_SCROLL_AMOUNT,
};
use crate::desktop::{Desktop, MouseButton};
use crate::error::Result;

/// `click` - click at `(x, y)` or, without coordinates, in place.
pub fn click(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let at = point_opt(params)?;
    let button = button_param(params)?;
    let clicks = opt_u32(params, "clicks", DEFAULT_CLICK_COUNT)?;
    desktop.click(at, button, clicks)?;
    Ok(empty())
}

/// `doubleclick`
pub fn double_click(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let at = point_opt(params)?;
    desktop.click(at, MouseButton::Left, 2)?;
    Ok(empty())
}

/// `rightclick`
pub fn right_click(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let at = point_opt(params)?;
    desktop.click(at, MouseButton::Right, 1)?;
    Ok(empty())
}

/// `moveto` - move the pointer, interpolated over `duration` seconds.
pub fn move_to(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let x = require_i32(params, "x")?;
    let y = require_i32(params, "y")?;
    let duration = opt_f64(params, "duration", DEFAULT_MOVE_DURATION)?;
    desktop.move_to(x, y, duration)?;
    Ok(empty())
}

/// `scroll` - wheel by `amount` notches; sign selects the direction.
pub fn scroll(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let amount = match opt_i32(params, "amount")? {
        Some(amount) => amount,
        None => DEFAULT_SCROLL_AMOUNT,
    };
    let at = point_opt(params)?;
    desktop.scroll(amount, at)?;
    Ok(empty())
}

/// `drag` - move to the origin, then drag to the target over `duration`.
pub fn drag(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let from_x = require_i32(params, "fromX")?;
    let from_y = require_i32(params, "fromY")?;
    let to_x = require_i32(params, "toX")?;
    let to_y = require_i32(params, "toY")?;
    let duration = opt_f64(params, "duration", DEFAULT_DRAG_DURATION)?;
    let button = button_param(params)?;
    desktop.drag((from_x, from_y), (to_x, to_y), duration, button)?;
    Ok(empty())
}

/// `mousepos` - read the current pointer position.
pub fn mouse_pos(desktop: &mut dyn Desktop) -> Result<Value> {
    let (x, y) = desktop.pointer_position()?;
    Ok(json!({ "x": x, "y": y }))
}
