//! Keyboard verbs: typing, hotkey chords, raw key state.

use serde_json::Value;

use super::{empty, opt_bool, opt_f64, opt_str, require_str, DEFAULT_TYPE_INTERVAL};
use crate::desktop::{Desktop, TypingMode};
use crate::error::{AppError, Result};

/// `type` - send `text` one character at a time. `raw` selects literal
/// text entry over the keyboard-event path.
pub fn type_text(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let text = opt_str(params, "text", "")?;
    let interval = opt_f64(params, "interval", DEFAULT_TYPE_INTERVAL)?;
    let raw = opt_bool(params, "raw", false)?;
    let mode = if raw { TypingMode::Raw } else { TypingMode::Normal };
    desktop.type_text(text, interval, mode)?;
    Ok(empty())
}

/// `hotkey` - press `keys` as one combination, in listed order, releasing
/// in reverse order.
pub fn hotkey(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let keys = keys_param(params)?;
    desktop.hotkey(&keys)?;
    Ok(empty())
}

/// `keydown` - press and hold.
pub fn key_down(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let key = require_str(params, "key")?;
    desktop.key_down(key)?;
    Ok(empty())
}

/// `keyup` - release a previously held key.
pub fn key_up(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let key = require_str(params, "key")?;
    desktop.key_up(key)?;
    Ok(empty())
}

fn keys_param(params: &Value) -> Result<Vec<String>> {
    let value = match params.get("keys") {
        None | Some(Value::Null) => return Err(AppError::MissingParam("keys")),
        Some(value) => value,
    };
    let items = value
        .as_array()
        .ok_or_else(|| AppError::invalid("keys must be an array of key names"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::invalid("keys must be an array of key names"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::testing::ScriptedDesktop;
    use serde_json::json;

    #[test]
    fn test_type_defaults_to_normal_mode() {
        let mut desktop = ScriptedDesktop::new();
        type_text(&mut desktop, &json!({"text": "hi"})).unwrap();
        assert_eq!(desktop.calls, vec![r#"type_text("hi", 0.02, Normal)"#]);
    }

    #[test]
    fn test_type_raw_mode() {
        let mut desktop = ScriptedDesktop::new();
        type_text(&mut desktop, &json!({"text": "hi", "raw": true, "interval": 0.0})).unwrap();
        assert_eq!(desktop.calls, vec![r#"type_text("hi", 0, Raw)"#]);
    }

    #[test]
    fn test_hotkey_requires_key_list() {
        let mut desktop = ScriptedDesktop::new();
        assert_eq!(
            hotkey(&mut desktop, &json!({})).unwrap_err().message(),
            "keys required"
        );
        assert!(hotkey(&mut desktop, &json!({"keys": "ctrl"})).is_err());
        assert!(hotkey(&mut desktop, &json!({"keys": ["ctrl", 3]})).is_err());
        assert!(desktop.calls.is_empty());

        hotkey(&mut desktop, &json!({"keys": ["ctrl", "c"]})).unwrap();
        assert_eq!(desktop.calls, vec![r#"hotkey(["ctrl", "c"])"#]);
    }

    #[test]
    fn test_keydown_keyup_require_key() {
        let mut desktop = ScriptedDesktop::new();
        assert_eq!(
            key_down(&mut desktop, &json!({})).unwrap_err().message(),
            "key required"
        );
        key_down(&mut desktop, &json!({"key": "shift"})).unwrap();
        key_up(&mut desktop, &json!({"key": "shift"})).unwrap();
        assert_eq!(desktop.calls, vec!["key_down(shift)", "key_up(shift)"]);
    }
}
