//! Screen verbs: capture, template search, geometry.

use serde_json::{json, Value};

use super::{opt_f64, require_str, DEFAULT_CONFIDENCE};
use crate::desktop::{Desktop, Region};
use crate::error::{AppError, Result};

/// `screenshot` - capture the screen, or a `region` of it, as base64 PNG.
pub fn screenshot(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let region = region_param(params)?;
    let payload = desktop.capture(region)?;
    Ok(json!({
        "image": payload.base64,
        "width": payload.width,
        "height": payload.height,
    }))
}

/// `locate` - template-match the image at `imagePath` against the current
/// screen. A clean search with no hit is a success with `found: false`.
pub fn locate(desktop: &mut dyn Desktop, params: &Value) -> Result<Value> {
    let path = require_str(params, "imagePath")?;
    let confidence = opt_f64(params, "confidence", DEFAULT_CONFIDENCE)?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(AppError::invalid("confidence must be between 0 and 1"));
    }

    match desktop.locate(path, confidence)? {
        Some(hit) => {
            let (x, y) = hit.center();
            Ok(json!({
                "found": true,
                "x": x,
                "y": y,
                "region": hit.region.to_value(),
            }))
        }
        None => Ok(json!({ "found": false })),
    }
}

/// `screensize` - primary display dimensions.
pub fn screen_size(desktop: &mut dyn Desktop) -> Result<Value> {
    let (width, height) = desktop.screen_size()?;
    Ok(json!({ "width": width, "height": height }))
}

/// Optional `region: [x, y, width, height]`.
fn region_param(params: &Value) -> Result<Option<Region>> {
    let value = match params.get("region") {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let invalid = || AppError::invalid("region must be [x, y, width, height]");
    let items = value.as_array().ok_or_else(invalid)?;
    if items.len() != 4 {
        return Err(invalid());
    }

    let x = items[0].as_i64().and_then(|n| i32::try_from(n).ok());
    let y = items[1].as_i64().and_then(|n| i32::try_from(n).ok());
    let width = items[2].as_u64().and_then(|n| u32::try_from(n).ok());
    let height = items[3].as_u64().and_then(|n| u32::try_from(n).ok());

    match (x, y, width, height) {
        (Some(x), Some(y), Some(width), Some(height)) => {
            Ok(Some(Region::new(x, y, width, height)))
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::testing::ScriptedDesktop;
    use crate::desktop::TemplateMatch;

    #[test]
    fn test_screenshot_full_screen() {
        let mut desktop = ScriptedDesktop::new();
        let result = screenshot(&mut desktop, &json!({})).unwrap();
        assert_eq!(result["width"], 1920);
        assert_eq!(result["height"], 1080);
        assert!(result["image"].as_str().is_some_and(|s| !s.is_empty()));
        assert_eq!(desktop.calls, vec!["capture(None)"]);
    }

    #[test]
    fn test_screenshot_with_region() {
        let mut desktop = ScriptedDesktop::new();
        let result = screenshot(&mut desktop, &json!({"region": [10, 20, 300, 200]})).unwrap();
        assert_eq!(result["width"], 300);
        assert_eq!(result["height"], 200);
    }

    #[test]
    fn test_screenshot_rejects_malformed_region() {
        let mut desktop = ScriptedDesktop::new();
        assert!(screenshot(&mut desktop, &json!({"region": [10, 20]})).is_err());
        assert!(screenshot(&mut desktop, &json!({"region": "full"})).is_err());
        assert!(screenshot(&mut desktop, &json!({"region": [0, 0, -5, 5]})).is_err());
        assert!(desktop.calls.is_empty());
    }

    #[test]
    fn test_locate_requires_image_path() {
        let mut desktop = ScriptedDesktop::new();
        let err = locate(&mut desktop, &json!({})).unwrap_err();
        assert_eq!(err.message(), "imagePath required");
        assert!(desktop.calls.is_empty());
    }

    #[test]
    fn test_locate_miss_is_success() {
        let mut desktop = ScriptedDesktop::new();
        let result = locate(&mut desktop, &json!({"imagePath": "/tmp/button.png"})).unwrap();
        assert_eq!(result, json!({"found": false}));
        assert_eq!(desktop.calls, vec!["locate(/tmp/button.png, 0.8)"]);
    }

    #[test]
    fn test_locate_hit_reports_center_and_region() {
        let mut desktop = ScriptedDesktop::new();
        desktop.locate_hit = Some(TemplateMatch {
            region: Region::new(100, 50, 40, 20),
        });
        let result =
            locate(&mut desktop, &json!({"imagePath": "/tmp/button.png", "confidence": 0.9}))
                .unwrap();
        assert_eq!(result["found"], true);
        assert_eq!(result["x"], 120);
        assert_eq!(result["y"], 60);
        assert_eq!(result["region"], json!([100, 50, 40, 20]));
    }

    #[test]
    fn test_locate_rejects_out_of_range_confidence() {
        let mut desktop = ScriptedDesktop::new();
        assert!(
            locate(&mut desktop, &json!({"imagePath": "a.png", "confidence": 1.5})).is_err()
        );
    }

    #[test]
    fn test_screen_size() {
        let mut desktop = ScriptedDesktop::new();
        let result = screen_size(&mut desktop).unwrap();
        assert_eq!(result, json!({"width": 1920, "height": 1080}));
    }
}
