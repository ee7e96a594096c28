use serde_json::{json, Value};

/// Pixel rectangle in absolute screen coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }

    /// The wire form: `[x, y, width, height]`.
    pub fn to_value(&self) -> Value {
        json!([self.x, self.y, self.width, self.height])
    }
}

/// A captured frame as the wire payload: base64 PNG plus explicit pixel
/// dimensions. PNG is lossless, so decoding reproduces exact pixel values.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub base64: String,
    pub width: u32,
    pub height: u32,
}

/// A template-match hit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateMatch {
    pub region: Region,
}

impl TemplateMatch {
    pub fn center(&self) -> (i32, i32) {
        self.region.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_center() {
        let region = Region::new(10, 20, 100, 50);
        assert_eq!(region.center(), (60, 45));
    }

    #[test]
    fn test_region_wire_form() {
        let region = Region::new(1, 2, 3, 4);
        assert_eq!(region.to_value(), json!([1, 2, 3, 4]));
    }
}
