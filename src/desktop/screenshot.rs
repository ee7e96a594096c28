//! Cross-platform screenshot capture using xcap
//!
//! Captures the primary monitor (optionally cropped to a region) and encodes
//! frames as base64 PNG payloads for the wire.

use anyhow::{anyhow, Result};
use image::RgbaImage;
use xcap::Monitor;

use super::types::{ImagePayload, Region};

/// Screen capture utilities
pub struct ScreenCapture;

impl ScreenCapture {
    pub fn new() -> Self {
        Self
    }

    /// Capture the primary monitor, cropped to `region` when given, and
    /// encode it as a wire payload.
    pub fn capture(&self, region: Option<Region>) -> Result<ImagePayload> {
        let frame = self.capture_raw(region)?;
        let base64 = encode_png(&frame)?;
        Ok(ImagePayload {
            base64,
            width: frame.width(),
            height: frame.height(),
        })
    }

    /// Capture the primary monitor as raw pixels, cropped to `region` when
    /// given.
    pub fn capture_raw(&self, region: Option<Region>) -> Result<RgbaImage> {
        let monitor = primary_monitor()?;
        let frame = monitor
            .capture_image()
            .map_err(|e| anyhow!("Failed to capture screen: {}", e))?;

        match region {
            Some(region) => crop(&frame, region),
            None => Ok(frame),
        }
    }

    /// Primary monitor dimensions in pixels.
    pub fn screen_size(&self) -> Result<(u32, u32)> {
        let monitor = primary_monitor()?;
        Ok((monitor.width(), monitor.height()))
    }
}

impl Default for ScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

fn primary_monitor() -> Result<Monitor> {
    let monitors = Monitor::all().map_err(|e| anyhow!("Failed to get monitors: {}", e))?;
    monitors
        .into_iter()
        .find(|m| m.is_primary())
        .ok_or_else(|| anyhow!("No primary monitor found"))
}

fn crop(frame: &RgbaImage, region: Region) -> Result<RgbaImage> {
    let (fw, fh) = frame.dimensions();
    if region.x < 0 || region.y < 0 {
        return Err(anyhow!(
            "capture region origin ({}, {}) is outside the screen",
            region.x,
            region.y
        ));
    }
    let (x, y) = (region.x as u32, region.y as u32);
    if x + region.width > fw || y + region.height > fh {
        return Err(anyhow!(
            "capture region {}x{}+{}+{} exceeds screen bounds {}x{}",
            region.width,
            region.height,
            region.x,
            region.y,
            fw,
            fh
        ));
    }
    Ok(image::imageops::crop_imm(frame, x, y, region.width, region.height).to_image())
}

/// Encode raw pixels as a base64 PNG string.
pub fn encode_png(image: &RgbaImage) -> Result<String> {
    use base64::Engine;
    use image::ImageEncoder;
    use std::io::Cursor;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = image::codecs::png::PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| anyhow!("Failed to encode PNG: {}", e))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(buffer.into_inner()))
}
