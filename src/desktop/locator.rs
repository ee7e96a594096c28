//! Template matching against captured frames.
//!
//! Best-effort grayscale search: the template slides across the screen
//! image and the best-scoring offset wins, provided its root-mean-square
//! pixel similarity meets the confidence threshold. Offsets are pruned as
//! soon as their accumulated error exceeds the best candidate so far, so
//! mismatching positions are rejected after a handful of pixels.

use anyhow::{anyhow, Result};
use image::{GrayImage, RgbaImage};

use super::types::{Region, TemplateMatch};

/// Search `screen` for `template`. `confidence` is a similarity threshold
/// in `[0, 1]`; 1.0 demands a pixel-exact match.
pub fn locate(
    screen: &RgbaImage,
    template: &RgbaImage,
    confidence: f64,
) -> Result<Option<TemplateMatch>> {
    let (sw, sh) = screen.dimensions();
    let (tw, th) = template.dimensions();

    if tw == 0 || th == 0 {
        return Err(anyhow!("template image is empty"));
    }
    if tw > sw || th > sh {
        return Err(anyhow!(
            "template {}x{} is larger than the screen {}x{}",
            tw,
            th,
            sw,
            sh
        ));
    }

    let screen_gray = image::imageops::grayscale(screen);
    let template_gray = image::imageops::grayscale(template);

    let pixel_count = (tw * th) as f64;
    // similarity = 1 - rms/255, so the threshold bounds the total squared
    // error an offset may accumulate.
    let max_rms = (1.0 - confidence.clamp(0.0, 1.0)) * 255.0;
    let error_budget = max_rms * max_rms * pixel_count;

    let mut best: Option<(f64, u32, u32)> = None;
    let mut bound = error_budget;

    for y in 0..=(sh - th) {
        for x in 0..=(sw - tw) {
            if let Some(error) = error_at(&screen_gray, &template_gray, x, y, bound) {
                if best.map_or(true, |(b, _, _)| error < b) {
                    bound = error;
                    best = Some((error, x, y));
                }
            }
        }
    }

    Ok(best.map(|(_, x, y)| TemplateMatch {
        region: Region::new(x as i32, y as i32, tw, th),
    }))
}

/// Total squared error of `template` placed at `(x, y)`, or `None` once it
/// exceeds `bound`.
fn error_at(screen: &GrayImage, template: &GrayImage, x: u32, y: u32, bound: f64) -> Option<f64> {
    let sw = screen.width() as usize;
    let (tw, th) = (template.width() as usize, template.height() as usize);
    let screen_px = screen.as_raw();
    let template_px = template.as_raw();

    let mut error = 0.0;
    for row in 0..th {
        let screen_row = (y as usize + row) * sw + x as usize;
        let template_row = row * tw;
        for col in 0..tw {
            let diff = screen_px[screen_row + col] as f64 - template_px[template_row + col] as f64;
            error += diff * diff;
        }
        if error > bound {
            return None;
        }
    }
    Some(error)
}
