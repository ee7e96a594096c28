//! Desktop capability layer
//!
//! Platform-specific operations behind a common interface, the only surface
//! the dispatcher talks to:
//! - `InputController` - pointer and keyboard via enigo
//! - `ScreenCapture` - screen capture via xcap
//! - `locator` - template matching over captured frames
//!
//! `NativeDesktop` wires the three together; tests substitute a scripted
//! implementation of the `Desktop` trait.

pub mod input;
pub mod locator;
pub mod screenshot;
pub mod types;

use anyhow::{Context, Result};

use crate::config::SafetyConfig;

pub use input::{InputController, MouseButton, TypingMode};
pub use screenshot::ScreenCapture;
pub use types::{ImagePayload, Region, TemplateMatch};

/// The operations command handlers may perform against the host desktop.
///
/// Every method maps to one physical effect or measurement. Coordinates are
/// absolute screen pixels; the implementations decide how (and whether) to
/// reject out-of-range values.
pub trait Desktop {
    /// Move the pointer to `(x, y)`, interpolated over `duration` seconds.
    fn move_to(&mut self, x: i32, y: i32, duration: f64) -> Result<()>;

    /// Click `count` times with `button`; `at` positions the pointer first,
    /// `None` clicks in place.
    fn click(&mut self, at: Option<(i32, i32)>, button: MouseButton, count: u32) -> Result<()>;

    /// Press at `from`, move to `to` over `duration` seconds, release.
    fn drag(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        duration: f64,
        button: MouseButton,
    ) -> Result<()>;

    /// Scroll by `amount` notches (positive scrolls up), optionally moving
    /// to `at` first.
    fn scroll(&mut self, amount: i32, at: Option<(i32, i32)>) -> Result<()>;

    /// Type `text` character by character with `interval` seconds between.
    fn type_text(&mut self, text: &str, interval: f64, mode: TypingMode) -> Result<()>;

    /// Press the keys in order, release in reverse order.
    fn hotkey(&mut self, keys: &[String]) -> Result<()>;

    /// Press and hold a key.
    fn key_down(&mut self, key: &str) -> Result<()>;

    /// Release a previously held key.
    fn key_up(&mut self, key: &str) -> Result<()>;

    /// Current pointer position.
    fn pointer_position(&mut self) -> Result<(i32, i32)>;

    /// Primary display dimensions.
    fn screen_size(&mut self) -> Result<(u32, u32)>;

    /// Capture the screen (or `region` of it) as a PNG payload.
    fn capture(&mut self, region: Option<Region>) -> Result<ImagePayload>;

    /// Search the current screen for the template image at `path`.
    fn locate(&mut self, path: &str, confidence: f64) -> Result<Option<TemplateMatch>>;
}

/// The enigo/xcap-backed desktop.
pub struct NativeDesktop {
    input: InputController,
    capture: ScreenCapture,
}

impl NativeDesktop {
    pub fn new(safety: SafetyConfig) -> Result<Self> {
        Ok(Self {
            input: InputController::new(safety)?,
            capture: ScreenCapture::new(),
        })
    }
}

impl Desktop for NativeDesktop {
    fn move_to(&mut self, x: i32, y: i32, duration: f64) -> Result<()> {
        self.input.move_to(x, y, duration)
    }

    fn click(&mut self, at: Option<(i32, i32)>, button: MouseButton, count: u32) -> Result<()> {
        self.input.click(at, button, count)
    }

    fn drag(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        duration: f64,
        button: MouseButton,
    ) -> Result<()> {
        self.input.drag(from, to, duration, button)
    }

    fn scroll(&mut self, amount: i32, at: Option<(i32, i32)>) -> Result<()> {
        self.input.scroll(amount, at)
    }

    fn type_text(&mut self, text: &str, interval: f64, mode: TypingMode) -> Result<()> {
        self.input.type_text(text, interval, mode)
    }

    fn hotkey(&mut self, keys: &[String]) -> Result<()> {
        self.input.hotkey(keys)
    }

    fn key_down(&mut self, key: &str) -> Result<()> {
        self.input.key_down(key)
    }

    fn key_up(&mut self, key: &str) -> Result<()> {
        self.input.key_up(key)
    }

    fn pointer_position(&mut self) -> Result<(i32, i32)> {
        self.input.position()
    }

    fn screen_size(&mut self) -> Result<(u32, u32)> {
        self.capture.screen_size()
    }

    fn capture(&mut self, region: Option<Region>) -> Result<ImagePayload> {
        self.capture.capture(region)
    }

    fn locate(&mut self, path: &str, confidence: f64) -> Result<Option<TemplateMatch>> {
        let template = image::open(path)
            .with_context(|| format!("failed to read template image {}", path))?
            .to_rgba8();
        let screen = self.capture.capture_raw(None)?;
        locator::locate(&screen, &template, confidence)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted desktop for exercising the dispatcher and protocol loop
    //! without touching the host OS.

    use super::*;
    use anyhow::bail;

    /// Which misbehavior the fake should exhibit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum FailureMode {
        #[default]
        None,
        /// Every operation returns an error.
        Error,
        /// Every operation panics.
        Panic,
    }

    /// Records every capability call as a one-line trace entry.
    #[derive(Default)]
    pub struct ScriptedDesktop {
        pub calls: Vec<String>,
        pub failure: FailureMode,
        pub position: (i32, i32),
        pub size: (u32, u32),
        pub locate_hit: Option<TemplateMatch>,
    }

    impl ScriptedDesktop {
        pub fn new() -> Self {
            Self {
                position: (320, 240),
                size: (1920, 1080),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                failure: FailureMode::Error,
                ..Self::new()
            }
        }

        pub fn panicking() -> Self {
            Self {
                failure: FailureMode::Panic,
                ..Self::new()
            }
        }

        fn record(&mut self, call: String) -> Result<()> {
            match self.failure {
                FailureMode::Panic => panic!("scripted panic in {}", call),
                FailureMode::Error => bail!("scripted failure in {}", call),
                FailureMode::None => {
                    self.calls.push(call);
                    Ok(())
                }
            }
        }
    }

    impl Desktop for ScriptedDesktop {
        fn move_to(&mut self, x: i32, y: i32, duration: f64) -> Result<()> {
            self.record(format!("move_to({x}, {y}, {duration})"))?;
            self.position = (x, y);
            Ok(())
        }

        fn click(&mut self, at: Option<(i32, i32)>, button: MouseButton, count: u32) -> Result<()> {
            self.record(format!("click({at:?}, {button:?}, {count})"))
        }

        fn drag(
            &mut self,
            from: (i32, i32),
            to: (i32, i32),
            duration: f64,
            button: MouseButton,
        ) -> Result<()> {
            self.record(format!("drag({from:?}, {to:?}, {duration}, {button:?})"))?;
            self.position = to;
            Ok(())
        }

        fn scroll(&mut self, amount: i32, at: Option<(i32, i32)>) -> Result<()> {
            self.record(format!("scroll({amount}, {at:?})"))
        }

        fn type_text(&mut self, text: &str, interval: f64, mode: TypingMode) -> Result<()> {
            self.record(format!("type_text({text:?}, {interval}, {mode:?})"))
        }

        fn hotkey(&mut self, keys: &[String]) -> Result<()> {
            self.record(format!("hotkey({keys:?})"))
        }

        fn key_down(&mut self, key: &str) -> Result<()> {
            self.record(format!("key_down({key})"))
        }

        fn key_up(&mut self, key: &str) -> Result<()> {
            self.record(format!("key_up({key})"))
        }

        fn pointer_position(&mut self) -> Result<(i32, i32)> {
            self.record("pointer_position".to_string())?;
            Ok(self.position)
        }

        fn screen_size(&mut self) -> Result<(u32, u32)> {
            self.record("screen_size".to_string())?;
            Ok(self.size)
        }

        fn capture(&mut self, region: Option<Region>) -> Result<ImagePayload> {
            self.record(format!("capture({region:?})"))?;
            let (width, height) = match region {
                Some(region) => (region.width, region.height),
                None => self.size,
            };
            let frame = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));
            Ok(ImagePayload {
                base64: screenshot::encode_png(&frame)?,
                width,
                height,
            })
        }

        fn locate(&mut self, path: &str, confidence: f64) -> Result<Option<TemplateMatch>> {
            self.record(format!("locate({path}, {confidence})"))?;
            Ok(self.locate_hit)
        }
    }
}
