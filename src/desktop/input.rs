//! Cross-platform mouse and keyboard input using enigo
//!
//! Owns the fail-safe corner check and the timed interpolation used by
//! pointer movement, so an in-flight move/drag can be aborted by slamming
//! the cursor into a screen corner.

use anyhow::{anyhow, Result};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::thread;
use std::time::Duration;

use crate::config::SafetyConfig;

/// Cursor positions this close to a screen corner trigger the fail-safe.
const FAIL_SAFE_MARGIN: i32 = 2;

/// Interpolated pointer movement advances in slices of roughly this length.
const MOVE_STEP_SECS: f64 = 0.01;

/// Upper bound on interpolation steps for very long durations.
const MAX_MOVE_STEPS: u32 = 500;

/// Settle delay between positioning the cursor and pressing a button.
const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Delay between key events inside a hotkey chord.
const CHORD_DELAY: Duration = Duration::from_millis(20);

/// How `type` injects characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingMode {
    /// Each character goes through the keyboard-event path, so the OS
    /// applies its usual layout and modifier handling.
    Normal,
    /// Each character is placed via direct text entry; nothing is ever
    /// interpreted as a shortcut.
    Raw,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn to_enigo(self) -> Button {
        match self {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        }
    }

    /// Parse a button name from command params.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Input controller for mouse and keyboard simulation
pub struct InputController {
    enigo: Enigo,
    safety: SafetyConfig,
}

impl InputController {
    pub fn new(safety: SafetyConfig) -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("Failed to create input controller: {:?}", e))?;
        Ok(Self { enigo, safety })
    }

    // ============ Mouse Operations ============

    /// Current cursor position in absolute screen coordinates.
    pub fn position(&self) -> Result<(i32, i32)> {
        self.enigo
            .location()
            .map_err(|e| anyhow!("Failed to read mouse position: {:?}", e))
    }

    /// Move the cursor to `(x, y)`, linearly interpolated over `duration`
    /// seconds. A non-positive duration jumps in one step.
    pub fn move_to(&mut self, x: i32, y: i32, duration: f64) -> Result<()> {
        self.check_fail_safe()?;

        if duration <= 0.0 {
            self.jump_to(x, y)?;
            return self.check_fail_safe();
        }

        let (start_x, start_y) = self.position()?;
        let steps = ((duration / MOVE_STEP_SECS).ceil() as u32).clamp(1, MAX_MOVE_STEPS);
        let step_delay = Duration::from_secs_f64(duration / steps as f64);

        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let nx = start_x + ((x - start_x) as f64 * t).round() as i32;
            let ny = start_y + ((y - start_y) as f64 * t).round() as i32;
            self.jump_to(nx, ny)?;
            thread::sleep(step_delay);
            self.check_fail_safe()?;
        }

        Ok(())
    }

    /// Click `count` times with `button`, optionally moving to `at` first.
    pub fn click(&mut self, at: Option<(i32, i32)>, button: MouseButton, count: u32) -> Result<()> {
        self.check_fail_safe()?;

        if let Some((x, y)) = at {
            self.jump_to(x, y)?;
            thread::sleep(SETTLE_DELAY);
            self.check_fail_safe()?;
        }

        let btn = button.to_enigo();
        for n in 0..count {
            if n > 0 {
                thread::sleep(SETTLE_DELAY);
            }
            self.enigo
                .button(btn, Direction::Click)
                .map_err(|e| anyhow!("Failed to click: {:?}", e))?;
        }

        Ok(())
    }

    /// Scroll the wheel by `amount` notches, optionally at a position first.
    /// Positive amounts scroll up (away from the user).
    pub fn scroll(&mut self, amount: i32, at: Option<(i32, i32)>) -> Result<()> {
        self.check_fail_safe()?;

        if let Some((x, y)) = at {
            self.jump_to(x, y)?;
            thread::sleep(SETTLE_DELAY);
        }

        // enigo's vertical axis is positive-down; the wire convention is
        // positive-up, matching the wheel itself.
        self.enigo
            .scroll(-amount, Axis::Vertical)
            .map_err(|e| anyhow!("Failed to scroll: {:?}", e))
    }

    /// Press `button` at `from`, move to `to` over `duration`, release.
    /// The button is released even when the move aborts mid-flight.
    pub fn drag(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        duration: f64,
        button: MouseButton,
    ) -> Result<()> {
        self.move_to(from.0, from.1, 0.0)?;
        thread::sleep(SETTLE_DELAY);

        let btn = button.to_enigo();
        self.enigo
            .button(btn, Direction::Press)
            .map_err(|e| anyhow!("Failed to press mouse button: {:?}", e))?;

        let moved = self.move_to(to.0, to.1, duration);
        let released = self
            .enigo
            .button(btn, Direction::Release)
            .map_err(|e| anyhow!("Failed to release mouse button: {:?}", e));

        moved?;
        released
    }

    // ============ Keyboard Operations ============

    /// Type `text` one character at a time, sleeping `interval` seconds
    /// between characters.
    pub fn type_text(&mut self, text: &str, interval: f64, mode: TypingMode) -> Result<()> {
        let delay = Duration::from_secs_f64(interval.max(0.0));

        for ch in text.chars() {
            match mode {
                TypingMode::Normal => {
                    let key = match ch {
                        '\n' => Key::Return,
                        '\t' => Key::Tab,
                        _ => Key::Unicode(ch),
                    };
                    self.enigo
                        .key(key, Direction::Click)
                        .map_err(|e| anyhow!("Failed to type {:?}: {:?}", ch, e))?;
                }
                TypingMode::Raw => {
                    let mut buf = [0u8; 4];
                    self.enigo
                        .text(ch.encode_utf8(&mut buf))
                        .map_err(|e| anyhow!("Failed to type {:?}: {:?}", ch, e))?;
                }
            }
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }

        Ok(())
    }

    /// Press the listed keys in order, then release them in reverse order.
    pub fn hotkey(&mut self, keys: &[String]) -> Result<()> {
        let parsed = keys
            .iter()
            .map(|name| parse_key(name).ok_or_else(|| anyhow!("unknown key: {}", name)))
            .collect::<Result<Vec<_>>>()?;

        for key in &parsed {
            self.enigo
                .key(*key, Direction::Press)
                .map_err(|e| anyhow!("Failed to press key: {:?}", e))?;
            thread::sleep(CHORD_DELAY);
        }

        for key in parsed.iter().rev() {
            self.enigo
                .key(*key, Direction::Release)
                .map_err(|e| anyhow!("Failed to release key: {:?}", e))?;
            thread::sleep(CHORD_DELAY);
        }

        Ok(())
    }

    /// Hold down a key (no release).
    pub fn key_down(&mut self, name: &str) -> Result<()> {
        let key = parse_key(name).ok_or_else(|| anyhow!("unknown key: {}", name))?;
        self.enigo
            .key(key, Direction::Press)
            .map_err(|e| anyhow!("Failed to press key down: {:?}", e))
    }

    /// Release a previously held key.
    pub fn key_up(&mut self, name: &str) -> Result<()> {
        let key = parse_key(name).ok_or_else(|| anyhow!("unknown key: {}", name))?;
        self.enigo
            .key(key, Direction::Release)
            .map_err(|e| anyhow!("Failed to release key: {:?}", e))
    }

    // ============ Fail-Safe ============

    fn jump_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| anyhow!("Failed to move mouse: {:?}", e))
    }

    /// Abort with an error when the cursor sits in a screen corner.
    fn check_fail_safe(&self) -> Result<()> {
        if !self.safety.fail_safe {
            return Ok(());
        }

        let (x, y) = self.position()?;
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| anyhow!("Failed to read display size: {:?}", e))?;

        if in_corner(x, y, width, height) {
            return Err(anyhow!(
                "fail-safe triggered: pointer at screen corner ({}, {})",
                x,
                y
            ));
        }

        Ok(())
    }
}

fn in_corner(x: i32, y: i32, width: i32, height: i32) -> bool {
    let near_x = x < FAIL_SAFE_MARGIN || x >= width - FAIL_SAFE_MARGIN;
    let near_y = y < FAIL_SAFE_MARGIN || y >= height - FAIL_SAFE_MARGIN;
    near_x && near_y
}

/// Parse a key name from command params into an enigo key.
///
/// Accepts the named keys below plus any single character, which maps to
/// the corresponding unicode key.
pub fn parse_key(name: &str) -> Option<Key> {
    let lower = name.to_lowercase();
    let key = match lower.as_str() {
        "ctrl" | "control" => Key::Control,
        "alt" | "option" => Key::Alt,
        "shift" => Key::Shift,
        "meta" | "win" | "cmd" | "command" | "super" => Key::Meta,
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "escape" | "esc" => Key::Escape,
        "space" => Key::Space,
        "backspace" | "bs" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        "capslock" => Key::CapsLock,
        _ => {
            let mut chars = lower.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Unicode(ch),
                _ => return None,
            }
        }
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(parse_key("enter"), Some(Key::Return));
        assert_eq!(parse_key("CTRL"), Some(Key::Control));
        assert_eq!(parse_key("cmd"), Some(Key::Meta));
        assert_eq!(parse_key("a"), Some(Key::Unicode('a')));
        assert_eq!(parse_key("7"), Some(Key::Unicode('7')));
        assert_eq!(parse_key("definitely-not-a-key"), None);
    }

    #[test]
    fn test_button_parsing() {
        assert_eq!(MouseButton::from_name("left"), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_name("RIGHT"), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_name("middle"), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_name("fourth"), None);
    }

    #[test]
    fn test_corner_detection() {
        assert!(in_corner(0, 0, 1920, 1080));
        assert!(in_corner(1919, 0, 1920, 1080));
        assert!(in_corner(0, 1079, 1920, 1080));
        assert!(in_corner(1919, 1079, 1920, 1080));
        assert!(!in_corner(960, 540, 1920, 1080));
        assert!(!in_corner(0, 540, 1920, 1080)); // edge, not corner
    }
}
