//! Verb dispatch and the per-command containment boundary.
//!
//! The verb table is a closed enum matched exhaustively, so an unknown verb
//! is an explicit case, not a lookup fallthrough. Every handler invocation
//! is wrapped so that errors *and panics* - including ones raised deep
//! inside the platform bindings - become failure responses instead of
//! taking down the loop.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use serde_json::Value;

use crate::commands::{self, keyboard, mouse, screen};
use crate::config::SafetyConfig;
use crate::desktop::Desktop;
use crate::error::Result;
use crate::protocol::{self, Command};

/// The closed set of verbs this server answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Screenshot,
    Click,
    DoubleClick,
    RightClick,
    MoveTo,
    Type,
    Hotkey,
    KeyDown,
    KeyUp,
    Scroll,
    Locate,
    MousePos,
    ScreenSize,
    Drag,
    Sleep,
    Ping,
}

impl Action {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "screenshot" => Some(Action::Screenshot),
            "click" => Some(Action::Click),
            "doubleclick" => Some(Action::DoubleClick),
            "rightclick" => Some(Action::RightClick),
            "moveto" => Some(Action::MoveTo),
            "type" => Some(Action::Type),
            "hotkey" => Some(Action::Hotkey),
            "keydown" => Some(Action::KeyDown),
            "keyup" => Some(Action::KeyUp),
            "scroll" => Some(Action::Scroll),
            "locate" => Some(Action::Locate),
            "mousepos" => Some(Action::MousePos),
            "screensize" => Some(Action::ScreenSize),
            "drag" => Some(Action::Drag),
            "sleep" => Some(Action::Sleep),
            "ping" => Some(Action::Ping),
            _ => None,
        }
    }

    /// Whether the verb reaches the host OS. The inter-action pause only
    /// applies to these.
    fn touches_desktop(self) -> bool {
        !matches!(self, Action::Sleep | Action::Ping)
    }
}

/// Maps verbs to handlers and owns the process-wide safety settings.
pub struct Dispatcher<D> {
    desktop: D,
    safety: SafetyConfig,
}

impl<D: Desktop> Dispatcher<D> {
    pub fn new(desktop: D, safety: SafetyConfig) -> Self {
        Self { desktop, safety }
    }

    /// Execute one command and build its response. Never fails: every
    /// handler error or panic is converted into a failure response.
    pub fn dispatch(&mut self, command: &Command) -> Value {
        let Some(action) = Action::parse(&command.action) else {
            return protocol::failure(format!("Unknown action: {}", command.action));
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(action, &command.params)));

        if action.touches_desktop() && !self.safety.pause.is_zero() {
            thread::sleep(self.safety.pause);
        }

        match outcome {
            Ok(Ok(fields)) => protocol::success(fields),
            Ok(Err(err)) => {
                tracing::warn!(action = %command.action, error = %err.message(), "command failed");
                protocol::failure(err.message())
            }
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                tracing::error!(action = %command.action, %detail, "command panicked");
                protocol::failure_with_detail(format!("{} panicked", command.action), detail)
            }
        }
    }

    fn run(&mut self, action: Action, params: &Value) -> Result<Value> {
        let desktop: &mut dyn Desktop = &mut self.desktop;
        match action {
            Action::Screenshot => screen::screenshot(desktop, params),
            Action::Click => mouse::click(desktop, params),
            Action::DoubleClick => mouse::double_click(desktop, params),
            Action::RightClick => mouse::right_click(desktop, params),
            Action::MoveTo => mouse::move_to(desktop, params),
            Action::Type => keyboard::type_text(desktop, params),
            Action::Hotkey => keyboard::hotkey(desktop, params),
            Action::KeyDown => keyboard::key_down(desktop, params),
            Action::KeyUp => keyboard::key_up(desktop, params),
            Action::Scroll => mouse::scroll(desktop, params),
            Action::Locate => screen::locate(desktop, params),
            Action::MousePos => mouse::mouse_pos(desktop),
            Action::ScreenSize => screen::screen_size(desktop),
            Action::Drag => mouse::drag(desktop, params),
            Action::Sleep => commands::sleep(params),
            Action::Ping => commands::ping(),
        }
    }

    #[cfg(test)]
    pub(crate) fn desktop(&self) -> &D {
        &self.desktop
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
