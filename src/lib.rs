//! GUI automation sidecar
//!
//! A long-lived process that reads newline-delimited JSON commands on
//! stdin, executes pointer/keyboard/screen actions against the host
//! desktop, and writes one JSON response per command on stdout, in order.
//! The controlling process spawns this binary and owns both pipes.
//!
//! ## Architecture
//!
//! - `server` - the line-oriented protocol loop
//! - `dispatch` - verb table and the per-command containment boundary
//! - `commands` - one handler per verb (validation + effect + result)
//! - `desktop` - capability layer over enigo/xcap (input, capture, locate)
//! - `config` - immutable process-wide safety settings
//!
//! A malformed or failing command never takes the process down; the only
//! way the server exits is its input stream closing.

pub mod commands;
pub mod config;
pub mod desktop;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod server;

pub use config::SafetyConfig;
pub use desktop::{Desktop, NativeDesktop};
pub use dispatch::{Action, Dispatcher};
pub use error::{AppError, Result};
pub use protocol::Command;
