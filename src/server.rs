//! The stdin/stdout protocol loop.
//!
//! One readiness record at startup, then one response line per request
//! line, flushed immediately, in arrival order. A line that fails to
//! decode produces a failure response and the loop keeps going; end of
//! input is a clean shutdown.

use std::io::{BufRead, Write};

use crate::desktop::Desktop;
use crate::dispatch::Dispatcher;
use crate::protocol;

/// Drive the request/response loop until the input stream closes.
pub fn run<R, W, D>(
    reader: R,
    writer: &mut W,
    dispatcher: &mut Dispatcher<D>,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
    D: Desktop,
{
    write_line(writer, &protocol::ready())?;

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match protocol::decode_line(trimmed) {
            Ok(command) => {
                tracing::debug!(action = %command.action, "dispatching command");
                dispatcher.dispatch(&command)
            }
            Err(err) => {
                tracing::warn!(%err, "undecodable input line");
                protocol::failure(format!("invalid command: {err}"))
            }
        };

        write_line(writer, &response)?;
    }

    Ok(())
}

/// Serialize one record, terminate it, and flush so the caller never waits
/// on a buffer.
fn write_line<W: Write>(writer: &mut W, record: &serde_json::Value) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
