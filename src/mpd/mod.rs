//! MPD protocol client
//!
//! One request-scoped TCP session to the daemon, a wire encoder for
//! `verb arg...` commands, and a parser for the newline-delimited
//! `Key: Value` reply blocks.

pub mod command;
pub mod response;
pub mod session;

pub use command::Command;
pub use response::{parse_response, Record, RecordSet};
pub use session::MpdSession;

use async_trait::async_trait;

/// Errors surfaced by the daemon connection.
///
/// Neither variant is retried; both bubble up to the request boundary,
/// which renders the generic failure reply.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// Transport or handshake failure before the daemon signalled readiness
    #[error("error while connecting to MPD server: {0}")]
    Connect(String),

    /// The daemon rejected or errored on a command (ACK reply)
    #[error("error sending command to MPD: {0}")]
    Command(String),
}

/// Serial command/response exchange with the daemon.
///
/// Exclusive `&mut` access is what keeps commands one-at-a-time: replies on
/// the stateful connection correlate to commands only when nothing else is
/// in flight.
#[async_trait]
pub trait CommandChannel: Send {
    async fn exchange(&mut self, command: Command) -> Result<RecordSet, DaemonError>;
}
