//! Request-scoped daemon session
//!
//! One TCP connection per inbound request: connect, wait for the daemon's
//! `OK MPD <version>` greeting, exchange commands serially, drop. Sessions
//! are never pooled or reused across requests.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::{parse_response, Command, CommandChannel, DaemonError, RecordSet};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Greeting prefix the daemon sends once the protocol layer is ready
const GREETING_PREFIX: &str = "OK MPD ";
/// Terminal line of a successful reply
const REPLY_OK: &str = "OK";
/// Prefix of a command rejection
const REPLY_ACK: &str = "ACK ";

/// An established, protocol-ready connection to the daemon.
#[derive(Debug)]
pub struct MpdSession {
    reader: BufReader<tokio::net::tcp::OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
    protocol_version: String,
}

impl MpdSession {
    /// Connect and complete the readiness handshake.
    ///
    /// Resolves only after the transport is up AND the daemon has sent its
    /// greeting; any failure before that point is a connect error.
    pub async fn connect(host: &str, port: u16) -> Result<Self, DaemonError> {
        let addr = format!("{}:{}", host, port);
        debug!("Connecting to MPD server at {}", addr);

        let stream = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .map_err(|_| DaemonError::Connect(format!("connect to {} timed out", addr)))?
            .map_err(|e| DaemonError::Connect(e.to_string()))?;

        let (read_half, writer) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        let mut greeting = String::new();
        let read = timeout(RESPONSE_TIMEOUT, reader.read_line(&mut greeting))
            .await
            .map_err(|_| DaemonError::Connect("daemon greeting timed out".into()))?
            .map_err(|e| DaemonError::Connect(e.to_string()))?;
        if read == 0 {
            return Err(DaemonError::Connect(
                "connection closed before greeting".into(),
            ));
        }

        let Some(version) = greeting.trim_end().strip_prefix(GREETING_PREFIX) else {
            return Err(DaemonError::Connect(format!(
                "unexpected greeting: {}",
                greeting.trim_end()
            )));
        };

        debug!("MPD server ready (protocol {})", version);
        Ok(Self {
            reader,
            writer,
            protocol_version: version.to_string(),
        })
    }

    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// Send one command and collect its reply block.
    ///
    /// Reads until the terminal `OK`; an `ACK` line fails the exchange with
    /// the daemon's own message. Reply lines are parsed into records.
    pub async fn send(&mut self, command: &Command) -> Result<RecordSet, DaemonError> {
        let wire = command.to_wire();
        debug!(command = %wire, "MPD request");

        self.writer
            .write_all(format!("{}\n", wire).as_bytes())
            .await
            .map_err(|e| DaemonError::Command(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| DaemonError::Command(e.to_string()))?;

        let mut raw = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            let read = timeout(RESPONSE_TIMEOUT, self.reader.read_line(&mut line))
                .await
                .map_err(|_| DaemonError::Command(format!("reply to `{}` timed out", wire)))?
                .map_err(|e| DaemonError::Command(e.to_string()))?;
            if read == 0 {
                return Err(DaemonError::Command(
                    "connection closed mid-reply".into(),
                ));
            }

            let trimmed = line.trim_end();
            if trimmed == REPLY_OK {
                break;
            }
            if let Some(ack) = trimmed.strip_prefix(REPLY_ACK) {
                return Err(DaemonError::Command(ack.to_string()));
            }
            raw.push_str(trimmed);
            raw.push('\n');
        }

        Ok(parse_response(&raw))
    }
}

#[async_trait]
impl CommandChannel for MpdSession {
    async fn exchange(&mut self, command: Command) -> Result<RecordSet, DaemonError> {
        self.send(&command).await
    }
}
