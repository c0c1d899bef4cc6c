//! Verb table: chat command -> protocol sequence -> reply text
//!
//! Each verb maps to an explicit sequence of daemon commands followed by one
//! renderer. The dispatcher owns the session for the request, so the
//! exchanges it issues are serial by construction. Protocol failures
//! propagate untouched; only unknown verbs short-circuit (to the help text,
//! with nothing issued).

use tracing::debug;

use crate::format;
use crate::mpd::{Command, CommandChannel, DaemonError, RecordSet};

/// Usage instructions returned for unknown or missing verbs
const HELP_TEXT: &str = "\
Debe ingresar una instrucción después del comando. Ejemplo `/audio play`.

Estas son las instrucciones disponibles:
  pause
  play
  stop
  next
  prev
  status
";

pub struct Dispatcher<C> {
    channel: C,
}

impl<C: CommandChannel> Dispatcher<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Execute one chat command and render its reply.
    ///
    /// Verb matching is case-sensitive; anything outside the table returns
    /// the help text without touching the daemon.
    pub async fn dispatch(&mut self, verb: &str, args: Vec<String>) -> Result<String, DaemonError> {
        debug!(verb, ?args, "dispatching audio command");

        match verb {
            "play" | "pause" | "stop" | "next" | "prev" => {
                // The chat alias and the protocol verb differ only for prev.
                let wire_verb = if verb == "prev" { "previous" } else { verb };
                self.exchange(Command::new(wire_verb)).await?;
                self.now_playing_summary().await
            }
            "status" => self.now_playing_summary().await,
            "list" => {
                let reply = self.exchange(Command::with_args("list", args)).await?;
                Ok(format::markdown_table(&reply))
            }
            "shuffle" => {
                self.exchange(Command::with_args("shuffle", args)).await?;
                // Reshuffling invalidates positions, so answer with a fresh
                // full listing rather than the caller's window.
                self.playlist_window(Vec::new()).await
            }
            "playlist" => self.playlist_window(args).await,
            "xx" => self.passthrough(args).await,
            other => {
                if let Some(tag) = tag_suffix(other, "search") {
                    let reply = self
                        .exchange(Command::with_args("search", prepend(tag, args)))
                        .await?;
                    Ok(format::song_table(&reply))
                } else if let Some(tag) = tag_suffix(other, "play") {
                    self.exchange(Command::new("clear")).await?;
                    self.exchange(Command::with_args("searchadd", prepend(tag, args)))
                        .await?;
                    self.exchange(Command::new("playid")).await?;
                    self.now_playing_summary().await
                } else if let Some(tag) = tag_suffix(other, "queue") {
                    self.exchange(Command::with_args("searchadd", prepend(tag, args)))
                        .await?;
                    let song = self.exchange(Command::new("currentsong")).await?;
                    Ok(format::markdown_table(&song))
                } else {
                    Ok(HELP_TEXT.to_string())
                }
            }
        }
    }

    async fn exchange(&mut self, command: Command) -> Result<RecordSet, DaemonError> {
        self.channel.exchange(command).await
    }

    /// currentsong + status, rendered as the short play-state summary.
    async fn now_playing_summary(&mut self) -> Result<String, DaemonError> {
        let song = self.exchange(Command::new("currentsong")).await?;
        let status = self.exchange(Command::new("status")).await?;
        Ok(format::now_playing(status.first(), song.first()))
    }

    /// playlistinfo over an optional 1-based position argument.
    async fn playlist_window(&mut self, mut args: Vec<String>) -> Result<String, DaemonError> {
        // Chat positions are 1-based, the protocol's are 0-based. Anything
        // non-numeric goes through as-is and the daemon gets to complain.
        if let Some(first) = args.first_mut() {
            if let Ok(position) = first.parse::<i64>() {
                *first = (position - 1).to_string();
            }
        }
        let reply = self
            .exchange(Command::with_args("playlistinfo", args))
            .await?;
        Ok(format::song_table(&reply))
    }

    /// Escape hatch: forward a raw protocol command verbatim.
    async fn passthrough(&mut self, mut args: Vec<String>) -> Result<String, DaemonError> {
        if args.is_empty() {
            return Ok(HELP_TEXT.to_string());
        }
        let raw_verb = args.remove(0);
        let reply = self.exchange(Command::with_args(raw_verb, args)).await?;
        Ok(format::markdown_table(&reply))
    }
}

/// Map a `search`/`play`/`queue`-prefixed verb to its protocol tag name.
/// Only the three tag suffixes are recognized; anything else is an unknown
/// verb.
fn tag_suffix(verb: &str, prefix: &str) -> Option<&'static str> {
    match verb.strip_prefix(prefix)? {
        "genre" => Some("Genre"),
        "title" => Some("Title"),
        "artist" => Some("Artist"),
        _ => None,
    }
}

fn prepend(tag: &str, mut args: Vec<String>) -> Vec<String> {
    args.insert(0, tag.to_string());
    args
}

// =============================================================================
// Tests
// =============================================================================
