//! Mock servers for bridge integration testing
//!
//! A scripted MPD daemon speaking the real line protocol over TCP, so the
//! session handshake and command exchange run against an actual socket.

pub mod mpd;

pub use mpd::MockMpdServer;
