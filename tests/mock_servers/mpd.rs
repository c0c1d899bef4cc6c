//! Mock MPD daemon for testing
//!
//! Listens on a random port, sends the `OK MPD` greeting, answers each
//! command line from a canned verb -> reply map, and logs every command it
//! receives in arrival order.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const GREETING: &str = "OK MPD 0.23.5\n";

/// Shared scripting state
struct MockMpdState {
    /// Canned reply body per verb (lines before the terminal OK)
    replies: HashMap<String, String>,
    /// Verbs answered with an ACK instead of a reply
    ack_verbs: Vec<String>,
    /// Every command line received, in order
    received: Vec<String>,
}

/// Mock MPD Server
pub struct MockMpdServer {
    addr: SocketAddr,
    state: Arc<Mutex<MockMpdState>>,
    handle: JoinHandle<()>,
}

impl MockMpdServer {
    /// Start a mock daemon on a random port
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockMpdState {
            replies: HashMap::new(),
            ack_verbs: Vec::new(),
            received: Vec::new(),
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let accept_state = state.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let conn_state = accept_state.clone();
                tokio::spawn(async move {
                    serve_connection(stream, conn_state).await;
                });
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Script the reply body for a verb (terminal OK is added by the server)
    pub async fn script_reply(&self, verb: &str, body: &str) {
        let mut state = self.state.lock().await;
        state.replies.insert(verb.to_string(), body.to_string());
    }

    /// Make a verb fail with an ACK line
    pub async fn script_ack(&self, verb: &str) {
        let mut state = self.state.lock().await;
        state.ack_verbs.push(verb.to_string());
    }

    /// Command lines received so far, in arrival order
    pub async fn received(&self) -> Vec<String> {
        self.state.lock().await.received.clone()
    }

    /// Stop the mock server
    pub async fn stop(self) {
        self.handle.abort();
    }
}

async fn serve_connection(stream: tokio::net::TcpStream, state: Arc<Mutex<MockMpdState>>) {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    if writer.write_all(GREETING.as_bytes()).await.is_err() {
        return;
    }

    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let command = line.trim_end().to_string();
        let verb = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        let response = {
            let mut state = state.lock().await;
            state.received.push(command.clone());
            if state.ack_verbs.iter().any(|v| v == &verb) {
                format!("ACK [5@0] {{{}}} scripted failure\n", verb)
            } else {
                match state.replies.get(&verb) {
                    Some(body) if !body.is_empty() => format!("{}\nOK\n", body.trim_end()),
                    _ => "OK\n".to_string(),
                }
            }
        };

        if writer.write_all(response.as_bytes()).await.is_err() {
            break;
        }
    }
}
