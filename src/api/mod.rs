//! HTTP API handlers

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::mpd::MpdSession;

/// Fixed fields of the outward reply
const RESPONSE_TYPE: &str = "ephemeral";
const BOT_USERNAME: &str = "Sistema de audio";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Inbound slash-command payload. Both fields are optional on the wire:
/// missing text means "no command", the token is opaque and only echoed.
#[derive(Debug, Deserialize)]
pub struct SlashCommandRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Outward reply consumed by the chat integration
#[derive(Debug, Serialize)]
pub struct SlashCommandReply {
    pub response_type: &'static str,
    pub username: &'static str,
    pub token: Option<String>,
    pub text: String,
}

/// Error payload for internal failures
#[derive(Serialize)]
struct ErrorResponse {
    msg: &'static str,
}

/// General status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub mpd_url: String,
}

/// GET /status - Service health check
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "mpd-chat-bridge",
        version: env!("CARGO_PKG_VERSION"),
        mpd_url: state.config.mpd_url.clone(),
    })
}

/// POST /mpd - Translate one slash command into daemon commands
///
/// Success wraps the rendered text in the ephemeral reply shape; any
/// internal failure collapses to a generic 500, never a partial reply.
pub async fn audio_command_handler(
    State(state): State<AppState>,
    Form(request): Form<SlashCommandRequest>,
) -> impl IntoResponse {
    debug!(?request, "slash command received");

    match handle_slash_command(&state.config, request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(e) => {
            error!("slash command failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    msg: "Something went wrong",
                }),
            )
                .into_response()
        }
    }
}

/// Split the inbound text, run it against a fresh daemon session, and build
/// the reply. The session lives exactly as long as this call.
async fn handle_slash_command(
    config: &Config,
    request: SlashCommandRequest,
) -> anyhow::Result<SlashCommandReply> {
    let text = request.text.unwrap_or_default();
    let mut tokens = text.split_whitespace().map(str::to_string);
    let verb = tokens.next().unwrap_or_default();
    let args: Vec<String> = tokens.collect();

    let (host, port) = config.daemon_addr()?;
    let session = MpdSession::connect(&host, port).await?;
    let reply_text = Dispatcher::new(session).dispatch(&verb, args).await?;

    Ok(SlashCommandReply {
        response_type: RESPONSE_TYPE,
        username: BOT_USERNAME,
        token: request.token,
        text: reply_text,
    })
}
