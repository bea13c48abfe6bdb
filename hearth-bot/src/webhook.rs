use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use hearth_core::{Data, Error};
use hearth_telegram::Update;
use subtle::ConstantTimeEq as _;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, error, warn};

use crate::config::WEBHOOK_PATH;

/// Header carrying the secret registered with `setWebhook`.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Clone, Debug)]
pub struct WebhookState {
    data: Data,
    secret: Option<Arc<str>>,
}

impl WebhookState {
    pub fn new(data: Data, secret: Option<String>) -> Self {
        Self {
            data,
            secret: secret.map(Arc::from),
        }
    }
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .with_state(state)
}

async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if let Some(expected) = state.secret.as_deref() {
        let provided = headers
            .get(SECRET_HEADER)
            .and_then(|value| value.to_str().ok());
        if !secret_matches(provided, expected) {
            warn!("rejected webhook call with a missing or wrong secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(err) => {
            error!(?err, body_len = body.len(), "failed to decode webhook update");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    match handle_update(&state.data, &update).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            error!(?err, update_id = update.update_id, "failed to handle update");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn secret_matches(provided: Option<&str>, expected: &str) -> bool {
    provided.is_some_and(|provided| provided.as_bytes().ct_eq(expected.as_bytes()).into())
}

async fn handle_update(data: &Data, update: &Update) -> Result<(), Error> {
    let Some(reply) = hearth_commands::dispatch(data, update).await? else {
        return Ok(());
    };

    data.telegram
        .send_message(&reply)
        .await
        .with_context(|| format!("failed to deliver reply to chat {}", reply.chat_id))?;

    Ok(())
}
