//! Webhook receiver.
//!
//! Flow per delivery: verify the signature against the raw bytes, parse the
//! event envelope, log it, relay downstream if a forward URL is configured.
//! Verification failures never reach parsing.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::signature::verify_signature;
use crate::state::AppState;

/// Header Linear puts the hex HMAC in.
pub const SIGNATURE_HEADER: &str = "linear-signature";

/// The envelope fields every Linear delivery carries.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub action: String,
    #[serde(rename = "type")]
    pub entity: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub url: Option<String>,
}

pub async fn receive(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    if let Some(secret) = &app.secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("missing signature header"))?;
        if !verify_signature(secret, &body, signature) {
            return Err(AppError::unauthorized("signature mismatch"));
        }
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request(format!("unparseable webhook payload: {e}")))?;
    tracing::info!(
        action = %event.action,
        entity = %event.entity,
        url = event.url.as_deref().unwrap_or(""),
        "webhook received"
    );

    if let Some(forward_url) = &app.forward_url {
        // Relay the delivery verbatim so downstream signatures still line up.
        let response = app
            .http
            .post(forward_url)
            .header("content-type", "application/json")
            .body(body.clone())
            .send()
            .await
            .map_err(|e| AppError::bad_gateway(format!("relay failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::bad_gateway(format!(
                "relay target returned {}",
                response.status()
            )));
        }
        tracing::info!(target_url = %forward_url, "webhook relayed");
    }

    Ok(Json(json!({ "ok": true })))
}
