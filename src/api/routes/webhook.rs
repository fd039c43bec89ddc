//! Fireflies webhook endpoint.
//!
//! Provides HTTP endpoints for:
//! - Processing a finished transcript (POST /webhook/fireflies)

use crate::api::error::{ApiError, ApiResult};
use crate::pipeline::Pipeline;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Fireflies sends this event once a transcript is ready.
pub const TRANSCRIPTION_COMPLETED: &str = "Transcription completed";

/// Webhook request body. Only `meetingId` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default, rename = "meetingId", alias = "meeting_id")]
    pub meeting_id: Option<String>,
    #[serde(default, rename = "eventType", alias = "event_type")]
    pub event_type: Option<String>,
}

#[derive(Clone)]
pub struct WebhookState {
    pub pipeline: Arc<Pipeline>,
    auth: BearerAuth,
}

impl WebhookState {
    pub fn new(pipeline: Arc<Pipeline>, secret: Option<&str>) -> Self {
        Self {
            pipeline,
            auth: BearerAuth::new(secret),
        }
    }
}

/// `Authorization: Bearer <secret>` check. Without a secret every call passes.
#[derive(Clone)]
pub struct BearerAuth {
    secret_digest: Option<[u8; 32]>,
}

impl BearerAuth {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret_digest: secret.map(digest),
        }
    }

    pub fn authorize(&self, headers: &HeaderMap) -> ApiResult<()> {
        let Some(expected) = &self.secret_digest else {
            return Ok(());
        };

        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            // Comparing digests keeps the comparison length-independent.
            Some(token) if digest(token) == *expected => Ok(()),
            _ => {
                warn!("Rejected webhook call with missing or invalid token");
                Err(ApiError::unauthorized("unauthorized"))
            }
        }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Creates the webhook router.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook/fireflies", post(fireflies_webhook))
        .with_state(state)
}

/// Fetches, summarizes and posts the transcript named in the payload.
///
/// # Response
/// `{"status": "ok", "channel": <id>, "meeting_id": <id>}` on success,
/// `{"status": "ignored"}` for events other than a finished transcript.
async fn fireflies_webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    state.auth.authorize(&headers)?;

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {}", e)))?;

    if let Some(event) = payload.event_type.as_deref() {
        if event != TRANSCRIPTION_COMPLETED {
            info!("Ignoring webhook event '{}'", event);
            return Ok(Json(json!({ "status": "ignored", "event": event })));
        }
    }

    let meeting_id = payload
        .meeting_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("meetingId is required"))?;

    let span = info_span!("webhook", request_id = %Uuid::new_v4(), meeting_id = %meeting_id);

    let outcome = state
        .pipeline
        .run(&meeting_id)
        .instrument(span.clone())
        .await
        .map_err(|err| {
            let _entered = span.enter();
            if err.is_client_error() {
                warn!("Webhook rejected: {}", err);
            } else {
                error!("Webhook processing failed: {}", err);
            }
            ApiError::from(err)
        })?;

    Ok(Json(json!({
        "status": "ok",
        "channel": outcome.channel,
        "meeting_id": outcome.meeting_id,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn test_payload_field_names() {
        let payload: WebhookPayload = serde_json::from_str(
            r#"{"meetingId": "abc123", "eventType": "Transcription completed", "clientReferenceId": "x"}"#,
        )
        .unwrap();
        assert_eq!(payload.meeting_id.as_deref(), Some("abc123"));
        assert_eq!(payload.event_type.as_deref(), Some(TRANSCRIPTION_COMPLETED));

        let snake: WebhookPayload = serde_json::from_str(r#"{"meeting_id": "abc123"}"#).unwrap();
        assert_eq!(snake.meeting_id.as_deref(), Some("abc123"));

        let empty: WebhookPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.meeting_id.is_none());
    }

    fn headers(authorization: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn test_bearer_auth_accepts_matching_token() {
        let auth = BearerAuth::new(Some("hunter2"));
        assert!(auth.authorize(&headers(Some("Bearer hunter2"))).is_ok());
    }

    #[test]
    fn test_bearer_auth_rejects_bad_headers() {
        let auth = BearerAuth::new(Some("hunter2"));
        let rejected = [
            None,
            Some("Bearer wrong"),
            Some("Bearer hunter22"),
            Some("hunter2"),
            Some("bearer hunter2"),
            Some("Basic aHVudGVyMg=="),
            Some("Bearer "),
        ];

        for value in rejected {
            let err = auth.authorize(&headers(value)).unwrap_err();
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED, "{:?}", value);
        }
    }

    #[test]
    fn test_bearer_auth_without_secret_allows_all() {
        let auth = BearerAuth::new(None);
        assert!(auth.authorize(&headers(None)).is_ok());
        assert!(auth.authorize(&headers(Some("Bearer anything"))).is_ok());
    }
}
