//! REST API handlers for the chat front-end
//!
//! Every failure surfaces as a structured JSON error value with a status
//! code; nothing here is fatal to the process. A failed model call is not an
//! HTTP error: it comes back as a 200 with a failure-shaped outcome, so the
//! UI can render it as a chat message.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::assistant::error::AssistantError;
use crate::assistant::ChatController;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub controller: Arc<ChatController>,
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct PriceMatchBody {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ModelBody {
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn map_error(e: AssistantError) -> (StatusCode, Json<Value>) {
    let status = match &e {
        AssistantError::Validation(_) => StatusCode::BAD_REQUEST,
        AssistantError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        AssistantError::Adapter(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, e.to_string())
}

fn session_id_or_new(session_id: Option<String>) -> String {
    session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// POST /api/chat - submit one user message
pub async fn post_chat(
    State(state): State<ApiState>,
    Json(body): Json<ChatBody>,
) -> impl IntoResponse {
    if body.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty")
            .into_response();
    }

    let session_id = session_id_or_new(body.session_id);
    match state.controller.submit(&session_id, body.message).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => map_error(e).into_response(),
    }
}

/// POST /api/price-match - the price-match shortcut for a product URL
pub async fn post_price_match(
    State(state): State<ApiState>,
    Json(body): Json<PriceMatchBody>,
) -> impl IntoResponse {
    let session_id = session_id_or_new(body.session_id);
    match state.controller.price_match(&session_id, &body.url).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => map_error(e).into_response(),
    }
}

/// GET /api/sessions - list session summaries
pub async fn list_sessions(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    match state
        .controller
        .store()
        .list(params.limit, params.offset)
        .await
    {
        Ok(summaries) => Json(json!({ "sessions": summaries })).into_response(),
        Err(e) => map_error(e).into_response(),
    }
}

/// GET /api/sessions/:id - fetch one session with its full history
pub async fn get_session(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.controller.store().load(&session_id).await {
        Ok(Some(session)) => Json(session).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Session not found: {}", session_id),
        )
        .into_response(),
        Err(e) => map_error(e).into_response(),
    }
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.controller.store().delete(&session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => map_error(e).into_response(),
    }
}

/// GET /api/tools - registered tool names plus the schema-document definitions
pub async fn list_tools(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "tools": state.controller.list_tools(),
        "definitions": state.controller.tool_definitions(),
    }))
}

/// POST /api/tools/:name - dispatch one tool call.
///
/// Always a 200: unknown names and handler failures come back as
/// `{"error": ...}` values, mirroring what the model would receive.
pub async fn dispatch_tool(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> impl IntoResponse {
    Json(state.controller.execute_tool(&name, args).await)
}

/// GET /api/model - model currently selected
pub async fn get_model(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({ "model": state.controller.current_model().await }))
}

/// PUT /api/model - switch the model for subsequent calls
pub async fn update_model(
    State(state): State<ApiState>,
    Json(body): Json<ModelBody>,
) -> impl IntoResponse {
    if body.model.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "model must not be empty")
            .into_response();
    }

    state.controller.update_model(body.model.clone()).await;
    tracing::info!("Model switched to {}", body.model);
    Json(json!({ "model": body.model })).into_response()
}

/// GET /api/starter - conversation starter text for a fresh chat
pub async fn get_starter(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({ "content": state.controller.conversation_starter() }))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
