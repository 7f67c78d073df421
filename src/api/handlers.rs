//! HTTP request handlers

use super::twiml::MessageResponse;
use super::types::{
    ErrorResponse, FlowEventsResponse, InboundForm, LatestTicketResponse, MessagesResponse,
    SenderStateResponse, TicketListQuery, TicketListResponse, TicketResponse,
};
use super::AppState;
use crate::db::DbError;
use crate::state_machine::reply;
use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Messaging platform callback
        .route("/whatsapp", post(whatsapp_webhook))
        // Audit views
        .route("/api/tickets", get(list_tickets))
        .route("/api/tickets/:id", get(get_ticket))
        .route("/api/senders/:sender/events", get(list_sender_events))
        .route("/api/senders/:sender/state", get(get_sender_state))
        .route("/api/senders/:sender/messages", get(list_sender_messages))
        .route("/api/senders/:sender/latest-ticket", get(get_latest_ticket))
        // Liveness and version
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

/// Every request gets exactly one reply message, even on bad input.
async fn whatsapp_webhook(
    State(state): State<AppState>,
    form: Result<Form<InboundForm>, FormRejection>,
) -> MessageResponse {
    let message = match form {
        Ok(Form(form)) => form.into_message(),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected webhook payload");
            return MessageResponse::new(reply::APOLOGY);
        }
    };

    tracing::info!(from = %message.sender, body = ?message.body, "Inbound message");
    MessageResponse::new(state.engine.respond(&message).await)
}

// ============================================================
// Audit Views
// ============================================================

async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<TicketListResponse>, AppError> {
    let tickets = state.db().list_tickets(query.sender.as_deref())?;
    Ok(Json(TicketListResponse { tickets }))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TicketResponse>, AppError> {
    let ticket = state.db().get_ticket(&id)?;
    Ok(Json(TicketResponse { ticket }))
}

async fn list_sender_events(
    State(state): State<AppState>,
    Path(sender): Path<String>,
) -> Result<Json<FlowEventsResponse>, AppError> {
    let events = state.db().list_flow_events(&sender)?;
    Ok(Json(FlowEventsResponse { sender, events }))
}

async fn get_sender_state(
    State(state): State<AppState>,
    Path(sender): Path<String>,
) -> Result<Json<SenderStateResponse>, AppError> {
    let dialogue = state.db().get_state(&sender)?;
    Ok(Json(SenderStateResponse {
        sender,
        kind: dialogue.kind(),
        state: dialogue,
    }))
}

async fn list_sender_messages(
    State(state): State<AppState>,
    Path(sender): Path<String>,
) -> Result<Json<MessagesResponse>, AppError> {
    let messages = state.db().list_messages(&sender)?;
    Ok(Json(MessagesResponse { sender, messages }))
}

/// The newest ticket a sender opened, whether or not it is complete
async fn get_latest_ticket(
    State(state): State<AppState>,
    Path(sender): Path<String>,
) -> Result<Json<LatestTicketResponse>, AppError> {
    let ticket = state.db().latest_ticket(&sender)?;
    Ok(Json(LatestTicketResponse { sender, ticket }))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_version() -> &'static str {
    concat!("helpdesk-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    Internal(String),
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::TicketNotFound(_) => AppError::NotFound(e.to_string()),
            other => {
                tracing::error!(error = %other, "Database error in API handler");
                AppError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
