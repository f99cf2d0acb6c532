use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{
    InteractRequest, JoinRequest, LeaveRequest, PlaceObjectRequest, WorldSnapshotDto,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::HostEvent;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

// Input adapter: every accepted request becomes one host event for the world task.

pub async fn join_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<JoinRequest>,
) -> Response {
    forward(&state, payload.into()).await
}

pub async fn leave_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeaveRequest>,
) -> Response {
    forward(&state, payload.into()).await
}

pub async fn place_object_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlaceObjectRequest>,
) -> Response {
    forward(&state, payload.into()).await
}

pub async fn interact_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InteractRequest>,
) -> Response {
    forward(&state, payload.into()).await
}

pub async fn world_handler(State(state): State<Arc<AppState>>) -> Response {
    // A dropped sender means the world task has stopped.
    if state.snapshot_rx.has_changed().is_err() {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "world unavailable");
    }
    let snapshot = WorldSnapshotDto::from(&*state.snapshot_rx.borrow());
    Json(snapshot).into_response()
}

async fn forward(state: &AppState, event: HostEvent) -> Response {
    match state.input_tx.send(event).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(_) => {
            warn!("world task unavailable; dropping host event");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "world unavailable")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
