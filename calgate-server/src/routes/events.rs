//! Event endpoints

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::Method,
    routing::get,
};
use calgate_core::model::EventRequest;
use calgate_core::translator;
use calgate_core::{Operation, Store, WriteRequest};

use crate::routes::{ApiReply, forward, guarded};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/public", get(list_public_events))
        .route(
            "/events/{event_id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

/// GET /events
async fn list_events(State(state): State<AppState>) -> ApiReply {
    forward(&state, WriteRequest::get(Store::Events, ["events"])).await
}

/// GET /events/public
async fn list_public_events(State(state): State<AppState>) -> ApiReply {
    forward(&state, WriteRequest::get(Store::Events, ["events", "public"])).await
}

/// GET /events/:id
async fn get_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiReply {
    let Path(event_id) = match path {
        Ok(path) => path,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };
    let id = event_id.to_string();
    forward(&state, WriteRequest::get(Store::Events, ["events", id.as_str()])).await
}

/// POST /events - organizer must exist
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::CreateEvent, payload, |_, body| {
        WriteRequest::new(Store::Events, Method::POST, ["events"]).with_body(body)
    })
    .await
}

/// PUT /events/:id - organizer must exist
async fn update_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> ApiReply {
    let Path(event_id) = match path {
        Ok(path) => path,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    guarded(&state, Operation::UpdateEvent, payload, move |_, body| {
        let id = event_id.to_string();
        WriteRequest::new(Store::Events, Method::PUT, ["events", id.as_str()]).with_body(body)
    })
    .await
}

/// DELETE /events/:id
async fn delete_event(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiReply {
    let Path(event_id) = match path {
        Ok(path) => path,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };
    let id = event_id.to_string();
    forward(
        &state,
        WriteRequest::new(Store::Events, Method::DELETE, ["events", id.as_str()]),
    )
    .await
}
