//! RSVP endpoints

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::Method,
    routing::{delete, get},
};
use calgate_core::model::RsvpRequest;
use calgate_core::translator;
use calgate_core::{Operation, Store, WriteRequest};
use serde::Deserialize;

use crate::routes::{ApiReply, forward, guarded};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/rsvp",
            get(list_responses).post(create_response).put(update_response),
        )
        .route("/rsvp/{event_id}/{username}", delete(delete_response))
}

/// Optional filters; an absent filter is not sent downstream.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpFilter {
    pub username: Option<String>,
    pub event_id: Option<i64>,
}

/// GET /rsvp?username=&eventId=
async fn list_responses(
    State(state): State<AppState>,
    query: Result<Query<RsvpFilter>, QueryRejection>,
) -> ApiReply {
    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let request = WriteRequest::get(Store::Rsvp, ["rsvp"])
        .with_query("username", filter.username)
        .with_query("eventId", filter.event_id);
    forward(&state, request).await
}

/// POST /rsvp - user must exist, event must exist and be public
async fn create_response(
    State(state): State<AppState>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::CreateRsvp, payload, |_, body| {
        WriteRequest::new(Store::Rsvp, Method::POST, ["rsvp"]).with_body(body)
    })
    .await
}

/// PUT /rsvp - user must exist, event must still be public
async fn update_response(
    State(state): State<AppState>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::UpdateRsvp, payload, |_, body| {
        WriteRequest::new(Store::Rsvp, Method::PUT, ["rsvp"]).with_body(body)
    })
    .await
}

/// DELETE /rsvp/:event_id/:username
async fn delete_response(
    State(state): State<AppState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> ApiReply {
    let Path((event_id, username)) = match path {
        Ok(path) => path,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let request = WriteRequest::new(
        Store::Rsvp,
        Method::DELETE,
        ["rsvp".to_string(), event_id.to_string(), username],
    );
    forward(&state, request).await
}
