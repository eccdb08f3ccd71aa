//! Invite endpoints

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::Method,
    routing::{delete, get},
};
use calgate_core::model::InviteRequest;
use calgate_core::translator;
use calgate_core::{Operation, Store, WriteRequest};
use serde::Deserialize;

use crate::routes::{ApiReply, forward, guarded};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/invites",
            get(list_invites).post(create_invite).put(update_invite),
        )
        .route("/invites/{event_id}/{username}", delete(delete_invite))
}

/// Optional filters; an absent filter is not sent downstream.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteFilter {
    pub username: Option<String>,
    pub event_id: Option<i64>,
}

/// GET /invites?username=&eventId=
async fn list_invites(
    State(state): State<AppState>,
    query: Result<Query<InviteFilter>, QueryRejection>,
) -> ApiReply {
    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let request = WriteRequest::get(Store::Invites, ["invites"])
        .with_query("username", filter.username)
        .with_query("eventId", filter.event_id);
    forward(&state, request).await
}

/// POST /invites - user, then event, must exist
async fn create_invite(
    State(state): State<AppState>,
    payload: Result<Json<InviteRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::CreateInvite, payload, |_, body| {
        WriteRequest::new(Store::Invites, Method::POST, ["invites"]).with_body(body)
    })
    .await
}

/// PUT /invites - user, then event, must still exist
async fn update_invite(
    State(state): State<AppState>,
    payload: Result<Json<InviteRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::UpdateInvite, payload, |_, body| {
        WriteRequest::new(Store::Invites, Method::PUT, ["invites"]).with_body(body)
    })
    .await
}

/// DELETE /invites/:event_id/:username
async fn delete_invite(
    State(state): State<AppState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> ApiReply {
    let Path((event_id, username)) = match path {
        Ok(path) => path,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let request = WriteRequest::new(
        Store::Invites,
        Method::DELETE,
        ["invites".to_string(), event_id.to_string(), username],
    );
    forward(&state, request).await
}
