//! Calendar share endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::Method,
    routing::get,
};
use calgate_core::model::ShareRequest;
use calgate_core::{Operation, Store, WriteRequest};

use crate::routes::{ApiReply, forward, guarded};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/calendars",
            get(list_shares).post(share_calendar).delete(unshare_calendar),
        )
        .route("/calendars/by/{username}", get(shared_by))
        .route("/calendars/with/{username}", get(shared_with))
        .route(
            "/calendars/by/{username}/with/{receiving_user}",
            get(shared_by_with),
        )
}

/// GET /calendars
async fn list_shares(State(state): State<AppState>) -> ApiReply {
    forward(&state, WriteRequest::get(Store::Shares, ["shares"])).await
}

/// GET /calendars/by/:username - calendars the user has shared
async fn shared_by(State(state): State<AppState>, Path(username): Path<String>) -> ApiReply {
    let request =
        WriteRequest::get(Store::Shares, ["shares".to_string(), "by".to_string(), username]);
    forward(&state, request).await
}

/// GET /calendars/with/:username - calendars shared with the user
async fn shared_with(State(state): State<AppState>, Path(username): Path<String>) -> ApiReply {
    let request =
        WriteRequest::get(Store::Shares, ["shares".to_string(), "with".to_string(), username]);
    forward(&state, request).await
}

/// GET /calendars/by/:username/with/:receiving_user
async fn shared_by_with(
    State(state): State<AppState>,
    Path((username, receiving_user)): Path<(String, String)>,
) -> ApiReply {
    let request = WriteRequest::get(
        Store::Shares,
        [
            "shares".to_string(),
            "by".to_string(),
            username,
            "with".to_string(),
            receiving_user,
        ],
    );
    forward(&state, request).await
}

/// POST /calendars - both users must exist
async fn share_calendar(
    State(state): State<AppState>,
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::ShareCalendar, payload, |_, body| {
        WriteRequest::new(Store::Shares, Method::POST, ["shares"]).with_body(body)
    })
    .await
}

/// DELETE /calendars - both users must exist
async fn unshare_calendar(
    State(state): State<AppState>,
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> ApiReply {
    guarded(&state, Operation::UnshareCalendar, payload, |share, _| {
        WriteRequest::new(
            Store::Shares,
            Method::DELETE,
            [
                "shares",
                share.sharing_user.as_str(),
                share.receiving_user.as_str(),
            ],
        )
    })
    .await
}
