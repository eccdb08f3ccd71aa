//! User lookup and credential endpoints.
//!
//! These only forward to the identity store; credentials are checked there.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::Method,
    routing::{get, post},
};
use calgate_core::translator;
use calgate_core::{Store, WriteRequest};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::routes::{ApiReply, forward};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}

#[derive(Deserialize)]
pub struct UserFilter {
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// GET /users?user_id=&username=
async fn get_users(
    State(state): State<AppState>,
    query: Result<Query<UserFilter>, QueryRejection>,
) -> ApiReply {
    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let request = WriteRequest::get(Store::Identity, ["users"])
        .with_query("user_id", filter.user_id)
        .with_query("username", filter.username);
    forward(&state, request).await
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiReply {
    send_credentials(&state, "login", payload).await
}

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiReply {
    send_credentials(&state, "register", payload).await
}

async fn send_credentials(
    state: &AppState,
    action: &str,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiReply {
    let Json(credentials) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    let body = match serde_json::to_value(&credentials) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "could not encode credentials");
            return translator::internal_error().into();
        }
    };

    let request =
        WriteRequest::new(Store::Identity, Method::POST, ["auth", action]).with_body(body);
    forward(state, request).await
}
