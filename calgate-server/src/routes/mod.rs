pub mod calendars;
pub mod events;
pub mod invites;
pub mod rsvp;
pub mod users;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
};
use calgate_core::model::Guarded;
use calgate_core::translator::{self, Reply};
use calgate_core::{Operation, WriteRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::state::AppState;

/// Writes a translator [`Reply`] as a JSON response.
pub struct ApiReply(Reply);

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        (
            self.0.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.0.body,
        )
            .into_response()
    }
}

impl From<Reply> for ApiReply {
    fn from(reply: Reply) -> Self {
        Self(reply)
    }
}

/// Parse the body, check its fields, then validate and forward it.
///
/// `write` receives the parsed request and its JSON form and returns the
/// downstream call to make.
pub(crate) async fn guarded<T, F>(
    state: &AppState,
    operation: Operation,
    payload: Result<Json<T>, JsonRejection>,
    write: F,
) -> ApiReply
where
    T: Guarded + Serialize + Send,
    F: FnOnce(&T, Value) -> WriteRequest + Send,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return translator::malformed(&rejection.body_text()).into(),
    };

    if let Err(err) = request.check_fields() {
        return translator::malformed(&err.to_string()).into();
    }

    let body = match serde_json::to_value(&request) {
        Ok(body) => body,
        Err(err) => {
            error!(%operation, error = %err, "could not encode request body");
            return translator::internal_error().into();
        }
    };

    let write = write(&request, body);
    state
        .gateway
        .dispatch(operation, &request.references(), write)
        .await
        .into()
}

/// Forward a call without reference checks.
pub(crate) async fn forward(state: &AppState, request: WriteRequest) -> ApiReply {
    state.gateway.forward(request).await.into()
}
