use crate::domain::authorization::{AuthorizationResult, FailureKind};
use crate::domain::order::OrderForm;
use crate::error::ValidationError;
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};

pub async fn create_order(
    State(state): State<AppState>,
    form: Result<Form<OrderForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("rejected order body: {}", rejection.body_text());
            return ValidationError::MalformedBody(rejection.body_text()).into_response();
        }
    };

    match state.order_service.place_order(form).await {
        Ok(result) => (status_for(&result), Json(result)).into_response(),
        Err(err) => {
            tracing::info!(code = err.code(), "order rejected before authorization");
            err.into_response()
        }
    }
}

pub fn status_for(result: &AuthorizationResult) -> StatusCode {
    match result {
        AuthorizationResult::Approved(_) => StatusCode::OK,
        AuthorizationResult::Failed(f) => match f.kind {
            FailureKind::Declined => StatusCode::PAYMENT_REQUIRED,
            FailureKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            FailureKind::Network | FailureKind::Malformed | FailureKind::Credentials => {
                StatusCode::BAD_GATEWAY
            }
            FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}
