use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

/// `GET /checkout-config` — seller id, publishable key and mode for the
/// tokenization script on the landing page.
pub async fn checkout_config(State(state): State<AppState>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, Json(state.checkout))
}
