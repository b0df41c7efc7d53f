use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let gateway = &state.order_service.gateway;
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "gateway": gateway.name(),
        })),
    )
}
