#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request};
use axum::routing::post;
use axum::{Json, Router};
use payment_api::config::{CheckoutSettings, GatewayCredentials, OrderDefaults, Secret};
use payment_api::gateways::twocheckout::TwoCheckoutGateway;
use payment_api::gateways::PaymentGateway;
use payment_api::service::order_service::OrderService;
use payment_api::AppState;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SELLER_ID: &str = "901248204";
pub const PRIVATE_KEY: &str = "BE632CB0-BB29-11E3-AFB6-D99C28100996";
pub const PUBLISHABLE_KEY: &str = "7D6C4E2A-PUB";

pub fn public_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public"))
}

pub fn state_with(gateway: Arc<dyn PaymentGateway>) -> AppState {
    AppState {
        order_service: OrderService::new(gateway, OrderDefaults::default(), Duration::from_secs(2)),
        checkout: CheckoutSettings {
            seller_id: SELLER_ID.to_string(),
            publishable_key: Some(PUBLISHABLE_KEY.to_string()),
            sandbox: true,
        },
        public_dir: public_dir(),
    }
}

pub fn credentials() -> GatewayCredentials {
    GatewayCredentials {
        seller_id: SELLER_ID.to_string(),
        private_key: Secret::new(PRIVATE_KEY),
        sandbox: true,
    }
}

pub fn twocheckout(base_url: &str, timeout_ms: u64) -> TwoCheckoutGateway {
    TwoCheckoutGateway {
        base_url: base_url.to_string(),
        credentials: credentials(),
        timeout_ms,
        client: reqwest::Client::new(),
    }
}

pub fn order_request(body: &str) -> Request<Body> {
    match Request::builder()
        .method("POST")
        .uri("/order")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
    {
        Ok(r) => r,
        Err(e) => panic!("failed to build request: {e}"),
    }
}

pub async fn body_string(resp: axum::response::Response) -> String {
    let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
        Ok(b) => b,
        Err(e) => panic!("failed to read body: {e}"),
    };
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Local stand-in for the 2Checkout `authService` endpoint. Records every
/// request body and answers with a fixed JSON document after `delay`.
#[derive(Clone)]
pub struct StubGateway {
    pub base_url: String,
    pub received: Arc<Mutex<Vec<(String, Value)>>>,
}

#[derive(Clone)]
struct StubState {
    reply: Value,
    delay: Duration,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn auth_service(
    State(state): State<StubState>,
    Path(seller_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    if let Ok(mut received) = state.received.lock() {
        received.push((seller_id, body));
    }
    tokio::time::sleep(state.delay).await;
    Json(state.reply)
}

pub async fn spawn_stub(reply: Value, delay: Duration) -> StubGateway {
    let received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/checkout/api/1/:seller_id/rs/authService", post(auth_service))
        .with_state(StubState {
            reply,
            delay,
            received: received.clone(),
        });

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(l) => l,
        Err(e) => panic!("failed to bind stub: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(a) => a,
        Err(e) => panic!("no local addr: {e}"),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    StubGateway {
        base_url: format!("http://{addr}"),
        received,
    }
}

pub fn approved_reply() -> Value {
    serde_json::json!({
        "validationErrors": null,
        "exception": null,
        "response": {
            "type": "AuthResponse",
            "responseCode": "APPROVED",
            "responseMsg": "Successfully authorized the provided credit card",
            "orderNumber": "9093717691800",
            "transactionId": "9093717691809",
            "merchantOrderId": "123",
            "currencyCode": "USD",
            "total": "10.00"
        }
    })
}

pub fn exception_reply(message: &str, code: &str) -> Value {
    serde_json::json!({
        "validationErrors": null,
        "response": null,
        "exception": {
            "errorMsg": message,
            "errorCode": code,
            "httpStatus": "400",
            "exception": false
        }
    })
}
