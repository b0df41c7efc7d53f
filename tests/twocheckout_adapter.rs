mod common;

use common::{approved_reply, exception_reply, spawn_stub, twocheckout, PRIVATE_KEY, SELLER_ID};
use payment_api::config::OrderDefaults;
use payment_api::domain::authorization::{AuthorizationRequest, AuthorizationResult, FailureKind};
use payment_api::gateways::PaymentGateway;
use std::time::Duration;

fn request() -> AuthorizationRequest {
    AuthorizationRequest {
        merchant_order_id: "123".to_string(),
        token: "tok_valid".to_string(),
        currency: "USD".to_string(),
        total: "10.00".to_string(),
        billing_addr: OrderDefaults::default().billing_addr,
    }
}

fn failure_kind(result: &AuthorizationResult) -> Option<FailureKind> {
    match result {
        AuthorizationResult::Failed(f) => Some(f.kind),
        AuthorizationResult::Approved(_) => None,
    }
}

#[tokio::test]
async fn sends_gateway_wire_format_and_maps_approval() {
    let stub = spawn_stub(approved_reply(), Duration::ZERO).await;
    let gateway = twocheckout(&stub.base_url, 2_000);

    let result = gateway.authorize(&request()).await;
    match &result {
        AuthorizationResult::Approved(a) => {
            assert_eq!(a.message, "Successfully authorized the provided credit card");
            assert_eq!(a.transaction_id.as_deref(), Some("9093717691809"));
            assert_eq!(a.merchant_order_id, "123");
        }
        other => panic!("expected approval, got {other:?}"),
    }

    let received = stub.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (seller, body) = &received[0];
    assert_eq!(seller, SELLER_ID);
    assert_eq!(body["sellerId"], SELLER_ID);
    assert_eq!(body["privateKey"], PRIVATE_KEY);
    assert_eq!(body["merchantOrderId"], "123");
    assert_eq!(body["token"], "tok_valid");
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["total"], "10.00");
    assert_eq!(body["billingAddr"]["name"], "Testing Tester");
    assert_eq!(body["billingAddr"]["addrLine1"], "123 Test St");
    assert_eq!(body["billingAddr"]["city"], "Columbus");
    assert_eq!(body["billingAddr"]["state"], "Ohio");
    assert_eq!(body["billingAddr"]["zipCode"], "43123");
    assert_eq!(body["billingAddr"]["country"], "USA");
    assert_eq!(body["billingAddr"]["email"], "example@2co.com");
    assert_eq!(body["billingAddr"]["phoneNumber"], "5555555555");
}

#[tokio::test]
async fn exception_becomes_decline_with_code() {
    let stub = spawn_stub(exception_reply("Card declined", "607"), Duration::ZERO).await;
    let gateway = twocheckout(&stub.base_url, 2_000);

    let result = gateway.authorize(&request()).await;
    match result {
        AuthorizationResult::Failed(f) => {
            assert_eq!(f.kind, FailureKind::Declined);
            assert_eq!(f.message, "Card declined");
            assert_eq!(f.code.as_deref(), Some("607"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_exception_is_credentials_failure() {
    let stub = spawn_stub(exception_reply("Unauthorized", "300"), Duration::ZERO).await;
    let gateway = twocheckout(&stub.base_url, 2_000);

    let result = gateway.authorize(&request()).await;
    assert_eq!(failure_kind(&result), Some(FailureKind::Credentials));
}

#[tokio::test]
async fn slow_gateway_is_timeout() {
    let stub = spawn_stub(approved_reply(), Duration::from_millis(500)).await;
    let gateway = twocheckout(&stub.base_url, 50);

    let result = gateway.authorize(&request()).await;
    assert_eq!(failure_kind(&result), Some(FailureKind::Timeout));
}

#[tokio::test]
async fn unexpected_body_is_malformed() {
    let stub = spawn_stub(serde_json::json!({"hello": "world"}), Duration::ZERO).await;
    let gateway = twocheckout(&stub.base_url, 2_000);

    let result = gateway.authorize(&request()).await;
    assert_eq!(failure_kind(&result), Some(FailureKind::Malformed));
}

#[tokio::test]
async fn unreachable_gateway_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = twocheckout(&format!("http://{addr}"), 2_000);
    let result = gateway.authorize(&request()).await;
    assert_eq!(failure_kind(&result), Some(FailureKind::Network));
    assert!(!result.message().contains(SELLER_ID));
}
