use crate::domain::authorization::{
    AuthorizationApproval, AuthorizationRequest, AuthorizationResult, FailureKind,
};
use crate::gateways::PaymentGateway;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Approve { message: String },
    Decline { message: String, code: Option<String> },
    /// Sleeps for the given duration before approving; used to exercise the
    /// bounded wait.
    Stall(Duration),
    Panic,
}

pub struct MockGateway {
    pub behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn approving(message: &str) -> Self {
        Self::new(MockBehavior::Approve {
            message: message.to_string(),
        })
    }

    pub fn declining(message: &str) -> Self {
        Self::new(MockBehavior::Decline {
            message: message.to_string(),
            code: Some("MOCK_DECLINED".to_string()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn approval(message: &str, request: &AuthorizationRequest) -> AuthorizationResult {
    AuthorizationResult::Approved(AuthorizationApproval {
        message: message.to_string(),
        transaction_id: Some(format!("mock_txn_{}", uuid::Uuid::new_v4())),
        order_number: None,
        merchant_order_id: request.merchant_order_id.clone(),
        response_code: Some("APPROVED".to_string()),
    })
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Approve { message } => approval(message, request),
            MockBehavior::Decline { message, code } => {
                AuthorizationResult::failed(FailureKind::Declined, message.clone(), code.clone())
            }
            MockBehavior::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                approval("Approved after stall", request)
            }
            MockBehavior::Panic => panic!("mock gateway panicked"),
        }
    }
}
