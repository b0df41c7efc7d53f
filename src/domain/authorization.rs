use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub name: String,
    pub addr_line1: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub email: String,
    pub phone_number: String,
}

/// One authorization attempt, built per inbound order and dropped once the
/// response has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub merchant_order_id: String,
    pub token: String,
    pub currency: String,
    pub total: String,
    pub billing_addr: BillingAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Declined,
    Timeout,
    Network,
    Credentials,
    Malformed,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationApproval {
    pub message: String,
    pub transaction_id: Option<String>,
    pub order_number: Option<String>,
    pub merchant_order_id: String,
    pub response_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationFailure {
    pub kind: FailureKind,
    pub message: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthorizationResult {
    Approved(AuthorizationApproval),
    Failed(AuthorizationFailure),
}

impl AuthorizationResult {
    pub fn failed(kind: FailureKind, message: impl Into<String>, code: Option<String>) -> Self {
        AuthorizationResult::Failed(AuthorizationFailure {
            kind,
            message: message.into(),
            code,
        })
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, AuthorizationResult::Approved(_))
    }

    pub fn message(&self) -> &str {
        match self {
            AuthorizationResult::Approved(a) => &a.message,
            AuthorizationResult::Failed(f) => &f.message,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            AuthorizationResult::Approved(_) => "approved",
            AuthorizationResult::Failed(f) => match f.kind {
                FailureKind::Declined => "declined",
                FailureKind::Timeout => "timeout",
                FailureKind::Network => "network",
                FailureKind::Credentials => "credentials",
                FailureKind::Malformed => "malformed",
                FailureKind::Internal => "internal",
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}
