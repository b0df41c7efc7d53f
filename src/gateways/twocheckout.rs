use crate::config::{AppConfig, GatewayCredentials};
use crate::domain::authorization::{
    AuthorizationApproval, AuthorizationRequest, AuthorizationResult, AuthorizationFailure,
    BillingAddress,
};
use crate::error::GatewayError;
use crate::gateways::PaymentGateway;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const UNAUTHORIZED_ERROR_CODE: &str = "300";
const APPROVED_RESPONSE_CODE: &str = "APPROVED";

pub struct TwoCheckoutGateway {
    pub base_url: String,
    pub credentials: GatewayCredentials,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl TwoCheckoutGateway {
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.gateway_timeout_ms))
            .user_agent(concat!("payment-api/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: cfg.gateway_base_url.clone(),
            credentials: cfg.credentials.clone(),
            timeout_ms: cfg.gateway_timeout_ms,
            client,
        })
    }

    pub fn auth_url(&self) -> String {
        format!(
            "{}/checkout/api/1/{}/rs/authService",
            self.base_url, self.credentials.seller_id
        )
    }

    async fn call(&self, request: &AuthorizationRequest) -> Result<AuthorizationApproval, GatewayError> {
        let payload = AuthorizePayload::new(&self.credentials, request);

        let resp = self
            .client
            .post(self.auth_url())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        let parsed: AuthorizeResponse = serde_json::from_str(&body).map_err(|_| {
            GatewayError::Malformed(format!("HTTP {} with undecodable body", status.as_u16()))
        })?;

        interpret(parsed, &request.merchant_order_id)
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.timeout_ms)
        } else if e.is_decode() {
            GatewayError::Malformed("response body could not be read".to_string())
        } else {
            // reqwest error text carries the request URL, which embeds the seller id.
            GatewayError::Network(self.scrub(&e.without_url().to_string()))
        }
    }

    fn scrub(&self, message: &str) -> String {
        scrub_credentials(message, &self.credentials)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for TwoCheckoutGateway {
    fn name(&self) -> &'static str {
        "2checkout"
    }

    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationResult {
        let started = Instant::now();
        let result = match self.call(request).await {
            Ok(approval) => AuthorizationResult::Approved(approval),
            Err(err) => {
                let kind = err.kind();
                let code = match &err {
                    GatewayError::Declined { code, .. } | GatewayError::Credentials { code, .. } => {
                        code.clone()
                    }
                    _ => None,
                };
                AuthorizationResult::Failed(AuthorizationFailure {
                    kind,
                    message: self.scrub(&err.to_string()),
                    code,
                })
            }
        };

        tracing::info!(
            gateway = self.name(),
            merchant_order_id = %request.merchant_order_id,
            outcome = result.outcome(),
            latency_ms = started.elapsed().as_millis() as u64,
            "2checkout authorize finished"
        );
        result
    }
}

/// Replaces any occurrence of the seller id or private key with a marker.
pub fn scrub_credentials(message: &str, credentials: &GatewayCredentials) -> String {
    let mut out = message.to_string();
    for secret in [credentials.private_key.expose(), credentials.seller_id.as_str()] {
        if !secret.is_empty() {
            out = out.replace(secret, "[redacted]");
        }
    }
    out
}

fn interpret(parsed: AuthorizeResponse, merchant_order_id: &str) -> Result<AuthorizationApproval, GatewayError> {
    if let Some(exception) = parsed.exception {
        let message = exception
            .error_msg
            .unwrap_or_else(|| "gateway returned an error".to_string());
        let code = exception.error_code.map(|c| c.into_string());
        return Err(if code.as_deref() == Some(UNAUTHORIZED_ERROR_CODE) {
            GatewayError::Credentials { message, code }
        } else {
            GatewayError::Declined { message, code }
        });
    }

    let response = parsed
        .response
        .ok_or_else(|| GatewayError::Malformed("neither response nor exception present".to_string()))?;

    let response_code = response.response_code.map(|c| c.into_string());
    let message = response
        .response_msg
        .unwrap_or_else(|| "no response message".to_string());

    if response_code.as_deref() != Some(APPROVED_RESPONSE_CODE) {
        return Err(GatewayError::Declined {
            message,
            code: response_code,
        });
    }

    Ok(AuthorizationApproval {
        message,
        transaction_id: response.transaction_id.map(|v| v.into_string()),
        order_number: response.order_number.map(|v| v.into_string()),
        merchant_order_id: response
            .merchant_order_id
            .unwrap_or_else(|| merchant_order_id.to_string()),
        response_code,
    })
}

/// Request body of the `authService` call. Field names are fixed by 2Checkout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizePayload<'a> {
    pub seller_id: &'a str,
    pub private_key: &'a str,
    pub merchant_order_id: &'a str,
    pub token: &'a str,
    pub currency: &'a str,
    pub total: &'a str,
    pub billing_addr: WireBillingAddr<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireBillingAddr<'a> {
    pub name: &'a str,
    pub addr_line1: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub country: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

impl<'a> AuthorizePayload<'a> {
    pub fn new(credentials: &'a GatewayCredentials, request: &'a AuthorizationRequest) -> Self {
        Self {
            seller_id: &credentials.seller_id,
            private_key: credentials.private_key.expose(),
            merchant_order_id: &request.merchant_order_id,
            token: &request.token,
            currency: &request.currency,
            total: &request.total,
            billing_addr: WireBillingAddr::from(&request.billing_addr),
        }
    }
}

impl<'a> From<&'a BillingAddress> for WireBillingAddr<'a> {
    fn from(b: &'a BillingAddress) -> Self {
        Self {
            name: &b.name,
            addr_line1: &b.addr_line1,
            city: &b.city,
            state: &b.state,
            zip_code: &b.zip_code,
            country: &b.country,
            email: &b.email,
            phone_number: &b.phone_number,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    #[serde(default)]
    exception: Option<WireException>,
    #[serde(default)]
    response: Option<WireResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireException {
    error_msg: Option<String>,
    error_code: Option<Scalar>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    response_msg: Option<String>,
    response_code: Option<Scalar>,
    order_number: Option<Scalar>,
    transaction_id: Option<Scalar>,
    merchant_order_id: Option<String>,
}

/// 2Checkout sends some identifiers as strings and some as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }
}
