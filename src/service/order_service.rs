use crate::config::OrderDefaults;
use crate::domain::authorization::{AuthorizationRequest, AuthorizationResult, FailureKind};
use crate::domain::order::{build_authorization_request, OrderForm};
use crate::error::ValidationError;
use crate::gateways::PaymentGateway;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct OrderService {
    pub gateway: Arc<dyn PaymentGateway>,
    pub order_defaults: OrderDefaults,
    pub timeout: Duration,
}

impl OrderService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, order_defaults: OrderDefaults, timeout: Duration) -> Self {
        Self {
            gateway,
            order_defaults,
            timeout,
        }
    }

    /// Validates the form and runs one authorization. Validation failures
    /// return before the gateway is touched.
    pub async fn place_order(&self, form: OrderForm) -> Result<AuthorizationResult, ValidationError> {
        let request = build_authorization_request(form, &self.order_defaults)?;
        Ok(self.authorize(request).await)
    }

    /// The gateway call runs on its own task so a dropped caller does not
    /// cancel it mid-flight; its result is then simply discarded.
    pub async fn authorize(&self, request: AuthorizationRequest) -> AuthorizationResult {
        let started = Instant::now();
        let gateway = self.gateway.clone();
        let timeout = self.timeout;
        let merchant_order_id = request.merchant_order_id.clone();

        let handle = tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, gateway.authorize(&request)).await {
                Ok(result) => result,
                Err(_) => AuthorizationResult::failed(
                    FailureKind::Timeout,
                    format!("gateway did not answer within {}ms", timeout.as_millis()),
                    None,
                ),
            };
            tracing::debug!(
                merchant_order_id = %request.merchant_order_id,
                outcome = result.outcome(),
                "gateway task resolved"
            );
            result
        });

        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(merchant_order_id = %merchant_order_id, "gateway task failed: {}", e);
                AuthorizationResult::failed(FailureKind::Internal, "internal error while authorizing", None)
            }
        };

        tracing::info!(
            gateway = self.gateway.name(),
            merchant_order_id = %merchant_order_id,
            outcome = result.outcome(),
            latency_ms = started.elapsed().as_millis() as u64,
            "order authorization completed"
        );
        result
    }
}
