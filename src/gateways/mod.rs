use crate::domain::authorization::{AuthorizationRequest, AuthorizationResult};

pub mod mock;
pub mod twocheckout;

/// Adapter over an external payment gateway.
///
/// `authorize` always resolves to one of the two terminal outcomes; transport
/// faults, declines and bad responses all come back as
/// [`AuthorizationResult::Failed`].
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn authorize(&self, request: &AuthorizationRequest) -> AuthorizationResult;
}
