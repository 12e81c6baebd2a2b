//! User, auth, funds and subscription endpoints

use super::types::*;
use super::ApiClient;
use crate::config::PROFILE_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use uuid::Uuid;

impl ApiClient {
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        self.post_json("/users/login", req).await
    }

    pub async fn register(&self, req: &CreateUserRequest) -> Result<User> {
        self.post_json("/users", req).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.post_empty("/users/logout").await
    }

    /// Full profile including payment and subscription fields.
    ///
    /// The only call site with an explicit client-side deadline: an
    /// unresponsive backend surfaces as [`AppError::Timeout`] after 10
    /// seconds instead of hanging until the transport gives up.
    pub async fn user_complete(&self, user_id: Uuid) -> Result<ExtendedUser> {
        self.user_complete_with_deadline(user_id, std::time::Duration::from_secs(PROFILE_TIMEOUT_SECS))
            .await
    }

    pub(crate) async fn user_complete_with_deadline(
        &self,
        user_id: Uuid,
        deadline: std::time::Duration,
    ) -> Result<ExtendedUser> {
        let path = format!("/users/{}/complete", user_id);
        let fetch = self.get_json(&path);
        match tokio::time::timeout(deadline, fetch).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    "Profile fetch for {} timed out after {:?}",
                    user_id,
                    deadline
                );
                Err(AppError::Timeout(deadline.as_secs()))
            }
        }
    }

    // Fund movement

    pub async fn deposit(
        &self,
        user_id: Uuid,
        req: &DepositRequest,
    ) -> Result<FundOperationResponse> {
        self.post_json(&format!("/users/{}/deposit", user_id), req)
            .await
    }

    pub async fn withdraw(
        &self,
        user_id: Uuid,
        req: &WithdrawRequest,
    ) -> Result<FundOperationResponse> {
        self.post_json(&format!("/users/{}/withdraw", user_id), req)
            .await
    }

    pub async fn allocate(
        &self,
        user_id: Uuid,
        req: &AllocateRequest,
    ) -> Result<FundOperationResponse> {
        self.post_json(&format!("/users/{}/allocate", user_id), req)
            .await
    }

    pub async fn deallocate(
        &self,
        user_id: Uuid,
        req: &DeallocateRequest,
    ) -> Result<FundOperationResponse> {
        self.post_json(&format!("/users/{}/deallocate", user_id), req)
            .await
    }

    // Subscription and payment method

    pub async fn upgrade_premium(
        &self,
        user_id: Uuid,
        req: &UpgradePremiumRequest,
    ) -> Result<PremiumUpgradeResponse> {
        self.post_json(&format!("/users/{}/upgrade-premium", user_id), req)
            .await
    }

    pub async fn manage_subscription(
        &self,
        user_id: Uuid,
        req: &ManageSubscriptionRequest,
    ) -> Result<SubscriptionResponse> {
        self.post_json(&format!("/users/{}/subscription", user_id), req)
            .await
    }

    pub async fn set_payment_method(
        &self,
        user_id: Uuid,
        req: &SetPaymentMethodRequest,
    ) -> Result<PaymentMethodResponse> {
        self.put_json(&format!("/users/{}/payment-method", user_id), req)
            .await
    }
}
