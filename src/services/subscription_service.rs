//! Subscription Service
//!
//! Premium upgrade, subscription actions and payment-method changes. The
//! premium gate flips only on the `is_premium` flag of the re-fetched
//! profile returned here; there is no local unlock on a 200 alone.

use crate::api::types::{
    ExtendedUser, ManageSubscriptionRequest, SetPaymentMethodRequest, UpgradePremiumRequest,
};
use crate::api::PortfolioApi;
use crate::error::{AppError, Result};
use tracing::info;
use uuid::Uuid;

/// Subscription action accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    Activate,
    Renew,
    Cancel,
}

impl SubscriptionAction {
    fn as_wire(&self) -> &'static str {
        match self {
            SubscriptionAction::Activate => "ACTIVATE",
            SubscriptionAction::Renew => "RENEW",
            SubscriptionAction::Cancel => "CANCEL",
        }
    }
}

/// Outcome of a subscription or payment mutation: the re-fetched profile
/// is the state callers render from.
#[derive(Debug, Clone)]
pub struct SubscriptionResult {
    pub status: String,
    pub profile: ExtendedUser,
}

/// Subscription and payment-method service
pub struct SubscriptionService;

impl SubscriptionService {
    /// Upgrade to premium. Months default to 1 and the rate to the
    /// backend's standard 50.00/month when not supplied.
    pub async fn upgrade_premium(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        months: Option<i32>,
        monthly_rate: Option<f64>,
    ) -> Result<SubscriptionResult> {
        if let Some(m) = months {
            if m <= 0 {
                return Err(AppError::Validation(format!(
                    "Subscription months must be positive, got {}",
                    m
                )));
            }
        }
        info!("Premium upgrade for {}", user_id);

        let resp = api
            .upgrade_premium(
                user_id,
                UpgradePremiumRequest {
                    subscription_months: months,
                    monthly_rate,
                },
            )
            .await?;

        let profile = api.user_complete(user_id).await?;
        Ok(SubscriptionResult {
            status: resp.status,
            profile,
        })
    }

    pub async fn manage(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        action: SubscriptionAction,
        months_to_add: Option<i32>,
        monthly_rate: Option<f64>,
    ) -> Result<SubscriptionResult> {
        info!("Subscription {} for {}", action.as_wire(), user_id);

        let resp = api
            .manage_subscription(
                user_id,
                ManageSubscriptionRequest {
                    action: action.as_wire().to_string(),
                    months_to_add,
                    monthly_rate,
                },
            )
            .await?;

        let profile = api.user_complete(user_id).await?;
        Ok(SubscriptionResult {
            status: resp.status,
            profile,
        })
    }

    pub async fn set_payment_method(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        method_type: String,
        details: String,
        expiry: Option<String>,
    ) -> Result<SubscriptionResult> {
        info!("Payment method update for {}", user_id);

        let resp = api
            .set_payment_method(
                user_id,
                SetPaymentMethodRequest {
                    payment_method_type: method_type,
                    payment_method_details: details,
                    payment_method_expiry: expiry,
                },
            )
            .await?;

        let profile = api.user_complete(user_id).await?;
        Ok(SubscriptionResult {
            status: resp.status,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{sample_profile, StubApi};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_upgrade_unlocks_only_after_refetch() {
        let user_id = Uuid::new_v4();
        let api = StubApi::new().with_profile(sample_profile(user_id, 200.0, false));

        let result = SubscriptionService::upgrade_premium(&api, user_id, Some(1), Some(50.0))
            .await
            .unwrap();

        // The gate reads the re-fetched profile
        assert!(result.profile.is_premium);
        assert_eq!(result.profile.account_balance, 150.0);
        assert_eq!(api.profile_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upgrade_with_insufficient_balance_keeps_gate_locked() {
        let user_id = Uuid::new_v4();
        let api = StubApi::new().with_profile(sample_profile(user_id, 10.0, false));

        let err = SubscriptionService::upgrade_premium(&api, user_id, Some(1), Some(50.0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 400, .. }));

        // Nothing was re-fetched and the stored profile is unchanged
        assert_eq!(api.profile_fetches.load(Ordering::SeqCst), 0);
        assert!(!api.profile.lock().as_ref().unwrap().is_premium);
    }

    #[tokio::test]
    async fn test_cancel_turns_off_auto_renew() {
        let user_id = Uuid::new_v4();
        let mut profile = sample_profile(user_id, 100.0, true);
        profile.auto_renew_subscription = true;
        let api = StubApi::new().with_profile(profile);

        let result = SubscriptionService::manage(
            &api,
            user_id,
            SubscriptionAction::Cancel,
            None,
            None,
        )
        .await
        .unwrap();

        assert!(!result.profile.auto_renew_subscription);
    }
}
