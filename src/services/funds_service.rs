//! Funds Service
//!
//! Deposit, withdrawal and account<->portfolio fund movement. Every
//! operation follows the same flow: validate the amount client-side, issue
//! the mutation, then re-fetch the extended profile so callers render only
//! server-confirmed state. The mutation response alone is never displayed.

use crate::api::types::{
    AllocateRequest, DeallocateRequest, DepositRequest, ExtendedUser, FundOperationResponse,
    WithdrawRequest,
};
use crate::api::PortfolioApi;
use crate::error::{AppError, Result};
use tracing::info;
use uuid::Uuid;

/// Outcome of a fund operation: the backend's response plus the re-fetched
/// profile that confirms it.
#[derive(Debug, Clone)]
pub struct FundsResult {
    pub operation: FundOperationResponse,
    pub profile: ExtendedUser,
}

/// Fund-movement service
pub struct FundsService;

impl FundsService {
    pub async fn deposit(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        amount: f64,
        description: Option<String>,
    ) -> Result<FundsResult> {
        Self::check_amount(amount)?;
        info!("Deposit of {:.2} for {}", amount, user_id);

        let operation = api
            .deposit(
                user_id,
                DepositRequest {
                    amount,
                    description,
                },
            )
            .await?;
        Self::confirm(api, user_id, operation).await
    }

    pub async fn withdraw(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        amount: f64,
        description: Option<String>,
    ) -> Result<FundsResult> {
        Self::check_amount(amount)?;
        info!("Withdrawal of {:.2} for {}", amount, user_id);

        let operation = api
            .withdraw(
                user_id,
                WithdrawRequest {
                    amount,
                    description,
                },
            )
            .await?;
        Self::confirm(api, user_id, operation).await
    }

    /// Move funds from the account into a portfolio.
    pub async fn allocate(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        portfolio_id: i32,
        amount: f64,
    ) -> Result<FundsResult> {
        Self::check_amount(amount)?;
        info!(
            "Allocating {:.2} from {} to portfolio {}",
            amount, user_id, portfolio_id
        );

        let operation = api
            .allocate(
                user_id,
                AllocateRequest {
                    portfolio_id,
                    amount,
                },
            )
            .await?;
        Self::confirm(api, user_id, operation).await
    }

    /// Move funds from a portfolio back into the account.
    pub async fn deallocate(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        portfolio_id: i32,
        amount: f64,
    ) -> Result<FundsResult> {
        Self::check_amount(amount)?;
        info!(
            "Deallocating {:.2} from portfolio {} to {}",
            amount, portfolio_id, user_id
        );

        let operation = api
            .deallocate(
                user_id,
                DeallocateRequest {
                    portfolio_id,
                    amount,
                },
            )
            .await?;
        Self::confirm(api, user_id, operation).await
    }

    fn check_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::Validation(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }
        Ok(())
    }

    async fn confirm(
        api: &dyn PortfolioApi,
        user_id: Uuid,
        operation: FundOperationResponse,
    ) -> Result<FundsResult> {
        let profile = api.user_complete(user_id).await?;
        Ok(FundsResult { operation, profile })
    }
}
