//! In-memory [`PortfolioApi`] stub shared by the service tests.
//!
//! Holds a mutable "server state" (profile, portfolios, balances) so tests
//! can observe the mutation-then-refetch flow: fund and subscription
//! operations mutate the stored profile the way the backend would, and the
//! updated values become visible only through `user_complete`.

use super::types::*;
use super::PortfolioApi;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

pub(crate) fn sample_profile(user_id: Uuid, balance: f64, is_premium: bool) -> ExtendedUser {
    ExtendedUser {
        user_id,
        name: "Ana Santos".to_string(),
        email: "ana@example.com".to_string(),
        country_of_residence: "Portugal".to_string(),
        iban: "PT50000201231234567890154".to_string(),
        user_type: if is_premium { "Premium" } else { "Basic" }.to_string(),
        account_balance: balance,
        payment_method_type: None,
        payment_method_details: None,
        payment_method_expiry: None,
        payment_method_active: false,
        is_premium,
        premium_start_date: None,
        premium_end_date: None,
        monthly_subscription_rate: None,
        auto_renew_subscription: false,
        last_subscription_payment: None,
        next_subscription_payment: None,
        days_remaining_in_subscription: 0,
        subscription_expired: !is_premium,
        created_at: "2024-03-20T10:00:00Z".to_string(),
        updated_at: "2024-03-20T10:00:00Z".to_string(),
    }
}

pub(crate) fn sample_portfolio(id: i32) -> Portfolio {
    Portfolio {
        portfolio_id: id,
        user_id: Uuid::nil(),
        name: format!("P{}", id),
        creation_date: "2024-01-01T00:00:00Z".to_string(),
        current_funds: 0.0,
        current_profit_pct: 0.0,
        last_updated: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Default)]
pub(crate) struct StubApi {
    pub profile: Mutex<Option<ExtendedUser>>,
    pub portfolios: Mutex<Vec<Portfolio>>,
    pub balances: Mutex<HashMap<i32, std::result::Result<PortfolioBalance, String>>>,
    pub holdings: Mutex<HashMap<i32, Vec<AssetHolding>>>,
    pub assets: Mutex<HashMap<i32, Asset>>,
    pub list_error: Mutex<Option<String>>,
    pub balance_calls: AtomicUsize,
    pub profile_fetches: AtomicUsize,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, profile: ExtendedUser) -> Self {
        *self.profile.lock() = Some(profile);
        self
    }

    pub fn with_portfolios(self, portfolios: Vec<Portfolio>) -> Self {
        *self.portfolios.lock() = portfolios;
        self
    }

    pub fn with_balance(self, id: i32, cash: f64, holdings: f64, total: f64) -> Self {
        self.balances.lock().insert(
            id,
            Ok(PortfolioBalance {
                portfolio_id: id,
                portfolio_name: format!("P{}", id),
                cash_balance: cash,
                holdings_value: holdings,
                total_portfolio_value: total,
                holdings_count: None,
            }),
        );
        self
    }

    pub fn with_failing_balance(self, id: i32) -> Self {
        self.balances.lock().insert(id, Err("boom".to_string()));
        self
    }

    pub fn with_asset(self, asset: Asset) -> Self {
        self.assets.lock().insert(asset.asset_id, asset);
        self
    }

    fn unstubbed<T>(what: &str) -> Result<T> {
        Err(AppError::Internal(format!("{} not stubbed", what)))
    }
}

#[async_trait]
impl PortfolioApi for StubApi {
    async fn login(&self, _req: LoginRequest) -> Result<LoginResponse> {
        Self::unstubbed("login")
    }

    async fn register(&self, _req: CreateUserRequest) -> Result<User> {
        Self::unstubbed("register")
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }

    async fn user_complete(&self, _user_id: Uuid) -> Result<ExtendedUser> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        self.profile
            .lock()
            .clone()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))
    }

    async fn deposit(&self, _user_id: Uuid, req: DepositRequest) -> Result<FundOperationResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        profile.account_balance += req.amount;
        Ok(FundOperationResponse {
            status: "success".to_string(),
            amount: req.amount,
            new_balance: profile.account_balance,
            new_portfolio_funds: None,
        })
    }

    async fn withdraw(
        &self,
        _user_id: Uuid,
        req: WithdrawRequest,
    ) -> Result<FundOperationResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        if profile.account_balance < req.amount {
            return Err(AppError::Api {
                status: 400,
                body: "Insufficient balance".to_string(),
            });
        }
        profile.account_balance -= req.amount;
        Ok(FundOperationResponse {
            status: "success".to_string(),
            amount: req.amount,
            new_balance: profile.account_balance,
            new_portfolio_funds: None,
        })
    }

    async fn allocate(
        &self,
        _user_id: Uuid,
        req: AllocateRequest,
    ) -> Result<FundOperationResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        profile.account_balance -= req.amount;
        Ok(FundOperationResponse {
            status: "success".to_string(),
            amount: req.amount,
            new_balance: profile.account_balance,
            new_portfolio_funds: Some(req.amount),
        })
    }

    async fn deallocate(
        &self,
        _user_id: Uuid,
        req: DeallocateRequest,
    ) -> Result<FundOperationResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        profile.account_balance += req.amount;
        Ok(FundOperationResponse {
            status: "success".to_string(),
            amount: req.amount,
            new_balance: profile.account_balance,
            new_portfolio_funds: Some(0.0),
        })
    }

    async fn upgrade_premium(
        &self,
        _user_id: Uuid,
        req: UpgradePremiumRequest,
    ) -> Result<PremiumUpgradeResponse> {
        let months = req.subscription_months.unwrap_or(1);
        let rate = req.monthly_rate.unwrap_or(50.0);
        let cost = rate * months as f64;

        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        if profile.account_balance < cost {
            return Err(AppError::Api {
                status: 400,
                body: "Insufficient balance for upgrade".to_string(),
            });
        }
        profile.account_balance -= cost;
        profile.is_premium = true;
        profile.user_type = "Premium".to_string();
        profile.monthly_subscription_rate = Some(rate);
        profile.days_remaining_in_subscription = months * 30;
        profile.subscription_expired = false;

        Ok(PremiumUpgradeResponse {
            status: "success".to_string(),
            amount_paid: cost,
            subscription_months: months,
            new_balance: profile.account_balance,
        })
    }

    async fn manage_subscription(
        &self,
        _user_id: Uuid,
        req: ManageSubscriptionRequest,
    ) -> Result<SubscriptionResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        match req.action.as_str() {
            "CANCEL" => profile.auto_renew_subscription = false,
            "RENEW" | "ACTIVATE" => {
                let months = req.months_to_add.unwrap_or(1);
                profile.days_remaining_in_subscription += months * 30;
                profile.is_premium = true;
                profile.subscription_expired = false;
            }
            other => {
                return Err(AppError::Api {
                    status: 400,
                    body: format!("Unknown action: {}", other),
                })
            }
        }
        Ok(SubscriptionResponse {
            status: "success".to_string(),
            amount_paid: None,
            months_added: req.months_to_add,
            new_balance: Some(profile.account_balance),
            message: None,
        })
    }

    async fn set_payment_method(
        &self,
        _user_id: Uuid,
        req: SetPaymentMethodRequest,
    ) -> Result<PaymentMethodResponse> {
        let mut profile = self.profile.lock();
        let profile = profile
            .as_mut()
            .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
        profile.payment_method_type = Some(req.payment_method_type);
        profile.payment_method_details = Some(req.payment_method_details);
        profile.payment_method_expiry = req.payment_method_expiry;
        profile.payment_method_active = true;
        Ok(PaymentMethodResponse {
            status: "success".to_string(),
            message: "Payment method updated".to_string(),
        })
    }

    async fn list_portfolios(&self, _user_id: Option<Uuid>) -> Result<Vec<Portfolio>> {
        if let Some(msg) = self.list_error.lock().clone() {
            return Err(AppError::Api {
                status: 500,
                body: msg,
            });
        }
        Ok(self.portfolios.lock().clone())
    }

    async fn portfolio_balance(&self, portfolio_id: i32) -> Result<PortfolioBalance> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        match self.balances.lock().get(&portfolio_id) {
            Some(Ok(balance)) => Ok(balance.clone()),
            Some(Err(msg)) => Err(AppError::Api {
                status: 500,
                body: msg.clone(),
            }),
            None => Err(AppError::NotFound(format!("portfolio {}", portfolio_id))),
        }
    }

    async fn portfolio_holdings(&self, portfolio_id: i32) -> Result<Vec<AssetHolding>> {
        Ok(self
            .holdings
            .lock()
            .get(&portfolio_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn buy_asset(&self, req: BuyAssetRequest) -> Result<BuyAssetResponse> {
        Ok(BuyAssetResponse {
            status: "success".to_string(),
            transaction_id: 1,
            quantity_purchased: req.quantity,
        })
    }

    async fn sell_asset(&self, req: SellAssetRequest) -> Result<SellAssetResponse> {
        Ok(SellAssetResponse {
            status: "success".to_string(),
            transaction_id: 2,
            quantity_sold: req.quantity,
        })
    }

    async fn get_asset(&self, asset_id: i32) -> Result<Asset> {
        self.assets
            .lock()
            .get(&asset_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("asset {}", asset_id)))
    }
}
