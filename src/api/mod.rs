//! meuPortefolio REST API client
//!
//! One method per backend operation, grouped by resource. Every call builds
//! its URL from the configured base, attaches a JSON body for mutating
//! verbs, and maps non-success statuses to [`AppError::Api`] carrying the
//! response body text verbatim. No retry or backoff anywhere; the only
//! explicit deadline is the extended-profile fetch (see
//! [`users`](self::users)).

pub mod assets;
pub mod portfolios;
pub mod risk;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;
pub mod users;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use types::*;
use url::Url;
use uuid::Uuid;

/// Default timeout for the shared HTTP client. Individual call sites do not
/// cancel beyond this; the profile fetch applies its own tighter deadline.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Typed HTTP client for the meuPortefolio backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Probe `GET {origin}/health`. The health endpoint lives at the server
    /// origin, outside the `/api/v1` prefix.
    pub async fn health(&self) -> bool {
        let mut origin = self.base.clone();
        origin.set_path("/health");
        origin.set_query(None);

        match self.http.get(origin).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.http.get(self.url(path)).send().await?;
        Self::parse(resp).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::parse(resp).await
    }

    /// POST with no request body (logout is the only such endpoint).
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let resp = self.http.post(self.url(path)).send().await?;
        Self::check(resp).await.map(|_| ())
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        Self::parse(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.http.delete(self.url(path)).send().await?;
        Self::check(resp).await.map(|_| ())
    }

    /// Map a non-success status to `AppError::Api` with the body text,
    /// otherwise hand the response back for decoding.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!("API error {}: {}", status, body);
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let resp = Self::check(resp).await?;
        Ok(resp.json::<T>().await?)
    }
}

/// The backend surface consumed by the service layer. `ApiClient` is the
/// live implementation; tests substitute in-memory stubs.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    // Auth
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse>;
    async fn register(&self, req: CreateUserRequest) -> Result<User>;
    async fn logout(&self) -> Result<()>;

    // Users
    async fn user_complete(&self, user_id: Uuid) -> Result<ExtendedUser>;

    // Funds
    async fn deposit(&self, user_id: Uuid, req: DepositRequest) -> Result<FundOperationResponse>;
    async fn withdraw(&self, user_id: Uuid, req: WithdrawRequest)
        -> Result<FundOperationResponse>;
    async fn allocate(&self, user_id: Uuid, req: AllocateRequest)
        -> Result<FundOperationResponse>;
    async fn deallocate(
        &self,
        user_id: Uuid,
        req: DeallocateRequest,
    ) -> Result<FundOperationResponse>;

    // Subscription / payment
    async fn upgrade_premium(
        &self,
        user_id: Uuid,
        req: UpgradePremiumRequest,
    ) -> Result<PremiumUpgradeResponse>;
    async fn manage_subscription(
        &self,
        user_id: Uuid,
        req: ManageSubscriptionRequest,
    ) -> Result<SubscriptionResponse>;
    async fn set_payment_method(
        &self,
        user_id: Uuid,
        req: SetPaymentMethodRequest,
    ) -> Result<PaymentMethodResponse>;

    // Portfolios
    async fn list_portfolios(&self, user_id: Option<Uuid>) -> Result<Vec<Portfolio>>;
    async fn portfolio_balance(&self, portfolio_id: i32) -> Result<PortfolioBalance>;
    async fn portfolio_holdings(&self, portfolio_id: i32) -> Result<Vec<AssetHolding>>;

    // Trading
    async fn buy_asset(&self, req: BuyAssetRequest) -> Result<BuyAssetResponse>;
    async fn sell_asset(&self, req: SellAssetRequest) -> Result<SellAssetResponse>;

    // Market data
    async fn get_asset(&self, asset_id: i32) -> Result<Asset>;
}

#[async_trait]
impl PortfolioApi for ApiClient {
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        ApiClient::login(self, &req).await
    }

    async fn register(&self, req: CreateUserRequest) -> Result<User> {
        ApiClient::register(self, &req).await
    }

    async fn logout(&self) -> Result<()> {
        ApiClient::logout(self).await
    }

    async fn user_complete(&self, user_id: Uuid) -> Result<ExtendedUser> {
        ApiClient::user_complete(self, user_id).await
    }

    async fn deposit(&self, user_id: Uuid, req: DepositRequest) -> Result<FundOperationResponse> {
        ApiClient::deposit(self, user_id, &req).await
    }

    async fn withdraw(
        &self,
        user_id: Uuid,
        req: WithdrawRequest,
    ) -> Result<FundOperationResponse> {
        ApiClient::withdraw(self, user_id, &req).await
    }

    async fn allocate(
        &self,
        user_id: Uuid,
        req: AllocateRequest,
    ) -> Result<FundOperationResponse> {
        ApiClient::allocate(self, user_id, &req).await
    }

    async fn deallocate(
        &self,
        user_id: Uuid,
        req: DeallocateRequest,
    ) -> Result<FundOperationResponse> {
        ApiClient::deallocate(self, user_id, &req).await
    }

    async fn upgrade_premium(
        &self,
        user_id: Uuid,
        req: UpgradePremiumRequest,
    ) -> Result<PremiumUpgradeResponse> {
        ApiClient::upgrade_premium(self, user_id, &req).await
    }

    async fn manage_subscription(
        &self,
        user_id: Uuid,
        req: ManageSubscriptionRequest,
    ) -> Result<SubscriptionResponse> {
        ApiClient::manage_subscription(self, user_id, &req).await
    }

    async fn set_payment_method(
        &self,
        user_id: Uuid,
        req: SetPaymentMethodRequest,
    ) -> Result<PaymentMethodResponse> {
        ApiClient::set_payment_method(self, user_id, &req).await
    }

    async fn list_portfolios(&self, user_id: Option<Uuid>) -> Result<Vec<Portfolio>> {
        ApiClient::list_portfolios(self, user_id).await
    }

    async fn portfolio_balance(&self, portfolio_id: i32) -> Result<PortfolioBalance> {
        ApiClient::portfolio_balance(self, portfolio_id).await
    }

    async fn portfolio_holdings(&self, portfolio_id: i32) -> Result<Vec<AssetHolding>> {
        ApiClient::portfolio_holdings(self, portfolio_id).await
    }

    async fn buy_asset(&self, req: BuyAssetRequest) -> Result<BuyAssetResponse> {
        ApiClient::buy_asset(self, &req).await
    }

    async fn sell_asset(&self, req: SellAssetRequest) -> Result<SellAssetResponse> {
        ApiClient::sell_asset(self, &req).await
    }

    async fn get_asset(&self, asset_id: i32) -> Result<Asset> {
        ApiClient::get_asset(self, asset_id).await
    }
}
