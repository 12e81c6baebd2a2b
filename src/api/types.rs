//! Wire types for the meuPortefolio REST API
//!
//! Field names match the backend JSON exactly. These are plain DTOs: the
//! client never mutates them, and every state transition is observed by
//! re-fetching.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Users
// ============================================================================

/// Basic user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub country_of_residence: String,
    pub iban: String,
    pub user_type: String, // "Basic" or "Premium"
    pub created_at: String,
    pub updated_at: String,
}

/// Full profile from `GET /users/{id}/complete`, including payment and
/// subscription fields. Fetched fresh on every dashboard load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub country_of_residence: String,
    pub iban: String,
    pub user_type: String,
    pub account_balance: f64,

    // Payment method
    pub payment_method_type: Option<String>,
    pub payment_method_details: Option<String>,
    pub payment_method_expiry: Option<String>,
    pub payment_method_active: bool,

    // Subscription
    pub is_premium: bool,
    pub premium_start_date: Option<String>,
    pub premium_end_date: Option<String>,
    pub monthly_subscription_rate: Option<f64>,
    pub auto_renew_subscription: bool,
    pub last_subscription_payment: Option<String>,
    pub next_subscription_payment: Option<String>,

    // Calculated server-side
    pub days_remaining_in_subscription: i32,
    pub subscription_expired: bool,

    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country_of_residence: String,
    pub iban: String,
    pub user_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPaymentMethodRequest {
    pub payment_method_type: String,
    pub payment_method_details: String,
    pub payment_method_expiry: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    pub status: String,
    pub message: String,
}

/// Subscription action: ACTIVATE, RENEW or CANCEL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManageSubscriptionRequest {
    pub action: String,
    pub months_to_add: Option<i32>,
    pub monthly_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub status: String,
    pub amount_paid: Option<f64>,
    pub months_added: Option<i32>,
    pub new_balance: Option<f64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradePremiumRequest {
    pub subscription_months: Option<i32>,
    pub monthly_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumUpgradeResponse {
    pub status: String,
    pub amount_paid: f64,
    pub subscription_months: i32,
    pub new_balance: f64,
}

// ============================================================================
// Funds
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositRequest {
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: f64,
    pub description: Option<String>,
}

/// Move funds from the account into a portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocateRequest {
    pub portfolio_id: i32,
    pub amount: f64,
}

/// Move funds from a portfolio back into the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeallocateRequest {
    pub portfolio_id: i32,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundOperationResponse {
    pub status: String,
    pub amount: f64,
    pub new_balance: f64,
    pub new_portfolio_funds: Option<f64>,
}

// ============================================================================
// Portfolios
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub portfolio_id: i32,
    pub user_id: Uuid,
    pub name: String,
    pub creation_date: String,
    pub current_funds: f64,
    pub current_profit_pct: f64,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePortfolioRequest {
    pub name: String,
    pub user_id: Uuid,
    /// Required by the backend; new portfolios start empty.
    pub initial_funds: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePortfolioRequest {
    pub name: Option<String>,
}

/// Cash/holdings breakdown from `GET /portfolios/{id}/balance`.
/// `total_portfolio_value` is taken as authoritative, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioBalance {
    pub portfolio_id: i32,
    pub portfolio_name: String,
    pub cash_balance: f64,
    pub holdings_value: f64,
    pub total_portfolio_value: f64,
    pub holdings_count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub portfolio_id: i32,
    pub portfolio_name: String,
    pub owner: String,
    pub current_funds: f64,
    pub current_profit_pct: f64,
    pub creation_date: String,
    pub total_trades: i32,
}

// ============================================================================
// Trading
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyAssetRequest {
    pub portfolio_id: i32,
    pub asset_id: i32,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellAssetRequest {
    pub portfolio_id: i32,
    pub asset_id: i32,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyAssetResponse {
    pub status: String,
    pub transaction_id: i64,
    pub quantity_purchased: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellAssetResponse {
    pub status: String,
    pub transaction_id: i64,
    pub quantity_sold: f64,
}

/// Per-asset holding within a portfolio. `market_value` is authoritative
/// from the server; the client recomputes it only for order previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetHolding {
    pub portfolio_id: i32,
    pub portfolio_name: String,
    pub asset_id: i32,
    pub asset_name: String,
    pub symbol: String,
    pub asset_type: String,
    pub quantity_held: f64,
    pub current_price: f64,
    pub market_value: f64,
}

// ============================================================================
// Market data
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: i32,
    pub name: String,
    pub symbol: String,
    pub asset_type: String,
    pub price: f64,
    pub volume: i64,
    pub available_shares: f64,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPriceHistory {
    pub asset_id: i32,
    pub symbol: String,
    pub price: f64,
    pub volume: i64,
    pub timestamp: String,
}

// ============================================================================
// Risk analytics
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_type: String,
    pub total_portfolios: i32,
    pub total_investment: f64,
    pub maximum_drawdown: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub risk_level: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioRiskAnalysis {
    pub portfolio_id: i32,
    pub portfolio_name: String,
    pub current_funds: f64,
    pub current_profit_pct: f64,
    pub maximum_drawdown: Option<f64>,
    pub beta: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total_users: i32,
    pub total_portfolios: i32,
    pub total_assets_under_management: f64,
    pub average_system_risk: f64,
    pub calculated_at: String,
}
