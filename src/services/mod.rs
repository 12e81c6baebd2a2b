//! Services Layer
//!
//! Business logic between the terminal commands and the API client. Each
//! service is a thin orchestration over [`PortfolioApi`](crate::api::PortfolioApi):
//! validate input, issue the mutation, then re-fetch the affected aggregate
//! and hand back only server-confirmed state. No service updates anything
//! optimistically.
//!
//! # Services
//!
//! - `AuthService` - login, registration, best-effort logout
//! - `DashboardService` - profile + portfolio fan-out/fan-in rollup
//! - `FundsService` - deposit, withdraw, allocate, deallocate
//! - `TradingService` - order previews, buy, sell
//! - `SubscriptionService` - premium upgrade, subscription, payment method

pub mod auth_service;
pub mod dashboard_service;
pub mod funds_service;
pub mod subscription_service;
pub mod trading_service;

pub use auth_service::AuthService;
pub use dashboard_service::{DashboardData, DashboardService, PortfolioStats};
pub use funds_service::{FundsResult, FundsService};
pub use subscription_service::{SubscriptionResult, SubscriptionService};
pub use trading_service::{TradePreview, TradeResult, TradingService};
