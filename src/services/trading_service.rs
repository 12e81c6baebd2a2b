//! Trading Service
//!
//! Order previews and trade execution. Previews are a display convenience
//! computed from the latest quote; the server stays authoritative for
//! `market_value` and settlement. After a trade the affected portfolio's
//! balance and holdings are re-fetched and returned, so callers never
//! render assumed post-trade state.

use crate::api::types::{
    AssetHolding, BuyAssetRequest, PortfolioBalance, SellAssetRequest,
};
use crate::api::PortfolioApi;
use crate::error::{AppError, Result};
use tracing::info;

/// Side of a trade order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Client-side order preview: estimated cost or proceeds at the latest
/// quote. Never submitted; display only.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePreview {
    pub side: OrderSide,
    pub asset_id: i32,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub estimated_total: f64,
}

/// Outcome of a trade: the backend's confirmation plus the re-fetched
/// portfolio state.
#[derive(Debug, Clone)]
pub struct TradeResult {
    pub status: String,
    pub transaction_id: i64,
    pub quantity: f64,
    pub balance: PortfolioBalance,
    pub holdings: Vec<AssetHolding>,
}

/// Trading service
pub struct TradingService;

impl TradingService {
    /// Price an order at the asset's current quote.
    pub async fn preview(
        api: &dyn PortfolioApi,
        side: OrderSide,
        asset_id: i32,
        quantity: f64,
    ) -> Result<TradePreview> {
        Self::check_quantity(quantity)?;

        let asset = api.get_asset(asset_id).await?;
        Ok(TradePreview {
            side,
            asset_id,
            symbol: asset.symbol,
            quantity,
            price: asset.price,
            estimated_total: quantity * asset.price,
        })
    }

    pub async fn buy(
        api: &dyn PortfolioApi,
        portfolio_id: i32,
        asset_id: i32,
        quantity: f64,
    ) -> Result<TradeResult> {
        Self::check_quantity(quantity)?;
        info!(
            "Buying {} of asset {} in portfolio {}",
            quantity, asset_id, portfolio_id
        );

        let resp = api
            .buy_asset(BuyAssetRequest {
                portfolio_id,
                asset_id,
                quantity,
            })
            .await?;

        Self::confirm(api, portfolio_id, resp.status, resp.transaction_id, resp.quantity_purchased)
            .await
    }

    pub async fn sell(
        api: &dyn PortfolioApi,
        portfolio_id: i32,
        asset_id: i32,
        quantity: f64,
    ) -> Result<TradeResult> {
        Self::check_quantity(quantity)?;
        info!(
            "Selling {} of asset {} from portfolio {}",
            quantity, asset_id, portfolio_id
        );

        let resp = api
            .sell_asset(SellAssetRequest {
                portfolio_id,
                asset_id,
                quantity,
            })
            .await?;

        Self::confirm(api, portfolio_id, resp.status, resp.transaction_id, resp.quantity_sold)
            .await
    }

    fn check_quantity(quantity: f64) -> Result<()> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(AppError::Validation(format!(
                "Quantity must be positive, got {}",
                quantity
            )));
        }
        Ok(())
    }

    /// Re-fetch the portfolio's balance and holdings after a confirmed
    /// trade; both requests go out together.
    async fn confirm(
        api: &dyn PortfolioApi,
        portfolio_id: i32,
        status: String,
        transaction_id: i64,
        quantity: f64,
    ) -> Result<TradeResult> {
        let (balance, holdings) = tokio::join!(
            api.portfolio_balance(portfolio_id),
            api.portfolio_holdings(portfolio_id)
        );

        Ok(TradeResult {
            status,
            transaction_id,
            quantity,
            balance: balance?,
            holdings: holdings?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubApi;
    use crate::api::types::Asset;

    fn galp() -> Asset {
        Asset {
            asset_id: 42,
            name: "Galp Energia".to_string(),
            symbol: "GALP".to_string(),
            asset_type: "Company".to_string(),
            price: 13.50,
            volume: 1_000_000,
            available_shares: 5000.0,
            last_updated: "2024-03-20T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_preview_prices_at_current_quote() {
        let api = StubApi::new().with_asset(galp());

        let preview = TradingService::preview(&api, OrderSide::Buy, 42, 10.0)
            .await
            .unwrap();

        assert_eq!(preview.symbol, "GALP");
        assert_eq!(preview.estimated_total, 135.0);
    }

    #[tokio::test]
    async fn test_buy_returns_refetched_portfolio_state() {
        let api = StubApi::new()
            .with_asset(galp())
            .with_balance(1, 265.0, 135.0, 400.0);

        let result = TradingService::buy(&api, 1, 42, 10.0).await.unwrap();

        assert_eq!(result.quantity, 10.0);
        assert_eq!(result.balance.holdings_value, 135.0);
        assert_eq!(result.balance.cash_balance, 265.0);
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected_before_any_call() {
        let api = StubApi::new();
        let err = TradingService::sell(&api, 1, 42, 0.0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
