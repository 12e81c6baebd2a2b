//! Portfolio and trading endpoints

use super::types::*;
use super::ApiClient;
use crate::error::Result;
use uuid::Uuid;

impl ApiClient {
    /// List portfolios, optionally restricted to one owner.
    pub async fn list_portfolios(&self, user_id: Option<Uuid>) -> Result<Vec<Portfolio>> {
        let path = match user_id {
            Some(id) => format!("/portfolios?user_id={}", id),
            None => "/portfolios".to_string(),
        };
        self.get_json(&path).await
    }

    pub async fn get_portfolio(&self, portfolio_id: i32) -> Result<Portfolio> {
        self.get_json(&format!("/portfolios/{}", portfolio_id)).await
    }

    pub async fn create_portfolio(&self, req: &CreatePortfolioRequest) -> Result<Portfolio> {
        self.post_json("/portfolios", req).await
    }

    pub async fn update_portfolio(
        &self,
        portfolio_id: i32,
        req: &UpdatePortfolioRequest,
    ) -> Result<Portfolio> {
        self.put_json(&format!("/portfolios/{}", portfolio_id), req)
            .await
    }

    pub async fn delete_portfolio(&self, portfolio_id: i32) -> Result<()> {
        self.delete(&format!("/portfolios/{}", portfolio_id)).await
    }

    /// Cash/holdings breakdown for one portfolio.
    pub async fn portfolio_balance(&self, portfolio_id: i32) -> Result<PortfolioBalance> {
        self.get_json(&format!("/portfolios/{}/balance", portfolio_id))
            .await
    }

    pub async fn portfolio_holdings(&self, portfolio_id: i32) -> Result<Vec<AssetHolding>> {
        self.get_json(&format!("/portfolios/{}/holdings", portfolio_id))
            .await
    }

    pub async fn portfolio_summary(&self, portfolio_id: i32) -> Result<PortfolioSummary> {
        self.get_json(&format!("/portfolios/{}/summary", portfolio_id))
            .await
    }

    pub async fn buy_asset(&self, req: &BuyAssetRequest) -> Result<BuyAssetResponse> {
        self.post_json("/portfolios/buy", req).await
    }

    pub async fn sell_asset(&self, req: &SellAssetRequest) -> Result<SellAssetResponse> {
        self.post_json("/portfolios/sell", req).await
    }
}
