//! Risk-analytics endpoints (premium feature; gating happens in the view
//! layer, the endpoints themselves are plain reads)

use super::types::*;
use super::ApiClient;
use crate::error::Result;
use uuid::Uuid;

impl ApiClient {
    pub async fn user_risk_metrics(&self, user_id: Uuid) -> Result<RiskAnalysis> {
        self.get_json(&format!("/risk/metrics/user/{}", user_id))
            .await
    }

    pub async fn portfolio_risk_analysis(
        &self,
        portfolio_id: i32,
    ) -> Result<PortfolioRiskAnalysis> {
        self.get_json(&format!("/risk/metrics/portfolio/{}", portfolio_id))
            .await
    }

    pub async fn user_risk_summary(&self, user_id: Uuid) -> Result<RiskSummary> {
        self.get_json(&format!("/risk/summary/user/{}", user_id))
            .await
    }
}
