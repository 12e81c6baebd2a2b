//! Dashboard Service
//!
//! The financial rollup behind the dashboard header: fetch the user's
//! portfolios, fan out one balance request per portfolio, and fold the
//! settled results into totals. The backend has no batch balance endpoint,
//! so the per-portfolio fetches are issued concurrently and joined.

use crate::api::PortfolioApi;
use crate::api::types::ExtendedUser;
use crate::error::Result;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// Aggregated totals over one user's portfolios. Ephemeral: recomputed on
/// every dashboard load, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
    /// Portfolios found, not balances retrieved. Can disagree with the
    /// sums below when some balance fetches failed.
    pub total_portfolios: usize,
    pub total_portfolio_value: f64,
    pub total_cash: f64,
    pub total_holdings: f64,
    /// Ids whose balance fetch failed; their values are missing from the
    /// sums. Callers use this to surface a partial-data warning instead of
    /// silently under-counting.
    pub failed: Vec<i32>,
}

impl PortfolioStats {
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Everything the dashboard renders from: the fresh extended profile plus
/// the aggregated portfolio totals.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub profile: ExtendedUser,
    pub stats: PortfolioStats,
}

impl DashboardData {
    /// Account balance plus aggregated portfolio value.
    pub fn net_worth(&self) -> f64 {
        self.profile.account_balance + self.stats.total_portfolio_value
    }
}

/// Dashboard rollup service
pub struct DashboardService;

impl DashboardService {
    /// Aggregate portfolio balances for one user.
    ///
    /// One list call, then one balance call per portfolio, all in flight at
    /// once with no ordering guarantee; the fold waits for every fetch to
    /// settle. A failed balance fetch contributes nothing to the sums and
    /// does not abort the aggregation; its portfolio id lands in `failed`.
    /// Zero portfolios short-circuits to all-zero totals with no balance
    /// calls at all.
    pub async fn compute_stats(api: &dyn PortfolioApi, user_id: Uuid) -> Result<PortfolioStats> {
        let portfolios = api.list_portfolios(Some(user_id)).await?;

        let mut stats = PortfolioStats {
            total_portfolios: portfolios.len(),
            ..Default::default()
        };

        if portfolios.is_empty() {
            return Ok(stats);
        }

        let fetches = portfolios.iter().map(|p| {
            let id = p.portfolio_id;
            async move { (id, api.portfolio_balance(id).await) }
        });

        for (id, result) in join_all(fetches).await {
            match result {
                Ok(balance) => {
                    stats.total_portfolio_value += balance.total_portfolio_value;
                    stats.total_cash += balance.cash_balance;
                    stats.total_holdings += balance.holdings_value;
                }
                Err(e) => {
                    warn!("Balance fetch for portfolio {} failed: {}", id, e);
                    stats.failed.push(id);
                }
            }
        }

        debug!(
            "Aggregated {} portfolios for {}: value={:.2} cash={:.2} holdings={:.2} failed={}",
            stats.total_portfolios,
            user_id,
            stats.total_portfolio_value,
            stats.total_cash,
            stats.total_holdings,
            stats.failed.len()
        );

        Ok(stats)
    }

    /// Full dashboard load: the extended profile (under its 10 s deadline)
    /// and the portfolio rollup, concurrently. Dropping the returned future
    /// abandons every in-flight request, which is how a caller cancels a
    /// load it no longer needs.
    pub async fn load_dashboard(api: &dyn PortfolioApi, user_id: Uuid) -> Result<DashboardData> {
        let (profile, stats) = tokio::join!(
            api.user_complete(user_id),
            Self::compute_stats(api, user_id)
        );

        Ok(DashboardData {
            profile: profile?,
            stats: stats?,
        })
    }
}
