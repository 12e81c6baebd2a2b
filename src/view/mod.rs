//! Terminal view layer
//!
//! Renders aggregated dashboard state as text. Pure functions over fetched
//! data: nothing here issues requests or holds state across renders.

pub mod format;
pub mod tabs;

pub use format::{format_date, format_eur, format_pct};
pub use tabs::{visible_tabs, DashboardTab, Gate};

use crate::api::types::{
    Asset, AssetHolding, Portfolio, PortfolioRiskAnalysis, PortfolioSummary, RiskAnalysis,
    RiskSummary,
};
use crate::services::DashboardData;

/// Render the dashboard summary: account balance, portfolio totals, net
/// worth, the visible tabs, and a partial-data warning when some balances
/// could not be retrieved.
pub fn render_dashboard(data: &DashboardData) -> String {
    let mut out = String::new();

    out.push_str(&format!("Bem-vindo, {}\n", data.profile.name));
    out.push_str(&format!(
        "Tipo de conta: {}\n\n",
        if data.profile.is_premium {
            "Premium"
        } else {
            "Básico"
        }
    ));

    out.push_str(&format!(
        "Saldo da conta:       {}\n",
        format_eur(data.profile.account_balance)
    ));
    out.push_str(&format!(
        "Valor dos portfólios: {} ({} {})\n",
        format_eur(data.stats.total_portfolio_value),
        data.stats.total_portfolios,
        if data.stats.total_portfolios == 1 {
            "portfólio"
        } else {
            "portfólios"
        }
    ));
    out.push_str(&format!(
        "  em caixa:           {}\n",
        format_eur(data.stats.total_cash)
    ));
    out.push_str(&format!(
        "  em ativos:          {}\n",
        format_eur(data.stats.total_holdings)
    ));
    out.push_str(&format!(
        "Património líquido:   {}\n",
        format_eur(data.net_worth())
    ));

    if let (true, Some(end)) = (data.profile.is_premium, &data.profile.premium_end_date) {
        out.push_str(&format!(
            "Subscrição até:       {} ({} dias)\n",
            format_date(end),
            data.profile.days_remaining_in_subscription
        ));
    }

    if data.stats.is_partial() {
        out.push_str(&format!(
            "\nAviso: {} portfólio(s) sem saldo disponível; os totais podem estar incompletos.\n",
            data.stats.failed.len()
        ));
    }

    out.push_str("\nSecções: ");
    let titles: Vec<&str> = visible_tabs(&data.profile).iter().map(|t| t.title()).collect();
    out.push_str(&titles.join(" | "));
    out.push('\n');

    out
}

/// Render one portfolio row for the list view.
pub fn render_portfolio(p: &Portfolio) -> String {
    format!(
        "#{:<4} {:<24} {:>14} {:>9}",
        p.portfolio_id,
        p.name,
        format_eur(p.current_funds),
        format_pct(p.current_profit_pct)
    )
}

/// Render the portfolio detail header.
pub fn render_portfolio_summary(s: &PortfolioSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("#{} {} ({})\n", s.portfolio_id, s.portfolio_name, s.owner));
    out.push_str(&format!("Fundos atuais: {}\n", format_eur(s.current_funds)));
    out.push_str(&format!(
        "Rentabilidade: {}  Transações: {}\n",
        format_pct(s.current_profit_pct),
        s.total_trades
    ));
    out.push_str(&format!("Criado em: {}\n", format_date(&s.creation_date)));
    out
}

/// Render one holding row under the portfolio detail.
pub fn render_holding(h: &AssetHolding) -> String {
    format!(
        "  {:<8} {:>12} x {:>12} = {:>14}",
        h.symbol,
        h.quantity_held,
        format_eur(h.current_price),
        format_eur(h.market_value)
    )
}

/// Render one asset row for the browse view.
pub fn render_asset(a: &Asset) -> String {
    format!(
        "#{:<4} {:<8} {:<28} {:<10} {:>12}",
        a.asset_id,
        a.symbol,
        a.name,
        a.asset_type,
        format_eur(a.price)
    )
}

/// Render the risk-analysis section (only reachable through an unlocked
/// gate).
pub fn render_risk(risk: &RiskAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("Análise de risco — {}\n", risk.user_name));
    out.push_str(&format!("Nível de risco: {}\n", risk.risk_level));
    out.push_str(&format!(
        "Investimento total: {}\n",
        format_eur(risk.total_investment)
    ));
    if let Some(dd) = risk.maximum_drawdown {
        out.push_str(&format!("Drawdown máximo: {}\n", format_pct(dd)));
    }
    if let Some(sharpe) = risk.sharpe_ratio {
        out.push_str(&format!("Sharpe ratio: {:.2}\n", sharpe));
    }
    out
}

/// Render per-portfolio risk metrics.
pub fn render_portfolio_risk(risk: &PortfolioRiskAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Risco do portfólio #{} {}\n",
        risk.portfolio_id, risk.portfolio_name
    ));
    out.push_str(&format!("Nível de risco: {}\n", risk.risk_level));
    out.push_str(&format!(
        "Fundos: {}  Rentabilidade: {}\n",
        format_eur(risk.current_funds),
        format_pct(risk.current_profit_pct)
    ));
    if let Some(beta) = risk.beta {
        out.push_str(&format!("Beta: {:.2}\n", beta));
    }
    if let Some(dd) = risk.maximum_drawdown {
        out.push_str(&format!("Drawdown máximo: {}\n", format_pct(dd)));
    }
    if let Some(sharpe) = risk.sharpe_ratio {
        out.push_str(&format!("Sharpe ratio: {:.2}\n", sharpe));
    }
    out
}

/// Render the aggregate risk summary footer.
pub fn render_risk_summary(s: &RiskSummary) -> String {
    format!(
        "\nAtivos sob gestão: {}  Risco médio: {:.2}  (calculado em {})\n",
        format_eur(s.total_assets_under_management),
        s.average_system_risk,
        s.calculated_at
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_profile;
    use crate::services::PortfolioStats;
    use uuid::Uuid;

    #[test]
    fn test_dashboard_renders_totals_and_tabs() {
        let data = DashboardData {
            profile: sample_profile(Uuid::nil(), 200.0, true),
            stats: PortfolioStats {
                total_portfolios: 2,
                total_portfolio_value: 1500.0,
                total_cash: 900.0,
                total_holdings: 600.0,
                failed: vec![],
            },
        };

        let rendered = render_dashboard(&data);
        assert!(rendered.contains("1 500,00 €"));
        assert!(rendered.contains("1 700,00 €")); // net worth
        assert!(rendered.contains("Análise de Risco"));
        assert!(!rendered.contains("Aviso"));
    }

    #[test]
    fn test_dashboard_warns_on_partial_data() {
        let data = DashboardData {
            profile: sample_profile(Uuid::nil(), 0.0, false),
            stats: PortfolioStats {
                total_portfolios: 3,
                total_portfolio_value: 1000.0,
                total_cash: 400.0,
                total_holdings: 600.0,
                failed: vec![7],
            },
        };

        let rendered = render_dashboard(&data);
        assert!(rendered.contains("Aviso"));
        assert!(!rendered.contains("Análise de Risco"));
    }
}
