//! Dashboard tabs and premium gating
//!
//! Gating is a two-state machine per gated section, driven purely by the
//! `is_premium` flag of a freshly fetched profile. The transition to
//! unlocked happens only after an upgrade mutation followed by a profile
//! re-fetch; nothing here flips state locally.

use crate::api::types::ExtendedUser;

/// Sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Overview,
    Funds,
    Portfolios,
    Trading,
    Payments,
    Subscriptions,
    Risk,
}

impl DashboardTab {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Visão Geral",
            DashboardTab::Funds => "Adicionar Fundos",
            DashboardTab::Portfolios => "Portfólios",
            DashboardTab::Trading => "Trading",
            DashboardTab::Payments => "Pagamentos",
            DashboardTab::Subscriptions => "Subscrições",
            DashboardTab::Risk => "Análise de Risco",
        }
    }
}

/// Visibility of a premium-gated section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Locked,
    Unlocked,
}

impl Gate {
    pub fn for_profile(profile: &ExtendedUser) -> Self {
        if profile.is_premium {
            Gate::Unlocked
        } else {
            Gate::Locked
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Gate::Unlocked)
    }
}

/// Tabs to render for this profile. Risk analysis appears only when the
/// backend says the user is premium.
pub fn visible_tabs(profile: &ExtendedUser) -> Vec<DashboardTab> {
    let mut tabs = vec![
        DashboardTab::Overview,
        DashboardTab::Funds,
        DashboardTab::Portfolios,
        DashboardTab::Trading,
        DashboardTab::Payments,
        DashboardTab::Subscriptions,
    ];
    if Gate::for_profile(profile).is_unlocked() {
        tabs.push(DashboardTab::Risk);
    }
    tabs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_profile;
    use uuid::Uuid;

    #[test]
    fn test_risk_tab_hidden_for_basic_users() {
        let profile = sample_profile(Uuid::nil(), 0.0, false);
        let tabs = visible_tabs(&profile);
        assert!(!tabs.contains(&DashboardTab::Risk));
        assert_eq!(tabs.len(), 6);
    }

    #[test]
    fn test_risk_tab_shown_for_premium_users() {
        let profile = sample_profile(Uuid::nil(), 0.0, true);
        let tabs = visible_tabs(&profile);
        assert_eq!(tabs.last(), Some(&DashboardTab::Risk));
    }

    #[test]
    fn test_gate_follows_fetched_flag_only() {
        let mut profile = sample_profile(Uuid::nil(), 0.0, false);
        assert_eq!(Gate::for_profile(&profile), Gate::Locked);

        // Only a re-fetched profile carrying the flag unlocks the gate
        profile.is_premium = true;
        assert_eq!(Gate::for_profile(&profile), Gate::Unlocked);
    }
}
