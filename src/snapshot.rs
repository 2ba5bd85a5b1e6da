//! Read-only view of a game for the UI layer.
//!
//! Every value here is derived from [`GameState`] at the moment of the call;
//! nothing is cached between snapshots.

use crate::catalog::{ProducerKind, UpgradeId};
use crate::format::format_balance;
use crate::state::GameState;
use crate::stats::Playtime;

#[derive(Clone, Debug, PartialEq)]
pub struct ProducerView {
    pub kind: ProducerKind,
    pub count: u32,
    pub price: f64,
    /// Output of all owned units.
    pub rate: f64,
    /// Output one more unit would add.
    pub each_rate: f64,
    pub payback_seconds: Option<f64>,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeView {
    pub id: UpgradeId,
    pub price: f64,
    pub purchased: bool,
    pub affordable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsView {
    pub total_clicks: u64,
    pub total_earned: f64,
    pub session_start_ms: u64,
    pub playtime: Playtime,
    pub buildings_owned: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub balance: f64,
    pub click_value: f64,
    pub total_output: f64,
    pub producers: Vec<ProducerView>,
    pub upgrades: Vec<UpgradeView>,
    pub stats: StatsView,
}

impl Snapshot {
    pub fn of(state: &GameState, now_ms: u64) -> Self {
        let balance = state.ledger.balance();
        Self {
            balance,
            click_value: state.click_value(),
            total_output: state.total_output(),
            producers: state
                .producers
                .iter()
                .map(|p| ProducerView {
                    kind: p.kind,
                    count: p.count,
                    price: p.price(),
                    rate: p.output_rate(),
                    each_rate: p.each_rate(),
                    payback_seconds: p.payback_seconds(),
                    affordable: balance >= p.price(),
                })
                .collect(),
            upgrades: state
                .upgrades
                .iter()
                .map(|u| UpgradeView {
                    id: u.id,
                    price: u.price(),
                    purchased: u.purchased,
                    affordable: !u.purchased && balance >= u.price(),
                })
                .collect(),
            stats: StatsView {
                total_clicks: state.stats.total_clicks,
                total_earned: state.stats.total_earned,
                session_start_ms: state.stats.session_start_ms,
                playtime: state.stats.playtime(now_ms),
                buildings_owned: state.buildings_owned(),
            },
        }
    }

    pub fn producer(&self, kind: ProducerKind) -> &ProducerView {
        &self.producers[kind.index()]
    }

    pub fn upgrade(&self, id: UpgradeId) -> Option<&UpgradeView> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    /// Stats panel text: totals, then the owned count of every building.
    pub fn stats_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Current Cookies: {}", format_balance(self.balance)),
            format!(
                "Total Cookies You Baked: {}",
                format_balance(self.stats.total_earned)
            ),
            format!("Total Clicks: {}", self.stats.total_clicks),
            format!("Total Playtime: {}", self.stats.playtime),
            format!("Buildings Owned: {}", self.stats.buildings_owned),
        ];
        lines.extend(
            self.producers
                .iter()
                .map(|p| format!("  {}: {}", p.kind.name(), p.count)),
        );
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot() {
        let snap = Snapshot::of(&GameState::new(1_000), 61_000);
        assert!((snap.balance - 0.0).abs() < f64::EPSILON);
        assert!((snap.click_value - 1.0).abs() < f64::EPSILON);
        assert_eq!(snap.producers.len(), 8);
        assert_eq!(snap.upgrades.len(), 9);
        assert!(snap.producers.iter().all(|p| p.count == 0 && !p.affordable));
        assert!(snap.upgrades.iter().all(|u| !u.purchased));
        assert_eq!(snap.stats.playtime.minutes, 1);
    }

    #[test]
    fn affordability_tracks_balance() {
        let mut state = GameState::new(0);
        state.ledger.credit(100.0);
        let snap = Snapshot::of(&state, 0);
        assert!(snap.producer(ProducerKind::Cursor).affordable);
        assert!(snap.producer(ProducerKind::Grandma).affordable);
        assert!(!snap.producer(ProducerKind::Farm).affordable);
        assert!(snap.upgrade(UpgradeId::Click).unwrap().affordable);
    }

    #[test]
    fn stats_lines_list_every_building() {
        let mut state = GameState::new(0);
        state.producer_mut(ProducerKind::Cursor).count = 12;
        state.producer_mut(ProducerKind::WizardTower).count = 3;
        state.stats.total_clicks = 1_234;
        let lines = Snapshot::of(&state, 90_000).stats_lines();
        assert_eq!(lines.len(), 5 + ProducerKind::all().len());
        assert_eq!(lines[2], "Total Clicks: 1234");
        assert_eq!(lines[3], "Total Playtime: 0d 0h 1m 30s");
        assert_eq!(lines[4], "Buildings Owned: 15");
        assert!(lines.contains(&"  Cursor: 12".to_string()));
        assert!(lines.contains(&"  Grandma: 0".to_string()));
        assert_eq!(lines.last().unwrap(), "  Wizard Tower: 3");
    }

    #[test]
    fn purchased_upgrade_is_not_affordable() {
        let mut state = GameState::new(0);
        state.ledger.credit(1_000.0);
        state.upgrade_mut(UpgradeId::Click).purchased = true;
        let snap = Snapshot::of(&state, 0);
        let view = snap.upgrade(UpgradeId::Click).unwrap();
        assert!(view.purchased);
        assert!(!view.affordable);
    }
}
