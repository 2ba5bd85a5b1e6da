//! Runtime game state: producers, upgrades, ledger and stats.

use crate::catalog::{
    ProducerKind, UpgradeId, BASE_CLICK_VALUE, PRICE_GROWTH, UPGRADED_CLICK_VALUE,
};
use crate::ledger::Ledger;
use crate::stats::Stats;

/// A single type of producer.
#[derive(Clone, Debug, PartialEq)]
pub struct Producer {
    pub kind: ProducerKind,
    pub count: u32,
    /// Multiplier from the bound upgrade (1.0, or 2.0 once bought).
    pub multiplier: f64,
}

impl Producer {
    pub fn new(kind: ProducerKind) -> Self {
        Self {
            kind,
            count: 0,
            multiplier: 1.0,
        }
    }

    /// Current cost to buy the next one, rounded to a whole cookie.
    pub fn price(&self) -> f64 {
        let exponent = i32::try_from(self.count).unwrap_or(i32::MAX);
        (self.kind.base_price() * PRICE_GROWTH.powi(exponent)).round()
    }

    /// Cookies per second from all owned units.
    pub fn output_rate(&self) -> f64 {
        self.kind.base_rate() * self.count as f64 * self.multiplier
    }

    /// Cookies per second gained by buying the next unit.
    pub fn each_rate(&self) -> f64 {
        self.kind.base_rate() * self.multiplier
    }

    /// Payback time in seconds: how long until the next unit pays for itself.
    pub fn payback_seconds(&self) -> Option<f64> {
        let rate = self.each_rate();
        if rate > 0.0 {
            Some(self.price() / rate)
        } else {
            None
        }
    }

    /// Double the output multiplier. Call once per upgrade purchase.
    pub fn apply_upgrade(&mut self) {
        self.multiplier *= 2.0;
    }
}

/// A one-time multiplier purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub purchased: bool,
}

impl Upgrade {
    pub fn new(id: UpgradeId) -> Self {
        Self {
            id,
            purchased: false,
        }
    }

    pub fn price(&self) -> f64 {
        self.id.price()
    }
}

/// Full state of a game session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ledger: Ledger,
    /// One per catalog entry, in [`ProducerKind::all`] order.
    pub producers: Vec<Producer>,
    /// Click upgrade first, then one per producer (see [`UpgradeId::all`]).
    pub upgrades: Vec<Upgrade>,
    pub stats: Stats,
}

impl GameState {
    pub fn new(session_start_ms: u64) -> Self {
        Self {
            ledger: Ledger::new(),
            producers: ProducerKind::all()
                .iter()
                .map(|&k| Producer::new(k))
                .collect(),
            upgrades: UpgradeId::all().into_iter().map(Upgrade::new).collect(),
            stats: Stats::new(session_start_ms),
        }
    }

    pub fn producer(&self, kind: ProducerKind) -> &Producer {
        &self.producers[kind.index()]
    }

    pub fn producer_mut(&mut self, kind: ProducerKind) -> &mut Producer {
        &mut self.producers[kind.index()]
    }

    pub fn upgrade(&self, id: UpgradeId) -> &Upgrade {
        &self.upgrades[upgrade_index(id)]
    }

    pub fn upgrade_mut(&mut self, id: UpgradeId) -> &mut Upgrade {
        &mut self.upgrades[upgrade_index(id)]
    }

    /// Whether the click upgrade has been bought.
    pub fn click_upgraded(&self) -> bool {
        self.upgrade(UpgradeId::Click).purchased
    }

    /// Cookies credited by one manual click.
    pub fn click_value(&self) -> f64 {
        if self.click_upgraded() {
            UPGRADED_CLICK_VALUE
        } else {
            BASE_CLICK_VALUE
        }
    }

    /// Total cookies per second from all producers.
    pub fn total_output(&self) -> f64 {
        self.producers.iter().map(|p| p.output_rate()).sum()
    }

    /// Number of buildings owned across every producer type.
    pub fn buildings_owned(&self) -> u64 {
        self.producers.iter().map(|p| u64::from(p.count)).sum()
    }
}

fn upgrade_index(id: UpgradeId) -> usize {
    match id {
        UpgradeId::Click => 0,
        UpgradeId::Producer(kind) => kind.index() + 1,
    }
}
