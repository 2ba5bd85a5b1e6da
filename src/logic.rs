//! Game rules over [`GameState`] as pure functions.
//!
//! Nothing here touches storage or the clock. The engine wraps these and
//! persists the result.

use crate::catalog::{ProducerKind, UpgradeId};
use crate::state::GameState;

/// Result of a manual click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub credited: f64,
    pub balance: f64,
    pub total_clicks: u64,
}

/// Result of one production tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    /// Cookies produced by this tick.
    pub produced: f64,
    pub balance: f64,
    /// Instantaneous rate of each producer, in catalog order.
    pub rates: Vec<(ProducerKind, f64)>,
}

/// Result of trying to buy a producer.
#[derive(Clone, Debug, PartialEq)]
pub enum ProducerPurchase {
    Bought {
        kind: ProducerKind,
        /// Units owned after the purchase.
        count: u32,
        /// What was paid.
        paid: f64,
        /// Price of the following unit.
        next_price: f64,
        balance: f64,
    },
    InsufficientFunds { price: f64, balance: f64 },
}

impl ProducerPurchase {
    pub fn is_bought(&self) -> bool {
        matches!(self, ProducerPurchase::Bought { .. })
    }
}

/// Result of trying to buy an upgrade.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradePurchase {
    Bought { id: UpgradeId, paid: f64, balance: f64 },
    AlreadyPurchased,
    InsufficientFunds { price: f64, balance: f64 },
}

impl UpgradePurchase {
    pub fn is_bought(&self) -> bool {
        matches!(self, UpgradePurchase::Bought { .. })
    }
}

/// Manual click: credit the click value and count the click.
pub fn click(state: &mut GameState) -> ClickOutcome {
    let value = state.click_value();
    let balance = state.ledger.credit(value);
    state.stats.record_click(value);
    ClickOutcome {
        credited: value,
        balance,
        total_clicks: state.stats.total_clicks,
    }
}

/// One tick: credit the summed output of every producer.
pub fn tick(state: &mut GameState) -> TickOutcome {
    let rates: Vec<(ProducerKind, f64)> = state
        .producers
        .iter()
        .map(|p| (p.kind, p.output_rate()))
        .collect();
    let produced: f64 = rates.iter().map(|(_, r)| r).sum();
    let balance = state.ledger.credit(produced);
    state.stats.record_production(produced);
    TickOutcome {
        produced,
        balance,
        rates,
    }
}

/// Try to buy one unit of a producer.
pub fn buy_producer(state: &mut GameState, kind: ProducerKind) -> ProducerPurchase {
    let price = state.producer(kind).price();
    if !state.ledger.can_afford(price) {
        return ProducerPurchase::InsufficientFunds {
            price,
            balance: state.ledger.balance(),
        };
    }

    let balance = state.ledger.debit(price);
    let producer = state.producer_mut(kind);
    producer.count += 1;
    ProducerPurchase::Bought {
        kind,
        count: producer.count,
        paid: price,
        next_price: producer.price(),
        balance,
    }
}

/// Try to buy an upgrade and apply its effect.
pub fn buy_upgrade(state: &mut GameState, id: UpgradeId) -> UpgradePurchase {
    let upgrade = state.upgrade(id);
    if upgrade.purchased {
        return UpgradePurchase::AlreadyPurchased;
    }
    let price = upgrade.price();
    if !state.ledger.can_afford(price) {
        return UpgradePurchase::InsufficientFunds {
            price,
            balance: state.ledger.balance(),
        };
    }

    let balance = state.ledger.debit(price);
    state.upgrade_mut(id).purchased = true;
    match id {
        // Click value is derived from the purchased flag.
        UpgradeId::Click => {}
        UpgradeId::Producer(kind) => state.producer_mut(kind).apply_upgrade(),
    }
    UpgradePurchase::Bought {
        id,
        paid: price,
        balance,
    }
}
