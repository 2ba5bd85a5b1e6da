//! Progress engine: the API the UI layer talks to.
//!
//! The engine owns the [`GameState`], the [`PersistentStore`] and a
//! [`Clock`], all handed in at construction. Every mutating call applies a
//! rule from [`crate::logic`] and then writes the full save record before
//! returning.

use tracing::{debug, info};

use crate::catalog::{ProducerKind, UpgradeId};
use crate::logic::{self, ClickOutcome, ProducerPurchase, TickOutcome, UpgradePurchase};
use crate::save::SaveRecord;
use crate::snapshot::Snapshot;
use crate::state::GameState;
use crate::storage::{PersistentStore, StorageBackend};
use crate::time::Clock;

pub struct Engine<B: StorageBackend, C: Clock> {
    state: GameState,
    store: PersistentStore<B>,
    clock: C,
}

impl<B: StorageBackend, C: Clock> Engine<B, C> {
    /// Assemble an engine from existing parts. Nothing is read or written.
    pub fn new(state: GameState, store: PersistentStore<B>, clock: C) -> Self {
        Self {
            state,
            store,
            clock,
        }
    }

    /// Start a session from whatever the store holds (defaults if nothing
    /// usable is there).
    pub fn load(mut store: PersistentStore<B>, clock: C) -> Self {
        let record = store.load();
        let state = record.to_state(clock.now_ms());
        info!(
            balance = state.ledger.balance(),
            buildings = state.buildings_owned(),
            "session started"
        );
        Self::new(state, store, clock)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &PersistentStore<B> {
        &self.store
    }

    pub fn balance(&self) -> f64 {
        self.state.ledger.balance()
    }

    /// Credit one click.
    pub fn manual_action(&mut self) -> ClickOutcome {
        let outcome = logic::click(&mut self.state);
        self.persist();
        outcome
    }

    /// Run one production tick.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = logic::tick(&mut self.state);
        self.persist();
        outcome
    }

    pub fn purchase_producer(&mut self, kind: ProducerKind) -> ProducerPurchase {
        let outcome = logic::buy_producer(&mut self.state, kind);
        match &outcome {
            ProducerPurchase::Bought {
                count, next_price, ..
            } => {
                debug!(producer = kind.id(), count, next_price, "producer bought");
                self.persist();
            }
            ProducerPurchase::InsufficientFunds { price, balance } => {
                debug!(producer = kind.id(), price, balance, "not enough cookies");
            }
        }
        outcome
    }

    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> UpgradePurchase {
        let outcome = logic::buy_upgrade(&mut self.state, id);
        if outcome.is_bought() {
            debug!(upgrade = id.id(), "upgrade bought");
            self.persist();
        } else {
            debug!(upgrade = id.id(), ?outcome, "upgrade not bought");
        }
        outcome
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state, self.clock.now_ms())
    }

    /// Wipe the save and start over. The slot stays empty until the next
    /// mutation, so it loads as the default record.
    pub fn reset_all(&mut self) -> Snapshot {
        self.store.clear();
        self.state = GameState::new(self.clock.now_ms());
        info!("game reset");
        self.snapshot()
    }

    /// Write the full record now.
    pub fn save_now(&mut self) {
        self.persist();
    }

    fn persist(&mut self) {
        self.store.save(&SaveRecord::from_state(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::time::ManualClock;

    const KEY: &str = "gameData";

    fn engine() -> (Engine<MemoryStorage, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000);
        let store = PersistentStore::new(MemoryStorage::new(), KEY);
        (Engine::load(store, clock.clone()), clock)
    }

    fn stored(engine: &Engine<MemoryStorage, ManualClock>) -> SaveRecord {
        let blob = engine.store().backend().get(KEY).expect("slot written");
        crate::save::decode(blob).unwrap()
    }

    #[test]
    fn load_from_empty_store_is_fresh() {
        let (engine, _) = engine();
        assert_eq!(engine.state(), &GameState::new(1_000));
        assert!(engine.store().backend().get(KEY).is_none());
    }

    #[test]
    fn click_is_written_through() {
        let (mut engine, _) = engine();
        let out = engine.manual_action();
        assert_eq!(out.total_clicks, 1);
        let record = stored(&engine);
        assert!((record.cookies - 1.0).abs() < f64::EPSILON);
        assert_eq!(record.total_clicks, 1);
        assert_eq!(record.start_time, Some(1_000));
    }

    #[test]
    fn tick_is_written_through() {
        let (mut engine, _) = engine();
        engine.state.producer_mut(ProducerKind::Grandma).count = 2;
        engine.tick();
        let record = stored(&engine);
        assert!((record.cookies - 2.0).abs() < f64::EPSILON);
        assert!((record.total_cookies - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_purchase_writes_nothing() {
        let (mut engine, _) = engine();
        let out = engine.purchase_producer(ProducerKind::Cursor);
        assert!(!out.is_bought());
        assert!(engine.store().backend().get(KEY).is_none());
        assert_eq!(
            engine.purchase_upgrade(UpgradeId::Click),
            UpgradePurchase::InsufficientFunds {
                price: 100.0,
                balance: 0.0
            }
        );
        assert!(engine.store().backend().get(KEY).is_none());
    }

    #[test]
    fn purchase_is_written_through() {
        let (mut engine, _) = engine();
        for _ in 0..15 {
            engine.manual_action();
        }
        assert!(engine.purchase_producer(ProducerKind::Cursor).is_bought());
        let record = stored(&engine);
        assert_eq!(record.amounts[ProducerKind::Cursor.index()], 1);
        assert!((record.cookies - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upgrade_purchase_is_written_through() {
        let (mut engine, _) = engine();
        for _ in 0..100 {
            engine.manual_action();
        }
        assert!(engine.purchase_upgrade(UpgradeId::Click).is_bought());
        let record = stored(&engine);
        assert!(record.click_upgrade_bought);
        assert!((record.cookies - 0.0).abs() < f64::EPSILON);

        for _ in 0..(150 / 2 + 8) {
            engine.manual_action();
        }
        assert!(engine.purchase_producer(ProducerKind::Cursor).is_bought());
        assert!(engine
            .purchase_upgrade(UpgradeId::Producer(ProducerKind::Cursor))
            .is_bought());
        let record = stored(&engine);
        assert!(record.producer_upgrades[ProducerKind::Cursor.index()]);
        assert!(!record.producer_upgrades[ProducerKind::Grandma.index()]);

        let blob = engine.store().backend().get(KEY).unwrap();
        let json = String::from_utf8(
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, blob).unwrap(),
        )
        .unwrap();
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(map["cursorUpgrade"], serde_json::Value::Bool(true));
        assert_eq!(map["clickUpgradeBought"], serde_json::Value::Bool(true));
    }

    #[test]
    fn reset_clears_slot_and_state() {
        let (mut engine, clock) = engine();
        for _ in 0..120 {
            engine.manual_action();
        }
        engine.purchase_upgrade(UpgradeId::Click);
        clock.advance(5_000);
        let snap = engine.reset_all();
        assert!((snap.balance - 0.0).abs() < f64::EPSILON);
        assert_eq!(snap.stats.total_clicks, 0);
        assert!(snap.upgrades.iter().all(|u| !u.purchased));
        assert_eq!(engine.state().stats.session_start_ms, 6_000);
        assert!(engine.store().backend().get(KEY).is_none());
    }

    #[test]
    fn snapshot_uses_clock_for_playtime() {
        let (engine, clock) = engine();
        clock.advance(3_661_000);
        let snap = engine.snapshot();
        assert_eq!(snap.stats.playtime.to_string(), "0d 1h 1m 1s");
    }
}
