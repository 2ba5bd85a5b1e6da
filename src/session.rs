//! Front-end session: the engine plus what the player sees around it.
//!
//! Holds the panel selection, the two-step reset prompt and the message log,
//! and turns key presses into engine calls.

use crate::actions::{action_for_key, Action, Panel, CONFIRM_KEY};
use crate::catalog::{ProducerKind, UpgradeId};
use crate::engine::Engine;
use crate::format::format_number;
use crate::logic::{ProducerPurchase, UpgradePurchase};
use crate::storage::StorageBackend;
use crate::time::Clock;

/// Oldest entries are dropped past this many.
pub const MAX_LOG: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub struct Session<B: StorageBackend, C: Clock> {
    pub engine: Engine<B, C>,
    pub panel: Panel,
    /// Set after the reset key; the next key confirms or cancels.
    pub confirm_reset: bool,
    pub log: Vec<LogEntry>,
}

impl<B: StorageBackend, C: Clock> Session<B, C> {
    pub fn new(engine: Engine<B, C>) -> Self {
        let mut session = Self {
            engine,
            panel: Panel::default(),
            confirm_reset: false,
            log: Vec::new(),
        };
        session.add_log("Welcome to Cookie Clicker!", true);
        if session.engine.store().is_memory_only() {
            session.add_log("Storage unavailable: progress will not be kept", true);
        }
        session
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn handle_key(&mut self, key: char) {
        if self.confirm_reset {
            self.confirm_reset = false;
            if key.to_ascii_lowercase() == CONFIRM_KEY {
                self.engine.reset_all();
                self.log.clear();
                self.add_log("The game has been reset.", true);
            } else {
                self.add_log("Reset cancelled", false);
            }
            return;
        }

        let Some(action) = action_for_key(key, self.panel) else {
            return;
        };
        match action {
            Action::Click => {
                self.engine.manual_action();
            }
            Action::TogglePanel => self.panel = self.panel.toggled(),
            Action::Save => {
                self.engine.save_now();
                self.add_log("Progress saved", false);
            }
            Action::RequestReset => {
                self.confirm_reset = true;
                self.add_log("Reset everything? [Y] to confirm, any other key to cancel", true);
            }
            Action::BuyProducer(kind) => self.buy_producer(kind),
            Action::BuyUpgrade(id) => self.buy_upgrade(id),
        }
    }

    fn buy_producer(&mut self, kind: ProducerKind) {
        match self.engine.purchase_producer(kind) {
            ProducerPurchase::Bought { count, .. } => {
                self.add_log(&format!("Bought a {} ({} owned)", kind.name(), count), false);
            }
            ProducerPurchase::InsufficientFunds { price, .. } => {
                self.add_log(
                    &format!(
                        "You don't have enough cookies to buy this item ({} needed)",
                        format_number(price)
                    ),
                    false,
                );
            }
        }
    }

    fn buy_upgrade(&mut self, id: UpgradeId) {
        match self.engine.purchase_upgrade(id) {
            UpgradePurchase::Bought { .. } => {
                self.add_log(&format!("Upgrade bought: {}", id.name()), true);
            }
            UpgradePurchase::AlreadyPurchased => {
                self.add_log(&format!("{} is already bought", id.name()), false);
            }
            UpgradePurchase::InsufficientFunds { price, .. } => {
                self.add_log(
                    &format!("Not enough cookies for {} ({} needed)", id.name(), format_number(price)),
                    false,
                );
            }
        }
    }
}
