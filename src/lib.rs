//! Cookie Clicker: progression and persistence engine for an incremental
//! clicker game.
//!
//! The UI layer drives an [`Engine`] with clicks, ticks and purchase
//! requests and renders the [`Snapshot`] it hands back. Progress is written
//! through to a single save slot after every change.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod ledger;
pub mod logging;
pub mod logic;
pub mod save;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod storage;
pub mod time;

pub use actions::{Action, Panel};
pub use catalog::{ProducerKind, UpgradeId};
pub use config::GameConfig;
pub use engine::Engine;
pub use logic::{ClickOutcome, ProducerPurchase, TickOutcome, UpgradePurchase};
pub use save::SaveRecord;
pub use session::{LogEntry, Session};
pub use snapshot::Snapshot;
pub use storage::{MemoryStorage, PersistentStore, StorageBackend};
pub use time::{Clock, ManualClock, SystemClock, TickClock};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
