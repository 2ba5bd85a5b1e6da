//! Static progression catalog: producer types and the upgrades bound to them.

/// Growth ratio of a producer's price per unit owned.
pub const PRICE_GROWTH: f64 = 1.15;

/// Producer upgrades cost this many times the producer's base price.
pub const UPGRADE_PRICE_FACTOR: f64 = 10.0;

/// Fixed price of the click upgrade.
pub const CLICK_UPGRADE_PRICE: f64 = 100.0;

/// Currency credited per manual click, before and after the click upgrade.
pub const BASE_CLICK_VALUE: f64 = 1.0;
pub const UPGRADED_CLICK_VALUE: f64 = 2.0;

/// Number of producer types in the catalog.
pub const PRODUCER_COUNT: usize = 8;

/// Kinds of producers (buildings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProducerKind {
    Cursor,
    Grandma,
    Farm,
    Mine,
    Factory,
    Bank,
    Temple,
    WizardTower,
}

impl ProducerKind {
    /// All producer kinds in display order.
    pub fn all() -> &'static [ProducerKind; PRODUCER_COUNT] {
        &[
            ProducerKind::Cursor,
            ProducerKind::Grandma,
            ProducerKind::Farm,
            ProducerKind::Mine,
            ProducerKind::Factory,
            ProducerKind::Bank,
            ProducerKind::Temple,
            ProducerKind::WizardTower,
        ]
    }

    /// Position in [`ProducerKind::all`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier, also the stem of this producer's save keys.
    pub fn id(self) -> &'static str {
        match self {
            ProducerKind::Cursor => "cursor",
            ProducerKind::Grandma => "grandma",
            ProducerKind::Farm => "farm",
            ProducerKind::Mine => "mine",
            ProducerKind::Factory => "factory",
            ProducerKind::Bank => "bank",
            ProducerKind::Temple => "temple",
            ProducerKind::WizardTower => "wizardtower",
        }
    }

    pub fn from_id(id: &str) -> Option<ProducerKind> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ProducerKind::Cursor => "Cursor",
            ProducerKind::Grandma => "Grandma",
            ProducerKind::Farm => "Farm",
            ProducerKind::Mine => "Mine",
            ProducerKind::Factory => "Factory",
            ProducerKind::Bank => "Bank",
            ProducerKind::Temple => "Temple",
            ProducerKind::WizardTower => "Wizard Tower",
        }
    }

    /// Base cost to buy the first one.
    pub fn base_price(self) -> f64 {
        match self {
            ProducerKind::Cursor => 15.0,
            ProducerKind::Grandma => 100.0,
            ProducerKind::Farm => 1_100.0,
            ProducerKind::Mine => 12_000.0,
            ProducerKind::Factory => 130_000.0,
            ProducerKind::Bank => 1_400_000.0,
            ProducerKind::Temple => 20_000_000.0,
            ProducerKind::WizardTower => 330_000_000.0,
        }
    }

    /// Base cookies per second per unit.
    pub fn base_rate(self) -> f64 {
        match self {
            ProducerKind::Cursor => 0.1,
            ProducerKind::Grandma => 1.0,
            ProducerKind::Farm => 8.0,
            ProducerKind::Mine => 47.0,
            ProducerKind::Factory => 260.0,
            ProducerKind::Bank => 1_400.0,
            ProducerKind::Temple => 7_800.0,
            ProducerKind::WizardTower => 44_000.0,
        }
    }

    /// Price of the doubling upgrade bound to this producer.
    pub fn upgrade_price(self) -> f64 {
        self.base_price() * UPGRADE_PRICE_FACTOR
    }

    /// Key to buy ('1'..='8').
    pub fn key(self) -> char {
        (b'1' + self.index() as u8) as char
    }

    pub fn from_key(key: char) -> Option<ProducerKind> {
        let idx = (key as u32).checked_sub('1' as u32)? as usize;
        Self::all().get(idx).copied()
    }
}

/// Identifies one upgrade: the click upgrade or a producer's doubling upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeId {
    Click,
    Producer(ProducerKind),
}

impl UpgradeId {
    /// All upgrades in display order: click first, then producers in catalog order.
    pub fn all() -> Vec<UpgradeId> {
        std::iter::once(UpgradeId::Click)
            .chain(ProducerKind::all().iter().map(|&k| UpgradeId::Producer(k)))
            .collect()
    }

    pub fn id(self) -> &'static str {
        match self {
            UpgradeId::Click => "click",
            UpgradeId::Producer(kind) => kind.id(),
        }
    }

    pub fn from_id(id: &str) -> Option<UpgradeId> {
        if id == "click" {
            return Some(UpgradeId::Click);
        }
        ProducerKind::from_id(id).map(UpgradeId::Producer)
    }

    pub fn price(self) -> f64 {
        match self {
            UpgradeId::Click => CLICK_UPGRADE_PRICE,
            UpgradeId::Producer(kind) => kind.upgrade_price(),
        }
    }

    pub fn name(self) -> String {
        match self {
            UpgradeId::Click => "Reinforced Click".to_string(),
            UpgradeId::Producer(kind) => format!("{} x2", kind.name()),
        }
    }

    pub fn description(self) -> String {
        match self {
            UpgradeId::Click => "Doubles the cookies gained per click".to_string(),
            UpgradeId::Producer(kind) => format!("Doubles {} output", kind.name()),
        }
    }
}
