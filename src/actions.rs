//! Keyboard bindings.
//!
//! Maps a key press to an [`Action`] given the panel on screen. In the
//! upgrade panel the upgrade letters win over every other binding, so `c`
//! there buys the third upgrade; the space bar clicks from either panel.

use crate::catalog::{ProducerKind, UpgradeId};

/// Which list occupies the main panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Producers,
    Upgrades,
}

impl Panel {
    pub fn toggled(self) -> Panel {
        match self {
            Panel::Producers => Panel::Upgrades,
            Panel::Upgrades => Panel::Producers,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Click,
    TogglePanel,
    Save,
    RequestReset,
    BuyProducer(ProducerKind),
    BuyUpgrade(UpgradeId),
}

pub const CLICK_KEY: char = 'c';
pub const ALT_CLICK_KEY: char = ' ';
pub const TOGGLE_KEY: char = 'u';
pub const SAVE_KEY: char = 's';
pub const RESET_KEY: char = 'r';
pub const CONFIRM_KEY: char = 'y';

/// First upgrade letter; upgrades take consecutive letters in [`UpgradeId::all`] order.
const FIRST_UPGRADE_KEY: u8 = b'a';

/// Letter that buys the upgrade at `index` in [`UpgradeId::all`].
pub fn upgrade_key(index: usize) -> char {
    (FIRST_UPGRADE_KEY + index as u8) as char
}

pub fn upgrade_for_key(key: char) -> Option<UpgradeId> {
    if !key.is_ascii_lowercase() {
        return None;
    }
    let idx = (key as u8).checked_sub(FIRST_UPGRADE_KEY)? as usize;
    UpgradeId::all().get(idx).copied()
}

/// Action bound to `key` (case-insensitive) in `panel`, if any.
pub fn action_for_key(key: char, panel: Panel) -> Option<Action> {
    let key = key.to_ascii_lowercase();
    if panel == Panel::Upgrades {
        if let Some(id) = upgrade_for_key(key) {
            return Some(Action::BuyUpgrade(id));
        }
    }
    match key {
        ALT_CLICK_KEY => Some(Action::Click),
        CLICK_KEY => Some(Action::Click),
        TOGGLE_KEY => Some(Action::TogglePanel),
        SAVE_KEY => Some(Action::Save),
        RESET_KEY => Some(Action::RequestReset),
        _ if panel == Panel::Producers => ProducerKind::from_key(key).map(Action::BuyProducer),
        _ => None,
    }
}
