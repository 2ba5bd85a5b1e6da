//! Save record and its blob codec.
//!
//! The persisted form is a flat JSON object encoded as standard base64. Each
//! producer contributes an `<id>Amount` count and an `<id>Upgrade` flag; the
//! click upgrade is stored as `clickUpgradeBought`.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: the format written today. Bump when adding keys.
//! - `MIN_COMPATIBLE_VERSION`: the oldest format still loadable. Only bump on
//!   a breaking change (a key changing meaning or disappearing).
//!
//! Blobs without `saveVersion` predate versioning and count as version 1.
//! Missing keys fall back to their defaults, unknown keys are ignored.

use base64::{engine::general_purpose, Engine as _};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::catalog::{ProducerKind, UpgradeId, PRODUCER_COUNT};
use crate::error::SaveError;
use crate::state::GameState;
use crate::stats::Stats;

/// Format version written by [`encode`].
pub const SAVE_VERSION: u32 = 1;

/// Oldest format version [`decode`] accepts.
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

const KEY_VERSION: &str = "saveVersion";
const KEY_COOKIES: &str = "cookies";
const KEY_TOTAL_CLICKS: &str = "totalClicks";
const KEY_TOTAL_COOKIES: &str = "totalCookies";
const KEY_START_TIME: &str = "startTime";
const KEY_CLICK_UPGRADE: &str = "clickUpgradeBought";

fn amount_key(kind: ProducerKind) -> String {
    format!("{}Amount", kind.id())
}

fn upgrade_key(kind: ProducerKind) -> String {
    format!("{}Upgrade", kind.id())
}

/// Key stem used by the first web release (`cursorbuildingAmount`).
fn legacy_key(kind: ProducerKind, suffix: &str) -> String {
    format!("{}building{}", kind.id(), suffix)
}

/// Everything that survives a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SaveRecord {
    pub cookies: f64,
    pub total_clicks: u64,
    /// Lifetime cookies earned.
    pub total_cookies: f64,
    /// Playtime epoch in ms since the Unix epoch. `None` means "now".
    pub start_time: Option<u64>,
    /// Owned count per producer, in [`ProducerKind::all`] order.
    pub amounts: [u32; PRODUCER_COUNT],
    /// Whether each producer's upgrade is bought, in catalog order.
    pub producer_upgrades: [bool; PRODUCER_COUNT],
    pub click_upgrade_bought: bool,
}

impl SaveRecord {
    /// Extract the persistable part of a running game.
    pub fn from_state(state: &GameState) -> Self {
        let mut record = SaveRecord {
            cookies: state.ledger.balance(),
            total_clicks: state.stats.total_clicks,
            total_cookies: state.stats.total_earned,
            start_time: Some(state.stats.session_start_ms),
            click_upgrade_bought: state.click_upgraded(),
            ..SaveRecord::default()
        };
        for p in &state.producers {
            let i = p.kind.index();
            record.amounts[i] = p.count;
            record.producer_upgrades[i] = state.upgrade(UpgradeId::Producer(p.kind)).purchased;
        }
        record
    }

    /// Rebuild a running game. A missing start time becomes `now_ms`.
    pub fn to_state(&self, now_ms: u64) -> GameState {
        let mut state = GameState::new(self.start_time.unwrap_or(now_ms));
        state.ledger.credit(self.cookies);
        state.stats = Stats {
            total_clicks: self.total_clicks,
            total_earned: self.total_cookies,
            session_start_ms: state.stats.session_start_ms,
        };
        state.upgrade_mut(UpgradeId::Click).purchased = self.click_upgrade_bought;
        for &kind in ProducerKind::all() {
            let i = kind.index();
            state.producer_mut(kind).count = self.amounts[i];
            if self.producer_upgrades[i] {
                state.upgrade_mut(UpgradeId::Producer(kind)).purchased = true;
                state.producer_mut(kind).apply_upgrade();
            }
        }
        state
    }

    /// Parse a decoded JSON object. Missing keys default; a present key with
    /// the wrong type or an out-of-range value rejects the whole record.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, SaveError> {
        let version = match lookup(map, KEY_VERSION, None) {
            Some(v) => u32::try_from(as_u64(KEY_VERSION, v)?)
                .map_err(|_| invalid(KEY_VERSION, "out of range"))?,
            None => 1,
        };
        if version < MIN_COMPATIBLE_VERSION {
            return Err(SaveError::Incompatible {
                found: version,
                min: MIN_COMPATIBLE_VERSION,
            });
        }
        if version > SAVE_VERSION {
            warn!(
                found = version,
                current = SAVE_VERSION,
                "save written by a newer version, loading known keys only"
            );
        }

        let mut record = SaveRecord {
            cookies: opt_f64(map, KEY_COOKIES)?,
            total_clicks: match lookup(map, KEY_TOTAL_CLICKS, None) {
                Some(v) => as_u64(KEY_TOTAL_CLICKS, v)?,
                None => 0,
            },
            total_cookies: opt_f64(map, KEY_TOTAL_COOKIES)?,
            start_time: lookup(map, KEY_START_TIME, None)
                .map(|v| as_u64(KEY_START_TIME, v))
                .transpose()?,
            click_upgrade_bought: opt_bool(map, KEY_CLICK_UPGRADE, None)?,
            ..SaveRecord::default()
        };

        for &kind in ProducerKind::all() {
            let i = kind.index();
            let key = amount_key(kind);
            if let Some(v) = lookup(map, &key, Some(&legacy_key(kind, "Amount"))) {
                record.amounts[i] =
                    u32::try_from(as_u64(&key, v)?).map_err(|_| invalid(&key, "out of range"))?;
            }
            record.producer_upgrades[i] =
                opt_bool(map, &upgrade_key(kind), Some(&legacy_key(kind, "Upgrade")))?;
        }

        Ok(record)
    }

    fn check_finite(&self) -> Result<(), SaveError> {
        if !self.cookies.is_finite() {
            return Err(SaveError::NonFinite { key: KEY_COOKIES });
        }
        if !self.total_cookies.is_finite() {
            return Err(SaveError::NonFinite {
                key: KEY_TOTAL_COOKIES,
            });
        }
        Ok(())
    }
}

impl Serialize for SaveRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(KEY_VERSION, &SAVE_VERSION)?;
        map.serialize_entry(KEY_COOKIES, &self.cookies)?;
        map.serialize_entry(KEY_TOTAL_CLICKS, &self.total_clicks)?;
        map.serialize_entry(KEY_TOTAL_COOKIES, &self.total_cookies)?;
        if let Some(start) = self.start_time {
            map.serialize_entry(KEY_START_TIME, &start)?;
        }
        for &kind in ProducerKind::all() {
            map.serialize_entry(&amount_key(kind), &self.amounts[kind.index()])?;
            map.serialize_entry(&upgrade_key(kind), &self.producer_upgrades[kind.index()])?;
        }
        map.serialize_entry(KEY_CLICK_UPGRADE, &self.click_upgrade_bought)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SaveRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        SaveRecord::from_map(&map).map_err(D::Error::custom)
    }
}

/// Serialize a record into its storage blob.
pub fn encode(record: &SaveRecord) -> Result<String, SaveError> {
    record.check_finite()?;
    let json = serde_json::to_string(record)?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Parse a storage blob.
pub fn decode(blob: &str) -> Result<SaveRecord, SaveError> {
    let bytes = general_purpose::STANDARD.decode(blob.trim())?;
    let json = String::from_utf8(bytes)?;
    match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => SaveRecord::from_map(&map),
        _ => Err(SaveError::NotAnObject),
    }
}

/// Present, non-null value under `key`, falling back to `legacy`.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str, legacy: Option<&str>) -> Option<&'a Value> {
    let found = move |k: &str| map.get(k).filter(|v| !v.is_null());
    found(key).or_else(|| legacy.and_then(found))
}

fn invalid(key: &str, reason: &'static str) -> SaveError {
    SaveError::InvalidField {
        key: key.to_string(),
        reason,
    }
}

fn as_u64(key: &str, value: &Value) -> Result<u64, SaveError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    // JavaScript writers may emit integral values as floats.
    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
        Some(_) => Err(invalid(key, "expected a non-negative integer")),
        None => Err(invalid(key, "expected a number")),
    }
}

fn opt_f64(map: &Map<String, Value>, key: &str) -> Result<f64, SaveError> {
    match lookup(map, key, None) {
        None => Ok(0.0),
        Some(v) => match v.as_f64() {
            Some(f) if f >= 0.0 => Ok(f),
            Some(_) => Err(invalid(key, "must not be negative")),
            None => Err(invalid(key, "expected a number")),
        },
    }
}

fn opt_bool(map: &Map<String, Value>, key: &str, legacy: Option<&str>) -> Result<bool, SaveError> {
    match lookup(map, key, legacy) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(invalid(key, "expected a boolean")),
    }
}
