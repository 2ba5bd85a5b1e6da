//! Game configuration.

use serde::Deserialize;

/// Tunables for a game session. Every field has a default, so a partial
/// JSON object deserializes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Name of the persistence slot holding the save blob.
    pub storage_key: String,
    /// Length of one production tick.
    pub tick_interval_ms: f64,
    /// Largest gap between frames that still produces ticks. A tab the
    /// browser stopped painting catches up by at most this much.
    pub max_catch_up_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: String::from("gameData"),
            tick_interval_ms: 1_000.0,
            max_catch_up_ms: 3_600_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"storage_key": "slot2"}"#).unwrap();
        assert_eq!(cfg.storage_key, "slot2");
        assert!((cfg.tick_interval_ms - 1_000.0).abs() < f64::EPSILON);
        assert!((cfg.max_catch_up_ms - 3_600_000.0).abs() < f64::EPSILON);
    }
}
