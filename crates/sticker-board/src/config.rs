//! Board Configuration
//!
//! Policy constants for gestures and persistence. The defaults are what the
//! page ships with; a host page may override single fields.

use serde::{Deserialize, Serialize};

use crate::domain::DomainResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Storage slot holding the whole snapshot
    pub storage_key: String,
    /// Pointer travel (either axis) that turns a press into a drag
    pub drag_threshold: f64,
    /// Quiet period before a requested save is written
    pub save_debounce_ms: u32,
    /// Offset between consecutive new stickers
    pub spawn_step: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: "stickers".to_string(),
            drag_threshold: 5.0,
            save_debounce_ms: 200,
            spawn_step: 10,
        }
    }
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = BoardConfig::from_json(r#"{ "save_debounce_ms": 500 }"#).unwrap();
        assert_eq!(config.save_debounce_ms, 500);
        assert_eq!(config.storage_key, "stickers");
        assert_eq!(config.drag_threshold, 5.0);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        assert!(BoardConfig::from_json("{ not json").is_err());
        assert!(BoardConfig::from_json(r#"{ "spawn_step": "wide" }"#).is_err());
    }
}
