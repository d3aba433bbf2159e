//! Low-enrollment alert sink configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AlertsConfig {
    /// Append alerts as JSON lines to this file. Empty means log-only.
    #[serde(default)]
    pub jsonl_path: String,
}

impl AlertsConfig {
    #[must_use]
    pub fn jsonl_path(&self) -> Option<PathBuf> {
        if self.jsonl_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.jsonl_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_means_log_only() {
        assert!(AlertsConfig::default().jsonl_path().is_none());
        let config = AlertsConfig {
            jsonl_path: "alerts.jsonl".into(),
        };
        assert_eq!(config.jsonl_path(), Some(PathBuf::from("alerts.jsonl")));
    }
}
