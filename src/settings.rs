use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

const MAX_THINK_DELAY_MS: u64 = 10_000;

/// Session tuning knobs. An Optimal opponent answers faster than the
/// weakened tiers since its search roots are cheap on 3x3.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub optimal_think_delay_ms: u64,
    pub standard_think_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            optimal_think_delay_ms: 100,
            standard_think_delay_ms: 500,
            rng_seed: None,
        }
    }
}

impl SessionSettings {
    pub fn from_yaml_file(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let settings: Self = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to deserialize settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml_ng::to_string(self).map_err(|e| format!("Failed to serialize settings: {}", e))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.optimal_think_delay_ms > MAX_THINK_DELAY_MS
            || self.standard_think_delay_ms > MAX_THINK_DELAY_MS
        {
            return Err(format!(
                "Think delay cannot exceed {} ms",
                MAX_THINK_DELAY_MS
            ));
        }
        Ok(())
    }

    pub fn think_delay(&self, difficulty: Difficulty) -> Duration {
        match difficulty {
            Difficulty::Optimal => Duration::from_millis(self.optimal_think_delay_ms),
            _ => Duration::from_millis(self.standard_think_delay_ms),
        }
    }
}
