use serde::{Deserialize, Serialize};

use crate::{ConfigError, ZeroWeightPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub zero_weight_policy: ZeroWeightPolicy,
    /// Number of classes a user is expected to attend per period. The
    /// attendance rate is relative to this value.
    pub expected_classes_per_period: u32,
}

impl MetricsConfig {
    pub const DEFAULT_EXPECTED_CLASSES_PER_PERIOD: u32 = 7;

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MetricsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.zero_weight_policy {
            ZeroWeightPolicy::Bodyweight { fraction } if !(fraction > 0.0 && fraction <= 1.0) => {
                Err(ConfigError::InvalidBodyweightFraction(fraction))
            }
            _ => Ok(()),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            zero_weight_policy: ZeroWeightPolicy::default(),
            expected_classes_per_period: Self::DEFAULT_EXPECTED_CLASSES_PER_PERIOD,
        }
    }
}
