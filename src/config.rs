use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

use crate::error::{KarmaError, Result};
use crate::types::{MAX_RATING, MIN_RATING};

pub const WEEK_SECS: u64 = 7 * 24 * 60 * 60;

/// Mean-of-history rule. Fires when the history is longer than
/// `min_history`, its mean is below `mean_ceiling`, and the new rating
/// equals `trigger_rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToxicityConfig {
    pub min_history: usize,
    pub mean_ceiling: f64,
    pub trigger_rating: u8,
}

impl Default for ToxicityConfig {
    fn default() -> Self {
        Self {
            min_history: 3,
            mean_ceiling: 2.0,
            trigger_rating: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// strikes -> shadowban window in seconds. Strike counts without an
    /// entry never block.
    pub ban_tiers: BTreeMap<u32, u64>,
    /// From this many strikes on every submission goes through the flip table.
    pub flip_threshold: u32,
    /// Sparse rating substitution; ratings not listed pass through.
    pub flip_table: BTreeMap<u8, u8>,
    pub toxicity: ToxicityConfig,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            ban_tiers: BTreeMap::from([(1, 3 * WEEK_SECS), (2, 6 * WEEK_SECS)]),
            flip_threshold: 3,
            flip_table: BTreeMap::from([(1, 3), (3, 5)]),
            toxicity: ToxicityConfig::default(),
        }
    }
}

impl JudgeConfig {
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: JudgeConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_ban_tier(mut self, strikes: u32, window_secs: u64) -> Self {
        self.ban_tiers.insert(strikes, window_secs);
        self
    }

    pub fn with_flip_threshold(mut self, strikes: u32) -> Self {
        self.flip_threshold = strikes;
        self
    }

    pub fn ban_window(&self, strikes: u32) -> Option<u64> {
        self.ban_tiers.get(&strikes).copied()
    }

    pub fn validate(&self) -> Result<()> {
        for (&strikes, &window) in &self.ban_tiers {
            if strikes == 0 {
                return Err(KarmaError::Config("ban tier keyed on zero strikes".into()));
            }
            if window == 0 || window > i64::MAX as u64 {
                return Err(KarmaError::Config(format!(
                    "ban tier {} has unusable window {}",
                    strikes, window
                )));
            }
        }

        if self.flip_threshold == 0 {
            return Err(KarmaError::Config("flip threshold must be at least one strike".into()));
        }

        let in_range = |r: u8| (MIN_RATING..=MAX_RATING).contains(&r);
        for (&from, &to) in &self.flip_table {
            if !in_range(from) || !in_range(to) {
                return Err(KarmaError::Config(format!("flip {} -> {} outside [1, 5]", from, to)));
            }
        }

        if !in_range(self.toxicity.trigger_rating) {
            return Err(KarmaError::Config(format!(
                "toxicity trigger rating {} outside [1, 5]",
                self.toxicity.trigger_rating
            )));
        }
        if !self.toxicity.mean_ceiling.is_finite() {
            return Err(KarmaError::Config("toxicity mean ceiling must be finite".into()));
        }
        Ok(())
    }
}
