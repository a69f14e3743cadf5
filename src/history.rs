use serde::{Serialize, Deserialize};

use crate::error::{KarmaError, Result};
use crate::types::{Rating, Timestamp, MAX_RATING, MIN_RATING};

/// Per-identity behavior record. Owned by the history store; the judge
/// only reads it, the gate applies the transitions a verdict implies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryRecord {
    pub strikes: u32,
    pub last_ban_time: Timestamp,
    pub ratings_given: Vec<u8>,
}

impl HistoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored record. Negative strikes or a non-integer field
    /// surface as `InvalidInput`.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: HistoryRecord = serde_json::from_str(json)
            .map_err(|e| KarmaError::InvalidInput(format!("malformed history: {}", e)))?;
        record.validate()?;
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((i, bad)) = self
            .ratings_given
            .iter()
            .enumerate()
            .find(|(_, r)| !(MIN_RATING..=MAX_RATING).contains(*r))
        {
            return Err(KarmaError::InvalidInput(format!(
                "malformed history: ratings_given[{}] = {} outside [{}, {}]",
                i, bad, MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }

    /// Mean of prior ratings, `None` for an empty history.
    pub fn mean_rating(&self) -> Option<f64> {
        if self.ratings_given.is_empty() {
            return None;
        }
        let sum: u64 = self.ratings_given.iter().map(|&r| r as u64).sum();
        Some(sum as f64 / self.ratings_given.len() as f64)
    }

    /// A strike that starts a ban stamps the ban start in the same update.
    pub fn record_strike(&mut self, at: Timestamp) {
        self.strikes = self.strikes.saturating_add(1);
        self.last_ban_time = at;
    }

    pub fn push_rating(&mut self, rating: Rating) {
        self.ratings_given.push(rating.value());
    }
}
