use crate::clock::{Clock, SystemClock};
use crate::config::JudgeConfig;
use crate::error::Result;
use crate::history::HistoryRecord;
use crate::types::{Rating, Timestamp};
use crate::verdict::Verdict;

/// Pure decision function over (history, proposed rating).
///
/// Precedence:
/// 1. an active shadowban window blocks,
/// 2. strikes at or above the flip threshold, or a toxic history, modify
///    the score through the flip table,
/// 3. everything else is accepted unchanged.
///
/// The judge never mutates its inputs and never logs. Strikes, ban stamps
/// and rating appends belong to the caller.
pub struct KarmaJudge<C: Clock = SystemClock> {
    config: JudgeConfig,
    clock: C,
}

impl KarmaJudge<SystemClock> {
    pub fn new() -> Self {
        Self {
            config: JudgeConfig::default(),
            clock: SystemClock,
        }
    }
}

impl Default for KarmaJudge<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> KarmaJudge<C> {
    pub fn with_clock(config: JudgeConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn evaluate(&self, history: &HistoryRecord, new_rating: u8) -> Result<Verdict> {
        self.evaluate_at(history, new_rating, self.clock.now())
    }

    /// Same as [`evaluate`](Self::evaluate) with an explicit `now`.
    pub fn evaluate_at(
        &self,
        history: &HistoryRecord,
        new_rating: u8,
        now: Timestamp,
    ) -> Result<Verdict> {
        let rating = Rating::new(new_rating)?;
        history.validate()?;

        if let Some(level) = self.active_ban(history, now) {
            return Ok(Verdict::blocked(level));
        }

        let toxic = self.is_toxic(history, rating);
        if history.strikes >= self.config.flip_threshold || toxic {
            let (score, note) = self.flip(rating);
            return Ok(Verdict::modified(&note, score, toxic));
        }

        Ok(Verdict::accepted(rating.value()))
    }

    /// Strike level whose shadowban window is still open at `now`.
    pub fn active_ban(&self, history: &HistoryRecord, now: Timestamp) -> Option<u32> {
        let window = self.config.ban_window(history.strikes)?;
        let elapsed = now.seconds_since(history.last_ban_time);
        if elapsed < window as i64 {
            Some(history.strikes)
        } else {
            None
        }
    }

    /// Per-call flag only; never turned into a strike here.
    pub fn is_toxic(&self, history: &HistoryRecord, rating: Rating) -> bool {
        let tox = &self.config.toxicity;
        if history.ratings_given.len() <= tox.min_history || rating.value() != tox.trigger_rating {
            return false;
        }
        match history.mean_rating() {
            Some(mean) => mean < tox.mean_ceiling,
            None => false,
        }
    }

    pub fn flip(&self, rating: Rating) -> (u8, String) {
        let from = rating.value();
        match self.config.flip_table.get(&from) {
            Some(&to) if to != from => (to, format!("Flipped {} -> {}", from, to)),
            _ => (from, "Score allowed".to_string()),
        }
    }
}
