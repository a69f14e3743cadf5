use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::history::HistoryRecord;
use crate::judge::KarmaJudge;
use crate::store::HistoryStore;
use crate::types::{Identity, Rating};
use crate::verdict::Verdict;

/// Caller-side policy knobs that the judge deliberately leaves open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatePolicy {
    /// Turn a toxic-pattern verdict into a strike (and ban stamp).
    /// Off unless product decides repeated toxicity should escalate.
    pub strike_on_toxic: bool,
}

/// Rating gate with:
/// - a judge (pure verdicts)
/// - a history store keyed by pseudonymous identity
/// - the policy for what a verdict does to history
///
/// Mutating calls take `&mut self`, so one gate never runs two
/// read-modify-write cycles at once. Share it across threads behind a
/// `Mutex`.
pub struct RatingGate<S: HistoryStore, C: Clock = SystemClock> {
    pub judge: KarmaJudge<C>,
    pub store: S,
    pub policy: GatePolicy,
}

impl<S: HistoryStore, C: Clock> RatingGate<S, C> {
    pub fn new(judge: KarmaJudge<C>, store: S) -> Self {
        Self {
            judge,
            store,
            policy: GatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Core intake:
    /// 1. derive identity
    /// 2. load history snapshot
    /// 3. judge
    /// 4. blocked: leave history alone; otherwise append the submitted
    ///    rating (plus a strike if policy says so) and save
    pub fn submit(&mut self, raw_identity: &str, rating: u8) -> Result<Verdict> {
        let who = Identity::derive(raw_identity)?;
        let rating = Rating::new(rating)?;
        let now = self.judge.now();

        let mut history = self.store.load(&who)?;
        let verdict = self.judge.evaluate_at(&history, rating.value(), now)?;

        if verdict.is_blocked() {
            log::info!("{} blocked: {}", who.short(), verdict.reason);
            return Ok(verdict);
        }

        history.push_rating(rating);
        if verdict.toxic_pattern && self.policy.strike_on_toxic {
            history.record_strike(now);
            log::info!("{} strike {} for toxic pattern", who.short(), history.strikes);
        }
        self.store.save(&who, history)?;

        log::debug!(
            "{} rated {} -> {} ({:?})",
            who.short(),
            rating,
            verdict.status.as_str(),
            verdict.final_score
        );
        Ok(verdict)
    }

    /// Flag an identity as abusive: bump strikes and stamp the ban start
    /// in the same save.
    pub fn record_strike(&mut self, raw_identity: &str) -> Result<HistoryRecord> {
        let who = Identity::derive(raw_identity)?;
        let now = self.judge.now();

        let mut history = self.store.load(&who)?;
        history.record_strike(now);
        self.store.save(&who, history.clone())?;

        log::info!("{} strike {} at {}", who.short(), history.strikes, now.0);
        Ok(history)
    }

    pub fn history(&self, raw_identity: &str) -> Result<HistoryRecord> {
        let who = Identity::derive(raw_identity)?;
        self.store.load(&who)
    }
}
