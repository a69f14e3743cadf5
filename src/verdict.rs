use serde::{Serialize, Deserialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Accepted,
    Modified,
    Blocked,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Accepted => "accepted",
            Status::Modified => "modified",
            Status::Blocked => "blocked",
        }
    }
}

/// Outcome of one judge call. `final_score` is what the caller persists,
/// `None` when blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: Status,
    pub reason: String,
    pub final_score: Option<u8>,
    /// Set when the toxicity heuristic fired on this call. Not a strike.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub toxic_pattern: bool,
}

impl Verdict {
    pub fn accepted(score: u8) -> Self {
        Self {
            status: Status::Accepted,
            reason: "Valid interaction".to_string(),
            final_score: Some(score),
            toxic_pattern: false,
        }
    }

    pub fn blocked(level: u32) -> Self {
        Self {
            status: Status::Blocked,
            reason: format!("Shadowban Level {} (Active)", level),
            final_score: None,
            toxic_pattern: false,
        }
    }

    pub fn modified(note: &str, score: u8, toxic_pattern: bool) -> Self {
        Self {
            status: Status::Modified,
            reason: format!("Toxic Pattern Detected. {}", note),
            final_score: Some(score),
            toxic_pattern,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == Status::Blocked
    }
}
