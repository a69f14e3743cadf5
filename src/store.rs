use crate::error::Result;
use crate::history::HistoryRecord;
use crate::types::Identity;

// HistoryStore is how the gate reads and writes per-identity history.
// The storage format is the implementor's business.
pub trait HistoryStore {
    // unknown identities load as an empty record
    fn load(&self, who: &Identity) -> Result<HistoryRecord>;

    // replace the whole record for `who`
    fn save(&mut self, who: &Identity, record: HistoryRecord) -> Result<()>;
}
