use std::collections::HashMap;

use crate::error::Result;
use crate::history::HistoryRecord;
use crate::store::HistoryStore;
use crate::types::Identity;

/// MemoryHistoryStore keeps one record per identity in a map.
/// load() of an unknown identity hands back an empty record without
/// inserting it; save() overwrites.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: HashMap<Identity, HistoryRecord>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop a record entirely, e.g. when an external policy clears a ban.
    pub fn remove(&mut self, who: &Identity) -> Option<HistoryRecord> {
        self.records.remove(who)
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self, who: &Identity) -> Result<HistoryRecord> {
        Ok(self.records.get(who).cloned().unwrap_or_default())
    }

    fn save(&mut self, who: &Identity, record: HistoryRecord) -> Result<()> {
        record.validate()?;
        self.records.insert(who.clone(), record);
        Ok(())
    }
}
