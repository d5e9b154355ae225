use crate::error::{Result, SeatdrawError};
use crate::storage::KeyValueBackend;
use crate::types::ParticipantRecord;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type ParticipantMap = BTreeMap<String, ParticipantRecord>;

/// All participants, kept as one JSON object (id -> record) under a single key.
///
/// Every operation reads and rewrites the whole blob. A blob that is not a
/// JSON object is treated as an empty store and the next `put` overwrites it.
/// Inside a valid object, entries that don't decode as a record are skipped
/// on read but left untouched on write.
pub struct ParticipantStore<B> {
    backend: B,
    key: String,
}

impl<B: KeyValueBackend> ParticipantStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn try_load_entries(&self) -> Result<Map<String, Value>> {
        let raw = match self.backend.get_item(&self.key)? {
            None => return Ok(Map::new()),
            Some(raw) => raw,
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(SeatdrawError::corrupt(format!(
                "key '{}': expected a JSON object",
                self.key
            ))),
            Err(e) => Err(SeatdrawError::corrupt(format!("key '{}': {}", self.key, e))),
        }
    }

    fn load_entries(&self) -> Result<Map<String, Value>> {
        match self.try_load_entries() {
            Err(SeatdrawError::StorageCorrupt(reason)) => {
                tracing::warn!("Treating participant store as empty: {}", reason);
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn decode(entries: Map<String, Value>) -> ParticipantMap {
        let mut participants = ParticipantMap::new();
        for (id, value) in entries {
            match serde_json::from_value::<ParticipantRecord>(value) {
                Ok(record) => {
                    participants.insert(id, record);
                }
                Err(e) => tracing::warn!("Skipping unreadable participant entry '{}': {}", id, e),
            }
        }
        participants
    }

    /// Strict read: a corrupt blob is reported, not healed.
    pub fn try_load(&self) -> Result<ParticipantMap> {
        Ok(Self::decode(self.try_load_entries()?))
    }

    fn load(&self) -> Result<ParticipantMap> {
        Ok(Self::decode(self.load_entries()?))
    }

    /// Insert or replace by id.
    pub fn put(&self, record: &ParticipantRecord) -> Result<()> {
        let mut entries = self.load_entries()?;
        entries.insert(record.id.clone(), serde_json::to_value(record)?);

        let blob = serde_json::to_string(&entries)?;
        self.backend.set_item(&self.key, &blob)?;

        tracing::debug!("Stored participant {} ({} total)", record.id, entries.len());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<ParticipantRecord>> {
        Ok(self.load()?.remove(id))
    }

    pub fn list_all(&self) -> Result<Vec<ParticipantRecord>> {
        Ok(self.load()?.into_values().collect())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn clear(&self) -> Result<()> {
        self.backend.remove_item(&self.key)
    }

    /// The whole store as pretty-printed JSON, for export. Unreadable entries
    /// are included as stored.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.load_entries()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, team: u32, lottery: u32) -> ParticipantRecord {
        ParticipantRecord {
            id: id.to_string(),
            team_number: team,
            lottery_number: lottery,
            created_at: Utc.with_ymd_and_hms(2025, 12, 19, 18, 30, 0).unwrap(),
        }
    }

    fn store() -> ParticipantStore<MemoryBackend> {
        ParticipantStore::new(MemoryBackend::new(), "participants")
    }

    #[test]
    fn test_put_then_get_returns_equal_record() {
        let store = store();
        let rec = record("a", 3, 42);
        store.put(&rec).unwrap();

        assert_eq!(store.get("a").unwrap(), Some(rec));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_put_upserts_by_id() {
        let store = store();
        store.put(&record("a", 1, 1)).unwrap();
        store.put(&record("b", 2, 2)).unwrap();
        store.put(&record("a", 1, 7)).unwrap();

        let mut all = store.list_all().unwrap();
        all.sort_by_key(|r| r.lottery_number);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, "a");
        assert_eq!(all[1].lottery_number, 7);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = store();
        store.put(&record("a", 1, 1)).unwrap();
        store.clear().unwrap();

        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.backend().get_item("participants").unwrap(), None);
    }

    #[test]
    fn test_blob_uses_camel_case_layout() {
        let store = store();
        store.put(&record("a", 3, 42)).unwrap();

        let raw = store.backend().get_item("participants").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["a"]["teamNumber"], 3);
        assert_eq!(value["a"]["lotteryNumber"], 42);
        assert_eq!(value["a"]["createdAt"], "2025-12-19T18:30:00Z");
    }

    #[test]
    fn test_reads_blob_written_by_browser_client() {
        let store = store();
        store
            .backend()
            .set_item(
                "participants",
                r#"{"x":{"id":"x","teamNumber":5,"lotteryNumber":17,"createdAt":"2025-12-19T09:15:30.123Z"}}"#,
            )
            .unwrap();

        let rec = store.get("x").unwrap().unwrap();
        assert_eq!(rec.team_number, 5);
        assert_eq!(rec.lottery_number, 17);
    }

    #[test]
    fn test_corrupt_blob_is_treated_as_empty_and_healed() {
        let store = store();
        store.backend().set_item("participants", "{not json").unwrap();

        assert!(matches!(
            store.try_load(),
            Err(SeatdrawError::StorageCorrupt(_))
        ));
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.export_json().unwrap(), "{}");

        store.put(&record("a", 1, 1)).unwrap();
        assert_eq!(store.try_load().unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_entry_does_not_hide_the_rest() {
        let store = store();
        store
            .backend()
            .set_item(
                "participants",
                r#"{
                    "a":{"id":"a","teamNumber":1,"lotteryNumber":11,"createdAt":"2025-12-19T09:15:30Z"},
                    "b":{"id":"b","teamNumber":2,"lotteryNumber":22,"createdAt":"2025-12-19T09:16:30Z"},
                    "c":{"id":"c","teamNumber":3,"lotteryNumber":33,"createdAt":"2025-12-19 09:15:30"}
                }"#,
            )
            .unwrap();

        let mut ids: Vec<String> = store.list_all().unwrap().into_iter().map(|r| r.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("c").unwrap(), None);

        store.put(&record("d", 4, 44)).unwrap();
        assert_eq!(store.count().unwrap(), 3);
        assert!(store.get("a").unwrap().is_some());

        let raw = store.backend().get_item("participants").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["c"]["lotteryNumber"], 33);
        assert!(store.export_json().unwrap().contains("\"c\""));
    }

    #[test]
    fn test_non_object_blob_is_corrupt() {
        let store = store();
        store.backend().set_item("participants", "[1, 2, 3]").unwrap();

        assert!(matches!(
            store.try_load(),
            Err(SeatdrawError::StorageCorrupt(_))
        ));
        assert!(store.list_all().unwrap().is_empty());
    }
}
