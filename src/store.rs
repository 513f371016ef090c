use std::path::Path;

use tracing::{debug, info};

use crate::buffer::Buffer;
use crate::error::MetadataError;
use crate::traits::{Metadata, MetadataSink, MetadataSource};

/// A metadata key paired with its editable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub value: Buffer,
    /// The value exactly as the source returned it.
    original: String,
}

impl Record {
    fn new(key: String, original: String) -> Self {
        Self {
            key,
            value: Buffer::from_text(&original),
            original,
        }
    }

    /// The value to hand back to a sink.
    ///
    /// An untouched value comes back byte-for-byte, `"\r\n"` included. Once
    /// edited, its lines are joined with a bare `'\n'`.
    pub fn text(&self) -> String {
        if self.value == Buffer::from_text(&self.original) {
            self.original.clone()
        } else {
            self.value.to_text()
        }
    }
}

/// Every record of a file, in the order the file listed them.
///
/// Keys are unique and fixed after loading; only values change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn load<S: MetadataSource + ?Sized>(source: &S, path: &Path) -> Result<Self, MetadataError> {
        let pairs = source.load(path)?;
        let store = Self::from_pairs(pairs);
        info!(target: "store", path = %path.display(), records = store.len(), "loaded");
        Ok(store)
    }

    /// Build a store from ordered pairs. A repeated key keeps its first
    /// position and takes the last value.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::default();
        for (key, value) in pairs {
            let record = Record::new(key.into(), value.into());
            match store.index_of(&record.key) {
                Some(idx) => {
                    debug!(target: "store", key = %record.key, "duplicate key replaced");
                    store.records[idx] = record;
                }
                None => store.records.push(record),
            }
        }
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    pub fn key_at(&self, idx: usize) -> Option<&str> {
        self.records.get(idx).map(|r| r.key.as_str())
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&Buffer> {
        self.records.iter().find(|r| r.key == key).map(|r| &r.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Buffer> {
        self.records
            .iter_mut()
            .find(|r| r.key == key)
            .map(|r| &mut r.value)
    }

    /// Flatten each value back into a single string. See [`Record::text`].
    pub fn to_persistable(&self) -> Metadata {
        self.records
            .iter()
            .map(|r| (r.key.clone(), r.text()))
            .collect()
    }

    pub fn persist<S: MetadataSink + ?Sized>(&self, sink: &S, path: &Path) -> Result<(), MetadataError> {
        sink.persist(path, &self.to_persistable())?;
        info!(target: "store", path = %path.display(), records = self.len(), "persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_insertion_order() {
        let store = RecordStore::from_pairs([("Title", "A"), ("Author", "B"), ("Creator", "C")]);
        let keys: Vec<_> = store.keys_in_order().collect();
        assert_eq!(keys, vec!["Title", "Author", "Creator"]);
    }

    #[test]
    fn duplicate_keys_keep_first_position() {
        let store = RecordStore::from_pairs([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(
            store.to_persistable(),
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn persistable_rejoins_lines() {
        let mut store = RecordStore::from_pairs([("Subject", "one\r\ntwo")]);
        assert_eq!(store.get("Subject").map(|b| b.lines().count()), Some(2));
        if let Some(buf) = store.get_mut("Subject") {
            buf.insert_newline(crate::types::Position::new(1, 3));
        }
        assert_eq!(
            store.to_persistable(),
            vec![("Subject".to_string(), "one\ntwo\n".to_string())]
        );
    }

    #[test]
    fn untouched_crlf_value_round_trips() {
        let mut store = RecordStore::from_pairs([("Subject", "one\r\ntwo"), ("Title", "a\r\nb")]);
        assert_eq!(store.get("Subject").map(|b| b.to_text()), Some("one\ntwo".to_string()));
        if let Some(buf) = store.get_mut("Title") {
            let pos = buf.insert_char(crate::types::Position::new(1, 1), '!');
            buf.backspace(pos, crate::buffer::DeletePolicy::Join);
        }
        assert_eq!(
            store.to_persistable(),
            vec![
                ("Subject".to_string(), "one\r\ntwo".to_string()),
                ("Title".to_string(), "a\r\nb".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_key_is_none() {
        let store = RecordStore::from_pairs([("k", "v")]);
        assert!(store.get("missing").is_none());
        assert_eq!(store.index_of("k"), Some(0));
        assert_eq!(store.key_at(1), None);
    }
}
