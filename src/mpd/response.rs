//! Parser for the daemon's `Key: Value` reply blocks
//!
//! A reply encodes one entity per run of distinct keys; a key showing up a
//! second time marks the start of the next entity (MPD streams list replies
//! this way, e.g. one `file:`/`Title:`/`Time:` group per song).

/// One parsed entity: an ordered field-name to value mapping.
///
/// Field presence is never guaranteed; callers fall back to empty or a
/// default when a field is absent. Backed by a plain vector so iteration
/// keeps the daemon's field order, which table headers rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered, never-empty sequence of records.
///
/// A reply with no entities still yields one empty record, so `first()` is
/// total and callers never branch on an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn first(&self) -> &Record {
        &self.records[0]
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(mut records: Vec<Record>) -> Self {
        if records.is_empty() {
            records.push(Record::new());
        }
        Self { records }
    }
}

/// Parse a raw reply block into records.
///
/// Each line splits on the first `": "` into key and trimmed value. Lines
/// without the separator, or with nothing after it, are skipped rather than
/// failing the whole reply.
pub fn parse_response(raw: &str) -> RecordSet {
    let mut records = Vec::new();
    let mut current = Record::new();

    for line in raw.split('\n') {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if current.contains_key(key) {
            records.push(std::mem::take(&mut current));
        }
        current.insert(key, value);
    }
    records.push(current);

    RecordSet::from(records)
}
