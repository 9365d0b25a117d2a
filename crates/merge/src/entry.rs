use record::{MergedRecord, Record};
use std::cmp::Ordering;

/// A [`Record`] tagged with the segment it was read from.
///
/// Ordering is the merge order: ascending by key, and among equal keys the
/// entry from the **higher** (more recent) segment sorts first. Popping the
/// minimum therefore always yields the winning version of a key before any
/// shadowed one.
#[derive(Debug, Clone)]
pub struct OrderedEntry {
    segment_id: usize,
    /// Length of the originating segment, cached at construction.
    segment_size: usize,
    record: Record,
}

impl OrderedEntry {
    pub fn new(segment_id: usize, segment_size: usize, record: Record) -> Self {
        Self {
            segment_id,
            segment_size,
            record,
        }
    }

    pub fn segment_id(&self) -> usize {
        self.segment_id
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn key(&self) -> &str {
        self.record.key()
    }

    /// Overwrites provenance and value with those of `newer`, which must carry
    /// the same key. Returns the `(segment_id, segment_size)` that was replaced.
    pub fn supersede(&mut self, newer: OrderedEntry) -> (usize, usize) {
        debug_assert_eq!(self.key(), newer.key());
        let replaced = (self.segment_id, self.segment_size);
        self.segment_id = newer.segment_id;
        self.segment_size = newer.segment_size;
        let (_, value) = newer.record.into_parts();
        self.record.set_value(value);
        replaced
    }

    pub fn into_merged(self) -> MergedRecord {
        MergedRecord::new(self.segment_id, self.record)
    }
}

// `segment_size` is a cache of the segment's length and takes no part in
// equality or ordering.
impl PartialEq for OrderedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedEntry {}

impl PartialOrd for OrderedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key()
            .cmp(other.key())
            .then_with(|| other.segment_id.cmp(&self.segment_id))
            .then_with(|| self.record.value().cmp(other.record.value()))
    }
}
