//! Segment access and per-segment read cursors.

use record::Record;

use crate::{MergeError, MergeResult, OrderedEntry};

/// A read-only, pre-sorted batch of raw `key:value` entries.
///
/// Within one segment keys are strictly ascending. The merge borrows
/// segments for the duration of a run and never mutates them.
pub trait Segment {
    /// Number of entries in the segment.
    fn len(&self) -> usize;

    /// Raw entry at `index`, or `None` past the end.
    fn entry(&self, index: usize) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: AsRef<str>> Segment for [E] {
    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    fn entry(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::<str>::as_ref)
    }
}

impl<E: AsRef<str>> Segment for Vec<E> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn entry(&self, index: usize) -> Option<&str> {
        self.as_slice().entry(index)
    }
}

/// Next-unread index for every segment of one merge run.
///
/// Cursors only move forward. A segment is exhausted once its cursor equals
/// its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorTable {
    next: Vec<usize>,
}

impl CursorTable {
    pub fn new(segments: usize) -> Self {
        Self {
            next: vec![0; segments],
        }
    }

    /// Index of the next unread entry of `segment_id`.
    pub fn position(&self, segment_id: usize) -> usize {
        self.next[segment_id]
    }

    /// Returns the current position of `segment_id` and moves it forward by one.
    pub fn advance(&mut self, segment_id: usize) -> usize {
        let index = self.next[segment_id];
        self.next[segment_id] = index + 1;
        index
    }

    pub fn is_exhausted(&self, segment_id: usize, segment_size: usize) -> bool {
        self.next[segment_id] >= segment_size
    }

    /// Number of segments tracked.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.next
    }
}

/// Reads segments left to right through a [`CursorTable`], decoding each raw
/// entry into an [`OrderedEntry`].
pub(crate) struct SegmentScanner<'a, S> {
    segments: &'a [S],
    cursors: CursorTable,
    /// Last key read per segment; only tracked when order validation is on.
    last_keys: Option<Vec<Option<String>>>,
    scanned: usize,
}

impl<'a, S: Segment> SegmentScanner<'a, S> {
    pub(crate) fn new(segments: &'a [S], validate_order: bool) -> Self {
        Self {
            segments,
            cursors: CursorTable::new(segments.len()),
            last_keys: validate_order.then(|| vec![None; segments.len()]),
            scanned: 0,
        }
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn cursors(&self) -> &CursorTable {
        &self.cursors
    }

    /// Total records decoded so far.
    pub(crate) fn scanned(&self) -> usize {
        self.scanned
    }

    /// Whether `segment_id` has unread entries, using the cached size.
    pub(crate) fn has_more(&self, segment_id: usize, segment_size: usize) -> bool {
        !self.cursors.is_exhausted(segment_id, segment_size)
    }

    /// Decodes the entry under `segment_id`'s cursor and advances the cursor.
    ///
    /// Returns `Ok(None)` once the segment is exhausted.
    pub(crate) fn read_next(&mut self, segment_id: usize) -> MergeResult<Option<OrderedEntry>> {
        let segment = &self.segments[segment_id];
        let segment_size = segment.len();
        if self.cursors.is_exhausted(segment_id, segment_size) {
            return Ok(None);
        }

        let index = self.cursors.advance(segment_id);
        let raw = match segment.entry(index) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let record = Record::decode(raw).map_err(|e| MergeError::MalformedRecord {
            segment_id,
            index,
            raw: e.raw,
        })?;

        if let Some(last_keys) = self.last_keys.as_mut() {
            let last = &mut last_keys[segment_id];
            if let Some(previous) = last.as_deref() {
                if previous >= record.key() {
                    return Err(MergeError::InvalidSegmentOrder {
                        segment_id,
                        index,
                        previous: previous.to_string(),
                        key: record.key().to_string(),
                    });
                }
            }
            *last = Some(record.key().to_string());
        }

        self.scanned += 1;
        Ok(Some(OrderedEntry::new(segment_id, segment_size, record)))
    }
}
