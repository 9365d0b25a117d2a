//! Merge that keeps at most one queue node per key.
//!
//! A `key -> OrderedEntry` index mirrors the queue. The index is the
//! authoritative store for each queued key's provenance and value; the queue
//! itself only holds keys. Since a queued key is never changed, superseding
//! a key rewrites the index entry and leaves the queue untouched.

use record::MergedRecord;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::segment::SegmentScanner;
use crate::{CursorTable, MergeResult, MergeStats, MinQueue, OrderedEntry, Segment, SegmentMerge};

/// Merges segments while paying the `O(log N)` queue cost once per distinct
/// key instead of once per record.
///
/// Each non-exhausted segment owns at most one queued key: either a key it
/// inserted or one whose value it took over from an older segment. When a
/// segment loses its key (popped, or superseded by a newer segment) it is
/// advanced until it owns a key again or runs out. A popped segment is
/// advanced on the call after its record is returned. This bounds the queue
/// and the index to `min(N, D)` entries.
pub struct DedupMerge<'a, S> {
    scanner: SegmentScanner<'a, S>,
    queue: MinQueue<String>,
    index: HashMap<String, OrderedEntry>,
    /// Segments waiting to surface their next record.
    pending: Vec<usize>,
    /// Segment that lost its key to the last emitted record.
    refill: Option<usize>,
    stats: MergeStats,
}

impl<'a, S: Segment> DedupMerge<'a, S> {
    /// Creates a merge over `segments`.
    ///
    /// Segments are surfaced newest first, so older copies of keys already
    /// claimed by a newer segment are skipped before they reach the queue.
    ///
    /// # Errors
    ///
    /// Fails if an entry read during initialization cannot be decoded.
    pub fn new(segments: &'a [S]) -> MergeResult<Self> {
        Self::with_validation(segments, false)
    }

    /// Like [`DedupMerge::new`], optionally checking that every segment is
    /// strictly ascending as it is read.
    pub fn with_validation(segments: &'a [S], validate_order: bool) -> MergeResult<Self> {
        let mut merge = Self {
            scanner: SegmentScanner::new(segments, validate_order),
            queue: MinQueue::with_capacity(segments.len()),
            index: HashMap::with_capacity(segments.len()),
            pending: Vec::new(),
            refill: None,
            stats: MergeStats::default(),
        };

        for segment_id in (0..segments.len()).rev() {
            merge.try_advance_segment(segment_id)?;
        }

        debug!(
            segments = merge.scanner.segment_count(),
            queued = merge.queue.len(),
            scanned = merge.scanner.scanned(),
            "dedup merge initialized"
        );
        Ok(merge)
    }

    /// Advances `segment_id` until it owns a queued key or is exhausted.
    ///
    /// Taking over a key from an older segment leaves that segment without a
    /// key, so it is queued on the pending stack and advanced in turn.
    fn try_advance_segment(&mut self, segment_id: usize) -> MergeResult<()> {
        self.pending.push(segment_id);

        while let Some(current) = self.pending.pop() {
            while let Some(entry) = self.scanner.read_next(current)? {
                match self.index.get_mut(entry.key()) {
                    None => {
                        let key = entry.key().to_string();
                        self.queue.insert(key.clone());
                        self.index.insert(key, entry);
                        self.stats.record_insertion(self.queue.len());
                        break;
                    }
                    Some(existing) if existing.segment_id() < current => {
                        let (superseded, superseded_size) = existing.supersede(entry);
                        trace!(
                            key = existing.key(),
                            segment_id = current,
                            superseded,
                            "record superseded in place"
                        );
                        self.stats.records_shadowed += 1;
                        if self.scanner.has_more(superseded, superseded_size) {
                            self.pending.push(superseded);
                        }
                        break;
                    }
                    Some(existing) => {
                        trace!(
                            key = existing.key(),
                            segment_id = current,
                            owner = existing.segment_id(),
                            "skipping shadowed record"
                        );
                        self.stats.records_shadowed += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a, S: Segment> SegmentMerge for DedupMerge<'a, S> {
    fn next_record(&mut self) -> MergeResult<Option<MergedRecord>> {
        if let Some(segment_id) = self.refill.take() {
            self.try_advance_segment(segment_id)?;
        }

        while let Some(key) = self.queue.pop_min() {
            let entry = match self.index.remove(&key) {
                Some(e) => e,
                None => continue, // queue and index always agree; skip
            };

            // Every unread record of this segment sorts after `key`, so the
            // winner can go out before the segment is advanced.
            self.refill = Some(entry.segment_id());
            self.stats.records_emitted += 1;
            return Ok(Some(entry.into_merged()));
        }
        Ok(None)
    }

    fn stats(&self) -> MergeStats {
        MergeStats {
            records_scanned: self.scanner.scanned(),
            ..self.stats
        }
    }

    fn cursors(&self) -> &CursorTable {
        self.scanner.cursors()
    }

    fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl<'a, S> DedupMerge<'a, S> {
    /// Number of keys currently held in the key index.
    pub fn indexed(&self) -> usize {
        self.index.len()
    }
}
