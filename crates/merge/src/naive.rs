//! Straightforward k-way merge: every record passes through the queue and
//! shadowed duplicates are dropped on the way out.

use record::MergedRecord;
use tracing::{debug, trace};

use crate::segment::SegmentScanner;
use crate::{CursorTable, MergeResult, MergeStats, MinQueue, OrderedEntry, Segment, SegmentMerge};

/// Merges segments by keeping the head record of every non-exhausted segment
/// in a min-queue.
///
/// The queue holds at most one entry per segment. Because equal keys pop
/// newest-segment first, any older copies of a key surface immediately after
/// the winner and are skipped by comparing against the last emitted key.
///
/// A winner is handed out as soon as it is popped; its segment is refilled at
/// the start of the following call.
///
/// Every record is inserted exactly once: `O(T log N)` time, `O(N)` space.
pub struct NaiveMerge<'a, S> {
    scanner: SegmentScanner<'a, S>,
    queue: MinQueue<OrderedEntry>,
    last_emitted: Option<String>,
    /// Segment whose head was emitted last and still has to be refilled.
    refill: Option<(usize, usize)>,
    stats: MergeStats,
}

impl<'a, S: Segment> NaiveMerge<'a, S> {
    /// Creates a merge over `segments` and seeds the queue with the first
    /// record of each one.
    ///
    /// # Errors
    ///
    /// Fails if a first entry cannot be decoded.
    pub fn new(segments: &'a [S]) -> MergeResult<Self> {
        Self::with_validation(segments, false)
    }

    /// Like [`NaiveMerge::new`], optionally checking that every segment is
    /// strictly ascending as it is read.
    pub fn with_validation(segments: &'a [S], validate_order: bool) -> MergeResult<Self> {
        let mut merge = Self {
            scanner: SegmentScanner::new(segments, validate_order),
            queue: MinQueue::with_capacity(segments.len()),
            last_emitted: None,
            refill: None,
            stats: MergeStats::default(),
        };

        for segment_id in 0..segments.len() {
            if let Some(entry) = merge.scanner.read_next(segment_id)? {
                merge.push(entry);
            }
        }

        debug!(
            segments = merge.scanner.segment_count(),
            queued = merge.queue.len(),
            "naive merge initialized"
        );
        Ok(merge)
    }

    fn push(&mut self, entry: OrderedEntry) {
        self.queue.insert(entry);
        self.stats.record_insertion(self.queue.len());
    }
}

impl<'a, S: Segment> SegmentMerge for NaiveMerge<'a, S> {
    fn next_record(&mut self) -> MergeResult<Option<MergedRecord>> {
        loop {
            // Refill from the segment that produced the previous pop.
            if let Some((segment_id, segment_size)) = self.refill.take() {
                if self.scanner.has_more(segment_id, segment_size) {
                    if let Some(next) = self.scanner.read_next(segment_id)? {
                        self.push(next);
                    }
                }
            }

            let top = match self.queue.pop_min() {
                Some(top) => top,
                None => return Ok(None),
            };
            let segment_id = top.segment_id();
            self.refill = Some((segment_id, top.segment_size()));

            if self.last_emitted.as_deref() == Some(top.key()) {
                trace!(key = top.key(), segment_id, "dropping shadowed record");
                self.stats.records_shadowed += 1;
                continue;
            }

            self.last_emitted = Some(top.key().to_string());
            self.stats.records_emitted += 1;
            return Ok(Some(top.into_merged()));
        }
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
