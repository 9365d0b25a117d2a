//! # Merge - recency-resolving k-way segment merge
//!
//! Merges `N` independently sorted segments into a single ascending stream
//! with one record per key. When a key occurs in several segments the copy
//! from the **highest-indexed** segment wins: segment `i + 1` is newer than
//! segment `i`, the way a later flush shadows an earlier one in an LSM tree.
//!
//! ```text
//!  seg 0: aaa:15  aab:15  aac:30  aad:20
//!  seg 1:         aab:15                  abb:15  abc:30
//!  seg 2:                                         abc:15
//!  seg 3:         aab:15  aac:15  aad:30                  ada:20
//!         ──────────────────────────────────────────────────────
//!  out:   aaa@0   aab@3   aac@3   aad@3   abb@1   abc@2   ada@3
//! ```
//!
//! ## Strategies
//!
//! | Strategy         | Queue holds               | Queue inserts | Extra state |
//! |------------------|---------------------------|---------------|-------------|
//! | [`NaiveMerge`]   | head record of each segment | `T` (all records) | last emitted key |
//! | [`DedupMerge`]   | one node per distinct key | `D` (distinct keys) | key -> entry index |
//!
//! Both strategies produce identical output, including the segment id each
//! record is tagged with. Both implement [`SegmentMerge`].
//!
//! ## Example
//!
//! ```rust
//! use merge::{DedupMerge, SegmentMerge};
//!
//! let segments = vec![vec!["a:1", "b:1"], vec!["a:2"]];
//! let out = DedupMerge::new(&segments).unwrap().collect_all().unwrap();
//!
//! let rendered: Vec<String> = out.iter().map(|r| r.to_string()).collect();
//! assert_eq!(rendered, ["segment=1 a:2", "segment=0 b:1"]);
//! ```

mod dedup;
mod entry;
mod error;
mod naive;
mod queue;
mod segment;
mod stats;

pub use dedup::DedupMerge;
pub use entry::OrderedEntry;
pub use error::{MergeError, MergeResult};
pub use naive::NaiveMerge;
pub use queue::MinQueue;
pub use record::{MergedRecord, Record};
pub use segment::{CursorTable, Segment};
pub use stats::MergeStats;

/// A merge run that yields records in ascending key order, one per key.
pub trait SegmentMerge {
    /// Returns the next merged record, or `None` once every segment is
    /// drained.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed or out-of-order entry read while
    /// refilling the queue. Records returned before the error stand; the run
    /// must not be resumed after it.
    fn next_record(&mut self) -> MergeResult<Option<MergedRecord>>;

    /// Counters for the run so far.
    fn stats(&self) -> MergeStats;

    /// Per-segment read positions.
    fn cursors(&self) -> &CursorTable;

    /// Number of entries currently resident in the queue.
    fn queued(&self) -> usize;

    /// Drains all remaining records into a `Vec`.
    ///
    /// Nothing is returned unless the whole run succeeds.
    fn collect_all(&mut self) -> MergeResult<Vec<MergedRecord>> {
        let mut result = Vec::new();
        while let Some(record) = self.next_record()? {
            result.push(record);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests;
