//! # Engine - segment merge runner
//!
//! Ties the [`merge`] strategies, [`config`] settings and output sinks into
//! a single entry point.
//!
//! ## Run lifecycle
//!
//! ```text
//!   &[segments] ──> open() ──> NaiveMerge | DedupMerge   (per MergeConfig)
//!                                   |
//!                                   | next_record() until None
//!                                   v
//!                              RecordSink::emit()
//!                                   |
//!                                   v
//!                              RecordSink::finish()  ──> MergeStats
//! ```
//!
//! All run state (queue, cursors, key index) is created by [`MergeEngine::open`]
//! and dropped when the run returns. Segments are only borrowed, so the same
//! segments can be merged any number of times.
//!
//! ## Delivery modes
//!
//! | Function                     | Output                     | On error                     |
//! |-----------------------------|----------------------------|------------------------------|
//! | [`MergeEngine::merge_into`] | streamed to a [`RecordSink`] | already-emitted records stay |
//! | [`MergeEngine::merge_to_vec`] | `Vec<MergedRecord>`      | error only, no partial list  |
mod compare;
mod sink;

pub use compare::Comparison;
pub use config::{MergeConfig, Strategy};
pub use merge::{MergeError, MergeResult, MergeStats, MergedRecord, Record, Segment, SegmentMerge};
pub use sink::{RecordSink, WriterSink};

use merge::{DedupMerge, NaiveMerge};
use tracing::debug;

/// Runs merges according to a [`MergeConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine {
    config: MergeConfig,
}

impl MergeEngine {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Starts a merge run over `segments` with the configured strategy.
    ///
    /// # Errors
    ///
    /// Fails if an entry read while seeding the queue is malformed or out of
    /// order.
    pub fn open<'a, S: Segment + 'a>(
        &self,
        segments: &'a [S],
    ) -> MergeResult<Box<dyn SegmentMerge + 'a>> {
        let validate = self.config.validate_order;
        Ok(match self.config.strategy {
            Strategy::Naive => Box::new(NaiveMerge::with_validation(segments, validate)?),
            Strategy::Deduplicated => Box::new(DedupMerge::with_validation(segments, validate)?),
        })
    }

    /// Streams the merged output of `segments` into `sink`.
    ///
    /// Records reach the sink as soon as they are produced. If the run fails
    /// part way, records already emitted are not retracted and
    /// [`RecordSink::finish`] is not called.
    pub fn merge_into<S, K>(&self, segments: &[S], sink: &mut K) -> MergeResult<MergeStats>
    where
        S: Segment,
        K: RecordSink + ?Sized,
    {
        let mut run = self.open(segments)?;
        while let Some(record) = run.next_record()? {
            sink.emit(record)?;
        }
        sink.finish()?;

        let stats = run.stats();
        debug!(
            strategy = %self.config.strategy,
            segments = segments.len(),
            scanned = stats.records_scanned,
            emitted = stats.records_emitted,
            shadowed = stats.records_shadowed,
            inserts = stats.queue_insertions,
            max_queue = stats.max_queue_len,
            "merge finished"
        );
        Ok(stats)
    }

    /// Merges `segments` into a fully materialized list.
    ///
    /// All-or-nothing: either every record is returned or only the error.
    pub fn merge_to_vec<S: Segment>(&self, segments: &[S]) -> MergeResult<Vec<MergedRecord>> {
        self.merge_to_vec_with_stats(segments).map(|(out, _)| out)
    }

    /// Like [`MergeEngine::merge_to_vec`], also returning the run's counters.
    pub fn merge_to_vec_with_stats<S: Segment>(
        &self,
        segments: &[S],
    ) -> MergeResult<(Vec<MergedRecord>, MergeStats)> {
        let mut out: Vec<MergedRecord> = Vec::new();
        let stats = self.merge_into(segments, &mut out)?;
        Ok((out, stats))
    }
}

/// Streams the merge of `segments` into `sink` using `config`.
pub fn merge_into<S, K>(segments: &[S], config: &MergeConfig, sink: &mut K) -> MergeResult<MergeStats>
where
    S: Segment,
    K: RecordSink + ?Sized,
{
    MergeEngine::new(*config).merge_into(segments, sink)
}

/// Merges `segments` into a `Vec` using `config`.
pub fn merge_to_vec<S: Segment>(segments: &[S], config: &MergeConfig) -> MergeResult<Vec<MergedRecord>> {
    MergeEngine::new(*config).merge_to_vec(segments)
}

#[cfg(test)]
mod tests;
