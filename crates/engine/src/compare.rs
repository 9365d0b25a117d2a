//! Side-by-side run of both strategies over the same segments.

use config::{MergeConfig, Strategy};
use merge::{MergeResult, MergeStats, Segment};
use tracing::{debug, warn};

use crate::MergeEngine;

/// Outcome of running every strategy on one segment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub naive: MergeStats,
    pub dedup: MergeStats,
    /// Records emitted by the naive run.
    pub records: usize,
    /// Whether both runs produced exactly the same records in the same order.
    pub identical: bool,
}

impl MergeEngine {
    /// Runs the naive and deduplicated strategies and compares their output.
    ///
    /// Order validation follows this engine's config; the configured strategy
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by either run.
    pub fn compare<S: Segment>(&self, segments: &[S]) -> MergeResult<Comparison> {
        let validate = self.config().validate_order;
        let naive_engine = MergeEngine::new(MergeConfig::new(Strategy::Naive).with_validation(validate));
        let dedup_engine =
            MergeEngine::new(MergeConfig::new(Strategy::Deduplicated).with_validation(validate));

        let (naive_out, naive) = naive_engine.merge_to_vec_with_stats(segments)?;
        let (dedup_out, dedup) = dedup_engine.merge_to_vec_with_stats(segments)?;

        let identical = naive_out == dedup_out;
        if identical {
            debug!(records = naive_out.len(), "strategies agree");
        } else {
            warn!(
                naive = naive_out.len(),
                dedup = dedup_out.len(),
                "strategies produced different output"
            );
        }

        Ok(Comparison {
            naive,
            dedup,
            records: naive_out.len(),
            identical,
        })
    }
}
