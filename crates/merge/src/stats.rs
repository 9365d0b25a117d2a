/// Counters collected over one merge run.
///
/// For a run over `T` records with `D` distinct keys:
/// `records_scanned == T`, `records_emitted == D` and
/// `records_shadowed == T - D` for both strategies. The naive strategy makes
/// `T` queue insertions, the deduplicated one makes `D`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub records_scanned: usize,
    pub queue_insertions: usize,
    pub records_emitted: usize,
    pub records_shadowed: usize,
    /// Largest number of entries resident in the queue at once.
    pub max_queue_len: usize,
}

impl MergeStats {
    pub(crate) fn record_insertion(&mut self, queue_len: usize) {
        self.queue_insertions += 1;
        self.max_queue_len = self.max_queue_len.max(queue_len);
    }
}
