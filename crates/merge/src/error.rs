use std::io;
use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that abort a merge run.
///
/// Every variant describes a defect in the caller's input or output sink.
/// Nothing is retried or skipped.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A segment entry has no `key:value` delimiter.
    #[error("malformed entry {raw:?} at index {index} of segment {segment_id}: must be in the format key:value")]
    MalformedRecord {
        segment_id: usize,
        index: usize,
        raw: String,
    },

    /// A segment is not strictly ascending (out of order or duplicate key).
    #[error("segment {segment_id} is not strictly ascending at index {index}: {key:?} follows {previous:?}")]
    InvalidSegmentOrder {
        segment_id: usize,
        index: usize,
        previous: String,
        key: String,
    },

    /// The output sink failed to accept a record.
    #[error("sink error: {0}")]
    Sink(#[from] io::Error),
}
