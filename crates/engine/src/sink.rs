//! Output sinks for merged records.

use merge::{MergeResult, MergedRecord};
use std::io::Write;

/// Receives merged records one at a time, in output order.
pub trait RecordSink {
    fn emit(&mut self, record: MergedRecord) -> MergeResult<()>;

    /// Called once after the last record of a successful run.
    fn finish(&mut self) -> MergeResult<()> {
        Ok(())
    }
}

/// In-memory capture buffer.
impl RecordSink for Vec<MergedRecord> {
    fn emit(&mut self, record: MergedRecord) -> MergeResult<()> {
        self.push(record);
        Ok(())
    }
}

/// Streams one line per record (`segment=<id> <key>:<value>`) to a writer.
///
/// Lines are written as they are produced and never retracted, so a failed
/// run may leave a prefix of the output behind.
pub struct WriterSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for WriterSink<W> {
    fn emit(&mut self, record: MergedRecord) -> MergeResult<()> {
        writeln!(self.writer, "{}", record)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> MergeResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
