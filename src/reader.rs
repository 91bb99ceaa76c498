//! Reading by-subject records from text streams.
//!
//! This module provides [`BySubjectReader`] for decoding a by-subject file one
//! line at a time from any source that implements [`std::io::BufRead`].
//!
//! # Examples
//!
//! Reading records from a file:
//!
//! ```no_run
//! use bysubject::BySubjectReader;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = File::open("bySubject.txt")?;
//! let mut reader = BySubjectReader::new(BufReader::new(file));
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("{} has {} relations", record.id(), record.relations_count());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Result;
use crate::record::BySubjectRecord;
use crate::recovery::{RecoveryContext, RecoveryMode};
use std::io::BufRead;

/// Reader for the by-subject line format.
///
/// Every line is decoded into the same [`BySubjectRecord`], so reading a
/// stream does not allocate per record once the buffers have grown to the
/// longest line. The returned reference is valid until the next call to
/// [`read_record`](Self::read_record).
///
/// # Examples
///
/// ```
/// use bysubject::{BySubjectReader, RecoveryMode};
/// use std::io::Cursor;
///
/// let data = "1\thttp://a/\t<p> <o> .\nbroken\n2\thttp://b/\t\n";
/// let mut reader = BySubjectReader::new(Cursor::new(data))
///     .with_recovery_mode(RecoveryMode::Lenient);
///
/// let mut ids = Vec::new();
/// while let Some(record) = reader.read_record()? {
///     ids.push(record.id());
/// }
/// assert_eq!(ids, vec![1, 2]);
/// assert_eq!(reader.lines_skipped(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BySubjectReader<R: BufRead> {
    reader: R,
    line: Vec<u8>,
    record: BySubjectRecord,
    recovery: RecoveryContext,
    lines_read: usize,
    records_read: usize,
}

impl<R: BufRead> BySubjectReader<R> {
    /// Create a new reader in [`RecoveryMode::Strict`].
    pub fn new(reader: R) -> Self {
        BySubjectReader {
            reader,
            line: Vec::new(),
            record: BySubjectRecord::new(),
            recovery: RecoveryContext::default(),
            lines_read: 0,
            records_read: 0,
        }
    }

    /// Set the recovery mode for handling malformed lines.
    ///
    /// - `Strict`: Return [`MalformedLine`](crate::BySubjectError::MalformedLine) (default)
    /// - `Lenient`: Log a warning and skip the line
    #[must_use]
    pub fn with_recovery_mode(mut self, mode: RecoveryMode) -> Self {
        self.recovery.mode = mode;
        self
    }

    /// Read the next record.
    ///
    /// Returns `Ok(Some(record))` for each decoded line and `Ok(None)` at end
    /// of input. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A line is malformed and the reader is in strict mode
    /// - An I/O error occurs
    pub fn read_record(&mut self) -> Result<Option<&BySubjectRecord>> {
        loop {
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.lines_read += 1;

            if self.line.iter().all(|&b| b == b' ' || b == b'\n') {
                tracing::debug!(line = self.lines_read, "skipping blank line");
                continue;
            }

            if self.record.parse(&self.line, 0, self.line.len()) {
                self.records_read += 1;
                return Ok(Some(&self.record));
            }
            self.recovery.recover(self.lines_read, self.record.id())?;
        }
    }

    /// Returns the number of records decoded so far.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the number of lines consumed so far, blank and malformed ones included.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Returns the number of malformed lines skipped in lenient mode.
    #[must_use]
    pub fn lines_skipped(&self) -> usize {
        self.recovery.lines_skipped
    }

    /// Returns the recovery context with the skipped line numbers and messages.
    #[must_use]
    pub fn recovery(&self) -> &RecoveryContext {
        &self.recovery
    }

    /// Consumes the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BySubjectError;
    use std::io::Cursor;

    const DATA: &str = "0\thttp://a/\t<p1> <o1> .  <p2> \"v\" .\n\
                        1\thttp://b/\t\n\
                        2\thttp://c/\t<p3> <o3> .";

    #[test]
    fn test_read_all_records() {
        let mut reader = BySubjectReader::new(Cursor::new(DATA));

        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.id(), 0);
        assert_eq!(record.subject(), Some("http://a/"));
        assert_eq!(record.relations_count(), 2);

        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.id(), 1);
        assert!(!record.has_relations());

        // Last line has no LF
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.id(), 2);
        assert_eq!(record.relations_text(), "<p3> <o3> .");

        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.records_read(), 3);
        assert_eq!(reader.lines_read(), 3);
    }

    #[test]
    fn test_eof_returns_none() {
        let mut reader = BySubjectReader::new(Cursor::new(""));
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.lines_read(), 0);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut reader = BySubjectReader::new(Cursor::new("\n  \n5\thttp://s/\t\n\n"));
        assert_eq!(reader.read_record().unwrap().unwrap().id(), 5);
        assert!(reader.read_record().unwrap().is_none());
        assert_eq!(reader.lines_read(), 4);
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn test_strict_mode_reports_line_and_id() {
        let data = "1\thttp://a/\t\n42\t\t\n3\thttp://c/\t\n";
        let mut reader = BySubjectReader::new(Cursor::new(data));
        assert!(reader.read_record().unwrap().is_some());
        match reader.read_record() {
            Err(BySubjectError::MalformedLine { line, id }) => {
                assert_eq!(line, 2);
                assert_eq!(id, 42);
            },
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_lenient_mode_skips() {
        let data = "1\thttp://a/\t\n42\t\t\n3\thttp://c/\t\n";
        let mut reader =
            BySubjectReader::new(Cursor::new(data)).with_recovery_mode(RecoveryMode::Lenient);

        let mut ids = Vec::new();
        while let Some(record) = reader.read_record().unwrap() {
            ids.push(record.id());
        }
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(reader.lines_skipped(), 1);
        assert_eq!(reader.recovery().skipped_lines, vec![2]);
    }
}
