//! Writing by-subject records as text lines.
//!
//! This module provides [`BySubjectWriter`] for encoding [`BySubjectRecord`]
//! instances to any destination implementing [`std::io::Write`].
//!
//! # Examples
//!
//! ```
//! use bysubject::{BySubjectRecord, BySubjectWriter};
//!
//! let mut record = BySubjectRecord::new();
//! record.set_id(1);
//! record.set_subject("http://example.org/s");
//! record.add_relation("<http://example.org/p> \"o\" .");
//!
//! let mut buffer = Vec::new();
//! {
//!     let mut writer = BySubjectWriter::new(&mut buffer);
//!     writer.write_record(&record)?;
//!     writer.finish()?;
//! }
//! assert_eq!(buffer, b"1\thttp://example.org/s\t<http://example.org/p> \"o\" .\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{BySubjectError, Result};
use crate::record::BySubjectRecord;
use std::io::Write;

/// Writer for the by-subject line format.
#[derive(Debug)]
pub struct BySubjectWriter<W: Write> {
    writer: W,
    records_written: usize,
    finished: bool,
}

impl<W: Write> BySubjectWriter<W> {
    /// Create a new writer.
    pub fn new(writer: W) -> Self {
        BySubjectWriter {
            writer,
            records_written: 0,
            finished: false,
        }
    }

    /// Write a single record as one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer has been finished or an I/O error
    /// occurs during writing.
    pub fn write_record(&mut self, record: &BySubjectRecord) -> Result<()> {
        if self.finished {
            return Err(BySubjectError::InvalidState(
                "Cannot write to a finished writer".to_string(),
            ));
        }

        record.write_to(&mut self.writer)?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush the writer and mark it as finished.
    ///
    /// After calling `finish`, no more records can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the underlying writer fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Consumes the writer, returning the underlying destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
