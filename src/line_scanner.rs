//! Line boundary detection for decoding in-memory by-subject data.
//!
//! This module locates LF bytes with the SIMD-accelerated `memchr` crate and
//! returns each line as an `(offset, length)` pair. The pairs feed straight into
//! [`BySubjectRecord::parse`], so a whole file loaded into one buffer can be
//! decoded without copying any line out of it.
//!
//! # Example
//!
//! ```
//! use bysubject::line_scanner::LineBoundaryScanner;
//! use bysubject::BySubjectRecord;
//!
//! let buffer = b"1\thttp://a/\t<p> <o> .\n2\thttp://b/\t\n";
//! let mut scanner = LineBoundaryScanner::new();
//! let mut record = BySubjectRecord::new();
//!
//! for (offset, len) in scanner.scan(buffer)? {
//!     assert!(record.parse(buffer, offset, len));
//! }
//! assert_eq!(record.id(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{BySubjectError, Result};
use crate::record::BySubjectRecord;

const LINE_TERMINATOR: u8 = b'\n';

/// Line boundary scanner using SIMD-accelerated delimiter detection.
#[derive(Debug, Default)]
pub struct LineBoundaryScanner {
    /// Pre-allocated buffer for reuse across scans
    boundaries: Vec<(usize, usize)>,
}

impl LineBoundaryScanner {
    /// Create a new boundary scanner with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boundaries: Vec::with_capacity(100),
        }
    }

    /// Scan a buffer for line boundaries.
    ///
    /// Returns an `(offset, length)` tuple per line. The length includes the
    /// terminating LF; a final line without one is returned as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bysubject::line_scanner::LineBoundaryScanner;
    ///
    /// let mut scanner = LineBoundaryScanner::new();
    /// let boundaries = scanner.scan(b"ab\ncde\nf")?;
    ///
    /// assert_eq!(boundaries, vec![(0, 3), (3, 4), (7, 1)]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn scan(&mut self, buffer: &[u8]) -> Result<Vec<(usize, usize)>> {
        if buffer.is_empty() {
            return Err(BySubjectError::InvalidInput("buffer is empty".to_string()));
        }

        self.boundaries.clear();
        self.boundaries.extend(line_boundaries(buffer));

        Ok(self.boundaries.clone())
    }

    /// Scan a buffer and return boundaries up to a maximum limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is empty.
    pub fn scan_limited(&mut self, buffer: &[u8], limit: usize) -> Result<Vec<(usize, usize)>> {
        let all_boundaries = self.scan(buffer)?;
        Ok(all_boundaries.into_iter().take(limit).collect())
    }

    /// Count the lines in a buffer without recording their boundaries.
    #[must_use]
    pub fn count_lines(&self, buffer: &[u8]) -> usize {
        let terminated = memchr::memchr_iter(LINE_TERMINATOR, buffer).count();
        match buffer.last() {
            Some(&last) if last != LINE_TERMINATOR => terminated + 1,
            _ => terminated,
        }
    }

    /// Clear internal state.
    pub fn clear(&mut self) {
        self.boundaries.clear();
    }

    /// Get the current capacity of the scanner.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.boundaries.capacity()
    }
}

/// Iterate `(offset, length)` pairs of the lines in `buffer` without collecting them.
fn line_boundaries(buffer: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut terminators = memchr::memchr_iter(LINE_TERMINATOR, buffer);
    let mut offset = 0;
    std::iter::from_fn(move || {
        if offset >= buffer.len() {
            return None;
        }
        let start = offset;
        let end = terminators.next().map_or(buffer.len(), |pos| pos + 1);
        offset = end;
        Some((start, end - start))
    })
}

/// Decode every line of `buffer` into `record`, calling `on_record` for each
/// line that parses.
///
/// The record is reused for every line and boundaries are found on the fly,
/// so nothing is allocated per call. Lines that fail to parse are logged
/// at debug level and skipped. Returns the number of records passed to
/// `on_record`.
///
/// # Errors
///
/// Returns an error if the buffer is empty or if `on_record` fails.
///
/// # Examples
///
/// ```
/// use bysubject::line_scanner::parse_lines;
/// use bysubject::BySubjectRecord;
///
/// let buffer = b"1\thttp://a/\t<p> <o> .\nbad\n2\thttp://b/\t\n";
/// let mut record = BySubjectRecord::new();
/// let mut subjects = Vec::new();
///
/// let parsed = parse_lines(buffer, &mut record, |r| {
///     subjects.push(r.subject().unwrap_or_default().to_string());
///     Ok(())
/// })?;
/// assert_eq!(parsed, 2);
/// assert_eq!(subjects, vec!["http://a/", "http://b/"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_lines<F>(buffer: &[u8], record: &mut BySubjectRecord, mut on_record: F) -> Result<usize>
where
    F: FnMut(&BySubjectRecord) -> Result<()>,
{
    if buffer.is_empty() {
        return Err(BySubjectError::InvalidInput("buffer is empty".to_string()));
    }
    let mut parsed = 0;

    for (line, (offset, len)) in line_boundaries(buffer).enumerate() {
        if record.parse(buffer, offset, len) {
            on_record(record)?;
            parsed += 1;
        } else {
            tracing::debug!(line = line + 1, offset, id = record.id(), "unparseable line");
        }
    }

    Ok(parsed)
}
