//! The by-subject record and its line codec.
//!
//! A by-subject line groups every relation of one subject:
//!
//! ```text
//! <id><TAB><subject><TAB><relation>  <relation>  ...<LF>
//! ```
//!
//! [`BySubjectRecord`] is a reusable buffer. [`BySubjectRecord::parse`] decodes
//! one line straight out of a (possibly shared) byte buffer, and
//! [`BySubjectRecord::write_to`] encodes the current state as one line.
//!
//! # Examples
//!
//! ```
//! use bysubject::BySubjectRecord;
//!
//! let line = b"33\thttp://subject/\t<http://p1> \"literal\" .  <http://p2> <http://o> .\n";
//! let mut record = BySubjectRecord::new();
//! assert!(record.parse(line, 0, line.len()));
//!
//! assert_eq!(record.id(), 33);
//! assert_eq!(record.subject(), Some("http://subject/"));
//! assert_eq!(record.relations_count(), 2);
//!
//! let mut out = Vec::new();
//! record.write_to(&mut out)?;
//! assert_eq!(out, line);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::Result;
use std::fmt;
use std::io::{Cursor, Write};

const FIELD_SEPARATOR: u8 = b'\t';
const LINE_TERMINATOR: u8 = b'\n';
const SPACE: u8 = b' ';

/// Separator between relations in the third field.
pub const RELATION_SEPARATOR: &str = "  ";

/// Streaming view over the raw relations text of a record.
///
/// Implements [`std::io::Read`] and [`std::io::BufRead`]. Reading a record
/// without relations reaches end-of-stream immediately.
pub type RelationsReader<'a> = Cursor<&'a [u8]>;

/// One line of the by-subject format.
///
/// The relations are kept as a single text blob, exactly as they appear in the
/// third field. [`relations`](Self::relations) splits it on demand and
/// [`relations_reader`](Self::relations_reader) streams it unsplit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BySubjectRecord {
    id: u32,
    subject: Option<String>,
    relations: String,
}

impl BySubjectRecord {
    /// Create an empty record: id 0, no subject, no relations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Sets the record identifier.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Returns the subject, or `None` if it was never set or parsed.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Sets the subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
    }

    /// Appends a relation after the existing ones.
    ///
    /// Relations share one text blob joined by [`RELATION_SEPARATOR`], so a
    /// relation only reads back unchanged if it is non-empty, contains no
    /// double space, and does not start or end with a space. An empty relation
    /// is dropped, and a trailing space moves onto the next relation.
    pub fn add_relation(&mut self, relation: &str) {
        if !self.relations.is_empty() {
            self.relations.push_str(RELATION_SEPARATOR);
        }
        self.relations.push_str(relation);
    }

    /// Removes all relations, keeping the id and subject.
    pub fn clear_relations(&mut self) {
        self.relations.clear();
    }

    /// Resets the record to its freshly constructed state.
    pub fn clear(&mut self) {
        self.id = 0;
        self.subject = None;
        self.relations.clear();
    }

    /// Iterates over the relations in order.
    ///
    /// The relations text is split on every call; nothing is cached.
    #[must_use]
    pub fn relations(&self) -> Relations<'_> {
        Relations {
            inner: self.relations.split(RELATION_SEPARATOR),
        }
    }

    /// Returns `true` if the record has at least one relation.
    #[must_use]
    pub fn has_relations(&self) -> bool {
        self.relations().next().is_some()
    }

    /// Returns the number of relations.
    #[must_use]
    pub fn relations_count(&self) -> usize {
        self.relations().count()
    }

    /// Returns the raw relations text, relations joined by [`RELATION_SEPARATOR`].
    #[must_use]
    pub fn relations_text(&self) -> &str {
        &self.relations
    }

    /// Streams the raw relations text without splitting it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bysubject::BySubjectRecord;
    /// use std::io::Read;
    ///
    /// let mut record = BySubjectRecord::new();
    /// record.add_relation("<a> <b> .");
    /// record.add_relation("<c> <d> .");
    ///
    /// let mut text = String::new();
    /// record.relations_reader().read_to_string(&mut text)?;
    /// assert_eq!(text, "<a> <b> .  <c> <d> .");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    #[must_use]
    pub fn relations_reader(&self) -> RelationsReader<'_> {
        Cursor::new(self.relations.as_bytes())
    }

    /// Decode one line from `buffer[offset..offset + length]`.
    ///
    /// The scan stops at `length`, at the first LF, or at the end of the buffer,
    /// whichever comes first, so a trailing LF is optional. Spaces around the id
    /// and the subject are ignored.
    ///
    /// Returns `false` if the line is malformed: the id is missing or not
    /// followed by a TAB, the second TAB is missing, or the subject is empty.
    /// Fields are overwritten as they are reached, so after a failure the id
    /// holds whatever digits were scanned while the subject and relations keep
    /// their previous values. An empty range returns `false` without touching
    /// the record.
    ///
    /// Existing string allocations are reused, so one record can decode a
    /// whole stream of lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use bysubject::BySubjectRecord;
    ///
    /// let mut record = BySubjectRecord::new();
    ///
    /// let mut buffer = vec![0u8; 64];
    /// let line = b" 6 \t http://sbj/ \t\n";
    /// buffer[20..20 + line.len()].copy_from_slice(line);
    ///
    /// assert!(record.parse(&buffer, 20, line.len()));
    /// assert_eq!(record.id(), 6);
    /// assert_eq!(record.subject(), Some("http://sbj/"));
    /// assert!(!record.has_relations());
    ///
    /// assert!(!record.parse(b"4\t", 0, 2));
    /// assert_eq!(record.id(), 4);
    /// assert_eq!(record.subject(), Some("http://sbj/"));
    /// ```
    pub fn parse(&mut self, buffer: &[u8], offset: usize, length: usize) -> bool {
        let start = offset.min(buffer.len());
        let end = offset.saturating_add(length).min(buffer.len());
        if start == end {
            return false;
        }

        let mut line = &buffer[start..end];
        if let Some(terminator) = memchr::memchr(LINE_TERMINATOR, line) {
            line = &line[..terminator];
        }

        // Field 1: id, written through as it is scanned
        self.id = 0;
        let mut pos = skip_spaces(line, 0);
        let digits_start = pos;
        while let Some(&byte) = line.get(pos).filter(|b| b.is_ascii_digit()) {
            let digit = u32::from(byte - b'0');
            match self.id.checked_mul(10).and_then(|id| id.checked_add(digit)) {
                Some(id) => self.id = id,
                None => return false,
            }
            pos += 1;
        }
        if pos == digits_start {
            return false;
        }
        pos = skip_spaces(line, pos);
        if line.get(pos) != Some(&FIELD_SEPARATOR) {
            return false;
        }

        // Field 2: subject
        let subject_start = skip_spaces(line, pos + 1);
        let Some(subject_len) = memchr::memchr(FIELD_SEPARATOR, &line[subject_start..]) else {
            return false;
        };
        let subject_end = subject_start + subject_len;
        let subject = trim_trailing_spaces(&line[subject_start..subject_end]);
        if subject.is_empty() {
            return false;
        }
        let subject = String::from_utf8_lossy(subject);
        if let Some(current) = self.subject.as_mut() {
            current.clear();
            current.push_str(&subject);
        } else {
            self.subject = Some(subject.into_owned());
        }

        // Field 3: relations, verbatim
        let relations = &line[subject_end + 1..];
        self.relations.clear();
        if relations.iter().any(|&b| b != SPACE) {
            self.relations.push_str(&String::from_utf8_lossy(relations));
        }

        true
    }

    /// Encode the record as one line, including the terminating LF.
    ///
    /// An unset subject is written as the empty string, so a default record
    /// encodes as `"0\t\t\n"`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{self}")?;
        Ok(())
    }
}

impl fmt::Display for BySubjectRecord {
    /// Formats the line without its terminating LF.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            self.id,
            self.subject.as_deref().unwrap_or(""),
            self.relations
        )
    }
}

/// Iterator over the relations of a [`BySubjectRecord`].
///
/// Created by [`BySubjectRecord::relations`]. Empty segments between
/// separators are skipped.
#[derive(Debug, Clone)]
pub struct Relations<'a> {
    inner: std::str::Split<'a, &'static str>,
}

impl<'a> Iterator for Relations<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.by_ref().find(|relation| !relation.is_empty())
    }
}

fn skip_spaces(line: &[u8], mut pos: usize) -> usize {
    while line.get(pos) == Some(&SPACE) {
        pos += 1;
    }
    pos
}

fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let len = bytes.iter().rposition(|&b| b != SPACE).map_or(0, |i| i + 1);
    &bytes[..len]
}
