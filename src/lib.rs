#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # bysubject
//!
//! Codec for the by-subject line format: one subject and all of its relations
//! per tab-delimited line.
//!
//! ## Quick Start
//!
//! ### Decoding a line from a shared buffer
//!
//! ```
//! use bysubject::BySubjectRecord;
//!
//! let buffer = b"....33\thttp://subject/\t<http://p> \"v\" .\n....";
//! let mut record = BySubjectRecord::new();
//!
//! assert!(record.parse(buffer, 4, 36));
//! assert_eq!(record.id(), 33);
//! assert_eq!(record.subject(), Some("http://subject/"));
//! assert_eq!(record.relations().collect::<Vec<_>>(), vec!["<http://p> \"v\" ."]);
//! ```
//!
//! ### Reading and writing streams
//!
//! ```
//! use bysubject::{BySubjectReader, BySubjectWriter};
//! use std::io::Cursor;
//!
//! # fn main() -> bysubject::Result<()> {
//! let input = "1\thttp://a/\t<p> <o> .\n2\thttp://b/\t\n";
//! let mut reader = BySubjectReader::new(Cursor::new(input));
//! let mut writer = BySubjectWriter::new(Vec::new());
//!
//! while let Some(record) = reader.read_record()? {
//!     writer.write_record(record)?;
//! }
//! writer.finish()?;
//! assert_eq!(writer.into_inner(), input.as_bytes());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`record`] — The record and its line codec
//! - [`reader`] — Reading records from line-oriented streams
//! - [`writer`] — Writing records as lines
//! - [`line_scanner`] — Line boundary detection over in-memory buffers
//! - [`recovery`] — Handling of malformed lines
//! - [`json`] — JSON conversion
//! - [`error`] — Error types and result type

pub mod error;
pub mod json;
pub mod line_scanner;
pub mod reader;
pub mod record;
pub mod recovery;
pub mod writer;

pub use error::{BySubjectError, Result};
pub use line_scanner::LineBoundaryScanner;
pub use reader::BySubjectReader;
pub use record::{BySubjectRecord, Relations, RelationsReader, RELATION_SEPARATOR};
pub use recovery::{RecoveryContext, RecoveryMode, MAX_RECOVERY_MESSAGES};
pub use writer::BySubjectWriter;
