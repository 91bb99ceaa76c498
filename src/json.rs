//! JSON serialization and deserialization of by-subject records.
//!
//! The JSON form is an object with the relations already split:
//!
//! ```json
//! {"id": 33, "subject": "http://subject/", "relations": ["<p1> \"v\" .", "<p2> <o> ."]}
//! ```
//!
//! An unset subject is `null`.
//!
//! # Examples
//!
//! ```
//! use bysubject::{json, BySubjectRecord};
//!
//! let mut record = BySubjectRecord::new();
//! record.set_id(33);
//! record.set_subject("http://subject/");
//! record.add_relation("<http://p> <http://o> .");
//!
//! let value = json::record_to_json(&record)?;
//! assert_eq!(value["relations"][0], "<http://p> <http://o> .");
//!
//! let restored = json::json_to_record(&value)?;
//! assert_eq!(restored, record);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{BySubjectError, Result};
use crate::record::BySubjectRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
struct JsonRecord {
    id: u32,
    subject: Option<String>,
    #[serde(default)]
    relations: Vec<String>,
}

/// Convert a record to JSON.
///
/// # Errors
///
/// Returns an error if the record cannot be converted to JSON.
pub fn record_to_json(record: &BySubjectRecord) -> Result<Value> {
    let json = JsonRecord {
        id: record.id(),
        subject: record.subject().map(str::to_string),
        relations: record.relations().map(str::to_string).collect(),
    };
    Ok(serde_json::to_value(json)?)
}

/// Convert JSON back to a record.
///
/// Reverses the transformation performed by [`record_to_json`]. A missing
/// `relations` member means no relations.
///
/// # Errors
///
/// Returns an error if the JSON is not an object, the `id` is missing or not
/// a non-negative 32-bit integer, or a member has the wrong type.
pub fn json_to_record(json: &Value) -> Result<BySubjectRecord> {
    let object = json
        .as_object()
        .ok_or_else(|| BySubjectError::InvalidRecord("Expected JSON object".to_string()))?;
    let id = object
        .get("id")
        .ok_or_else(|| BySubjectError::InvalidRecord("Missing id field".to_string()))?;
    if id.as_u64().and_then(|n| u32::try_from(n).ok()).is_none() {
        return Err(BySubjectError::InvalidRecord(
            "id must be a non-negative 32-bit integer".to_string(),
        ));
    }

    let parsed = JsonRecord::deserialize(json)?;
    let mut record = BySubjectRecord::new();
    record.set_id(parsed.id);
    if let Some(subject) = parsed.subject {
        record.set_subject(subject);
    }
    for relation in &parsed.relations {
        record.add_relation(relation);
    }
    Ok(record)
}
