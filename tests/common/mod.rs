//! Common test helpers shared across the integration test suite.

use bysubject::BySubjectRecord;

pub const SUBJECT_1: &str = "http://subject/";
pub const RELATION_1_1: &str = "<http://predicate1> \"literal\" .";
pub const RELATION_1_2: &str = "<http://predicate2> <http://resource> .";

/// Creates the two-relation record used across tests.
pub fn create_test_record(id: u32) -> BySubjectRecord {
    let mut record = BySubjectRecord::new();
    record.set_id(id);
    record.set_subject(SUBJECT_1);
    record.add_relation(RELATION_1_1);
    record.add_relation(RELATION_1_2);
    record
}

/// Creates `count` records with distinct subjects and a varying number of relations.
#[allow(dead_code)]
pub fn create_test_records(count: u32) -> Vec<BySubjectRecord> {
    (0..count)
        .map(|id| {
            let mut record = BySubjectRecord::new();
            record.set_id(id);
            record.set_subject(format!("http://example.org/subject/{id}"));
            for n in 0..id % 4 {
                record.add_relation(&format!("<http://example.org/p{n}> \"value {id}\" ."));
            }
            record
        })
        .collect()
}
