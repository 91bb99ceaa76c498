//! Integration tests for the bysubject library

mod common;

use bysubject::line_scanner::parse_lines;
use bysubject::{
    BySubjectError, BySubjectReader, BySubjectRecord, BySubjectWriter, LineBoundaryScanner,
    RecoveryMode,
};
use common::{create_test_record, create_test_records, RELATION_1_1, RELATION_1_2, SUBJECT_1};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};

#[test]
fn test_write_then_read_file() {
    let records = create_test_records(25);
    let mut file = tempfile::NamedTempFile::new().expect("Could not create temp file");

    {
        let mut writer = BySubjectWriter::new(file.as_file_mut());
        for record in &records {
            writer.write_record(record).expect("Failed to write record");
        }
        writer.finish().expect("Failed to finish writer");
        assert_eq!(writer.records_written(), 25);
    }

    let input = File::open(file.path()).expect("Could not open temp file");
    let mut reader = BySubjectReader::new(BufReader::new(input));
    let mut decoded = Vec::new();
    while let Some(record) = reader.read_record().expect("Failed to read record") {
        decoded.push(record.clone());
    }

    assert_eq!(decoded, records);
    assert_eq!(reader.records_read(), 25);
}

#[test]
fn test_shared_buffer_matches_stream_reader() {
    let mut buffer = Vec::new();
    for record in create_test_records(10) {
        record.write_to(&mut buffer).unwrap();
    }

    let mut from_buffer = Vec::new();
    let mut record = BySubjectRecord::new();
    parse_lines(&buffer, &mut record, |r| {
        from_buffer.push(r.clone());
        Ok(())
    })
    .unwrap();

    let mut reader = BySubjectReader::new(Cursor::new(&buffer));
    let mut from_stream = Vec::new();
    while let Some(r) = reader.read_record().unwrap() {
        from_stream.push(r.clone());
    }

    assert_eq!(from_buffer, from_stream);
    assert_eq!(from_buffer.len(), 10);
}

#[test]
fn test_scanner_offsets_feed_parse() {
    let mut buffer = b"header line without tabs\n".to_vec();
    create_test_record(33).write_to(&mut buffer).unwrap();
    create_test_record(34).write_to(&mut buffer).unwrap();

    let mut scanner = LineBoundaryScanner::new();
    let boundaries = scanner.scan(&buffer).unwrap();
    assert_eq!(boundaries.len(), 3);

    let mut record = BySubjectRecord::new();
    assert!(!record.parse(&buffer, boundaries[0].0, boundaries[0].1));
    assert_eq!(record.id(), 0);

    let (offset, len) = boundaries[2];
    assert!(record.parse(&buffer, offset, len));
    assert_eq!(record.id(), 34);
    assert_eq!(record.subject(), Some(SUBJECT_1));
    assert_eq!(
        record.relations().collect::<Vec<_>>(),
        vec![RELATION_1_1, RELATION_1_2]
    );
}

#[test]
fn test_lenient_reader_over_damaged_file() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut data = Vec::new();
    create_test_record(1).write_to(&mut data).unwrap();
    data.extend_from_slice(b"2\thttp://truncated/\n");
    data.extend_from_slice(b"\n");
    create_test_record(3).write_to(&mut data).unwrap();

    let mut strict = BySubjectReader::new(Cursor::new(&data));
    assert!(strict.read_record().unwrap().is_some());
    assert!(matches!(
        strict.read_record(),
        Err(BySubjectError::MalformedLine { line: 2, id: 2 })
    ));

    let mut lenient =
        BySubjectReader::new(Cursor::new(&data)).with_recovery_mode(RecoveryMode::Lenient);
    let mut ids = Vec::new();
    while let Some(record) = lenient.read_record().unwrap() {
        ids.push(record.id());
    }
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(lenient.lines_read(), 4);
    assert_eq!(lenient.lines_skipped(), 1);
}

#[test]
fn test_relations_reader_streams_raw_text() {
    let record = create_test_record(55);
    let mut reader = record.relations_reader();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    assert_eq!(text, format!("{RELATION_1_1}  {RELATION_1_2}"));

    let mut out = Vec::new();
    std::io::copy(&mut record.relations_reader(), &mut out).unwrap();
    out.flush().unwrap();
    assert_eq!(out.len(), 72);
}

#[test]
fn test_json_round_trip_through_line() {
    let record = create_test_record(7);
    let value = bysubject::json::record_to_json(&record).unwrap();
    let restored = bysubject::json::json_to_record(&value).unwrap();

    let mut original_line = Vec::new();
    record.write_to(&mut original_line).unwrap();
    let mut restored_line = Vec::new();
    restored.write_to(&mut restored_line).unwrap();
    assert_eq!(original_line, restored_line);
}
