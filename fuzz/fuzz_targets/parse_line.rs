#![no_main]

use bysubject::BySubjectRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let offset = usize::from(data[0]);
    let length = usize::from(data[1]);
    let buffer = &data[2..];

    let mut record = BySubjectRecord::new();
    if record.parse(buffer, offset, length) {
        assert!(record.subject().is_some_and(|s| !s.is_empty()));

        // Whatever parsed must parse again to the same record
        let mut line = Vec::new();
        record.write_to(&mut line).unwrap();
        let mut again = BySubjectRecord::new();
        assert!(again.parse(&line, 0, line.len()));
        assert_eq!(again.id(), record.id());
        assert_eq!(again.subject(), record.subject());
    }
});
