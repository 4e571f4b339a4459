#![no_main]

use libfuzzer_sys::fuzz_target;
use logwarden_core::types::RawLine;
use logwarden_log_pipeline::parse_batch;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<RawLine> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| RawLine::new(idx + 1, line))
        .collect();
    let total = lines.len();

    let (records, failures) = parse_batch(lines);

    // 모든 라인은 레코드 또는 실패 중 정확히 하나
    assert_eq!(records.len() + failures.len(), total);

    for record in &records {
        assert!(!record.timestamp().is_empty());
        assert!(!record.level().is_empty());
    }
    for failure in &failures {
        assert!(failure.line.text.split_whitespace().count() < 3);
    }
});
