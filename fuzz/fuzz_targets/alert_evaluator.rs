#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use logwarden_core::types::{AlertKind, Bucket, LogRecord};
use logwarden_log_pipeline::{AlertEvaluator, aggregate};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzRecord {
    timestamp: String,
    level: String,
    message: String,
}

fuzz_target!(|input: Vec<FuzzRecord>| {
    let records: Vec<LogRecord> = input
        .into_iter()
        .take(256)
        .map(|r| LogRecord::new(r.timestamp, r.level, r.message))
        .collect();

    let evaluator = AlertEvaluator::with_defaults();
    let alerts = evaluator.evaluate(&records);
    assert_eq!(alerts, evaluator.evaluate(&records));
    assert!(alerts.len() <= records.len() * 2);

    let dist = aggregate(&records);
    assert_eq!(dist.total(), records.len() as u64);

    // FAILED_LOGIN 버킷과 알림 수는 같은 구문 집합에서 나옴
    let failed_login_alerts = alerts
        .iter()
        .filter(|a| a.kind == AlertKind::FailedLogin)
        .count() as u64;
    assert_eq!(failed_login_alerts, dist.get(Bucket::FailedLogin));
});
