//! 분포 집계 -- 레코드를 고정된 버킷(`INFO`, `ERROR`, `FAILED_LOGIN`)으로 분류합니다.
//!
//! 알림 평가와 달리 배타적 분류입니다. 레코드마다 처음 일치한 버킷 하나만 증가합니다.
//!
//! 1. 메시지에 실패 로그인 구문 포함 → `FAILED_LOGIN`
//! 2. 레벨이 정확히 `error` (대소문자 무시) → `ERROR`
//! 3. 나머지 → `INFO`
//!
//! 레벨 `ERRORS`는 `ERROR_LEVEL` 알림을 만들지만 여기서는 `INFO`로 집계됩니다.

use logwarden_core::types::{Bucket, Distribution, LogRecord};

/// 레코드 하나의 버킷을 결정합니다.
pub fn classify(record: &LogRecord) -> Bucket {
    if record.mentions_failed_login() {
        Bucket::FailedLogin
    } else if record.level().eq_ignore_ascii_case("error") {
        Bucket::Error
    } else {
        Bucket::Info
    }
}

/// 레코드 목록의 분포를 계산합니다.
pub fn aggregate(records: &[LogRecord]) -> Distribution {
    records
        .iter()
        .fold(Distribution::new(), |mut distribution, record| {
            distribution.record(classify(record));
            distribution
        })
}
