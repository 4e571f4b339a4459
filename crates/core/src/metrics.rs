//! 메트릭 상수 및 설명 등록
//!
//! 파이프라인 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우 기록은 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logwarden_`
//! - 모듈명: `pipeline_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(logwarden_core::metrics::PIPELINE_RECORDS_STORED_TOTAL).increment(10);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 알림 종류 레이블 키 (FAILED_LOGIN, ERROR_LEVEL)
pub const LABEL_ALERT_KIND: &str = "kind";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Pipeline 메트릭 ────────────────────────────────────────────────

/// Pipeline: 수집된 전체 라인 수 (counter)
pub const PIPELINE_LINES_COLLECTED_TOTAL: &str = "logwarden_pipeline_lines_collected_total";

/// Pipeline: 파싱된 레코드 수 (counter)
pub const PIPELINE_RECORDS_PARSED_TOTAL: &str = "logwarden_pipeline_records_parsed_total";

/// Pipeline: 파싱 실패 수 (counter)
pub const PIPELINE_PARSE_FAILURES_TOTAL: &str = "logwarden_pipeline_parse_failures_total";

/// Pipeline: 저장된 레코드 수 (counter)
pub const PIPELINE_RECORDS_STORED_TOTAL: &str = "logwarden_pipeline_records_stored_total";

/// Pipeline: 생성된 알림 수 (counter, label: kind)
pub const PIPELINE_ALERTS_TOTAL: &str = "logwarden_pipeline_alerts_total";

/// Pipeline: 실행 횟수 (counter, label: result)
pub const PIPELINE_RUNS_TOTAL: &str = "logwarden_pipeline_runs_total";

/// 모든 메트릭 이름 목록
pub const ALL_METRIC_NAMES: &[&str] = &[
    PIPELINE_LINES_COLLECTED_TOTAL,
    PIPELINE_RECORDS_PARSED_TOTAL,
    PIPELINE_PARSE_FAILURES_TOTAL,
    PIPELINE_RECORDS_STORED_TOTAL,
    PIPELINE_ALERTS_TOTAL,
    PIPELINE_RUNS_TOTAL,
];

/// 모든 메트릭의 설명을 등록합니다.
///
/// 레코더를 설치한 직후 한 번 호출합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        PIPELINE_LINES_COLLECTED_TOTAL,
        "Total raw lines returned by the collector"
    );
    describe_counter!(
        PIPELINE_RECORDS_PARSED_TOTAL,
        "Total lines parsed into structured records"
    );
    describe_counter!(
        PIPELINE_PARSE_FAILURES_TOTAL,
        "Total lines rejected by the record parser"
    );
    describe_counter!(
        PIPELINE_RECORDS_STORED_TOTAL,
        "Total records persisted to the log store"
    );
    describe_counter!(PIPELINE_ALERTS_TOTAL, "Total alerts raised by kind");
    describe_counter!(PIPELINE_RUNS_TOTAL, "Total pipeline runs by result");
}
