//! 로그 파싱 모듈 -- 원시 라인을 구조화된 레코드로 변환
//!
//! 각 파서는 core의 [`LogParser`](logwarden_core::pipeline::LogParser) trait을 구현합니다.
//!
//! # 지원 형식
//! - 공백 구분 평문 (`<date> <time> <level> <message...>`) ([`PlainTextParser`])
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_core::types::RawLine;
//! use logwarden_log_pipeline::parser;
//!
//! let record = parser::parse(&RawLine::new(1, "2023-10-01 12:00:00 INFO User logged in"))?;
//! assert_eq!(record.level(), "INFO");
//! ```

pub mod plain;

pub use plain::PlainTextParser;

use logwarden_core::pipeline::LogParser;
use logwarden_core::types::{LogRecord, ParseFailure, RawLine};

/// 기본 파서로 라인 하나를 파싱합니다.
pub fn parse(line: &RawLine) -> Result<LogRecord, ParseFailure> {
    PlainTextParser::new().parse(line)
}

/// 기본 파서로 라인 묶음을 파싱합니다.
///
/// 성공한 레코드와 실패를 나누어 반환하며, 각 시퀀스 안에서 입력 순서를 유지합니다.
pub fn parse_batch<I>(lines: I) -> (Vec<LogRecord>, Vec<ParseFailure>)
where
    I: IntoIterator<Item = RawLine>,
{
    parse_batch_with(&PlainTextParser::new(), lines)
}

/// 지정한 파서로 라인 묶음을 파싱합니다.
pub fn parse_batch_with<I>(parser: &dyn LogParser, lines: I) -> (Vec<LogRecord>, Vec<ParseFailure>)
where
    I: IntoIterator<Item = RawLine>,
{
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for line in lines {
        match parser.parse(&line) {
            Ok(record) => records.push(record),
            Err(failure) => {
                tracing::debug!(
                    format = parser.format_name(),
                    line_number = failure.line.line_number,
                    reason = %failure.reason,
                    "line rejected by parser"
                );
                failures.push(failure);
            }
        }
    }

    (records, failures)
}
