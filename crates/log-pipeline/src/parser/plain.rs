//! 공백 구분 평문 로그 파서
//!
//! # 형식
//! ```text
//! <date> <time> <level> <message...>
//! 2023-10-01 12:00:00 INFO User logged in
//! ```
//!
//! 라인을 공백 기준으로 토큰화합니다. 처음 두 토큰은 타임스탬프, 세 번째 토큰은 레벨,
//! 나머지는 공백 하나로 다시 이어 메시지가 됩니다. 타임스탬프 형식은 검증하지 않습니다.
//! 토큰이 3개 미만이면 원본 라인을 보존한 [`ParseFailure`]를 반환합니다.

use logwarden_core::pipeline::LogParser;
use logwarden_core::types::{LogRecord, ParseFailure, RawLine};

/// 최소 토큰 수 (날짜, 시각, 레벨)
const MIN_TOKENS: usize = 3;

/// 공백 구분 평문 파서
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    /// 새 파서를 생성합니다.
    pub fn new() -> Self {
        Self
    }
}

impl LogParser for PlainTextParser {
    fn format_name(&self) -> &str {
        "plain"
    }

    fn parse(&self, line: &RawLine) -> Result<LogRecord, ParseFailure> {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if tokens.len() < MIN_TOKENS {
            return Err(ParseFailure::too_few_fields(line.clone()));
        }

        let timestamp = format!("{} {}", tokens[0], tokens[1]);
        let level = tokens[2];
        let message = tokens[MIN_TOKENS..].join(" ");

        Ok(LogRecord::new(timestamp, level, message))
    }
}
