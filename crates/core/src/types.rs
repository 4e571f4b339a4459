//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 수집, 파싱, 저장, 평가, 집계의 각 단계가 주고받는 데이터 구조를 정의합니다.
//! 데이터는 한 방향으로만 흐릅니다: `RawLine` → `LogRecord` → (저장, `Alert`, `Distribution`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// 실패 로그인 탐지에 사용하는 메시지 구문 (소문자)
///
/// 알림 평가와 분포 집계가 같은 구문 집합을 공유합니다.
pub const FAILED_LOGIN_PHRASES: &[&str] = &["failed login", "failed password"];

/// 수집된 원시 로그 라인
///
/// 수집기가 생성하고 파서가 소비합니다. 파싱 실패 시에만 [`ParseFailure`] 안에 보존됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// 소스 내 라인 번호 (1부터 시작)
    pub line_number: usize,
    /// 원본 텍스트 (가공하지 않음)
    pub text: String,
}

impl RawLine {
    /// 새 원시 라인을 생성합니다.
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

/// 구조화된 로그 레코드
///
/// 생성 이후 변경되지 않습니다. 필드는 읽기 전용 접근자로만 노출됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    timestamp: String,
    level: String,
    message: String,
}

impl LogRecord {
    /// 필드 값으로 레코드를 생성합니다.
    ///
    /// 일반적인 생성 경로는 레코드 파서입니다. 저장소에서 읽어 온 행이나
    /// 테스트 픽스처도 이 생성자를 사용합니다.
    pub fn new(
        timestamp: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            message: message.into(),
        }
    }

    /// 타임스탬프 (날짜와 시각 토큰을 공백 하나로 연결한 값)
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// 레벨 토큰 (저장/표시용으로 대소문자 보존)
    pub fn level(&self) -> &str {
        &self.level
    }

    /// 메시지 (비어 있을 수 있음)
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 메시지에 실패 로그인 구문이 포함되어 있는지 확인합니다 (대소문자 무시).
    pub fn mentions_failed_login(&self) -> bool {
        let message = self.message.to_lowercase();
        FAILED_LOGIN_PHRASES
            .iter()
            .any(|phrase| message.contains(phrase))
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{} {}", self.timestamp, self.level)
        } else {
            write!(f, "{} {} {}", self.timestamp, self.level, self.message)
        }
    }
}

/// 파싱 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseFailureReason {
    /// 공백 기준 토큰이 3개 미만
    TooFewFields,
}

impl fmt::Display for ParseFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields => write!(f, "too_few_fields"),
        }
    }
}

/// 파싱 실패
///
/// 원본 라인을 그대로 보존합니다. 오케스트레이터가 개수를 집계하고 보고합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("line {}: {reason}", .line.line_number)]
pub struct ParseFailure {
    /// 파싱하지 못한 원본 라인
    pub line: RawLine,
    /// 실패 사유
    pub reason: ParseFailureReason,
}

impl ParseFailure {
    /// 토큰 부족 실패를 생성합니다.
    pub fn too_few_fields(line: RawLine) -> Self {
        Self {
            line,
            reason: ParseFailureReason::TooFewFields,
        }
    }
}

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    /// 실패 로그인 시도
    FailedLogin,
    /// 에러 레벨 로그
    ErrorLevel,
}

impl AlertKind {
    /// 외부 표기 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailedLogin => "FAILED_LOGIN",
            Self::ErrorLevel => "ERROR_LEVEL",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 보안 알림
///
/// 레코드에서 파생되며 저장되지 않습니다. 실행마다 다시 계산합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// 알림 종류
    pub kind: AlertKind,
    /// 원인 레코드의 타임스탬프
    pub timestamp: String,
    /// 상세 설명
    pub detail: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.detail)
    }
}

/// 분포 집계 버킷
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    /// 일반 로그
    Info,
    /// 에러 레벨 로그
    Error,
    /// 실패 로그인
    FailedLogin,
}

impl Bucket {
    /// 고정된 버킷 라벨 집합 (표시 순서)
    pub const ALL: [Bucket; 3] = [Bucket::Info, Bucket::Error, Bucket::FailedLogin];

    /// 라벨 문자열을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
            Self::FailedLogin => "FAILED_LOGIN",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 버킷별 레코드 수
///
/// 모든 레코드는 정확히 하나의 버킷에 속하므로 합계는 집계한 레코드 수와 같습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(rename = "INFO")]
    info: u64,
    #[serde(rename = "ERROR")]
    error: u64,
    #[serde(rename = "FAILED_LOGIN")]
    failed_login: u64,
}

impl Distribution {
    /// 모든 버킷이 0인 분포를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 버킷 카운트를 1 증가시킵니다.
    pub fn record(&mut self, bucket: Bucket) {
        *self.slot_mut(bucket) += 1;
    }

    /// 버킷의 카운트를 반환합니다.
    pub fn get(&self, bucket: Bucket) -> u64 {
        match bucket {
            Bucket::Info => self.info,
            Bucket::Error => self.error,
            Bucket::FailedLogin => self.failed_login,
        }
    }

    /// 전체 합계
    pub fn total(&self) -> u64 {
        self.info + self.error + self.failed_login
    }

    /// 모든 버킷이 0인지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// 고정 순서(`INFO`, `ERROR`, `FAILED_LOGIN`)로 (버킷, 카운트) 쌍을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::ALL.into_iter().map(|bucket| (bucket, self.get(bucket)))
    }

    fn slot_mut(&mut self, bucket: Bucket) -> &mut u64 {
        match bucket {
            Bucket::Info => &mut self.info,
            Bucket::Error => &mut self.error,
            Bucket::FailedLogin => &mut self.failed_login,
        }
    }
}
