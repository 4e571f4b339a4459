//! 기본 탐지기 구현

use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, AlertKind, LogRecord};

/// 실패 로그인 탐지기
///
/// 메시지에 [`FAILED_LOGIN_PHRASES`](logwarden_core::types::FAILED_LOGIN_PHRASES) 중
/// 하나가 포함되면 (대소문자 무시) `FAILED_LOGIN` 알림을 생성합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailedLoginDetector;

impl Detector for FailedLoginDetector {
    fn name(&self) -> &str {
        "failed_login"
    }

    fn detect(&self, record: &LogRecord) -> Option<Alert> {
        record.mentions_failed_login().then(|| Alert {
            kind: AlertKind::FailedLogin,
            timestamp: record.timestamp().to_owned(),
            detail: format!("Failed login attempt detected at {}", record.timestamp()),
        })
    }
}

/// 에러 레벨 탐지기
///
/// 레벨 토큰 어디에든 `error`가 포함되면 (대소문자 무시) `ERROR_LEVEL` 알림을 생성합니다.
/// `ERRORS`, `error_critical` 같은 토큰도 일치합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLevelDetector;

impl Detector for ErrorLevelDetector {
    fn name(&self) -> &str {
        "error_level"
    }

    fn detect(&self, record: &LogRecord) -> Option<Alert> {
        record
            .level()
            .to_lowercase()
            .contains("error")
            .then(|| Alert {
                kind: AlertKind::ErrorLevel,
                timestamp: record.timestamp().to_owned(),
                detail: format!(
                    "Error log at {}: {}",
                    record.timestamp(),
                    record.message()
                ),
            })
    }
}
