//! 파이프라인 trait -- 모듈 확장 포인트 정의

use crate::error::CollectionError;
use crate::types::{Alert, LogRecord, ParseFailure, RawLine};

/// 원시 로그 라인 공급원
///
/// 소스가 없거나 읽을 수 없으면 [`CollectionError`]를 반환합니다.
/// 빈 소스는 에러가 아니라 빈 벡터입니다.
pub trait LogCollector {
    /// 수집 소스 식별자 (예: "file:/var/log/app.log")
    fn source_name(&self) -> &str;

    /// 모든 라인을 한 번에 수집합니다.
    fn collect(&self) -> Result<Vec<String>, CollectionError>;
}

/// 로그 파서 trait
///
/// 원시 라인 하나를 구조화된 레코드로 변환합니다. 부작용이 없어야 합니다.
pub trait LogParser {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 라인을 레코드로 파싱
    fn parse(&self, line: &RawLine) -> Result<LogRecord, ParseFailure>;
}

/// 탐지 로직을 구현하는 trait
///
/// 각 탐지기는 레코드 하나를 독립적으로 판단하며 상태를 갖지 않습니다.
pub trait Detector {
    /// 탐지기 이름
    fn name(&self) -> &str;

    /// 레코드를 분석하여 알림 생성 여부를 결정
    fn detect(&self, record: &LogRecord) -> Option<Alert>;
}
