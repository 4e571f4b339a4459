//! 알림 평가 -- 구조화된 레코드에 탐지 규칙을 적용합니다.
//!
//! 규칙은 core의 [`Detector`] trait 객체로 표현되며 고정된 순서의 목록으로 보관됩니다.
//! 각 레코드에 대해 모든 규칙을 독립적으로 평가하므로 하나의 레코드가
//! 0개, 1개 또는 여러 개의 알림을 만들 수 있습니다.
//!
//! # 기본 규칙 (평가 순서)
//! 1. [`FailedLoginDetector`]: 메시지에 실패 로그인 구문 포함 → `FAILED_LOGIN`
//! 2. [`ErrorLevelDetector`]: 레벨 토큰에 `error` 포함 → `ERROR_LEVEL`
//!
//! 억제, 스로틀링, 상관 분석 윈도우는 없습니다. 같은 입력은 항상 같은 알림을 만듭니다.
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_log_pipeline::rule::AlertEvaluator;
//!
//! let evaluator = AlertEvaluator::with_defaults();
//! for alert in evaluator.evaluate(&records) {
//!     println!("{alert}");
//! }
//! ```

pub mod detectors;

pub use detectors::{ErrorLevelDetector, FailedLoginDetector};

use logwarden_core::pipeline::Detector;
use logwarden_core::types::{Alert, LogRecord};

/// 알림 평가기 -- 순서가 고정된 탐지기 목록
pub struct AlertEvaluator {
    detectors: Vec<Box<dyn Detector>>,
}

impl AlertEvaluator {
    /// 탐지기가 없는 평가기를 생성합니다.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// 기본 규칙 집합으로 평가기를 생성합니다.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_detector(Box::new(FailedLoginDetector))
            .with_detector(Box::new(ErrorLevelDetector))
    }

    /// 목록 끝에 탐지기를 추가합니다.
    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// 등록된 탐지기 수
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// 등록 순서대로 탐지기 이름을 반환합니다.
    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// 레코드 목록을 평가합니다.
    ///
    /// 결과는 레코드 순서, 같은 레코드 안에서는 탐지기 순서를 따릅니다.
    pub fn evaluate(&self, records: &[LogRecord]) -> Vec<Alert> {
        records
            .iter()
            .flat_map(|record| self.evaluate_record(record))
            .collect()
    }

    /// 단일 레코드를 평가합니다.
    pub fn evaluate_record(&self, record: &LogRecord) -> Vec<Alert> {
        self.detectors
            .iter()
            .filter_map(|detector| detector.detect(record))
            .collect()
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// 기본 규칙 집합으로 레코드 목록을 평가합니다.
pub fn evaluate(records: &[LogRecord]) -> Vec<Alert> {
    AlertEvaluator::with_defaults().evaluate(records)
}
