#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`collector`]: 원시 로그 라인 수집 (파일, 메모리)
//! - [`parser`]: 공백 구분 평문 레코드 파서
//! - [`store`]: SQLite 기반 추가 전용 레코드 저장소
//! - [`rule`]: 알림 평가기 및 기본 탐지기
//! - [`aggregate`]: 레벨 분포 집계
//! - [`pipeline`]: 전체 파이프라인 오케스트레이션 및 실행 보고서
//! - [`config`]: 파이프라인 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! Collector -> PlainTextParser -> LogStore -> AlertEvaluator -> aggregate -> RunReport
//!     |              |               |              |                |
//!  File/Memory   ParseFailure     SQLite      FAILED_LOGIN      INFO/ERROR/
//!                                             ERROR_LEVEL       FAILED_LOGIN
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;

pub mod collector;
pub mod parser;
pub mod rule;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{LogPipeline, LogPipelineBuilder, PipelineStage, RunReport, StageCounts};

// 설정
pub use config::{PipelineConfig, PipelineConfigBuilder};

// 에러
pub use error::LogPipelineError;

// 파서
pub use parser::{PlainTextParser, parse_batch};

// 저장소
pub use store::{LogStore, RecordQuery, StoredRecord};

// 알림 평가
pub use rule::{AlertEvaluator, ErrorLevelDetector, FailedLoginDetector};

// 집계
pub use aggregate::{aggregate, classify};

// 수집기
pub use collector::{FileCollector, MemoryCollector};
