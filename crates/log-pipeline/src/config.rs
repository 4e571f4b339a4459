//! 로그 파이프라인 설정
//!
//! [`PipelineConfig`]는 core의 [`LogPipelineConfig`](logwarden_core::config::LogPipelineConfig)를
//! 기반으로 로그 파이프라인 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_core::config::LogwardenConfig;
//! use logwarden_log_pipeline::config::PipelineConfig;
//!
//! let core_config = LogwardenConfig::default();
//! let config = PipelineConfig::from_core(&core_config.pipeline);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use logwarden_core::config::IN_MEMORY_DATABASE;

use crate::error::LogPipelineError;

/// 로그 파이프라인 설정
///
/// 소스 경로는 수집 시점에만 존재 여부를 확인합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 수집 대상 로그 파일
    pub source_path: PathBuf,
    /// SQLite 데이터베이스 경로 (`:memory:` 허용)
    pub database_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_core(&logwarden_core::config::LogPipelineConfig::default())
    }
}

impl PipelineConfig {
    /// core의 `LogPipelineConfig`에서 파이프라인 설정을 생성합니다.
    pub fn from_core(core: &logwarden_core::config::LogPipelineConfig) -> Self {
        Self {
            source_path: PathBuf::from(&core.source_path),
            database_path: core.database_path.clone(),
        }
    }

    /// 메모리 내 데이터베이스를 사용하는지 확인합니다.
    pub fn uses_in_memory_database(&self) -> bool {
        self.database_path == IN_MEMORY_DATABASE
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogPipelineError> {
        if self.source_path.as_os_str().is_empty() {
            return Err(LogPipelineError::Config {
                field: "source_path".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.database_path.trim().is_empty() {
            return Err(LogPipelineError::Config {
                field: "database_path".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// 파이프라인 설정 빌더
#[derive(Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 수집 대상 파일 경로를 설정합니다.
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_path = path.into();
        self
    }

    /// 데이터베이스 경로를 설정합니다.
    pub fn database_path(mut self, path: impl Into<String>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// 메모리 내 데이터베이스를 사용합니다.
    pub fn in_memory(self) -> Self {
        self.database_path(IN_MEMORY_DATABASE)
    }

    /// 설정을 검증하고 `PipelineConfig`를 생성합니다.
    pub fn build(self) -> Result<PipelineConfig, LogPipelineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
