//! 설정 관리 -- logwarden.toml 파싱 및 런타임 설정
//!
//! [`LogwardenConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 설정 파일 (`logwarden.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! 환경변수 오버라이드는 지원하지 않습니다.
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), logwarden_core::error::LogwardenError> {
//! use logwarden_core::config::LogwardenConfig;
//!
//! // 파일에서 로드 + 검증
//! let config = LogwardenConfig::load("logwarden.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogwardenConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LogwardenError};

/// 메모리 내 저장소를 의미하는 특수 경로
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Logwarden 통합 설정
///
/// `logwarden.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogwardenConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 로그 파이프라인 설정
    #[serde(default)]
    pub pipeline: LogPipelineConfig,
}

impl LogwardenConfig {
    /// TOML 파일에서 설정을 로드하고 검증합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (검증 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogwardenError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogwardenError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// 설정 파일이 있으면 로드하고, 없으면 기본값을 사용합니다.
    ///
    /// 파일이 존재하지만 파싱이나 검증에 실패하면 에러를 반환합니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        match Self::load(path.as_ref()) {
            Ok(config) => Ok(config),
            Err(LogwardenError::Config(ConfigError::FileNotFound { path })) => {
                tracing::debug!(path = %path, "config file not found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogwardenError> {
        toml::from_str(toml_str).map_err(|e| {
            LogwardenError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogwardenError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.pipeline.source_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.source_path".to_owned(),
                reason: "source path must not be empty".to_owned(),
            }
            .into());
        }

        if self.pipeline.database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.database_path".to_owned(),
                reason: "database path must not be empty".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 로그 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPipelineConfig {
    /// 수집 대상 로그 파일 경로 (존재 여부는 수집 시점에만 확인)
    pub source_path: String,
    /// SQLite 데이터베이스 경로 (`:memory:` 허용)
    pub database_path: String,
}

impl Default for LogPipelineConfig {
    fn default() -> Self {
        Self {
            source_path: "logs/sample.log".to_owned(),
            database_path: "logwarden.db".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = LogwardenConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.pipeline.source_path, "logs/sample.log");
        assert_eq!(config.pipeline.database_path, "logwarden.db");
    }

    #[test]
    fn default_config_passes_validation() {
        LogwardenConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = LogwardenConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.pipeline.database_path, "logwarden.db");
    }

    #[test]
    fn parse_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[pipeline]
database_path = ":memory:"
"#;
        let config = LogwardenConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.pipeline.database_path, IN_MEMORY_DATABASE);
        assert_eq!(config.pipeline.source_path, "logs/sample.log");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let err = LogwardenConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = LogwardenConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = LogwardenConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_blank_paths() {
        let mut config = LogwardenConfig::default();
        config.pipeline.source_path = "  ".to_owned();
        assert!(config.validate().unwrap_err().to_string().contains("source_path"));

        let mut config = LogwardenConfig::default();
        config.pipeline.database_path = String::new();
        assert!(config.validate().unwrap_err().to_string().contains("database_path"));
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = LogwardenConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = LogwardenConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.pipeline.source_path, parsed.pipeline.source_path);
    }

    #[test]
    fn from_file_not_found() {
        let err = LogwardenConfig::from_file("/nonexistent/path/logwarden.toml").unwrap_err();
        assert!(matches!(
            err,
            LogwardenError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn load_or_default_falls_back_when_missing() {
        let config = LogwardenConfig::load_or_default("/nonexistent/path/logwarden.toml").unwrap();
        assert_eq!(config.pipeline.database_path, "logwarden.db");
    }
}
