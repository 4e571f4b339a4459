//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 로그 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for LogwardenError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 수집 실패는 빈 입력으로 처리되므로 여기에 나타나지 않습니다.
//! 라인 단위 파싱 실패도 에러가 아닙니다. [`ParseFailure`](logwarden_core::types::ParseFailure)
//! 값으로 수집되어 실행 보고서에 집계됩니다.

use logwarden_core::error::{LogwardenError, PipelineError, StorageError};

use crate::pipeline::{PipelineStage, StageCounts};

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 저장소 에러
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// 실행 중단 -- 치명적 저장소 에러로 남은 단계를 건너뜀
    #[error("pipeline failed at {stage}: {source}")]
    StageFailed {
        /// 실패한 단계 (Initializing 또는 Storing)
        stage: PipelineStage,
        /// 실패 시점까지의 단계별 카운트
        counts: StageCounts,
        /// 원인 저장소 에러
        source: StorageError,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<LogPipelineError> for LogwardenError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Storage(e) => LogwardenError::Storage(e),
            LogPipelineError::StageFailed { stage, source, .. } => {
                LogwardenError::Pipeline(PipelineError::StageFailed {
                    stage: stage.to_string(),
                    reason: source.to_string(),
                })
            }
            other @ LogPipelineError::Config { .. } => {
                LogwardenError::Pipeline(PipelineError::InitFailed(other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_failed_display_names_stage_and_cause() {
        let err = LogPipelineError::StageFailed {
            stage: PipelineStage::Storing,
            counts: StageCounts::default(),
            source: StorageError::WriteFailed("no such table: logs".to_owned()),
        };
        let msg = err.to_string();
        assert!(msg.contains("storing"));
        assert!(msg.contains("no such table"));
    }

    #[test]
    fn storage_error_converts_to_logwarden_storage() {
        let err = LogPipelineError::Storage(StorageError::Unavailable("locked".to_owned()));
        let top: LogwardenError = err.into();
        assert!(matches!(top, LogwardenError::Storage(_)));
    }

    #[test]
    fn stage_failed_converts_to_pipeline_error() {
        let err = LogPipelineError::StageFailed {
            stage: PipelineStage::Initializing,
            counts: StageCounts::default(),
            source: StorageError::Unavailable("read-only".to_owned()),
        };
        let top: LogwardenError = err.into();
        assert!(matches!(
            top,
            LogwardenError::Pipeline(PipelineError::StageFailed { .. })
        ));
    }

    #[test]
    fn config_error_display() {
        let err = LogPipelineError::Config {
            field: "database_path".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        assert!(err.to_string().contains("database_path"));
    }
}
