//! 에러 타입 -- 도메인별 에러 정의

/// Logwarden 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LogwardenError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파이프라인 처리 에러
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// 수집 에러
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    /// 스토리지 에러
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파이프라인 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 파이프라인 초기화 실패
    #[error("pipeline init failed: {0}")]
    InitFailed(String),

    /// 단계 실행 실패 (Initializing, Storing 등)
    #[error("stage '{stage}' failed: {reason}")]
    StageFailed { stage: String, reason: String },
}

/// 수집 에러
///
/// 파이프라인은 이 에러를 치명적으로 취급하지 않고 빈 입력으로 처리합니다.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    /// 소스가 없거나 읽을 수 없음
    #[error("source '{source_name}' unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },
}

/// 스토리지 에러
///
/// 두 변형 모두 실행 단위에서 치명적이며, 자동 재시도하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// 저장소를 열거나 생성할 수 없음
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// 레코드 삽입 실패
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// 조회 실패
    #[error("read failed: {0}")]
    ReadFailed(String),
}
