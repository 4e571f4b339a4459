//! 파일 기반 로그 수집기
//!
//! 로그 파일을 처음부터 끝까지 읽어 라인 목록으로 반환합니다.
//! 파일 존재 여부는 생성 시점이 아니라 수집 시점에 확인합니다.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use logwarden_core::error::CollectionError;
use logwarden_core::pipeline::LogCollector;

/// 파일 기반 로그 수집기
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// 수집 대상 파일 경로
    path: PathBuf,
    /// 소스 식별자 ("file:<path>")
    source_name: String,
}

impl FileCollector {
    /// 새 파일 수집기를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source_name = format!("file:{}", path.display());
        Self { path, source_name }
    }

    fn unavailable(&self, reason: impl Into<String>) -> CollectionError {
        CollectionError::Unavailable {
            source_name: self.source_name.clone(),
            reason: reason.into(),
        }
    }
}

impl LogCollector for FileCollector {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn collect(&self) -> Result<Vec<String>, CollectionError> {
        if !self.path.is_file() {
            return Err(self.unavailable("file does not exist"));
        }

        let file = File::open(&self.path).map_err(|e| self.unavailable(e.to_string()))?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.unavailable(e.to_string()))?;

        tracing::debug!(
            source = %self.source_name,
            lines = lines.len(),
            "collected lines from file"
        );
        Ok(lines)
    }
}
