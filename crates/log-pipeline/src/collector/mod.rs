//! 로그 수집 모듈 -- 소스에서 원시 로그 라인을 수집합니다.
//!
//! # 수집 소스
//! - [`FileCollector`]: 로그 파일 전체를 라인 단위로 읽음
//! - [`MemoryCollector`]: 미리 주어진 라인 목록 (테스트, 임베딩용)
//!
//! 각 수집기는 core의 [`LogCollector`](logwarden_core::pipeline::LogCollector) trait을 구현합니다.
//! 소스가 없거나 읽을 수 없는 경우와 빈 소스는 파이프라인에서 동일하게 취급됩니다.

pub mod file;

pub use file::FileCollector;

use logwarden_core::error::CollectionError;
use logwarden_core::pipeline::LogCollector;
use logwarden_core::types::RawLine;

/// 수집된 라인에 1부터 시작하는 라인 번호를 붙입니다.
pub fn number_lines(lines: Vec<String>) -> Vec<RawLine> {
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, text)| RawLine::new(idx + 1, text))
        .collect()
}

/// 메모리 수집기 -- 고정된 라인 목록을 반환합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector {
    name: String,
    lines: Vec<String>,
}

impl MemoryCollector {
    /// 라인 목록으로 수집기를 생성합니다.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: "memory".to_owned(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// 소스 식별자를 지정합니다.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl LogCollector for MemoryCollector {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn collect(&self) -> Result<Vec<String>, CollectionError> {
        Ok(self.lines.clone())
    }
}
