//! 파이프라인 오케스트레이션 -- 수집/파싱/저장/평가/집계의 전체 흐름을 관리합니다.
//!
//! [`LogPipeline`]은 한 번의 [`run`](LogPipeline::run) 호출로 배치 하나를 처리하고
//! 구조화된 [`RunReport`]를 반환합니다. 출력은 호출자가 담당합니다.
//!
//! # 단계
//! ```text
//! Idle -> Initializing -> Collecting -> Parsing -> Storing -> Evaluating -> Reporting -> Done
//!              |                                      |
//!              +------------------> Failed <----------+
//! ```
//!
//! 수집 실패는 빈 입력으로 처리합니다. 저장소 에러만 실행을 중단시키며,
//! 이 경우 평가와 집계는 실행되지 않습니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use logwarden_core::error::StorageError;
use logwarden_core::metrics as m;
use logwarden_core::pipeline::{LogCollector, LogParser};
use logwarden_core::types::{Alert, Distribution, ParseFailure};

use crate::aggregate::aggregate;
use crate::collector::{FileCollector, number_lines};
use crate::config::PipelineConfig;
use crate::error::LogPipelineError;
use crate::parser::{PlainTextParser, parse_batch_with};
use crate::rule::AlertEvaluator;
use crate::store::LogStore;

/// 파이프라인 실행 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// 생성됨, 아직 실행하지 않음
    Idle,
    /// 저장소 테이블 초기화
    Initializing,
    /// 원시 라인 수집
    Collecting,
    /// 레코드 파싱
    Parsing,
    /// 레코드 저장
    Storing,
    /// 알림 평가
    Evaluating,
    /// 분포 집계 및 보고서 생성
    Reporting,
    /// 정상 완료
    Done,
    /// 저장소 에러로 중단
    Failed,
}

impl PipelineStage {
    /// 단계 이름 (소문자)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Initializing => "initializing",
            Self::Collecting => "collecting",
            Self::Parsing => "parsing",
            Self::Storing => "storing",
            Self::Evaluating => "evaluating",
            Self::Reporting => "reporting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단계별 카운트
///
/// 실패 시에도 그 시점까지 도달한 값을 그대로 보고합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub lines_collected: usize,
    pub records_parsed: usize,
    pub parse_failures: usize,
    pub records_stored: usize,
}

/// 실행 보고서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// 실행 식별자 (UUID v4)
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// 수집된 라인 수
    pub lines_collected: usize,
    /// 파싱된 레코드 수
    pub records_parsed: usize,
    /// 파싱 실패 수
    pub parse_failures: usize,
    /// 파싱에 실패한 원본 라인
    pub failed_lines: Vec<ParseFailure>,
    /// 저장된 레코드 수
    pub records_stored: usize,
    /// 평가 순서대로의 알림
    pub alerts: Vec<Alert>,
    /// 버킷별 분포
    pub distribution: Distribution,
}

impl RunReport {
    /// 알림 상세 문자열을 평가 순서대로 반환합니다.
    pub fn alert_details(&self) -> Vec<&str> {
        self.alerts.iter().map(|a| a.detail.as_str()).collect()
    }

    /// 단계별 카운트
    pub fn counts(&self) -> StageCounts {
        StageCounts {
            lines_collected: self.lines_collected,
            records_parsed: self.records_parsed,
            parse_failures: self.parse_failures,
            records_stored: self.records_stored,
        }
    }

    /// 실행 소요 시간 (밀리초)
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// 로그 파이프라인 -- 수집/파싱/저장/평가/집계의 전체 흐름을 관리합니다.
///
/// 저장소를 단독으로 소유합니다. 같은 인스턴스로 여러 번 실행할 수 있으며
/// 매 실행은 저장소 테이블을 초기화한 뒤 시작합니다.
///
/// # 사용 예시
/// ```ignore
/// use logwarden_log_pipeline::{LogPipelineBuilder, MemoryCollector};
///
/// let mut pipeline = LogPipelineBuilder::new()
///     .collector(Box::new(MemoryCollector::new(lines)))
///     .store(LogStore::open_in_memory()?)
///     .build()?;
///
/// let report = pipeline.run()?;
/// for detail in report.alert_details() {
///     println!("{detail}");
/// }
/// ```
pub struct LogPipeline {
    config: PipelineConfig,
    collector: Box<dyn LogCollector>,
    parser: Box<dyn LogParser>,
    evaluator: AlertEvaluator,
    store: LogStore,
    stage: PipelineStage,
}

impl LogPipeline {
    /// 현재 단계
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// 파이프라인 설정
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 저장소에 대한 불변 참조를 반환합니다.
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    /// 수집 소스 식별자
    pub fn source_name(&self) -> &str {
        self.collector.source_name()
    }

    /// 배치 하나를 처리합니다.
    ///
    /// 저장소 에러가 발생하면 [`LogPipelineError::StageFailed`]를 반환하고
    /// 단계는 [`PipelineStage::Failed`]가 됩니다.
    pub fn run(&mut self) -> Result<RunReport, LogPipelineError> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let span = tracing::info_span!("pipeline_run", run_id = %run_id);
        let _enter = span.enter();

        tracing::info!(
            source = self.collector.source_name(),
            store = self.store.location(),
            "pipeline run started"
        );

        let mut counts = StageCounts::default();

        // 1. 저장소 초기화
        self.stage = PipelineStage::Initializing;
        if let Err(e) = self.store.initialize() {
            return Err(self.fail(PipelineStage::Initializing, counts, e));
        }

        // 2. 수집
        self.stage = PipelineStage::Collecting;
        let lines = match self.collector.collect() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(error = %e, "collection failed, continuing with empty input");
                Vec::new()
            }
        };
        counts.lines_collected = lines.len();
        metrics::counter!(m::PIPELINE_LINES_COLLECTED_TOTAL).increment(lines.len() as u64);
        tracing::debug!(lines = counts.lines_collected, "collection finished");

        // 3. 파싱
        self.stage = PipelineStage::Parsing;
        let (records, failed_lines) = parse_batch_with(self.parser.as_ref(), number_lines(lines));
        counts.records_parsed = records.len();
        counts.parse_failures = failed_lines.len();
        metrics::counter!(m::PIPELINE_RECORDS_PARSED_TOTAL).increment(records.len() as u64);
        metrics::counter!(m::PIPELINE_PARSE_FAILURES_TOTAL).increment(failed_lines.len() as u64);
        if !failed_lines.is_empty() {
            tracing::warn!(
                failures = failed_lines.len(),
                parsed = records.len(),
                "some lines could not be parsed"
            );
        }

        // 4. 저장
        self.stage = PipelineStage::Storing;
        match self.store.append(&records) {
            Ok(stored) => counts.records_stored = stored,
            Err(e) => return Err(self.fail(PipelineStage::Storing, counts, e)),
        }
        metrics::counter!(m::PIPELINE_RECORDS_STORED_TOTAL)
            .increment(counts.records_stored as u64);

        // 5. 알림 평가
        self.stage = PipelineStage::Evaluating;
        let alerts = self.evaluator.evaluate(&records);
        for alert in &alerts {
            metrics::counter!(m::PIPELINE_ALERTS_TOTAL, m::LABEL_ALERT_KIND => alert.kind.as_str())
                .increment(1);
            tracing::info!(kind = %alert.kind, timestamp = %alert.timestamp, "alert raised");
        }

        // 6. 집계
        self.stage = PipelineStage::Reporting;
        let distribution = aggregate(&records);

        self.stage = PipelineStage::Done;
        metrics::counter!(m::PIPELINE_RUNS_TOTAL, m::LABEL_RESULT => "success").increment(1);

        let report = RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            lines_collected: counts.lines_collected,
            records_parsed: counts.records_parsed,
            parse_failures: counts.parse_failures,
            failed_lines,
            records_stored: counts.records_stored,
            alerts,
            distribution,
        };

        tracing::info!(
            lines = report.lines_collected,
            stored = report.records_stored,
            parse_failures = report.parse_failures,
            alerts = report.alerts.len(),
            "pipeline run finished"
        );

        Ok(report)
    }

    fn fail(
        &mut self,
        stage: PipelineStage,
        counts: StageCounts,
        source: StorageError,
    ) -> LogPipelineError {
        self.stage = PipelineStage::Failed;
        metrics::counter!(m::PIPELINE_RUNS_TOTAL, m::LABEL_RESULT => "failure").increment(1);
        tracing::error!(stage = %stage, error = %source, ?counts, "pipeline run aborted");
        LogPipelineError::StageFailed {
            stage,
            counts,
            source,
        }
    }
}

impl fmt::Debug for LogPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogPipeline")
            .field("config", &self.config)
            .field("source", &self.collector.source_name())
            .field("parser", &self.parser.format_name())
            .field("store", &self.store)
            .field("stage", &self.stage)
            .finish()
    }
}

/// 로그 파이프라인 빌더
///
/// 수집기나 저장소를 지정하지 않으면 설정의 경로로 생성합니다.
pub struct LogPipelineBuilder {
    config: PipelineConfig,
    collector: Option<Box<dyn LogCollector>>,
    parser: Option<Box<dyn LogParser>>,
    evaluator: Option<AlertEvaluator>,
    store: Option<LogStore>,
}

impl LogPipelineBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            collector: None,
            parser: None,
            evaluator: None,
            store: None,
        }
    }

    /// 파이프라인 설정을 지정합니다.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// 수집기를 지정합니다. 지정하지 않으면 `source_path`의 파일 수집기를 사용합니다.
    pub fn collector(mut self, collector: Box<dyn LogCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// 파서를 지정합니다. 기본값은 [`PlainTextParser`]입니다.
    pub fn parser(mut self, parser: Box<dyn LogParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// 알림 평가기를 지정합니다. 기본값은 [`AlertEvaluator::with_defaults`]입니다.
    pub fn evaluator(mut self, evaluator: AlertEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// 저장소를 지정합니다. 지정하지 않으면 `database_path`를 엽니다.
    pub fn store(mut self, store: LogStore) -> Self {
        self.store = Some(store);
        self
    }

    /// 파이프라인을 빌드합니다.
    pub fn build(self) -> Result<LogPipeline, LogPipelineError> {
        self.config.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => LogStore::open(&self.config.database_path)?,
        };

        let collector = self
            .collector
            .unwrap_or_else(|| Box::new(FileCollector::new(&self.config.source_path)));

        Ok(LogPipeline {
            config: self.config,
            collector,
            parser: self
                .parser
                .unwrap_or_else(|| Box::new(PlainTextParser::new())),
            evaluator: self.evaluator.unwrap_or_default(),
            store,
            stage: PipelineStage::Idle,
        })
    }
}

impl Default for LogPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
