//! 로그 저장소 -- SQLite 기반 레코드 테이블
//!
//! [`LogStore`]는 구조화된 레코드를 `logs` 테이블에 추가 전용으로 저장합니다.
//! 파이프라인 인스턴스가 저장소를 단독으로 소유하며 전역 연결은 없습니다.
//!
//! # 스키마
//! ```text
//! logs(id INTEGER PRIMARY KEY, timestamp TEXT NOT NULL, level TEXT NOT NULL, message TEXT NOT NULL)
//! ```
//!
//! # 사용 예시
//! ```ignore
//! use logwarden_log_pipeline::store::{LogStore, RecordQuery};
//!
//! let mut store = LogStore::open_in_memory()?;
//! store.initialize()?;
//! store.append(&records)?;
//!
//! let errors = store.query(&RecordQuery::new().level("error"))?;
//! ```

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params, params_from_iter};
use serde::{Deserialize, Serialize};

use logwarden_core::config::IN_MEMORY_DATABASE;
use logwarden_core::error::StorageError;
use logwarden_core::types::LogRecord;

const SCHEMA: &str = r#"
    DROP TABLE IF EXISTS logs;

    CREATE TABLE logs (
        id INTEGER PRIMARY KEY,
        timestamp TEXT NOT NULL,
        level TEXT NOT NULL,
        message TEXT NOT NULL
    );

    CREATE INDEX idx_logs_level ON logs(level);
"#;

/// 저장소에서 읽어 온 레코드 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// 대리 키 (삽입 순서대로 증가)
    pub id: i64,
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

impl StoredRecord {
    /// 도메인 레코드로 변환합니다.
    pub fn to_record(&self) -> LogRecord {
        LogRecord::new(&self.timestamp, &self.level, &self.message)
    }
}

/// 레코드 조회 조건
///
/// 모든 조건은 AND로 결합되며 결과는 항상 id 순서입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// 레벨 일치 (ASCII 대소문자 무시)
    pub level: Option<String>,
    /// 타임스탬프 문자열 접두사
    pub timestamp_prefix: Option<String>,
    /// 메시지 부분 문자열 (ASCII 대소문자 무시)
    pub message_contains: Option<String>,
    /// 최대 행 수
    pub limit: Option<usize>,
}

impl RecordQuery {
    /// 조건 없는 조회를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn timestamp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.timestamp_prefix = Some(prefix.into());
        self
    }

    pub fn message_contains(mut self, needle: impl Into<String>) -> Self {
        self.message_contains = Some(needle.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT id, timestamp, level, message FROM logs");
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(level) = &self.level {
            values.push(Value::Text(level.clone()));
            clauses.push(format!("lower(level) = lower(?{})", values.len()));
        }
        if let Some(prefix) = &self.timestamp_prefix {
            values.push(Value::Text(prefix.clone()));
            clauses.push(format!("instr(timestamp, ?{}) = 1", values.len()));
        }
        if let Some(needle) = &self.message_contains {
            values.push(Value::Text(needle.clone()));
            clauses.push(format!("instr(lower(message), lower(?{})) > 0", values.len()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id ASC");

        if let Some(limit) = self.limit {
            values.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
            sql.push_str(&format!(" LIMIT ?{}", values.len()));
        }

        (sql, values)
    }
}

/// SQLite 기반 로그 저장소
///
/// 식별자는 저장소 인스턴스 수명 동안 재사용되지 않습니다.
/// [`initialize`](Self::initialize)로 테이블을 초기화해도 다음 id는 이어서 증가합니다.
pub struct LogStore {
    conn: Connection,
    location: String,
    next_id: i64,
}

impl LogStore {
    /// 파일 기반 저장소를 엽니다. 파일이 없으면 생성합니다.
    ///
    /// 경로가 `:memory:`이면 메모리 내 저장소를 엽니다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if path.as_os_str() == IN_MEMORY_DATABASE {
            return Self::open_in_memory();
        }

        let location = path.display().to_string();
        let conn = Connection::open(path)
            .map_err(|e| StorageError::Unavailable(format!("{location}: {e}")))?;
        Self::from_connection(conn, location)
    }

    /// 이미 존재하는 파일 기반 저장소를 읽기 전용으로 엽니다.
    ///
    /// 파일을 생성하지 않으며, 파일이 없으면 `Unavailable`을 반환합니다.
    /// 쓰기 작업(`initialize`, `append`)은 실패합니다.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if path.as_os_str() == IN_MEMORY_DATABASE {
            return Self::open_in_memory();
        }

        let location = path.display().to_string();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| StorageError::Unavailable(format!("{location}: {e}")))?;
        Self::from_connection(conn, location)
    }

    /// 메모리 내 저장소를 엽니다.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::from_connection(conn, IN_MEMORY_DATABASE.to_owned())
    }

    fn from_connection(conn: Connection, location: String) -> Result<Self, StorageError> {
        // SQLite는 파일을 지연 생성하므로 여기서 접근 가능 여부를 확인
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StorageError::Unavailable(format!("{location}: {e}")))?;

        tracing::debug!(location = %location, "log store opened");
        Ok(Self {
            conn,
            location,
            next_id: 1,
        })
    }

    /// 저장소 위치 (파일 경로 또는 `:memory:`)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// 레코드 테이블을 다시 생성합니다. 기존 데이터는 모두 삭제됩니다.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        tracing::debug!(location = %self.location, next_id = self.next_id, "log table reset");
        Ok(())
    }

    /// 레코드를 단일 트랜잭션으로 추가하고 기록한 행 수를 반환합니다.
    ///
    /// 하나라도 실패하면 아무것도 기록되지 않습니다.
    pub fn append(&mut self, records: &[LogRecord]) -> Result<usize, StorageError> {
        let write_failed = |e: rusqlite::Error| StorageError::WriteFailed(e.to_string());

        let tx = self.conn.transaction().map_err(write_failed)?;

        let max_id: i64 = tx
            .query_row("SELECT COALESCE(MAX(id), 0) FROM logs", [], |row| row.get(0))
            .map_err(write_failed)?;
        let mut next_id = self.next_id.max(max_id + 1);

        {
            let mut stmt = tx
                .prepare("INSERT INTO logs (id, timestamp, level, message) VALUES (?1, ?2, ?3, ?4)")
                .map_err(write_failed)?;
            for record in records {
                stmt.execute(params![
                    next_id,
                    record.timestamp(),
                    record.level(),
                    record.message()
                ])
                .map_err(write_failed)?;
                next_id += 1;
            }
        }

        tx.commit().map_err(write_failed)?;
        self.next_id = next_id;

        tracing::debug!(count = records.len(), next_id, "records appended");
        Ok(records.len())
    }

    /// 저장된 모든 레코드를 id 순서로 반환합니다.
    pub fn records(&self) -> Result<Vec<StoredRecord>, StorageError> {
        self.query(&RecordQuery::new())
    }

    /// 저장된 레코드 수
    pub fn count(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// 조건에 맞는 레코드를 id 순서로 반환합니다.
    pub fn query(&self, query: &RecordQuery) -> Result<Vec<StoredRecord>, StorageError> {
        let read_failed = |e: rusqlite::Error| StorageError::ReadFailed(e.to_string());

        let (sql, values) = query.to_sql();
        let mut stmt = self.conn.prepare(&sql).map_err(read_failed)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(StoredRecord {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    level: row.get(2)?,
                    message: row.get(3)?,
                })
            })
            .map_err(read_failed)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(read_failed)
    }
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStore")
            .field("location", &self.location)
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<LogRecord> {
        vec![
            LogRecord::new("2023-10-01 12:00:00", "INFO", "User logged in"),
            LogRecord::new("2023-10-01 12:05:00", "ERROR", "Failed password attempt"),
            LogRecord::new("2023-10-02 08:30:00", "warn", ""),
        ]
    }

    fn initialized_store() -> LogStore {
        let mut store = LogStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn append_then_read_back_in_insertion_order() {
        let mut store = initialized_store();
        let records = sample_records();

        assert_eq!(store.append(&records).unwrap(), 3);

        let stored = store.records().unwrap();
        assert_eq!(stored.len(), 3);
        for (row, record) in stored.iter().zip(&records) {
            assert_eq!(&row.to_record(), record);
        }
        assert_eq!(
            stored.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn empty_message_round_trips() {
        let mut store = initialized_store();
        store.append(&[LogRecord::new("d t", "DEBUG", "")]).unwrap();
        assert_eq!(store.records().unwrap()[0].message, "");
    }

    #[test]
    fn append_empty_slice_writes_nothing() {
        let mut store = initialized_store();
        assert_eq!(store.append(&[]).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn initialize_discards_previous_rows_but_ids_keep_increasing() {
        let mut store = initialized_store();
        store.append(&sample_records()).unwrap();

        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        store
            .append(&[LogRecord::new("2023-10-03 00:00:00", "INFO", "again")])
            .unwrap();
        let stored = store.records().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, 4);
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut store = LogStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn append_before_initialize_fails_with_write_error() {
        let mut store = LogStore::open_in_memory().unwrap();
        let err = store.append(&sample_records()).unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed(_)));
    }

    #[test]
    fn read_before_initialize_fails_with_read_error() {
        let store = LogStore::open_in_memory().unwrap();
        assert!(matches!(store.count(), Err(StorageError::ReadFailed(_))));
        assert!(matches!(store.records(), Err(StorageError::ReadFailed(_))));
    }

    #[test]
    fn open_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("logwarden.db");
        let err = LogStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[test]
    fn file_backed_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logwarden.db");

        {
            let mut store = LogStore::open(&path).unwrap();
            store.initialize().unwrap();
            store.append(&sample_records()).unwrap();
        }

        let mut store = LogStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.location(), path.display().to_string());

        // 기존 행 이후부터 id 부여
        store
            .append(&[LogRecord::new("d t", "INFO", "later")])
            .unwrap();
        assert_eq!(store.records().unwrap().last().unwrap().id, 4);
    }

    #[test]
    fn open_existing_missing_file_is_unavailable_and_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.db");

        let err = LogStore::open_existing(&path).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(!path.exists());
    }

    #[test]
    fn open_existing_reads_but_refuses_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logwarden.db");
        {
            let mut store = LogStore::open(&path).unwrap();
            store.initialize().unwrap();
            store.append(&sample_records()).unwrap();
        }

        let mut store = LogStore::open_existing(&path).unwrap();
        assert_eq!(store.count().unwrap(), 3);
        assert!(matches!(
            store.append(&sample_records()),
            Err(StorageError::WriteFailed(_))
        ));
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn open_memory_path_uses_in_memory_store() {
        let store = LogStore::open(IN_MEMORY_DATABASE).unwrap();
        assert_eq!(store.location(), IN_MEMORY_DATABASE);
    }

    #[test]
    fn query_by_level_is_case_insensitive() {
        let mut store = initialized_store();
        store.append(&sample_records()).unwrap();

        let rows = store.query(&RecordQuery::new().level("error")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, "ERROR");

        let rows = store.query(&RecordQuery::new().level("WARN")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, "warn");
    }

    #[test]
    fn query_by_timestamp_prefix_and_message() {
        let mut store = initialized_store();
        store.append(&sample_records()).unwrap();

        let rows = store
            .query(&RecordQuery::new().timestamp_prefix("2023-10-01"))
            .unwrap();
        assert_eq!(rows.len(), 2);

        let rows = store
            .query(&RecordQuery::new().message_contains("PASSWORD"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);

        let rows = store
            .query(
                &RecordQuery::new()
                    .timestamp_prefix("2023-10-01")
                    .message_contains("logged"),
            )
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].message, "User logged in");
    }

    #[test]
    fn timestamp_prefix_treats_wildcards_literally() {
        let mut store = initialized_store();
        store.append(&sample_records()).unwrap();
        let rows = store
            .query(&RecordQuery::new().timestamp_prefix("2023-10-%"))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn query_limit_keeps_id_order() {
        let mut store = initialized_store();
        store.append(&sample_records()).unwrap();

        let rows = store.query(&RecordQuery::new().limit(2)).unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

        let rows = store.query(&RecordQuery::new().limit(0)).unwrap();
        assert!(rows.is_empty());
    }
}
