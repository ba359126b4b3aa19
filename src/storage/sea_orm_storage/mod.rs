//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod grading_results;
mod scores;

use crate::config::AppConfig;
use crate::errors::{Result, ScoringError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ScoringError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ScoringError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ScoringError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ScoringError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ScoringError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    grading_results::{entities::GradingResult, requests::CreateGradingResultRequest},
    scores::{
        entities::{Score, ScoringStatus},
        requests::{CreateScoreRequest, ScoreUpdate},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 成绩查询
    async fn get_score_by_id(&self, id: i64) -> Result<Option<Score>> {
        self.get_score_by_id_impl(id).await
    }

    async fn get_score_by_submission_id(&self, submission_id: i64) -> Result<Option<Score>> {
        self.get_score_by_submission_id_impl(submission_id).await
    }

    async fn list_scores_by_exam_id(&self, exam_id: i64) -> Result<Vec<Score>> {
        self.list_scores_by_exam_id_impl(exam_id).await
    }

    async fn list_scores_by_student_id(&self, student_id: i64) -> Result<Vec<Score>> {
        self.list_scores_by_student_id_impl(student_id).await
    }

    async fn list_scores_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<Score>> {
        self.list_scores_by_exam_and_student_impl(exam_id, student_id)
            .await
    }

    async fn list_scores_by_status(&self, status: ScoringStatus) -> Result<Vec<Score>> {
        self.list_scores_by_status_impl(status).await
    }

    async fn count_scores_by_exam_id(&self, exam_id: i64) -> Result<i64> {
        self.count_scores_by_exam_id_impl(exam_id).await
    }

    async fn average_score_by_exam_id(&self, exam_id: i64) -> Result<Option<f64>> {
        self.average_score_by_exam_id_impl(exam_id).await
    }

    // 成绩写入
    async fn save_score_with_result(
        &self,
        score: CreateScoreRequest,
        result: CreateGradingResultRequest,
    ) -> Result<Score> {
        self.save_score_with_result_impl(score, result).await
    }

    async fn mark_score_failed(&self, score: CreateScoreRequest) -> Result<Score> {
        self.mark_score_failed_impl(score).await
    }

    async fn update_score(&self, id: i64, update: ScoreUpdate) -> Result<Option<Score>> {
        self.update_score_impl(id, update).await
    }

    // 评分明细查询
    async fn list_grading_results_by_score_id(&self, score_id: i64) -> Result<Vec<GradingResult>> {
        self.list_grading_results_by_score_id_impl(score_id).await
    }

    async fn list_grading_results_by_question_id(
        &self,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        self.list_grading_results_by_question_id_impl(question_id)
            .await
    }

    async fn list_grading_results_by_score_and_question(
        &self,
        score_id: i64,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        self.list_grading_results_by_score_and_question_impl(score_id, question_id)
            .await
    }
}
