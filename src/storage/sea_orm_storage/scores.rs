//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grading_results::ActiveModel as GradingResultActiveModel;
use crate::entity::scores::{ActiveModel, Column, Entity as Scores, Model as ScoreModel};
use crate::errors::{Result, ScoringError};
use crate::models::{
    grading_results::requests::CreateGradingResultRequest,
    scores::{
        entities::{Score, ScoringStatus},
        requests::{CreateScoreRequest, ScoreUpdate},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Debug, FromQueryResult)]
struct TotalScoreSum {
    total: Option<f64>,
}

impl SeaOrmStorage {
    /// 通过 ID 获取成绩
    pub async fn get_score_by_id_impl(&self, id: i64) -> Result<Option<Score>> {
        let result = Scores::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_score()))
    }

    /// 通过答卷 ID 获取成绩
    pub async fn get_score_by_submission_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Score>> {
        let result = Scores::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_score()))
    }

    /// 列出考试下的全部成绩
    pub async fn list_scores_by_exam_id_impl(&self, exam_id: i64) -> Result<Vec<Score>> {
        let results = Scores::find()
            .filter(Column::ExamId.eq(exam_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_score()).collect())
    }

    /// 列出学生的全部成绩
    pub async fn list_scores_by_student_id_impl(&self, student_id: i64) -> Result<Vec<Score>> {
        let results = Scores::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_score()).collect())
    }

    /// 列出某学生在某考试下的成绩
    pub async fn list_scores_by_exam_and_student_impl(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<Score>> {
        let results = Scores::find()
            .filter(Column::ExamId.eq(exam_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_score()).collect())
    }

    /// 按状态列出成绩
    pub async fn list_scores_by_status_impl(&self, status: ScoringStatus) -> Result<Vec<Score>> {
        let results = Scores::find()
            .filter(Column::Status.eq(status.to_string()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_score()).collect())
    }

    /// 统计考试下的成绩条数
    pub async fn count_scores_by_exam_id_impl(&self, exam_id: i64) -> Result<i64> {
        let count = Scores::find()
            .filter(Column::ExamId.eq(exam_id))
            .count(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("统计考试成绩失败: {e}")))?;

        Ok(count as i64)
    }

    /// 考试下 COMPLETED 成绩的平均分
    ///
    /// 未完成的成绩不计入分母，考试暂无完成评分时返回 None。
    pub async fn average_score_by_exam_id_impl(&self, exam_id: i64) -> Result<Option<f64>> {
        let completed = Scores::find()
            .filter(Column::ExamId.eq(exam_id))
            .filter(Column::Status.eq(ScoringStatus::Completed.to_string()));

        let count = completed
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("统计完成成绩失败: {e}")))?;

        if count == 0 {
            return Ok(None);
        }

        let sum = completed
            .select_only()
            .column_as(Column::TotalScore.sum(), "total")
            .into_model::<TotalScoreSum>()
            .one(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("计算平均分失败: {e}")))?
            .and_then(|row| row.total)
            .unwrap_or(0.0);

        Ok(Some(sum / count as f64))
    }

    /// 原子写入成绩与评分明细
    ///
    /// 同一事务内 upsert 成绩并插入一条明细，保证两者不会只落库一半。
    pub async fn save_score_with_result_impl(
        &self,
        score: CreateScoreRequest,
        result: CreateGradingResultRequest,
    ) -> Result<Score> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScoringError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let model = Self::upsert_score_on(&txn, score, now).await?;

        let metadata = match &result.grading_metadata {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };

        let result_model = GradingResultActiveModel {
            score_id: Set(model.id),
            question_id: Set(result.question_id),
            points_earned: Set(result.points_earned),
            points_possible: Set(result.points_possible),
            feedback: Set(result.feedback),
            corrections: Set(result.corrections),
            auto_graded: Set(result.auto_graded),
            graded_at: Set(now),
            grading_metadata: Set(metadata),
            ..Default::default()
        };

        result_model
            .insert(&txn)
            .await
            .map_err(|e| ScoringError::database_operation(format!("创建评分明细失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ScoringError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(model.into_score())
    }

    /// 记录评分失败的成绩（不产生评分明细）
    pub async fn mark_score_failed_impl(&self, score: CreateScoreRequest) -> Result<Score> {
        let now = chrono::Utc::now().timestamp();
        let model = Self::upsert_score_on(&self.db, score, now).await?;
        Ok(model.into_score())
    }

    /// 部分更新成绩
    pub async fn update_score_impl(&self, id: i64, update: ScoreUpdate) -> Result<Option<Score>> {
        // 先检查成绩是否存在
        let existing = self.get_score_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(total_score) = update.total_score {
            model.total_score = Set(Some(total_score));
        }

        if let Some(percentage_score) = update.percentage_score {
            model.percentage_score = Set(Some(percentage_score));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(grading_details) = update.grading_details {
            model.grading_details = Set(Some(grading_details));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_score_by_id_impl(id).await
    }

    /// 按答卷 ID upsert 成绩行
    ///
    /// 已存在未完成的行时在原行上更新，否则插入新行；
    /// submission_id 上的唯一索引兜底拦截并发下的重复插入。
    async fn upsert_score_on<C: ConnectionTrait>(
        conn: &C,
        score: CreateScoreRequest,
        now: i64,
    ) -> Result<ScoreModel> {
        let existing = Scores::find()
            .filter(Column::SubmissionId.eq(score.submission_id))
            .one(conn)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询成绩失败: {e}")))?;

        let model = match existing {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.total_score = Set(score.total_score);
                active.max_score = Set(score.max_score);
                active.percentage_score = Set(score.percentage_score);
                active.status = Set(score.status.to_string());
                active.grading_details = Set(score.grading_details);
                active.corrector_id = Set(score.corrector_id);
                active.scoring_algorithm = Set(score.scoring_algorithm);
                active.updated_at = Set(now);
                active
                    .update(conn)
                    .await
                    .map_err(|e| ScoringError::database_operation(format!("更新成绩失败: {e}")))?
            }
            None => {
                let active = ActiveModel {
                    submission_id: Set(score.submission_id),
                    exam_id: Set(score.exam_id),
                    student_id: Set(score.student_id),
                    total_score: Set(score.total_score),
                    max_score: Set(score.max_score),
                    percentage_score: Set(score.percentage_score),
                    status: Set(score.status.to_string()),
                    grading_details: Set(score.grading_details),
                    corrector_id: Set(score.corrector_id),
                    scoring_algorithm: Set(score.scoring_algorithm),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active
                    .insert(conn)
                    .await
                    .map_err(|e| ScoringError::database_operation(format!("创建成绩失败: {e}")))?
            }
        };

        Ok(model)
    }
}
