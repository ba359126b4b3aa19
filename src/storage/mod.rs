use std::sync::Arc;

use crate::models::{
    grading_results::{entities::GradingResult, requests::CreateGradingResultRequest},
    scores::{
        entities::{Score, ScoringStatus},
        requests::{CreateScoreRequest, ScoreUpdate},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 成绩查询方法
    // 通过ID获取成绩
    async fn get_score_by_id(&self, id: i64) -> Result<Option<Score>>;
    // 通过答卷ID获取成绩（submission_id 唯一）
    async fn get_score_by_submission_id(&self, submission_id: i64) -> Result<Option<Score>>;
    // 列出考试下的全部成绩
    async fn list_scores_by_exam_id(&self, exam_id: i64) -> Result<Vec<Score>>;
    // 列出学生的全部成绩
    async fn list_scores_by_student_id(&self, student_id: i64) -> Result<Vec<Score>>;
    // 列出某学生在某考试下的成绩
    async fn list_scores_by_exam_and_student(
        &self,
        exam_id: i64,
        student_id: i64,
    ) -> Result<Vec<Score>>;
    // 按状态列出成绩
    async fn list_scores_by_status(&self, status: ScoringStatus) -> Result<Vec<Score>>;
    // 统计考试下的成绩条数
    async fn count_scores_by_exam_id(&self, exam_id: i64) -> Result<i64>;
    // 考试下 COMPLETED 成绩的平均分（其他状态不计入，也不按零分处理）
    async fn average_score_by_exam_id(&self, exam_id: i64) -> Result<Option<f64>>;

    /// 成绩写入方法
    // 原子写入成绩与评分明细：同一事务内 upsert 成绩并插入一条明细
    async fn save_score_with_result(
        &self,
        score: CreateScoreRequest,
        result: CreateGradingResultRequest,
    ) -> Result<Score>;
    // 记录评分失败的成绩（不产生评分明细）
    async fn mark_score_failed(&self, score: CreateScoreRequest) -> Result<Score>;
    // 部分更新成绩（业务层已完成状态机与数值校验）
    async fn update_score(&self, id: i64, update: ScoreUpdate) -> Result<Option<Score>>;

    /// 评分明细查询方法
    // 列出成绩下的全部明细
    async fn list_grading_results_by_score_id(&self, score_id: i64) -> Result<Vec<GradingResult>>;
    // 列出题目维度的明细
    async fn list_grading_results_by_question_id(
        &self,
        question_id: i64,
    ) -> Result<Vec<GradingResult>>;
    // 列出某成绩下某题目的明细
    async fn list_grading_results_by_score_and_question(
        &self,
        score_id: i64,
        question_id: i64,
    ) -> Result<Vec<GradingResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
