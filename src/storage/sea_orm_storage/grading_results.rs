//! 评分明细存储操作

use super::SeaOrmStorage;
use crate::entity::grading_results::{Column, Entity as GradingResults};
use crate::errors::{Result, ScoringError};
use crate::models::grading_results::entities::GradingResult;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 列出成绩下的全部明细
    pub async fn list_grading_results_by_score_id_impl(
        &self,
        score_id: i64,
    ) -> Result<Vec<GradingResult>> {
        let results = GradingResults::find()
            .filter(Column::ScoreId.eq(score_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询评分明细失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_grading_result())
            .collect())
    }

    /// 列出题目维度的明细
    pub async fn list_grading_results_by_question_id_impl(
        &self,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        let results = GradingResults::find()
            .filter(Column::QuestionId.eq(question_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询评分明细失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_grading_result())
            .collect())
    }

    /// 列出某成绩下某题目的明细
    pub async fn list_grading_results_by_score_and_question_impl(
        &self,
        score_id: i64,
        question_id: i64,
    ) -> Result<Vec<GradingResult>> {
        let results = GradingResults::find()
            .filter(Column::ScoreId.eq(score_id))
            .filter(Column::QuestionId.eq(question_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScoringError::database_operation(format!("查询评分明细失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_grading_result())
            .collect())
    }
}
