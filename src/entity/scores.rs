//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub submission_id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub total_score: Option<f64>,
    pub max_score: f64,
    pub percentage_score: Option<f64>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub grading_details: Option<String>,
    pub corrector_id: Option<i64>,
    pub scoring_algorithm: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grading_results::Entity")]
    GradingResults,
}

impl Related<super::grading_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradingResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_score(self) -> crate::models::scores::entities::Score {
        use crate::models::scores::entities::{Score, ScoringStatus};
        use chrono::{DateTime, Utc};

        Score {
            id: self.id,
            submission_id: self.submission_id,
            exam_id: self.exam_id,
            student_id: self.student_id,
            total_score: self.total_score,
            max_score: self.max_score,
            percentage_score: self.percentage_score,
            status: self
                .status
                .parse::<ScoringStatus>()
                .unwrap_or(ScoringStatus::Pending),
            grading_details: self.grading_details,
            corrector_id: self.corrector_id,
            scoring_algorithm: self.scoring_algorithm,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
