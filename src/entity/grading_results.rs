//! 评分明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grading_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub score_id: i64,
    pub question_id: Option<i64>,
    pub points_earned: Option<f64>,
    pub points_possible: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub corrections: Option<String>,
    pub auto_graded: bool,
    pub graded_at: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub grading_metadata: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::scores::Entity",
        from = "Column::ScoreId",
        to = "super::scores::Column::Id"
    )]
    Score,
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Score.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grading_result(self) -> crate::models::grading_results::entities::GradingResult {
        use crate::models::grading_results::entities::GradingResult;
        use chrono::{DateTime, Utc};

        GradingResult {
            id: self.id,
            score_id: self.score_id,
            question_id: self.question_id,
            points_earned: self.points_earned,
            points_possible: self.points_possible,
            feedback: self.feedback,
            corrections: self.corrections,
            auto_graded: self.auto_graded,
            graded_at: DateTime::<Utc>::from_timestamp(self.graded_at, 0).unwrap_or_default(),
            grading_metadata: self
                .grading_metadata
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
        }
    }
}
