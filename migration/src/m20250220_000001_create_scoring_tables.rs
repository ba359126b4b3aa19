use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Scores::SubmissionId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Scores::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::TotalScore).double().null())
                    .col(
                        ColumnDef::new(Scores::MaxScore)
                            .double()
                            .not_null()
                            .default(20.0),
                    )
                    .col(ColumnDef::new(Scores::PercentageScore).double().null())
                    .col(ColumnDef::new(Scores::Status).string().not_null())
                    .col(ColumnDef::new(Scores::GradingDetails).text().null())
                    .col(ColumnDef::new(Scores::CorrectorId).big_integer().null())
                    .col(ColumnDef::new(Scores::ScoringAlgorithm).string().null())
                    .col(ColumnDef::new(Scores::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Scores::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分明细表
        manager
            .create_table(
                Table::create()
                    .table(GradingResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradingResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradingResults::ScoreId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradingResults::QuestionId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(GradingResults::PointsEarned).double().null())
                    .col(
                        ColumnDef::new(GradingResults::PointsPossible)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(GradingResults::Feedback).text().null())
                    .col(ColumnDef::new(GradingResults::Corrections).text().null())
                    .col(
                        ColumnDef::new(GradingResults::AutoGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GradingResults::GradedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradingResults::GradingMetadata).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradingResults::Table, GradingResults::ScoreId)
                            .to(Scores::Table, Scores::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 成绩表索引：submission_id 唯一索引是并发去重的兜底约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_submission_id")
                    .table(Scores::Table)
                    .col(Scores::SubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_exam_id")
                    .table(Scores::Table)
                    .col(Scores::ExamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_student_id")
                    .table(Scores::Table)
                    .col(Scores::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_status")
                    .table(Scores::Table)
                    .col(Scores::Status)
                    .to_owned(),
            )
            .await?;

        // 评分明细表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grading_results_score_id")
                    .table(GradingResults::Table)
                    .col(GradingResults::ScoreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grading_results_question_id")
                    .table(GradingResults::Table)
                    .col(GradingResults::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(GradingResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Scores {
    #[sea_orm(iden = "scores")]
    Table,
    Id,
    SubmissionId,
    ExamId,
    StudentId,
    TotalScore,
    MaxScore,
    PercentageScore,
    Status,
    GradingDetails,
    CorrectorId,
    ScoringAlgorithm,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradingResults {
    #[sea_orm(iden = "grading_results")]
    Table,
    Id,
    ScoreId,
    QuestionId,
    PointsEarned,
    PointsPossible,
    Feedback,
    Corrections,
    AutoGraded,
    GradedAt,
    GradingMetadata,
}
