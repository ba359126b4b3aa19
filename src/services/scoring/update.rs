use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ScoringService, exam_scores_cache_key, scoring_error_response};
use crate::errors::{Result, ScoringError};
use crate::models::ApiResponse;
use crate::models::scores::entities::Score;
use crate::models::scores::requests::{ScoreUpdate, UpdateScoreRequest};
use crate::storage::Storage;
use crate::utils::percentage_of;

/// 部分更新成绩（人工复核工作流）
/// PUT /scoring/score/{id}
pub async fn update_score(
    service: &ScoringService,
    request: &HttpRequest,
    id: i64,
    payload: UpdateScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match apply_score_update(&storage, id, payload).await {
        Ok(score) => {
            // 成绩变动后失效所属考试的列表缓存
            let cache = service.get_cache(request);
            cache.remove(&exam_scores_cache_key(score.exam_id)).await;

            Ok(HttpResponse::Ok().json(ApiResponse::success(score, "成绩更新成功")))
        }
        Err(e) => Ok(scoring_error_response(&e)),
    }
}

/// 应用部分更新：只写入非空字段，状态机只允许向前迁移
///
/// total_score 变化时按当前满分重新推导 percentage_score。
pub async fn apply_score_update(
    storage: &Arc<dyn Storage>,
    id: i64,
    payload: UpdateScoreRequest,
) -> Result<Score> {
    let existing = storage
        .get_score_by_id(id)
        .await?
        .ok_or_else(|| ScoringError::not_found(format!("成绩不存在: {id}")))?;

    if let Some(next) = payload.status
        && !existing.status.can_transition_to(next)
    {
        return Err(ScoringError::validation(format!(
            "不允许的状态迁移: {} -> {next}",
            existing.status
        )));
    }

    if let Some(total_score) = payload.total_score
        && !(0.0..=existing.max_score).contains(&total_score)
    {
        return Err(ScoringError::validation(format!(
            "总分必须在 0 到 {} 之间",
            existing.max_score
        )));
    }

    let update = ScoreUpdate {
        total_score: payload.total_score,
        percentage_score: payload
            .total_score
            .map(|total| percentage_of(total, existing.max_score)),
        status: payload.status,
        grading_details: payload.grading_details,
    };

    storage
        .update_score(id, update)
        .await?
        .ok_or_else(|| ScoringError::not_found(format!("成绩不存在: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scores::entities::ScoringStatus;
    use crate::models::scores::requests::ScoringRequest;
    use crate::processors::ProcessorRegistry;
    use crate::services::scoring::process::execute_scoring_request;
    use crate::services::scoring::testing::MemoryStorage;

    async fn completed_score(storage: &Arc<dyn Storage>, submission_id: i64) -> Score {
        let registry = ProcessorRegistry::new();
        execute_scoring_request(
            storage,
            &registry,
            ScoringRequest {
                submission_id,
                exam_id: 1,
                student_id: 1,
                content: "Une réponse correcte.".to_string(),
                metadata: None,
                scoring_algorithm: None,
                corrector_id: None,
            },
        )
        .await
        .expect("scoring failed")
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let err = apply_score_update(&storage, 9999, UpdateScoreRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_total_rederives_percentage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let score = completed_score(&storage, 201).await;

        let updated = apply_score_update(
            &storage,
            score.id,
            UpdateScoreRequest {
                total_score: Some(10.0),
                status: None,
                grading_details: None,
            },
        )
        .await
        .expect("update failed");

        assert_eq!(updated.total_score, Some(10.0));
        assert_eq!(updated.percentage_score, Some(50.0));
    }

    #[tokio::test]
    async fn test_backward_status_transition_rejected() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let score = completed_score(&storage, 202).await;

        let err = apply_score_update(
            &storage,
            score.id,
            UpdateScoreRequest {
                total_score: None,
                status: Some(ScoringStatus::Pending),
                grading_details: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScoringError::Validation(_)));
    }

    #[tokio::test]
    async fn test_total_out_of_bounds_rejected() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let score = completed_score(&storage, 203).await;

        for invalid in [-1.0, 20.5] {
            let err = apply_score_update(
                &storage,
                score.id,
                UpdateScoreRequest {
                    total_score: Some(invalid),
                    status: None,
                    grading_details: None,
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, ScoringError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_partial_update_only_touches_provided_fields() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let score = completed_score(&storage, 204).await;

        let updated = apply_score_update(
            &storage,
            score.id,
            UpdateScoreRequest {
                total_score: None,
                status: None,
                grading_details: Some("复核通过".to_string()),
            },
        )
        .await
        .expect("update failed");

        assert_eq!(updated.total_score, score.total_score);
        assert_eq!(updated.percentage_score, score.percentage_score);
        assert_eq!(updated.status, score.status);
        assert_eq!(updated.grading_details.as_deref(), Some("复核通过"));
    }
}
