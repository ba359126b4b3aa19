//! 评分编排
//!
//! 流程：查重（幂等）→ 解析算法 → 计算草稿 → 原子落库成绩与明细。
//! 同一答卷的并发投递通过按 submission_id 互斥的临界区串行化，
//! 数据库里 submission_id 上的唯一索引作为兜底约束。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::{ScoringService, exam_scores_cache_key, scoring_error_response};
use crate::errors::{Result, ScoringError};
use crate::models::ApiResponse;
use crate::models::grading_results::requests::CreateGradingResultRequest;
use crate::models::scores::entities::{Score, ScoringStatus};
use crate::models::scores::requests::{CreateScoreRequest, ScoringRequest};
use crate::models::scores::responses::ScoreResponse;
use crate::processors::{self, ProcessorRegistry, ScoreDraft};
use crate::storage::Storage;
use crate::utils::validate::validate_scoring_request;

const DEFAULT_MAX_SCORE: f64 = 20.0;

// 每个答卷一个互斥锁，覆盖"查重-评分-落库"的完整临界区
static SUBMISSION_LOCKS: Lazy<DashMap<i64, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

/// 处理评分请求（HTTP 入口）
pub async fn process_scoring_request(
    service: &ScoringService,
    request: &HttpRequest,
    payload: ScoringRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let exam_id = payload.exam_id;

    match execute_scoring_request(&storage, processors::registry(), payload).await {
        Ok(score) => {
            // 写入成功后失效考试成绩列表缓存
            let cache = service.get_cache(request);
            cache.remove(&exam_scores_cache_key(exam_id)).await;

            Ok(HttpResponse::Created()
                .json(ApiResponse::success(ScoreResponse { score }, "评分完成")))
        }
        Err(e) => Ok(scoring_error_response(&e)),
    }
}

/// 执行评分流程（传输无关的核心入口）
///
/// 对同一 submission_id 幂等：已有 COMPLETED 成绩时原样返回，
/// 不重算、不产生新的评分明细。
pub async fn execute_scoring_request(
    storage: &Arc<dyn Storage>,
    registry: &ProcessorRegistry,
    request: ScoringRequest,
) -> Result<Score> {
    validate_scoring_request(&request).map_err(ScoringError::validation)?;

    let submission_id = request.submission_id;
    let lock = SUBMISSION_LOCKS
        .entry(submission_id)
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone();

    let outcome = {
        let _guard = lock.lock().await;
        run_pipeline(storage, registry, &request).await
    };

    // 没有其他持有者时回收锁条目；remove_if 持有分片写锁，判定不会与新的克隆竞争
    SUBMISSION_LOCKS.remove_if(&submission_id, |_, existing| {
        Arc::strong_count(existing) <= 2
    });

    outcome
}

async fn run_pipeline(
    storage: &Arc<dyn Storage>,
    registry: &ProcessorRegistry,
    request: &ScoringRequest,
) -> Result<Score> {
    info!("开始处理答卷 {} 的评分请求", request.submission_id);

    // 幂等检查：已完成的成绩直接返回
    if let Some(existing) = storage
        .get_score_by_submission_id(request.submission_id)
        .await?
        && existing.status == ScoringStatus::Completed
    {
        warn!("答卷 {} 已存在完成的成绩，跳过重算", request.submission_id);
        return Ok(existing);
    }

    let processor = registry.resolve(request.scoring_algorithm.as_deref())?;

    let draft = match processor.process(request) {
        Ok(draft) => draft,
        Err(e) => {
            // 算法失败也要留痕：成绩进入终态 FAILED，便于事后重放
            let failed = failed_score(request, e.message());
            if let Err(persist_err) = storage.mark_score_failed(failed).await {
                error!(
                    "记录答卷 {} 的失败状态时出错: {persist_err}",
                    request.submission_id
                );
            }
            return Err(e);
        }
    };

    let feedback = format!("自动评分完成，使用算法: {}", draft.scoring_algorithm);
    let result = CreateGradingResultRequest {
        question_id: None,
        points_earned: Some(draft.total_score),
        points_possible: Some(draft.max_score),
        feedback: Some(feedback),
        corrections: None,
        auto_graded: true,
        grading_metadata: None,
    };

    let score = storage
        .save_score_with_result(completed_score(request, &draft), result)
        .await?;

    info!(
        "答卷 {} 评分完成，得分 {:.2}/{:.2}",
        request.submission_id, draft.total_score, draft.max_score
    );

    Ok(score)
}

/// 由请求与算法草稿组装成绩写入载荷
fn completed_score(request: &ScoringRequest, draft: &ScoreDraft) -> CreateScoreRequest {
    CreateScoreRequest {
        submission_id: request.submission_id,
        exam_id: request.exam_id,
        student_id: request.student_id,
        total_score: Some(draft.total_score),
        max_score: draft.max_score,
        percentage_score: Some(draft.percentage_score),
        status: draft.status,
        grading_details: Some(draft.grading_details.clone()),
        corrector_id: request.corrector_id,
        scoring_algorithm: Some(draft.scoring_algorithm.clone()),
    }
}

/// 评分失败时的成绩写入载荷（无得分，仅记录失败原因）
fn failed_score(request: &ScoringRequest, reason: &str) -> CreateScoreRequest {
    CreateScoreRequest {
        submission_id: request.submission_id,
        exam_id: request.exam_id,
        student_id: request.student_id,
        total_score: None,
        max_score: DEFAULT_MAX_SCORE,
        percentage_score: None,
        status: ScoringStatus::Failed,
        grading_details: Some(reason.to_string()),
        corrector_id: request.corrector_id,
        scoring_algorithm: request.scoring_algorithm.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::{ProcessorRegistry, ScoringProcessor};
    use crate::services::scoring::testing::MemoryStorage;

    fn scoring_request(submission_id: i64, content: &str) -> ScoringRequest {
        ScoringRequest {
            submission_id,
            exam_id: 1,
            student_id: 1,
            content: content.to_string(),
            metadata: None,
            scoring_algorithm: None,
            corrector_id: None,
        }
    }

    #[derive(Debug)]
    struct FailingProcessor;

    impl ScoringProcessor for FailingProcessor {
        fn algorithm(&self) -> &'static str {
            "AUTOMATIC"
        }

        fn process(&self, _request: &ScoringRequest) -> Result<ScoreDraft> {
            Err(ScoringError::computation("boom"))
        }
    }

    #[tokio::test]
    async fn test_scoring_persists_score_and_single_result() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = ProcessorRegistry::new();

        let score = execute_scoring_request(&storage, &registry, scoring_request(101, "Réponse."))
            .await
            .expect("scoring failed");

        assert_eq!(score.status, ScoringStatus::Completed);
        assert_eq!(score.scoring_algorithm.as_deref(), Some("AUTOMATIC"));
        assert!(score.total_score.is_some());

        let results = storage
            .list_grading_results_by_score_id(score.id)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].auto_graded);
        assert_eq!(results[0].points_earned, score.total_score);
        assert_eq!(results[0].points_possible, Some(score.max_score));
    }

    #[tokio::test]
    async fn test_idempotent_on_completed_submission() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = ProcessorRegistry::new();

        let first = execute_scoring_request(&storage, &registry, scoring_request(102, "Texte."))
            .await
            .expect("first run failed");
        let second = execute_scoring_request(&storage, &registry, scoring_request(102, "Texte."))
            .await
            .expect("second run failed");

        assert_eq!(first.id, second.id);
        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.updated_at, second.updated_at);

        let results = storage
            .list_grading_results_by_score_id(first.id)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicates_yield_one_score_and_one_result() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = Arc::new(ProcessorRegistry::new());

        let mut handles = Vec::new();
        for _ in 0..10 {
            let storage = storage.clone();
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                execute_scoring_request(&storage, &registry, scoring_request(103, "Essai."))
                    .await
                    .expect("scoring failed")
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);

        let score = storage
            .get_score_by_submission_id(103)
            .await
            .unwrap()
            .expect("score missing");
        assert_eq!(score.status, ScoringStatus::Completed);

        let results = storage
            .list_grading_results_by_score_id(score.id)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_algorithm_writes_nothing() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = ProcessorRegistry::new();

        let mut request = scoring_request(104, "Texte.");
        request.scoring_algorithm = Some("FOO".to_string());

        let err = execute_scoring_request(&storage, &registry, request)
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::Configuration(_)));

        assert!(
            storage
                .get_score_by_submission_id(104)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_invalid_identifiers_are_rejected_before_any_write() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = ProcessorRegistry::new();

        let mut request = scoring_request(105, "Texte.");
        request.exam_id = 0;

        let err = execute_scoring_request(&storage, &registry, request)
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::Validation(_)));
        assert!(
            storage
                .get_score_by_submission_id(105)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_processor_failure_marks_score_failed_without_result() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let failing = ProcessorRegistry::with_processors(vec![Box::new(FailingProcessor)]);

        let err = execute_scoring_request(&storage, &failing, scoring_request(106, "Texte."))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::Computation(_)));

        let score = storage
            .get_score_by_submission_id(106)
            .await
            .unwrap()
            .expect("failed score should be recorded");
        assert_eq!(score.status, ScoringStatus::Failed);
        assert_eq!(score.total_score, None);
        assert_eq!(score.grading_details.as_deref(), Some("boom"));

        let results = storage
            .list_grading_results_by_score_id(score.id)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_failed_submission_can_be_regraded() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let failing = ProcessorRegistry::with_processors(vec![Box::new(FailingProcessor)]);
        let registry = ProcessorRegistry::new();

        execute_scoring_request(&storage, &failing, scoring_request(107, "Texte."))
            .await
            .unwrap_err();

        // 失败不是幂等终点：重投后可以正常完成评分
        let score = execute_scoring_request(&storage, &registry, scoring_request(107, "Texte."))
            .await
            .expect("regrade failed");
        assert_eq!(score.status, ScoringStatus::Completed);

        let results = storage
            .list_grading_results_by_score_id(score.id)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_content_completes_with_zero() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let registry = ProcessorRegistry::new();

        let score = execute_scoring_request(&storage, &registry, scoring_request(108, ""))
            .await
            .expect("scoring failed");
        assert_eq!(score.status, ScoringStatus::Completed);
        assert_eq!(score.total_score, Some(0.0));
        assert_eq!(score.percentage_score, Some(0.0));
    }
}
