pub mod detail;
pub mod evaluate;
pub mod list;
pub mod process;
pub mod results;
pub mod statistics;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::ScoringError;
use crate::models::scores::entities::ScoringStatus;
use crate::models::scores::requests::{EvaluateRequest, ScoringRequest, UpdateScoreRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ScoringService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl ScoringService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        if let Some(cache) = &self.cache {
            cache.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
                .expect("Cache not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 处理评分请求（幂等入口）
    pub async fn process_scoring_request(
        &self,
        request: &HttpRequest,
        payload: ScoringRequest,
    ) -> ActixResult<HttpResponse> {
        process::process_scoring_request(self, request, payload).await
    }

    /// 通过 ID 获取成绩
    pub async fn get_score(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        detail::get_score(self, request, id).await
    }

    /// 通过答卷 ID 获取成绩
    pub async fn get_score_by_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_score_by_submission(self, request, submission_id).await
    }

    /// 列出考试下的全部成绩
    pub async fn list_scores_by_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_scores_by_exam(self, request, exam_id).await
    }

    /// 列出学生的全部成绩
    pub async fn list_scores_by_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_scores_by_student(self, request, student_id).await
    }

    /// 列出某学生在某考试下的成绩
    pub async fn list_scores_by_exam_and_student(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_scores_by_exam_and_student(self, request, exam_id, student_id).await
    }

    /// 按状态列出成绩
    pub async fn list_scores_by_status(
        &self,
        request: &HttpRequest,
        status: ScoringStatus,
    ) -> ActixResult<HttpResponse> {
        list::list_scores_by_status(self, request, status).await
    }

    /// 部分更新成绩
    pub async fn update_score(
        &self,
        request: &HttpRequest,
        id: i64,
        payload: UpdateScoreRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_score(self, request, id, payload).await
    }

    /// 获取成绩下的评分明细
    pub async fn get_grading_results(
        &self,
        request: &HttpRequest,
        score_id: i64,
        question_id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        results::get_grading_results(self, request, score_id, question_id).await
    }

    /// 获取考试统计
    pub async fn get_exam_statistics(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        statistics::get_exam_statistics(self, request, exam_id).await
    }

    /// 即席文本评估
    pub async fn evaluate(
        &self,
        request: &HttpRequest,
        payload: EvaluateRequest,
    ) -> ActixResult<HttpResponse> {
        evaluate::evaluate(self, request, payload).await
    }
}

/// 考试成绩列表的缓存键
pub(crate) fn exam_scores_cache_key(exam_id: i64) -> String {
    format!("scores:exam:{exam_id}")
}

/// 将业务错误映射为统一的 HTTP 响应
pub(crate) fn scoring_error_response(err: &ScoringError) -> HttpResponse {
    match err {
        ScoringError::Validation(_) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            err.message(),
        )),
        ScoringError::Configuration(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::UnknownAlgorithm, err.message()),
        ),
        ScoringError::NotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            err.message(),
        )),
        ScoringError::Computation(_) => HttpResponse::InternalServerError().json(
            ApiResponse::error_empty(ErrorCode::ScoringFailed, err.message()),
        ),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            err.message(),
        )),
    }
}
