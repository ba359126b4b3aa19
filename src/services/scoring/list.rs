use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{ScoringService, exam_scores_cache_key};
use crate::cache::CacheResult;
use crate::models::scores::entities::{Score, ScoringStatus};
use crate::models::{ApiResponse, ErrorCode};

/// 列出考试下的全部成绩（带缓存）
/// GET /scoring/scores/exam/{exam_id}
pub async fn list_scores_by_exam(
    service: &ScoringService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = exam_scores_cache_key(exam_id);

    // 命中缓存直接返回；反序列化失败视为脏数据，清掉后回源
    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<Vec<Score>>(&json) {
            Ok(scores) => {
                debug!("考试 {} 的成绩列表命中缓存", exam_id);
                return Ok(HttpResponse::Ok().json(ApiResponse::success(scores, "查询成功")));
            }
            Err(_) => cache.remove(&cache_key).await,
        }
    }

    match storage.list_scores_by_exam_id(exam_id).await {
        Ok(scores) => {
            if let Ok(json) = serde_json::to_string(&scores) {
                cache.insert_raw(cache_key, json, 0).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(scores, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询考试成绩失败: {e}"),
            )),
        ),
    }
}

/// 列出学生的全部成绩
/// GET /scoring/scores/student/{student_id}
pub async fn list_scores_by_student(
    service: &ScoringService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_scores_by_student_id(student_id).await {
        Ok(scores) => Ok(HttpResponse::Ok().json(ApiResponse::success(scores, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询学生成绩失败: {e}"),
            )),
        ),
    }
}

/// 列出某学生在某考试下的成绩
/// GET /scoring/scores/exam/{exam_id}/student/{student_id}
pub async fn list_scores_by_exam_and_student(
    service: &ScoringService,
    request: &HttpRequest,
    exam_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_scores_by_exam_and_student(exam_id, student_id)
        .await
    {
        Ok(scores) => Ok(HttpResponse::Ok().json(ApiResponse::success(scores, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}

/// 按状态列出成绩
/// GET /scoring/scores/status/{status}
pub async fn list_scores_by_status(
    service: &ScoringService,
    request: &HttpRequest,
    status: ScoringStatus,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_scores_by_status(status).await {
        Ok(scores) => Ok(HttpResponse::Ok().json(ApiResponse::success(scores, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}
