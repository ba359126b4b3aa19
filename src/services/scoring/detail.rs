use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoringService;
use crate::models::{ApiResponse, ErrorCode};

/// 通过 ID 获取成绩
/// GET /scoring/score/{id}
pub async fn get_score(
    service: &ScoringService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_score_by_id(id).await {
        Ok(Some(score)) => Ok(HttpResponse::Ok().json(ApiResponse::success(score, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            "成绩不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}

/// 通过答卷 ID 获取成绩
/// GET /scoring/score/submission/{submission_id}
pub async fn get_score_by_submission(
    service: &ScoringService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_score_by_submission_id(submission_id).await {
        Ok(Some(score)) => Ok(HttpResponse::Ok().json(ApiResponse::success(score, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            "该答卷尚未评分",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}
