use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoringService;
use crate::models::{ApiResponse, ErrorCode};

/// 获取成绩下的评分明细
/// GET /scoring/score/{id}/results?question_id=
pub async fn get_grading_results(
    service: &ScoringService,
    request: &HttpRequest,
    score_id: i64,
    question_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先确认成绩存在，避免对不存在的成绩返回空列表
    match storage.get_score_by_id(score_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScoreNotFound,
                "成绩不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DatabaseError,
                    format!("查询成绩失败: {e}"),
                )),
            );
        }
    }

    let results = match question_id {
        Some(question_id) => {
            storage
                .list_grading_results_by_score_and_question(score_id, question_id)
                .await
        }
        None => storage.list_grading_results_by_score_id(score_id).await,
    };

    match results {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(results, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("查询评分明细失败: {e}"),
            )),
        ),
    }
}
