use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ScoringService, scoring_error_response};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::scores::responses::ExamStatisticsResponse;
use crate::storage::Storage;

/// 获取考试统计（总数 + 平均分 + 成绩列表）
/// GET /scoring/exam/{exam_id}/statistics
pub async fn get_exam_statistics(
    service: &ScoringService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match build_exam_statistics(&storage, exam_id).await {
        Ok(statistics) => Ok(HttpResponse::Ok().json(ApiResponse::success(statistics, "查询成功"))),
        Err(e) => Ok(scoring_error_response(&e)),
    }
}

/// 汇总考试维度的成绩统计
///
/// 总数统计全部状态的成绩行；平均分只覆盖 COMPLETED 的成绩。
pub async fn build_exam_statistics(
    storage: &Arc<dyn Storage>,
    exam_id: i64,
) -> Result<ExamStatisticsResponse> {
    let total_scores = storage.count_scores_by_exam_id(exam_id).await?;
    let average_score = storage.average_score_by_exam_id(exam_id).await?;
    let scores = storage.list_scores_by_exam_id(exam_id).await?;

    Ok(ExamStatisticsResponse {
        total_scores,
        average_score,
        scores,
    })
}
