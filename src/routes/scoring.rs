use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::scores::entities::ScoringStatus;
use crate::models::scores::requests::{EvaluateRequest, ScoringRequest, UpdateScoreRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ScoringService;

// 懒加载的全局 ScoringService 实例
static SCORING_SERVICE: Lazy<ScoringService> = Lazy::new(ScoringService::new_lazy);

// 创建成绩（执行评分流程）
pub async fn create_score(
    req: HttpRequest,
    body: web::Json<ScoringRequest>,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .process_scoring_request(&req, body.into_inner())
        .await
}

// 获取成绩详情
pub async fn get_score(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCORING_SERVICE.get_score(&req, path.into_inner()).await
}

// 通过答卷 ID 获取成绩
pub async fn get_score_by_submission(
    req: HttpRequest,
    path: web::Path<i64>, // submission_id
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .get_score_by_submission(&req, path.into_inner())
        .await
}

// 列出考试下的全部成绩
pub async fn list_scores_by_exam(
    req: HttpRequest,
    path: web::Path<i64>, // exam_id
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .list_scores_by_exam(&req, path.into_inner())
        .await
}

// 列出学生的全部成绩
pub async fn list_scores_by_student(
    req: HttpRequest,
    path: web::Path<i64>, // student_id
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .list_scores_by_student(&req, path.into_inner())
        .await
}

// 列出某学生在某考试下的成绩
pub async fn list_scores_by_exam_and_student(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (exam_id, student_id)
) -> ActixResult<HttpResponse> {
    let (exam_id, student_id) = path.into_inner();
    SCORING_SERVICE
        .list_scores_by_exam_and_student(&req, exam_id, student_id)
        .await
}

// 按状态列出成绩
pub async fn list_scores_by_status(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let status = match path.into_inner().parse::<ScoringStatus>() {
        Ok(status) => status,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, e)));
        }
    };

    SCORING_SERVICE.list_scores_by_status(&req, status).await
}

// 部分更新成绩
pub async fn update_score(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateScoreRequest>,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .update_score(&req, path.into_inner(), body.into_inner())
        .await
}

/// 评分明细查询参数
#[derive(Debug, serde::Deserialize)]
pub struct GradingResultQuery {
    /// 可选的题目筛选
    pub question_id: Option<i64>,
}

// 获取成绩下的评分明细
pub async fn get_grading_results(
    req: HttpRequest,
    path: web::Path<i64>, // score_id
    query: web::Query<GradingResultQuery>,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .get_grading_results(&req, path.into_inner(), query.question_id)
        .await
}

// 获取考试统计
pub async fn get_exam_statistics(
    req: HttpRequest,
    path: web::Path<i64>, // exam_id
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE
        .get_exam_statistics(&req, path.into_inner())
        .await
}

// 即席文本评估
pub async fn evaluate(
    req: HttpRequest,
    body: web::Json<EvaluateRequest>,
) -> ActixResult<HttpResponse> {
    SCORING_SERVICE.evaluate(&req, body.into_inner()).await
}

// 健康检查
pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "UP",
        "service": env!("CARGO_PKG_NAME"),
    })))
}

// 配置路由
pub fn configure_scoring_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/scoring")
            .route("/score", web::post().to(create_score))
            .route("/score/{id}", web::get().to(get_score))
            .route("/score/{id}", web::put().to(update_score))
            .route("/score/{id}/results", web::get().to(get_grading_results))
            .route(
                "/score/submission/{submission_id}",
                web::get().to(get_score_by_submission),
            )
            .route("/scores/exam/{exam_id}", web::get().to(list_scores_by_exam))
            .route(
                "/scores/student/{student_id}",
                web::get().to(list_scores_by_student),
            )
            .route(
                "/scores/exam/{exam_id}/student/{student_id}",
                web::get().to(list_scores_by_exam_and_student),
            )
            .route(
                "/scores/status/{status}",
                web::get().to(list_scores_by_status),
            )
            .route(
                "/exam/{exam_id}/statistics",
                web::get().to(get_exam_statistics),
            )
            .route("/evaluate", web::post().to(evaluate))
            .route("/health", web::get().to(health)),
    );
}
