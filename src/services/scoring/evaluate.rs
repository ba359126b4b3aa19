use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoringService;
use crate::models::scores::requests::EvaluateRequest;
use crate::models::scores::responses::EvaluateResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::text_metrics;
use crate::utils::{percentage_of, round2};

const MAX_SCORE: f64 = 20.0;

/// 即席文本评估
/// POST /scoring/evaluate
///
/// 不落库，直接返回评估结果；有参考答案时按相似度加权。
pub async fn evaluate(
    _service: &ScoringService,
    _request: &HttpRequest,
    payload: EvaluateRequest,
) -> ActixResult<HttpResponse> {
    if payload.student_text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "student_text 不能为空",
        )));
    }

    let response = evaluate_text(
        &payload.student_text,
        payload.reference_text.as_deref().unwrap_or(""),
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "评估完成")))
}

/// 计算评估得分与评语
///
/// 基础分按字符长度计；提供参考答案时与词重叠相似度各占一半权重。
pub fn evaluate_text(student_text: &str, reference_text: &str) -> EvaluateResponse {
    let mut score = f64::min(MAX_SCORE, student_text.chars().count() as f64 / 10.0);

    if !reference_text.trim().is_empty() {
        let similarity = text_metrics::word_overlap_similarity(
            &student_text.to_lowercase(),
            &reference_text.to_lowercase(),
        );
        score = score * 0.5 + similarity * MAX_SCORE * 0.5;
    }

    let score = round2(score);

    let comment = if score < 10.0 {
        "文本过短或内容不足。"
    } else if score < 15.0 {
        "内容尚可，但仍有提升空间。"
    } else {
        "内容充实，完成度很高。"
    };
    let feedback = format!(
        "Score: {score}/20\n文本长度: {} 字符\n评语: {comment}",
        student_text.chars().count()
    );

    EvaluateResponse {
        score,
        max_score: MAX_SCORE,
        percentage: percentage_of(score, MAX_SCORE),
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_only_when_no_reference() {
        let long_text = "x".repeat(300);
        let response = evaluate_text(&long_text, "");
        assert_eq!(response.score, 20.0);
        assert_eq!(response.percentage, 100.0);
    }

    #[test]
    fn test_identical_reference_boosts_score() {
        let response = evaluate_text("a b c d", "a b c d");
        // 长度分 0.7 的一半加上满相似度的一半：0.35 + 10 = 10.35
        assert_eq!(response.score, 10.35);
    }

    #[test]
    fn test_disjoint_reference_halves_length_score() {
        let response = evaluate_text("aaa bbb", "ccc ddd");
        assert_eq!(response.score, 0.35);
    }

    #[test]
    fn test_feedback_mentions_score() {
        let response = evaluate_text("quelques mots", "");
        assert!(response.feedback.contains("/20"));
    }
}
