use crate::models::scores::requests::ScoringRequest;

/// 校验评分请求中的必填标识
///
/// 字段缺失由 serde 在反序列化阶段拒绝，这里只拦截非法取值。
/// 空白 content 不是校验错误：算法对空文本计 0 分。
pub fn validate_scoring_request(request: &ScoringRequest) -> Result<(), &'static str> {
    if request.submission_id <= 0 {
        return Err("submission_id must be a positive identifier");
    }
    if request.exam_id <= 0 {
        return Err("exam_id must be a positive identifier");
    }
    if request.student_id <= 0 {
        return Err("student_id must be a positive identifier");
    }
    if let Some(corrector_id) = request.corrector_id
        && corrector_id <= 0
    {
        return Err("corrector_id must be a positive identifier when present");
    }
    Ok(())
}
