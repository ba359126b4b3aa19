use serde::Deserialize;
use std::collections::HashMap;

use super::entities::ScoringStatus;

// 评分请求
//
// submission_id 是幂等键：同一份答卷重复投递只会产生一条 COMPLETED 成绩。
// metadata 是开放的键值对，目前只有 KEYWORD_BASED 算法解读其中的 keywords 列表。
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringRequest {
    pub submission_id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    pub scoring_algorithm: Option<String>,
    pub corrector_id: Option<i64>,
}

// 成绩部分更新请求（人工复核工作流）
//
// 只应用非空字段；total_score 变化时重新推导 percentage_score。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScoreRequest {
    pub total_score: Option<f64>,
    pub status: Option<ScoringStatus>,
    pub grading_details: Option<String>,
}

// 存储层的成绩写入载荷（由编排器根据请求与算法草稿组装）
#[derive(Debug, Clone)]
pub struct CreateScoreRequest {
    pub submission_id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub total_score: Option<f64>,
    pub max_score: f64,
    pub percentage_score: Option<f64>,
    pub status: ScoringStatus,
    pub grading_details: Option<String>,
    pub corrector_id: Option<i64>,
    pub scoring_algorithm: Option<String>,
}

// 存储层的成绩更新载荷（业务层已完成状态机与数值校验）
#[derive(Debug, Clone, Default)]
pub struct ScoreUpdate {
    pub total_score: Option<f64>,
    pub percentage_score: Option<f64>,
    pub status: Option<ScoringStatus>,
    pub grading_details: Option<String>,
}

// 即席文本评估请求
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub student_text: String,
    pub reference_text: Option<String>,
}
