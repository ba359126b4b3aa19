use serde::{Deserialize, Serialize};

use super::entities::Score;

// 单条成绩响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: Score,
}

// 考试维度的统计响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamStatisticsResponse {
    pub total_scores: i64,
    // 仅统计 COMPLETED 成绩的平均分；考试暂无完成评分时为 null
    pub average_score: Option<f64>,
    pub scores: Vec<Score>,
}

// 即席文本评估响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub feedback: String,
}
