use serde::{Deserialize, Serialize};

// 评分明细实体
//
// 每次成功的评分流程固定写入一条汇总明细；question_id 为空表示整卷汇总，
// 按小题评分时一题一条。明细从属于 Score，随 Score 级联删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingResult {
    pub id: i64,
    pub score_id: i64,
    pub question_id: Option<i64>,
    pub points_earned: Option<f64>,
    pub points_possible: Option<f64>,
    pub feedback: Option<String>,
    pub corrections: Option<String>,
    pub auto_graded: bool,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub grading_metadata: Option<serde_json::Value>,
}
