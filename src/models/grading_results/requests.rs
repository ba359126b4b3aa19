// 存储层的评分明细写入载荷
//
// score_id 由存储层在同一事务内回填，调用方无需提前知道成绩主键。
#[derive(Debug, Clone)]
pub struct CreateGradingResultRequest {
    pub question_id: Option<i64>,
    pub points_earned: Option<f64>,
    pub points_possible: Option<f64>,
    pub feedback: Option<String>,
    pub corrections: Option<String>,
    pub auto_graded: bool,
    pub grading_metadata: Option<serde_json::Value>,
}
