use serde::{Deserialize, Serialize};

// 评分状态
//
// 状态机只允许向前推进：PENDING → IN_PROGRESS → COMPLETED。
// FAILED 是算法执行失败后的终态，保留失败记录供重放。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringStatus {
    Pending,    // 等待评分
    InProgress, // 评分中
    Completed,  // 评分完成
    Failed,     // 评分失败
}

impl ScoringStatus {
    pub const PENDING: &'static str = "PENDING";
    pub const IN_PROGRESS: &'static str = "IN_PROGRESS";
    pub const COMPLETED: &'static str = "COMPLETED";
    pub const FAILED: &'static str = "FAILED";

    fn rank(self) -> u8 {
        match self {
            ScoringStatus::Pending => 0,
            ScoringStatus::InProgress => 1,
            ScoringStatus::Completed => 2,
            ScoringStatus::Failed => 2,
        }
    }

    /// 状态是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, ScoringStatus::Completed | ScoringStatus::Failed)
    }

    /// 校验状态迁移是否合法（只允许向前，终态之间不允许互换）
    pub fn can_transition_to(self, next: ScoringStatus) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        next.rank() > self.rank()
    }
}

impl<'de> Deserialize<'de> for ScoringStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ScoringStatus::PENDING => Ok(ScoringStatus::Pending),
            ScoringStatus::IN_PROGRESS => Ok(ScoringStatus::InProgress),
            ScoringStatus::COMPLETED => Ok(ScoringStatus::Completed),
            ScoringStatus::FAILED => Ok(ScoringStatus::Failed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的评分状态: '{s}'. 支持的状态: PENDING, IN_PROGRESS, COMPLETED, FAILED"
            ))),
        }
    }
}

impl std::fmt::Display for ScoringStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringStatus::Pending => write!(f, "{}", ScoringStatus::PENDING),
            ScoringStatus::InProgress => write!(f, "{}", ScoringStatus::IN_PROGRESS),
            ScoringStatus::Completed => write!(f, "{}", ScoringStatus::COMPLETED),
            ScoringStatus::Failed => write!(f, "{}", ScoringStatus::FAILED),
        }
    }
}

impl std::str::FromStr for ScoringStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ScoringStatus::Pending),
            "IN_PROGRESS" => Ok(ScoringStatus::InProgress),
            "COMPLETED" => Ok(ScoringStatus::Completed),
            "FAILED" => Ok(ScoringStatus::Failed),
            _ => Err(format!("Invalid scoring status: {s}")),
        }
    }
}

// 成绩实体
//
// 每份答卷（submission_id）至多存在一条 COMPLETED 成绩。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
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
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_round_trip() {
        for status in [
            ScoringStatus::Pending,
            ScoringStatus::InProgress,
            ScoringStatus::Completed,
            ScoringStatus::Failed,
        ] {
            assert_eq!(status.to_string().parse::<ScoringStatus>(), Ok(status));
        }
        assert!("DONE".parse::<ScoringStatus>().is_err());
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(ScoringStatus::Pending.can_transition_to(ScoringStatus::InProgress));
        assert!(ScoringStatus::Pending.can_transition_to(ScoringStatus::Completed));
        assert!(ScoringStatus::InProgress.can_transition_to(ScoringStatus::Completed));
        assert!(ScoringStatus::InProgress.can_transition_to(ScoringStatus::Failed));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!ScoringStatus::Completed.can_transition_to(ScoringStatus::Pending));
        assert!(!ScoringStatus::Completed.can_transition_to(ScoringStatus::InProgress));
        assert!(!ScoringStatus::InProgress.can_transition_to(ScoringStatus::Pending));
    }

    #[test]
    fn test_terminal_states_are_sealed() {
        assert!(!ScoringStatus::Completed.can_transition_to(ScoringStatus::Failed));
        assert!(!ScoringStatus::Failed.can_transition_to(ScoringStatus::Completed));
        // 幂等的同态赋值是允许的
        assert!(ScoringStatus::Completed.can_transition_to(ScoringStatus::Completed));
    }
}
