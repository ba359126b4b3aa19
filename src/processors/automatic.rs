//! 自动评分处理器
//!
//! 仅基于原始文本的确定性启发式：长度、结构、标点、词汇多样性
//! 四个子项各 5 分封顶，合计即 0-20 分制总分。

use super::{ScoreDraft, ScoringProcessor};
use crate::errors::Result;
use crate::models::scores::entities::ScoringStatus;
use crate::models::scores::requests::ScoringRequest;
use crate::utils::text_metrics;
use crate::utils::{percentage_of, round2};

const ALGORITHM: &str = "AUTOMATIC";
const MAX_SCORE: f64 = 20.0;

#[derive(Debug)]
pub struct AutomaticScoringProcessor;

impl ScoringProcessor for AutomaticScoringProcessor {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn process(&self, request: &ScoringRequest) -> Result<ScoreDraft> {
        let total_score = calculate_automatic_score(&request.content);

        Ok(ScoreDraft {
            total_score,
            max_score: MAX_SCORE,
            percentage_score: percentage_of(total_score, MAX_SCORE),
            status: ScoringStatus::Completed,
            scoring_algorithm: ALGORITHM.to_string(),
            grading_details: "自动评分完成".to_string(),
        })
    }
}

/// 计算自动评分总分
///
/// 四个子项均封顶 5 分，总和天然落在 0-20 区间内。
fn calculate_automatic_score(content: &str) -> f64 {
    if content.trim().is_empty() {
        return 0.0;
    }

    // 长度得分（满 5 分）
    let length_score = f64::min(5.0, text_metrics::word_count(content) as f64 / 10.0);

    // 结构得分（满 5 分）：有分段给满，否则减半
    let structure_score = if text_metrics::has_paragraph_structure(content) {
        5.0
    } else {
        2.5
    };

    // 标点得分（满 5 分）
    let punctuation_score = f64::min(5.0, text_metrics::punctuation_count(content) as f64 * 0.5);

    // 词汇多样性得分（满 5 分）
    let diversity_score = f64::min(
        5.0,
        text_metrics::distinct_word_count(content) as f64 / 5.0,
    );

    round2(length_score + structure_score + punctuation_score + diversity_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> ScoringRequest {
        ScoringRequest {
            submission_id: 1,
            exam_id: 1,
            student_id: 1,
            content: content.to_string(),
            metadata: None,
            scoring_algorithm: None,
            corrector_id: None,
        }
    }

    #[test]
    fn test_blank_content_scores_zero() {
        let draft = AutomaticScoringProcessor
            .process(&request(""))
            .expect("processing failed");
        assert_eq!(draft.total_score, 0.0);
        assert_eq!(draft.percentage_score, 0.0);
        assert_eq!(draft.status, ScoringStatus::Completed);

        let draft = AutomaticScoringProcessor
            .process(&request("   \n  "))
            .expect("processing failed");
        assert_eq!(draft.total_score, 0.0);
    }

    #[test]
    fn test_short_answer_subscores() {
        // 11 个词（une 重复一次，去重 10 个），2 个句号，无分段
        // 长度 1.1 + 结构 2.5 + 标点 1.0 + 多样性 2.0 = 6.6
        let content = "Ceci est un exemple. Il contient une analyse et une conclusion.";
        let draft = AutomaticScoringProcessor
            .process(&request(content))
            .expect("processing failed");
        assert_eq!(draft.total_score, 6.6);
        assert_eq!(draft.percentage_score, 33.0);
        assert_eq!(draft.scoring_algorithm, "AUTOMATIC");
    }

    #[test]
    fn test_rich_answer_caps_at_max_score() {
        // 60 个互不相同的词，每个词带句号：四个子项全部到达上限
        let content = (0..60)
            .map(|i| format!("mot{i}."))
            .collect::<Vec<_>>()
            .join(" ");
        let draft = AutomaticScoringProcessor
            .process(&request(&content))
            .expect("processing failed");
        assert_eq!(draft.total_score, 20.0);
        assert_eq!(draft.percentage_score, 100.0);
    }

    #[test]
    fn test_deterministic_on_identical_content() {
        let content = "Une réponse structurée.\n\nAvec un second paragraphe!";
        let first = AutomaticScoringProcessor
            .process(&request(content))
            .expect("processing failed");
        let second = AutomaticScoringProcessor
            .process(&request(content))
            .expect("processing failed");
        assert_eq!(first.total_score, second.total_score);
        assert_eq!(first.percentage_score, second.percentage_score);
    }

    #[test]
    fn test_score_stays_within_bounds() {
        for content in [
            "x",
            "Un. Deux. Trois. Quatre. Cinq. Six.",
            "mot ",
            "!!!???...",
        ] {
            let draft = AutomaticScoringProcessor
                .process(&request(content))
                .expect("processing failed");
            assert!(draft.total_score >= 0.0);
            assert!(draft.total_score <= draft.max_score);
        }
    }
}
