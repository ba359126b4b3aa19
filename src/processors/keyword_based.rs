//! 关键词评分处理器
//!
//! 按期望关键词在答案中的出现情况计分：每个命中关键词均分 20 分制的
//! 份额，命中至少一个时按覆盖率追加至多 5 分的奖励，最终裁剪到 20 分。

use super::{ScoreDraft, ScoringProcessor};
use crate::errors::Result;
use crate::models::scores::entities::ScoringStatus;
use crate::models::scores::requests::ScoringRequest;
use crate::utils::{percentage_of, round2};

const ALGORITHM: &str = "KEYWORD_BASED";
const MAX_SCORE: f64 = 20.0;
const COVERAGE_BONUS_MAX: f64 = 5.0;

// metadata 未提供关键词时使用的默认领域词表
const DEFAULT_KEYWORDS: [&str; 5] = [
    "analyse",
    "exemple",
    "conclusion",
    "développement",
    "argument",
];

#[derive(Debug)]
pub struct KeywordBasedScoringProcessor;

impl ScoringProcessor for KeywordBasedScoringProcessor {
    fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    fn process(&self, request: &ScoringRequest) -> Result<ScoreDraft> {
        let keywords = expected_keywords(request);
        let total_score = calculate_keyword_score(&request.content, &keywords);

        Ok(ScoreDraft {
            total_score,
            max_score: MAX_SCORE,
            percentage_score: percentage_of(total_score, MAX_SCORE),
            status: ScoringStatus::Completed,
            scoring_algorithm: ALGORITHM.to_string(),
            grading_details: "关键词评分完成".to_string(),
        })
    }
}

/// 从 metadata 中提取期望关键词；缺失或为空时回落到默认词表
fn expected_keywords(request: &ScoringRequest) -> Vec<String> {
    let from_metadata: Vec<String> = request
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.get("keywords"))
        .and_then(|value| value.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    if from_metadata.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
    } else {
        from_metadata
    }
}

/// 计算关键词命中得分
fn calculate_keyword_score(content: &str, keywords: &[String]) -> f64 {
    if content.trim().is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let content_lower = content.to_lowercase();
    let points_per_keyword = MAX_SCORE / keywords.len() as f64;

    let matched = keywords
        .iter()
        .filter(|kw| content_lower.contains(&kw.to_lowercase()))
        .count();

    let mut score = matched as f64 * points_per_keyword;

    // 覆盖率奖励：至少命中一个关键词时生效
    if matched > 0 {
        score += matched as f64 / keywords.len() as f64 * COVERAGE_BONUS_MAX;
    }

    round2(f64::min(score, MAX_SCORE))
}
