//! 共享文本启发式指标
//!
//! 自动评分算法与即席评估接口共用同一份文本指标实现，
//! 避免在多处维护平行副本。所有指标对空白输入返回零值。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SENTENCE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]").expect("Invalid punctuation regex"));

/// 按空白切分的词数
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// 小写化后去重的词数（词汇多样性）
pub fn distinct_word_count(text: &str) -> usize {
    text.to_lowercase()
        .split_whitespace()
        .collect::<HashSet<_>>()
        .len()
}

/// 句末标点（.!?）出现次数
pub fn punctuation_count(text: &str) -> usize {
    SENTENCE_PUNCT_RE.find_iter(text).count()
}

/// 是否具备段落结构：存在空行分段，或句号切分超过三段
pub fn has_paragraph_structure(text: &str) -> bool {
    text.contains("\n\n") || text.split(". ").count() > 3
}

/// 两段文本的词重叠相似度，取值 [0, 1]
///
/// 以较长一侧的词数为分母，词序无关。
pub fn word_overlap_similarity(left: &str, right: &str) -> f64 {
    let left_words: Vec<&str> = left.split_whitespace().collect();
    let right_words: HashSet<&str> = right.split_whitespace().collect();

    let total = left_words.len().max(right_words.len());
    if total == 0 {
        return 0.0;
    }

    let common = left_words
        .iter()
        .collect::<HashSet<_>>()
        .iter()
        .filter(|w| right_words.contains(**w))
        .count();

    common as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("une seule phrase"), 3);
        assert_eq!(word_count("mots\nsur\nplusieurs lignes"), 4);
    }

    #[test]
    fn test_distinct_word_count_is_case_insensitive() {
        assert_eq!(distinct_word_count("Analyse analyse ANALYSE"), 1);
        assert_eq!(distinct_word_count("un deux trois"), 3);
    }

    #[test]
    fn test_punctuation_count() {
        assert_eq!(punctuation_count("Pas de ponctuation"), 0);
        assert_eq!(punctuation_count("Un. Deux! Trois?"), 3);
        assert_eq!(punctuation_count("..."), 3);
    }

    #[test]
    fn test_paragraph_structure() {
        assert!(has_paragraph_structure("premier\n\nsecond"));
        assert!(has_paragraph_structure("Un. Deux. Trois. Quatre. Cinq."));
        assert!(!has_paragraph_structure("une phrase sans structure"));
    }

    #[test]
    fn test_word_overlap_similarity() {
        assert_eq!(word_overlap_similarity("", ""), 0.0);
        assert_eq!(word_overlap_similarity("a b c", "a b c"), 1.0);
        assert_eq!(word_overlap_similarity("a b c d", "a b x y"), 0.5);
        assert_eq!(word_overlap_similarity("a", "b"), 0.0);
    }
}
