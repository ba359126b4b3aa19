//! 评分算法处理器
//!
//! 每个处理器是一个无状态的纯函数实现：输入评分请求，输出成绩草稿，
//! 不触碰存储、不持有共享状态，可以被任意并发调用。
//! 处理器集合在进程启动时构建一次，通过算法名称（大小写不敏感）分发。

pub mod automatic;
pub mod keyword_based;

use once_cell::sync::Lazy;

use crate::errors::{Result, ScoringError};
use crate::models::scores::entities::ScoringStatus;
use crate::models::scores::requests::ScoringRequest;

pub use automatic::AutomaticScoringProcessor;
pub use keyword_based::KeywordBasedScoringProcessor;

// 全局注册表：处理器无状态，进程内共享一份即可
static REGISTRY: Lazy<ProcessorRegistry> = Lazy::new(ProcessorRegistry::new);

/// 获取全局处理器注册表
pub fn registry() -> &'static ProcessorRegistry {
    &REGISTRY
}

/// 未指定算法时的默认选择
pub const DEFAULT_ALGORITHM: &str = "AUTOMATIC";

/// 算法输出的成绩草稿
///
/// 草稿由编排器负责落库；处理器返回时状态已是 COMPLETED。
#[derive(Debug, Clone)]
pub struct ScoreDraft {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage_score: f64,
    pub status: ScoringStatus,
    pub scoring_algorithm: String,
    pub grading_details: String,
}

/// 评分处理器契约
pub trait ScoringProcessor: Send + Sync + std::fmt::Debug {
    /// 算法名称标签（写入成绩记录）
    fn algorithm(&self) -> &'static str;

    /// 是否支持给定的算法名称（大小写不敏感）
    fn supports(&self, algorithm: &str) -> bool {
        self.algorithm().eq_ignore_ascii_case(algorithm)
    }

    /// 执行评分，返回成绩草稿
    fn process(&self, request: &ScoringRequest) -> Result<ScoreDraft>;
}

/// 处理器注册表
///
/// 固定的处理器集合，按名称解析；解析失败是配置错误，不可重试。
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn ScoringProcessor>>,
}

impl ProcessorRegistry {
    /// 构建内置处理器集合
    pub fn new() -> Self {
        Self::with_processors(vec![
            Box::new(AutomaticScoringProcessor),
            Box::new(KeywordBasedScoringProcessor),
        ])
    }

    /// 使用给定的处理器集合构建注册表
    pub fn with_processors(processors: Vec<Box<dyn ScoringProcessor>>) -> Self {
        Self { processors }
    }

    /// 按名称解析处理器；空名称回落到默认算法
    pub fn resolve(&self, algorithm: Option<&str>) -> Result<&dyn ScoringProcessor> {
        let name = match algorithm {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => DEFAULT_ALGORITHM,
        };

        self.processors
            .iter()
            .find(|p| p.supports(name))
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                ScoringError::configuration(format!("没有找到支持算法 {name} 的评分处理器"))
            })
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
