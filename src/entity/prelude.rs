//! 预导入模块，方便使用

pub use super::grading_results::{
    ActiveModel as GradingResultActiveModel, Entity as GradingResults, Model as GradingResultModel,
};
pub use super::scores::{ActiveModel as ScoreActiveModel, Entity as Scores, Model as ScoreModel};
