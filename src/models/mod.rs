pub mod common;
pub mod grading_results;
pub mod scores;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

// 应用启动时间（用于记录预处理耗时）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
