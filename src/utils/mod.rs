pub mod parameter_error_handler;
pub mod rounding;
pub mod text_metrics;
pub mod validate;

pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use rounding::{percentage_of, round2};
