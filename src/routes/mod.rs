pub mod scoring;

pub use scoring::configure_scoring_routes;
