pub mod scoring;

pub use scoring::ScoringService;
