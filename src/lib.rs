pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;

pub use config::{AnalysisConfig, Config};
pub use error::{Error, Result};
pub use github::{ActivitySource, GitHubClient};
pub use analysis::AnalysisPipeline;
