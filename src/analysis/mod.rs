pub mod insights;
pub mod normalizer;
pub mod patterns;
pub mod pipeline;
pub mod profiler;

pub use insights::InsightGenerator;
pub use normalizer::Normalizer;
pub use patterns::PatternAnalyzer;
pub use pipeline::AnalysisPipeline;
pub use profiler::Profiler;

/// Division that returns 0.0 instead of failing on a zero denominator.
pub(crate) fn safe_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
