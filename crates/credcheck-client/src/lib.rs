//! Analysis clients: the remote HTTP service and an offline simulation.

mod error;
pub mod http;
pub mod simulated;

use async_trait::async_trait;
use credcheck_core::{AnalysisRequest, AnalysisResult};

pub use error::AnalysisError;
pub use http::{HttpAnalyzer, HttpAnalyzerConfig};
pub use simulated::SimulatedAnalyzer;

/// Something that can judge a piece of text.
///
/// One call performs one analysis: no retries and no caching. Implementations
/// must not mutate shared state; the caller records the outcome.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
