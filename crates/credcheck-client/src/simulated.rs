//! Offline analyzer reproducing the marketing demo's preview results.
//!
//! Text mentioning any of a few trigger words is reported as misinformation;
//! everything else as authentic. No network access, never fails.

use std::time::Duration;

use async_trait::async_trait;
use credcheck_core::{AnalysisRequest, AnalysisResult, Confidence, Verdict};
use tracing::info;

use crate::{AnalysisError, Analyzer};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Shown next to simulated results.
pub const DISCLAIMER: &str =
    "This is a demonstration. Results are simulated for preview purposes.";

const SUSPICIOUS_WORDS: &[&str] = &["breaking", "mandatory", "diamonds"];

const SUSPICIOUS_CONFIDENCE: u8 = 87;
const SUSPICIOUS_EXPLANATION: &str = "This content contains sensationalist language patterns \
     and unverified claims commonly associated with misinformation.";
const SUSPICIOUS_FLAGS: &[&str] = &[
    "Sensationalist headline",
    "Unverified claims",
    "Emotional manipulation patterns",
];

const AUTHENTIC_CONFIDENCE: u8 = 94;
const AUTHENTIC_EXPLANATION: &str = "This content follows factual reporting patterns \
     with verifiable claims and balanced language.";

pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl Default for SimulatedAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Analyzer for SimulatedAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let result = simulate(request.text());
        info!(verdict = %result.verdict, "simulated analysis");
        Ok(result)
    }
}

fn simulate(text: &str) -> AnalysisResult {
    let lower = text.to_lowercase();
    let suspicious = SUSPICIOUS_WORDS.iter().any(|w| lower.contains(w));

    if suspicious {
        AnalysisResult {
            verdict: Verdict::Fake,
            confidence: Confidence::saturating(SUSPICIOUS_CONFIDENCE),
            explanation: SUSPICIOUS_EXPLANATION.to_string(),
            red_flags: SUSPICIOUS_FLAGS.iter().map(|s| s.to_string()).collect(),
        }
    } else {
        AnalysisResult {
            verdict: Verdict::Real,
            confidence: Confidence::saturating(AUTHENTIC_CONFIDENCE),
            explanation: AUTHENTIC_EXPLANATION.to_string(),
            red_flags: Vec::new(),
        }
    }
}
