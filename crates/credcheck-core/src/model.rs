//! Shared types for the analysis request lifecycle.
//!
//! The JSON shapes here match the remote analysis service's contract:
//! requests are `{"text": ...}` and results carry `verdict`, `confidence`,
//! `explanation` and `redFlags`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text submitted for analysis. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Build a request from candidate text, or `None` if it is blank after trimming.
    pub fn new(candidate: &str) -> Option<Self> {
        let text = candidate.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The service's categorical judgment on a text sample.
///
/// Unrecognised strings are kept in [`Verdict::Other`] instead of failing
/// the parse, so presentation can fall back to the uncertain branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Real,
    Fake,
    Uncertain,
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Real => "real",
            Self::Fake => "fake",
            Self::Uncertain => "uncertain",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        match s.as_str() {
            "real" => Self::Real,
            "fake" => Self::Fake,
            "uncertain" => Self::Uncertain,
            _ => Self::Other(s),
        }
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("confidence {0} is outside 0..=100")]
pub struct ConfidenceOutOfRange(pub i64);

/// Integer percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ConfidenceOutOfRange> {
        Self::try_from(i64::from(value))
    }

    /// Clamp `value` into range.
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = ConfidenceOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= Self::MAX => Ok(Self(v)),
            _ => Err(ConfidenceOutOfRange(value)),
        }
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A settled analysis from the service.
///
/// `red_flags` is usually empty for `real` verdicts, but nothing here
/// enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub explanation: String,
    #[serde(rename = "redFlags", default)]
    pub red_flags: Vec<String>,
}

/// Why a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service answered but explicitly rejected or flagged the input.
    ServiceError,
    /// Network failure, timeout, bad status, or unparsable body.
    TransportError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceError => "service_error",
            Self::TransportError => "transport_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of the single analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(AnalysisResult),
    Failed { kind: ErrorKind, message: String },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The stored result, present only in `Succeeded`.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded(_) => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}
