use credcheck_core::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The service answered with an explicit `error` payload.
    #[error("{0}")]
    Service(String),
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Service(_) => ErrorKind::ServiceError,
            Self::Timeout(_) | Self::Http(_) | Self::Status { .. } | Self::Json(_) => {
                ErrorKind::TransportError
            }
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e)
        } else {
            Self::Http(e)
        }
    }
}
