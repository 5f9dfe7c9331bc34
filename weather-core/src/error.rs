use std::fmt;

use thiserror::Error;

/// Which outbound call an upstream failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocoding,
    Conditions,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocoding => "geocoding",
            Stage::Conditions => "conditions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one of the two providers. The underlying cause is kept as-is.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{stage} request failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("{stage} request failed with status {status}: {body}")]
    Status {
        stage: Stage,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{stage} response could not be parsed: {source}")]
    Payload {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    pub fn stage(&self) -> Stage {
        match self {
            UpstreamError::Transport { stage, .. }
            | UpstreamError::Status { stage, .. }
            | UpstreamError::Payload { stage, .. } => *stage,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Transport { source, .. } if source.is_timeout())
    }
}

/// Everything `lookup_weather` and the `get-weather` tool can fail with.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Input missing, empty, or not shaped like the tool input.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("Location '{query}' not found")]
    NotFound { query: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The shaped result does not satisfy the output contract.
    #[error("result violates the output contract: {0}")]
    Contract(String),
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound { .. })
    }
}
