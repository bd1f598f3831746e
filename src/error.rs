use thiserror::Error;

#[derive(Error, Debug)]
pub enum HypeError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unsupported ticker: {0}")]
    UnknownTicker(String),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HypeError>;

/// Failure kinds a probe can hit. These never escape a probe as errors; they
/// become the absent arm of a signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("credential rejected (HTTP {0})")]
    Auth(u16),

    #[error("not found (HTTP 404)")]
    NotFound,

    #[error("unexpected status: HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid repository identifier: {0}")]
    InvalidRepository(String),
}

impl ProbeError {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ProbeError::Auth(status),
            404 => ProbeError::NotFound,
            other => ProbeError::Status(other),
        }
    }

    /// Short reason shown next to "data unavailable" in reports.
    pub fn reason(&self) -> &'static str {
        match self {
            ProbeError::Transport(_) => "network error",
            ProbeError::Auth(_) => "access denied",
            ProbeError::NotFound => "not found",
            ProbeError::Status(_) => "service error",
            ProbeError::Malformed(_) => "unexpected response",
            ProbeError::InvalidRepository(_) => "bad repository link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_credential_and_missing_statuses() {
        assert_eq!(ProbeError::from_status(401), ProbeError::Auth(401));
        assert_eq!(ProbeError::from_status(403), ProbeError::Auth(403));
        assert_eq!(ProbeError::from_status(404), ProbeError::NotFound);
        assert_eq!(ProbeError::from_status(502), ProbeError::Status(502));
    }
}
