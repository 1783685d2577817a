use thiserror::Error;

/// Failures from the stats API. `Clone` so one cached fetch can hand the
/// same error to every waiting caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {message}")]
    Network { path: String, message: String },

    #[error("{path} answered with HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("could not decode {path}: {message}")]
    Parse { path: String, message: String },
}

impl ApiError {
    pub fn network(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("canvas #{0} not found")]
    MissingCanvas(String),

    #[error("{0}")]
    Library(String),
}
