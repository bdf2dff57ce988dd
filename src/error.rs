// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Api(ApiError),
}

/// Failures reported by the remote image API.
///
/// Aborted requests are not errors and never reach this type: the request
/// sequencer classifies them separately so no error UI is produced for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    Transport(String),

    /// The server answered with a non-success status.
    Status { code: u16, message: String },

    /// The response body did not have the expected shape.
    Malformed(String),
}

impl ApiError {
    /// Returns the notification key used when this error is surfaced.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "error-api-transport",
            ApiError::Status { .. } => "error-api-status",
            ApiError::Malformed(_) => "error-api-malformed",
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { code, .. } => *code >= 500,
            ApiError::Malformed(_) => false,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status { code, message } if message.is_empty() => {
                write!(f, "Server returned status {}", code)
            }
            ApiError::Status { code, message } => {
                write!(f, "Server returned status {}: {}", code, message)
            }
            ApiError::Malformed(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Api(e) => write!(f, "API Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn api_error_wraps_into_crate_error() {
        let err: Error = ApiError::Malformed("expected array".into()).into();
        assert_eq!(
            format!("{}", err),
            "API Error: Invalid API response: expected array"
        );
    }

    #[test]
    fn status_display_omits_empty_message() {
        let err = ApiError::Status {
            code: 404,
            message: String::new(),
        };
        assert_eq!(format!("{}", err), "Server returned status 404");
    }

    #[test]
    fn transient_classification() {
        assert!(ApiError::Transport("timeout".into()).is_transient());
        assert!(ApiError::Status {
            code: 503,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::Status {
            code: 403,
            message: String::new()
        }
        .is_transient());
        assert!(!ApiError::Malformed("object".into()).is_transient());
    }

    #[test]
    fn api_error_i18n_keys() {
        assert_eq!(
            ApiError::Transport(String::new()).i18n_key(),
            "error-api-transport"
        );
        assert_eq!(
            ApiError::Malformed(String::new()).i18n_key(),
            "error-api-malformed"
        );
    }
}
