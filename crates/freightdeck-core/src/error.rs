// ── Core error types ──
//
// User-facing errors from freightdeck-core. Consumers never see raw HTTP
// status codes or JSON parse failures; the From<freightdeck_api::Error>
// impl translates gateway errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The backend could not be reached (connection refused, DNS failure,
    /// or the 10-second exchange timeout elapsed).
    #[error("Backend unreachable: {reason}")]
    BackendUnreachable { reason: String },

    /// The session is over. The credential has been cleared and a
    /// revocation event broadcast; the user must sign in again.
    #[error("Session expired -- sign in again")]
    Unauthorized,

    #[error("Access forbidden")]
    Forbidden,

    /// The backend rejected the request as invalid.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// The backend answered but is unhealthy (5xx).
    #[error("Server fault (HTTP {status})")]
    ServerFault { status: u16 },

    /// The backend returned a payload we could not make sense of.
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    /// Report export failed while writing rows.
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<freightdeck_api::Error> for CoreError {
    fn from(err: freightdeck_api::Error) -> Self {
        match err {
            freightdeck_api::Error::Transport(ref e) => Self::BackendUnreachable {
                reason: if e.is_timeout() {
                    "request timed out".into()
                } else {
                    e.to_string()
                },
            },
            freightdeck_api::Error::InvalidUrl(e) => Self::Rejected {
                message: format!("invalid URL: {e}"),
            },
            freightdeck_api::Error::Unauthorized => Self::Unauthorized,
            freightdeck_api::Error::Forbidden => Self::Forbidden,
            freightdeck_api::Error::ServerFault { status, .. } => Self::ServerFault { status },
            freightdeck_api::Error::Rejected { detail, .. } => Self::Rejected { message: detail },
            freightdeck_api::Error::Deserialization { message, .. } => {
                Self::MalformedPayload { message }
            }
        }
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}
