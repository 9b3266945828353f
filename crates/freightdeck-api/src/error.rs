use thiserror::Error;

/// Top-level error type for the `freightdeck-api` crate.
///
/// One variant per failure class the backend can produce. The gateway's
/// central response handler maps HTTP status codes onto these;
/// `freightdeck-core` translates them into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authorization ───────────────────────────────────────────────
    /// 401 from the backend. The stored credential has already been
    /// cleared and a session-revoked event broadcast by the time the
    /// caller sees this.
    #[error("Unauthorized -- credential rejected")]
    Unauthorized,

    /// 403 from the backend. Logged centrally; no credential change.
    #[error("Access forbidden")]
    Forbidden,

    // ── Backend ─────────────────────────────────────────────────────
    /// 5xx from the backend, with the response payload for debugging.
    #[error("Server fault (HTTP {status})")]
    ServerFault { status: u16, body: String },

    /// Any other 4xx -- the backend rejected the request as invalid.
    /// `detail` carries the FastAPI-style `{"detail": ...}` message.
    #[error("Request rejected (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the backend could not be reached at all
    /// (connection refused, DNS failure, or exchange timeout).
    pub fn is_unreachable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::ServerFault { status, .. } | Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
