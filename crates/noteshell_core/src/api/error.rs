use std::error::Error;
use std::fmt::{Display, Formatter};

/// Transport-level failure of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server could not be reached or the connection broke.
    Network(String),
    /// The server answered with a non-success status.
    Status {
        status: u16,
        /// `detail` field of the error body, when the server sent one.
        detail: Option<String>,
    },
    /// The request body could not be serialized.
    Encode(String),
    /// The response body did not match the expected shape.
    Decode(String),
    /// A local precondition failed, so nothing was sent.
    NotSent(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Status {
                status,
                detail: Some(detail),
            } => write!(f, "HTTP {status}: {detail}"),
            Self::Status {
                status,
                detail: None,
            } => write!(f, "HTTP {status}"),
            Self::Encode(message) => write!(f, "invalid request body: {message}"),
            Self::Decode(message) => write!(f, "unexpected response body: {message}"),
            Self::NotSent(reason) => write!(f, "request not sent: {reason}"),
        }
    }
}

impl Error for TransportError {}
