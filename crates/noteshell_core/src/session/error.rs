use crate::api::TransportError;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Failure of a session store operation.
#[derive(Debug)]
pub enum SessionError {
    /// Login request failed.
    Authentication(TransportError),
    /// Registration request failed.
    Registration(TransportError),
    /// Refresh failed or could not be attempted; the session may have
    /// expired.
    TokenRefresh(TransportError),
    /// Authenticated notes/analytics request failed.
    Request(TransportError),
    /// Local storage could not be read or written.
    Storage(StorageError),
}

impl SessionError {
    /// Underlying transport failure, if this error came from the network.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Authentication(err)
            | Self::Registration(err)
            | Self::TokenRefresh(err)
            | Self::Request(err) => Some(err),
            Self::Storage(_) => None,
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication(err) => write!(f, "login failed: {err}"),
            Self::Registration(err) => write!(f, "registration failed: {err}"),
            Self::TokenRefresh(err) => write!(f, "token refresh failed: {err}"),
            Self::Request(err) => write!(f, "request failed: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Authentication(err)
            | Self::Registration(err)
            | Self::TokenRefresh(err)
            | Self::Request(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for SessionError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
