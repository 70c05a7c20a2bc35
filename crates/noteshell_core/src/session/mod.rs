//! Session store: authentication state plus authenticated API calls.
//!
//! # Responsibility
//! - Own the in-memory `Session` and mirror its tokens into local storage.
//! - Perform login/register/refresh/logout against the auth endpoints.
//! - Attach the current bearer token to every notes/analytics request.
//!
//! # Invariants
//! - Tokens change only after a successful, decodable auth response.
//! - Durable token keys are written before memory, in one transaction.
//! - Transport failures propagate to the caller unchanged, wrapped by the
//!   operation kind. Nothing is retried unless `auto_refresh` is enabled.

mod error;
mod store;

pub use error::{SessionError, SessionResult};
pub use store::{SessionOptions, SessionStore};
