//! Client-side domain model.
//!
//! # Responsibility
//! - Define the session record owned by the session store.
//! - Define request/response payload shapes of the remote notes API.
//!
//! # Invariants
//! - `Session::is_authenticated()` is derived from the access token only.
//! - `Credentials` never appear in `Debug` output with the password.

pub mod credentials;
pub mod note;
pub mod session;
