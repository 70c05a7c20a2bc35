//! HTTP plumbing for the remote notes API.
//!
//! # Responsibility
//! - Describe one outgoing request with its credential attached explicitly.
//! - Abstract the wire behind the `Transport` seam so session logic is
//!   testable without a network.
//! - Map non-success statuses and undecodable bodies to `TransportError`.
//!
//! # Invariants
//! - A request carries `Authorization: Bearer <token>` iff its `bearer`
//!   field is set. There is no shared default header.

pub mod endpoints;
mod error;
mod reqwest_transport;
mod transport;

pub use error::TransportError;
pub use reqwest_transport::ReqwestTransport;
pub use transport::{decode_json, HttpMethod, HttpRequest, HttpResponse, Transport};
