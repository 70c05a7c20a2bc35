//! Core of the noteshell client.
//! This crate is the single source of truth for session invariants.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod router;
pub mod session;
pub mod storage;
pub mod validation;

pub use api::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use app::{App, BootstrapError};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use model::credentials::Credentials;
pub use model::note::{Note, NoteAnalytics, NoteId};
pub use model::session::{Session, TokenPair, UserIdentity};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use router::{
    NavigationDecision, NavigationOutcome, RouteDescriptor, RouteTable, Router, RouterError, View,
};
pub use session::{SessionError, SessionOptions, SessionResult, SessionStore};
pub use storage::{open_storage, open_storage_in_memory, LocalStorage, SqliteLocalStorage};
pub use validation::{validate_email, validate_password_strength, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
