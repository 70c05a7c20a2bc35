//! Application bootstrap.
//!
//! # Responsibility
//! - Build the application root from `AppConfig`: logging, local storage,
//!   HTTP transport, session store, router and notifier.
//! - Attach the instance to its mount target.
//!
//! # Invariants
//! - At most one instance is mounted per process.
//! - The session store is owned by the app and lent to callers; no
//!   component reaches it through global state.

use crate::api::{ReqwestTransport, Transport, TransportError};
use crate::config::AppConfig;
use crate::logging::init_logging;
use crate::notify::Notifier;
use crate::router::{NavigationOutcome, RouteTable, Router, RouterError};
use crate::session::{SessionError, SessionOptions, SessionStore};
use crate::storage::{open_storage, SqliteLocalStorage, StorageError};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MOUNTED_TARGET: OnceCell<String> = OnceCell::new();

#[derive(Debug)]
pub enum BootstrapError {
    Logging(String),
    Storage(StorageError),
    Transport(TransportError),
    Session(SessionError),
    AlreadyMounted { target: String },
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "http client setup failed: {err}"),
            Self::Session(err) => write!(f, "session restore failed: {err}"),
            Self::AlreadyMounted { target } => {
                write!(f, "application already mounted at `{target}`")
            }
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Logging(_) | Self::AlreadyMounted { .. } => None,
        }
    }
}

impl From<StorageError> for BootstrapError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TransportError> for BootstrapError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<SessionError> for BootstrapError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Application root.
pub struct App<T: Transport = ReqwestTransport> {
    config: AppConfig,
    session: SessionStore<SqliteLocalStorage, T>,
    router: Router,
    notifier: Notifier,
    mounted_at: Option<String>,
}

impl App<ReqwestTransport> {
    /// Full startup: logging, storage file, reqwest transport.
    pub fn bootstrap(config: AppConfig) -> Result<Self, BootstrapError> {
        init_logging(&config.log_level, config.log_dir.as_deref())
            .map_err(BootstrapError::Logging)?;
        let storage = open_storage(&config.storage_path)?;
        let transport = ReqwestTransport::new(&config.api_base_url, config.request_timeout)?;
        Self::assemble(config, storage, transport)
    }
}

impl<T: Transport> App<T> {
    /// Wires already-built parts together. Does not touch logging.
    pub fn assemble(
        config: AppConfig,
        storage: SqliteLocalStorage,
        transport: T,
    ) -> Result<Self, BootstrapError> {
        let options = SessionOptions {
            auto_refresh: config.auto_refresh,
        };
        let session = SessionStore::restore(storage, transport, options)?;
        let notifier = Notifier::new(config.notify_timeout);

        info!(
            "event=app_bootstrap module=app status=ok auto_refresh={} authenticated={}",
            options.auto_refresh,
            session.is_authenticated()
        );

        Ok(Self {
            config,
            session,
            router: Router::new(RouteTable::standard()),
            notifier,
            mounted_at: None,
        })
    }

    /// Attaches this instance to the configured mount target.
    ///
    /// # Errors
    /// - `BootstrapError::AlreadyMounted` when any instance in this process
    ///   is already mounted.
    pub fn mount(&mut self) -> Result<&str, BootstrapError> {
        let target = self.config.mount_target.clone();
        MOUNTED_TARGET
            .set(target.clone())
            .map_err(|_| BootstrapError::AlreadyMounted {
                target: MOUNTED_TARGET.get().cloned().unwrap_or_default(),
            })?;

        info!("event=app_mount module=app status=ok target={target}");
        Ok(self.mounted_at.insert(target).as_str())
    }

    pub fn mounted_at(&self) -> Option<&str> {
        self.mounted_at.as_deref()
    }

    /// Navigates using the current session for the auth guard.
    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, RouterError> {
        self.router.navigate(path, self.session.session())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore<SqliteLocalStorage, T> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<SqliteLocalStorage, T> {
        &mut self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }
}
