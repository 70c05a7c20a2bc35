//! Client-side routing with an authentication guard.
//!
//! # Responsibility
//! - Hold the static route table.
//! - Decide, per navigation, whether to proceed or redirect to login.
//!
//! # Invariants
//! - A `requires_auth` route is never entered while unauthenticated.
//! - The guard is pure: it reads the session and returns a decision.

pub mod guard;
mod routes;

pub use guard::{before_each, NavigationDecision};
pub use routes::{RouteDescriptor, RouteTable, View, LOGIN_PATH};

use crate::model::session::Session;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    UnknownRoute(String),
}

impl Display for RouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRoute(path) => write!(f, "no route matches `{path}`"),
        }
    }
}

impl Error for RouterError {}

/// Where a navigation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Route the caller asked for.
    pub requested: &'static RouteDescriptor,
    /// Route actually entered.
    pub entered: &'static RouteDescriptor,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        self.requested.path != self.entered.path
    }
}

/// Router over a static table. Tracks the current route.
#[derive(Debug)]
pub struct Router {
    routes: RouteTable,
    current: Option<&'static RouteDescriptor>,
}

impl Router {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            current: None,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn current(&self) -> Option<&'static RouteDescriptor> {
        self.current
    }

    /// Resolves `path`, runs the guard and enters the resulting route.
    ///
    /// # Errors
    /// - `RouterError::UnknownRoute` when `path` (or a redirect target) is
    ///   not in the table. The current route is left unchanged.
    pub fn navigate(
        &mut self,
        path: &str,
        session: &Session,
    ) -> Result<NavigationOutcome, RouterError> {
        let requested = self
            .routes
            .resolve(path)
            .ok_or_else(|| RouterError::UnknownRoute(path.to_string()))?;

        let entered = match before_each(requested, session) {
            NavigationDecision::Proceed => requested,
            NavigationDecision::Redirect(target) => {
                info!(
                    "event=navigation module=router status=redirect from={} to={}",
                    requested.path, target
                );
                self.routes
                    .resolve(target)
                    .ok_or_else(|| RouterError::UnknownRoute(target.to_string()))?
            }
        };

        debug!(
            "event=navigation module=router status=ok route={}",
            entered.name
        );
        self.current = Some(entered);
        Ok(NavigationOutcome { requested, entered })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::{Router, RouterError, View};
    use crate::model::session::Session;

    fn signed_in() -> Session {
        Session {
            access_token: Some("t1".to_string()),
            ..Session::default()
        }
    }

    #[test]
    fn unauthenticated_navigation_to_home_lands_on_auth() {
        let mut router = Router::default();
        let outcome = router.navigate("/", &Session::default()).unwrap();
        assert!(outcome.was_redirected());
        assert_eq!(outcome.entered.view, View::Auth);
        assert_eq!(router.current().map(|r| r.path), Some("/auth"));
    }

    #[test]
    fn authenticated_navigation_proceeds() {
        let mut router = Router::default();
        let outcome = router.navigate("/analytics", &signed_in()).unwrap();
        assert!(!outcome.was_redirected());
        assert_eq!(outcome.entered.view, View::Analytics);
    }

    #[test]
    fn unknown_path_keeps_current_route() {
        let mut router = Router::default();
        router.navigate("/auth", &Session::default()).unwrap();
        let err = router.navigate("/settings", &signed_in()).unwrap_err();
        assert_eq!(err, RouterError::UnknownRoute("/settings".to_string()));
        assert_eq!(router.current().map(|r| r.path), Some("/auth"));
    }
}
