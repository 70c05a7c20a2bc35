//! Navigation guard run before every route change.

use super::routes::{RouteDescriptor, LOGIN_PATH};
use crate::model::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(&'static str),
}

/// Redirects to the login route iff `to` requires auth and the session
/// is unauthenticated.
pub fn before_each(to: &RouteDescriptor, session: &Session) -> NavigationDecision {
    if to.requires_auth && !session.is_authenticated() {
        NavigationDecision::Redirect(LOGIN_PATH)
    } else {
        NavigationDecision::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::{before_each, NavigationDecision};
    use crate::model::session::Session;
    use crate::router::RouteTable;

    #[test]
    fn every_protected_route_redirects_when_signed_out() {
        let session = Session::default();
        for route in RouteTable::standard().all() {
            let decision = before_each(route, &session);
            if route.requires_auth {
                assert_eq!(decision, NavigationDecision::Redirect("/auth"));
            } else {
                assert_eq!(decision, NavigationDecision::Proceed);
            }
        }
    }

    #[test]
    fn every_route_proceeds_when_signed_in() {
        let session = Session {
            access_token: Some("t1".to_string()),
            refresh_token: Some("r1".to_string()),
            user: None,
        };
        for route in RouteTable::standard().all() {
            assert_eq!(before_each(route, &session), NavigationDecision::Proceed);
        }
    }
}
