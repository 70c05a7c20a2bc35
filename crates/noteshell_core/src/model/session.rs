//! Session record and token payloads.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    /// Present only when the server returned a profile (registration).
    #[serde(default)]
    pub id: Option<i64>,
}

impl UserIdentity {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            id: None,
        }
    }
}

/// In-memory authentication state.
///
/// # Invariants
/// - `is_authenticated()` holds iff `access_token` is present and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserIdentity>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }

    /// Bearer credential for outgoing requests, if any.
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
    }
}

/// Tokens returned by the login and refresh endpoints.
///
/// The refresh endpoint answers with an access token only; `refresh_token`
/// is then `None` and the current refresh token stays in place.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
            token_type: default_token_type(),
        }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("token_type", &self.token_type)
            .finish()
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Session, TokenPair};

    #[test]
    fn empty_access_token_is_not_authenticated() {
        let session = Session {
            access_token: Some(String::new()),
            ..Session::default()
        };
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn present_access_token_is_authenticated() {
        let session = Session {
            access_token: Some("t1".to_string()),
            ..Session::default()
        };
        assert!(session.is_authenticated());
        assert_eq!(session.bearer(), Some("t1"));
    }

    #[test]
    fn refresh_response_without_refresh_token_parses() {
        let pair: TokenPair =
            serde_json::from_str(r#"{"access_token":"a2","token_type":"bearer"}"#).unwrap();
        assert_eq!(pair.access_token, "a2");
        assert_eq!(pair.refresh_token, None);
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let rendered = format!("{:?}", TokenPair::new("secret-a", "secret-r"));
        assert!(!rendered.contains("secret"));
    }
}
