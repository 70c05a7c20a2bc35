//! Login/registration payload.

use serde::Serialize;

/// Email and password submitted to the auth endpoints. Never persisted.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Credentials;

    #[test]
    fn serializes_as_login_payload() {
        let value = serde_json::to_value(Credentials::new("u@x.com", "p")).unwrap();
        assert_eq!(value, serde_json::json!({"email": "u@x.com", "password": "p"}));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("u@x.com", "hunter2"));
        assert!(rendered.contains("u@x.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
