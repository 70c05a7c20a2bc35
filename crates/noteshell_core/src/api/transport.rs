//! Request/response envelopes and the `Transport` seam.

use super::TransportError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One outgoing API request.
///
/// `path` is relative to the API base. The bearer credential travels with
/// the request itself.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Attaches a JSON body.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, TransportError> {
        let value =
            serde_json::to_value(body).map_err(|err| TransportError::Encode(err.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attaches the bearer credential. `None` leaves the request anonymous.
    pub fn bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.map(str::to_string);
        self
    }

    /// Value of the `Authorization` header this request must carry.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Bodies may hold passwords; tokens are secrets.
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Raw response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Passes success responses through and maps the rest to
    /// `TransportError::Status`, keeping the server's `detail` if present.
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(TransportError::Status {
            status: self.status,
            detail: extract_detail(&self.body),
        })
    }
}

/// Sends requests to the API. Implementations resolve `path` against their
/// base URL and set the `Authorization` header from `request.bearer`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Decodes a success body into `T`.
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TransportError> {
    serde_json::from_str(&response.body).map_err(|err| TransportError::Decode(err.to_string()))
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Null => None,
        // Validation failures carry a list of error objects.
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpRequest, HttpResponse};
    use crate::api::TransportError;

    #[test]
    fn bearer_builds_authorization_header() {
        let request = HttpRequest::get("/notes/").bearer(Some("A"));
        assert_eq!(request.authorization().as_deref(), Some("Bearer A"));
        assert_eq!(HttpRequest::get("/notes/").authorization(), None);
    }

    #[test]
    fn error_for_status_keeps_string_detail() {
        let err = HttpResponse::new(401, r#"{"detail":"Invalid email or password."}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 401,
                detail: Some("Invalid email or password.".to_string()),
            }
        );
    }

    #[test]
    fn error_for_status_tolerates_non_json_body() {
        let err = HttpResponse::new(502, "<html>bad gateway</html>")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(
            err,
            TransportError::Status {
                status: 502,
                detail: None
            }
        );
    }

    #[test]
    fn created_is_success() {
        assert!(HttpResponse::new(201, "{}").error_for_status().is_ok());
        assert!(HttpResponse::new(204, "").is_success());
    }

    #[test]
    fn debug_output_hides_bearer() {
        let rendered = format!("{:?}", HttpRequest::get("/notes/").bearer(Some("secret")));
        assert!(!rendered.contains("secret"));
    }
}
