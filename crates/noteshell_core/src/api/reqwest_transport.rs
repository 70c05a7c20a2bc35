//! `Transport` over `reqwest`.

use super::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use log::{debug, warn};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// HTTP transport bound to one API base URL (e.g. `http://host/api/v1`).
pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport. `timeout = None` keeps reqwest's default
    /// behaviour, which never times out.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request_id = Uuid::new_v4();
        let started_at = Instant::now();
        let url = self.url_for(&request.path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        debug!(
            "event=http_request module=api status=start request_id={request_id} method={} path={} authenticated={}",
            request.method.as_str(),
            request.path,
            request.bearer.is_some()
        );

        let response = builder.send().await.map_err(|err| {
            warn!(
                "event=http_request module=api status=error request_id={request_id} method={} path={} duration_ms={} error_code=network error={}",
                request.method.as_str(),
                request.path,
                started_at.elapsed().as_millis(),
                err
            );
            TransportError::Network(err.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;

        debug!(
            "event=http_request module=api status=done request_id={request_id} method={} path={} http_status={} duration_ms={}",
            request.method.as_str(),
            request.path,
            status,
            started_at.elapsed().as_millis()
        );

        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::ReqwestTransport;

    #[test]
    fn url_for_joins_without_double_slash() {
        let transport = ReqwestTransport::new("http://localhost:8001/api/v1/", None).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8001/api/v1");
        assert_eq!(
            transport.url_for("/notes/"),
            "http://localhost:8001/api/v1/notes/"
        );
    }
}
