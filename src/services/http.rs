//! Shared REST client
//!
//! Thin wrapper over `reqwest` used by every resource service. It owns the
//! base URL, timeout, user agent and optional bearer token, and maps non-2xx
//! responses into [`AdminError::Api`]. A 401 becomes
//! [`AdminError::Authentication`].

use std::path::Path;
use std::time::{Duration, Instant};
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::ApiConfig;
use crate::utils::errors::{AdminError, Result};
use crate::utils::logging::{log_api_call, log_api_error};

/// Error body shapes produced by the two backends
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            return Some(message);
        }
        if let Some(detail) = self.detail {
            return match detail {
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            };
        }
        self.error.filter(|e| !e.is_empty())
    }
}

/// File attached to a multipart form
#[derive(Debug, Clone)]
pub struct FilePart<'a> {
    pub field: &'static str,
    pub path: &'a Path,
}

/// REST client bound to one backend root
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestClient {
    /// Create a client for `base_url` using the timeout and user agent from `api`
    pub fn new(base_url: &str, api: &ApiConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_seconds))
            .user_agent(api.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token will be attached
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Same client with a different bearer token
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    /// Fail early when an endpoint requires a bearer token
    pub fn require_token(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(AdminError::Authentication(
                "This operation requires an access token; log in or pass --token".to_string(),
            ));
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send(&self, req: RequestBuilder, context: &str) -> Result<Response> {
        let request = req.build()?;
        let method = request.method().to_string();
        let url = request.url().to_string();
        let started = Instant::now();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                log_api_error(&url, &e.to_string(), Some(context));
                return Err(AdminError::Http(e));
            }
        };

        let status = response.status();
        log_api_call(&method, &url, status.as_u16(), started.elapsed().as_millis() as u64);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| context.to_string());

        log_api_error(&url, &message, Some(context));
        if status == StatusCode::UNAUTHORIZED {
            return Err(AdminError::Authentication(message));
        }
        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder, context: &str) -> Result<T> {
        let response = self.send(req, context).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            // Some delete endpoints answer 204; let `null`-tolerant types through
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET and decode JSON
    pub async fn get<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        debug!(path = path, "GET");
        self.json(self.request(Method::GET, path), context).await
    }

    /// GET raw bytes, e.g. a PDF document
    pub async fn get_bytes(&self, path: &str, context: &str) -> Result<Vec<u8>> {
        debug!(path = path, "GET bytes");
        let response = self.send(self.request(Method::GET, path), context).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST a JSON body
    pub async fn post_json<B, T>(&self, path: &str, body: &B, context: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path = path, "POST");
        self.json(self.request(Method::POST, path).json(body), context).await
    }

    /// PUT a JSON body
    pub async fn put_json<B, T>(&self, path: &str, body: &B, context: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path = path, "PUT");
        self.json(self.request(Method::PUT, path).json(body), context).await
    }

    /// PATCH without a body
    pub async fn patch<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        debug!(path = path, "PATCH");
        self.json(self.request(Method::PATCH, path), context).await
    }

    /// DELETE and decode the (possibly empty) JSON answer
    pub async fn delete<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        debug!(path = path, "DELETE");
        self.json(self.request(Method::DELETE, path), context).await
    }

    /// Send a multipart form with `method` (POST or PUT)
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        fields: Vec<(&'static str, String)>,
        file: Option<FilePart<'_>>,
        context: &str,
    ) -> Result<T> {
        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some(file) = file {
            form = form.part(file.field, file_part(file.path).await?);
        }

        debug!(path = path, method = %method, "multipart");
        self.json(self.request(method, path).multipart(form), context).await
    }
}

async fn file_part(path: &Path) -> Result<multipart::Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let part = multipart::Part::bytes(bytes)
        .file_name(file_name.clone())
        .mime_str(guess_mime(&file_name))?;
    Ok(part)
}

fn guess_mime(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    match lower.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "Invalid credentials", "detail": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_body_reads_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "Reservation not found"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Reservation not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": [{"loc": ["body", "amount"]}]}"#).unwrap();
        assert!(body.into_message().unwrap().contains("amount"));
    }

    #[test]
    fn test_url_joining() {
        let client = RestClient::new("http://localhost:3000/api/", &crate::Settings::default().api, None).unwrap();
        assert_eq!(client.url("/events/3"), "http://localhost:3000/api/events/3");
        assert_eq!(client.url("events"), "http://localhost:3000/api/events");
    }

    #[test]
    fn test_require_token() {
        let client = RestClient::new("http://localhost", &crate::Settings::default().api, None).unwrap();
        assert!(client.require_token().is_err());
        assert!(client.with_token(Some("abc".to_string())).require_token().is_ok());
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("poster.JPG"), "image/jpeg");
        assert_eq!(guess_mime("banner.webp"), "image/webp");
        assert_eq!(guess_mime("notes"), "application/octet-stream");
    }
}
