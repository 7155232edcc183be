use crewdesk_core::{CrewdeskError, CrewdeskResult, TokenSource};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Production API endpoint, used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.crewdesk.io";

/// Environment variable selecting the API base URL.
pub const BASE_URL_ENV: &str = "CREWDESK_API_URL";

/// Fallback message when a failure carries no usable message of its own.
pub const GENERIC_SERVER_ERROR: &str = "Unexpected server error";

/// The `{ "data": ... }` envelope every successful API response is wrapped in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Envelope<T> {
    /// The payload, absent when the server returned an empty envelope.
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Single chokepoint for all outbound calls to the Crewdesk API.
///
/// Attaches the bearer token read from the session cell (when present),
/// negotiates JSON, and normalizes every failure into a [`CrewdeskError`]
/// whose `Display` is a single human-readable message. Stateless per call
/// apart from the token read; no retries, no caching.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    /// Creates a client against `base_url`, reading tokens from `tokens`
    /// before every request. A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    /// The base URL this client sends to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`, with optional query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> CrewdeskResult<Option<T>> {
        let mut request = self.request(reqwest::Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(path, request).await
    }

    /// POST `path` with an optional JSON body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> CrewdeskResult<Option<T>> {
        let mut request = self.request(reqwest::Method::POST, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(path, request).await
    }

    /// PUT `path` with a JSON body.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> CrewdeskResult<Option<T>> {
        let request = self.request(reqwest::Method::PUT, path).json(body);
        self.execute(path, request).await
    }

    /// DELETE `path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> CrewdeskResult<Option<T>> {
        let request = self.request(reqwest::Method::DELETE, path);
        self.execute(path, request).await
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(token) = self.tokens.token() {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Sends the request and unwraps the response envelope.
    ///
    /// Failure message priority: server-provided `message` field, then the
    /// transport error's own message, then [`GENERIC_SERVER_ERROR`].
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> CrewdeskResult<Option<T>> {
        let response = request
            .send()
            .await
            .map_err(|e| CrewdeskError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CrewdeskError::Network(e.to_string()))?;

        debug!(path = %path, status = status.as_u16(), "api response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
            return Err(CrewdeskError::Server {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(None);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|e| CrewdeskError::Contract(format!("malformed response body: {e}")))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let envelope: Envelope<Vec<Value>> =
            serde_json::from_str(r#"{"data":[{"id":1}]}"#).unwrap();
        assert_eq!(envelope.data.unwrap().len(), 1);
    }

    #[test]
    fn test_envelope_missing_data_field() {
        let envelope: Envelope<Vec<Value>> = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_null_data() {
        let envelope: Envelope<Value> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_error_body_without_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"errors":{}}"#).unwrap();
        assert!(body.message.is_none());
    }
}
