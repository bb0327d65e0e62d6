//! Authenticated JSON client.

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value, json};
use spa_store::{KeyValueStore, SessionStore};
use tracing::{debug, error, info, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Value,
}

/// JSON API client bound to a session.
///
/// Every request goes through [`ApiClient::call`]. No retries are attempted.
pub struct ApiClient<K> {
    client: Client,
    base_url: String,
    session: SessionStore<K>,
}

impl<K: KeyValueStore> ApiClient<K> {
    /// Create a client for `config.base_url` that reads and writes `session`.
    pub fn new(config: &ApiConfig, session: SessionStore<K>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore<K> {
        &self.session
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send one JSON request to `endpoint` (relative to the base URL).
    ///
    /// A non-success status becomes [`ApiError::Http`] whose message is the
    /// body's `detail` field, or `API Error: <status>` when there is none.
    /// An empty success body yields `Value::Null`.
    pub fn call(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(endpoint);
        debug!(%method, %url, "API request");

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token()? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|err| {
            error!(%url, "API Error: {err}");
            ApiError::Network(err)
        })?;

        let status = response.status();
        let text = response.text().map_err(ApiError::Network)?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &text);
            error!(%url, status = status.as_u16(), "API Error: {message}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|err| {
            error!(%url, "API Error: {err}");
            ApiError::JsonParse(err)
        })
    }

    /// Exchange credentials for a token and remember both token and user.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let body = json!({ "username": username, "password": password });
        let data = self
            .call(Method::POST, "/login", Some(&body))
            .inspect_err(|err| error!("Login failed: {err}"))?;

        if data.get("access_token").and_then(Value::as_str).is_none() {
            error!("Login failed: no access token in response");
            return Err(ApiError::MissingToken);
        }
        let login: LoginResponse = serde_json::from_value(data)?;

        self.session.set_token(&login.access_token)?;
        if !login.user.is_null() {
            self.session.set_user(&login.user)?;
        }
        info!("Logged in as {username}");
        Ok(login)
    }

    /// Tell the server the session is over, then forget it locally.
    ///
    /// The remote call is best-effort; local state is cleared regardless.
    pub fn logout(&self) -> Result<()> {
        match self.session.token() {
            Ok(Some(_)) => {
                if let Err(err) = self.call(Method::POST, "/logout", None) {
                    error!("Logout error: {err}");
                }
            }
            Ok(None) => debug!("No session token, skipping remote logout"),
            Err(err) => warn!("Could not read session token: {err}"),
        }

        self.session.clear()?;
        info!("Session cleared");
        Ok(())
    }

    /// Fetch `/me` and cache the result as the current user.
    pub fn current_user(&self) -> Result<Value> {
        let user = self
            .call(Method::GET, "/me", None)
            .inspect_err(|err| error!("Failed to get current user: {err}"))?;
        self.session.set_user(&user)?;
        Ok(user)
    }

    pub fn get_all(&self, resource: &str) -> Result<Value> {
        self.call(Method::GET, &collection_path(resource), None)
    }

    pub fn get_one(&self, resource: &str, id: &str) -> Result<Value> {
        self.call(Method::GET, &item_path(resource, id), None)
    }

    pub fn create(&self, resource: &str, data: &Value) -> Result<Value> {
        self.call(Method::POST, &collection_path(resource), Some(data))
    }

    pub fn update(&self, resource: &str, id: &str, data: &Value) -> Result<Value> {
        self.call(Method::PUT, &item_path(resource, id), Some(data))
    }

    pub fn remove(&self, resource: &str, id: &str) -> Result<Value> {
        self.call(Method::DELETE, &item_path(resource, id), None)
    }
}

fn collection_path(resource: &str) -> String {
    format!("/{resource}")
}

fn item_path(resource: &str, id: &str) -> String {
    format!("/{resource}/{id}")
}

/// Message for a failed response: the body's `detail` string if it has one.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|data| {
            data.get("detail")
                .and_then(Value::as_str)
                .filter(|detail| !detail.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("API Error: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spa_store::MemoryStore;

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(401, r#"{"detail": "Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(error_message(500, "{}"), "API Error: 500");
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "API Error: 502");
        assert_eq!(error_message(400, r#"{"detail": ""}"#), "API Error: 400");
        assert_eq!(error_message(422, r#"{"detail": [1, 2]}"#), "API Error: 422");
    }

    #[test]
    fn test_paths() {
        assert_eq!(collection_path("expense"), "/expense");
        assert_eq!(item_path("expense", "7"), "/expense/7");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = ApiConfig::default().with_base_url("http://example.test/api/");
        let client = ApiClient::new(&config, SessionStore::new(MemoryStore::new())).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.url("/me"), "http://example.test/api/me");
    }
}
