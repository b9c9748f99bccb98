//! JSON-over-HTTP transport shared by every gateway.
//!
//! One request per call: nothing here retries. A bearer token is attached
//! whenever the injected session holds one.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use lakwatsero_core::identity::SessionHandle;
use lakwatsero_core::repository::{GatewayError, GatewayResult};
use lakwatsero_shared::Masked;

use crate::app_config::ApiConfig;

const DEFAULT_STATUS_MESSAGE: &str = "Request to booking service failed";

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionHandle,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionHandle) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.token().await {
            Some(token) => with_bearer(builder, &token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let builder = self.request(Method::GET, path).await;
        decode(send(builder).await?)
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> GatewayResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path).await.query(query);
        decode(send(builder).await?)
    }

    /// GET with an explicit token, used right after login before the
    /// session has been stored.
    pub async fn get_with_token<T: DeserializeOwned>(&self, path: &str, token: &Masked<String>) -> GatewayResult<T> {
        let builder = with_bearer(self.client.get(self.url(path)), token);
        decode(send(builder).await?)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).await.json(body);
        decode(send(builder).await?)
    }

    /// POST whose response body is irrelevant.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GatewayResult<()> {
        let builder = self.request(Method::POST, path).await.json(body);
        send(builder).await.map(|_| ())
    }

    /// PATCH with an empty JSON object, the shape the status endpoints take.
    pub async fn patch_empty(&self, path: &str) -> GatewayResult<()> {
        let builder = self
            .request(Method::PATCH, path)
            .await
            .json(&serde_json::json!({}));
        send(builder).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> GatewayResult<()> {
        let builder = self.request(Method::DELETE, path).await;
        send(builder).await.map(|_| ())
    }
}

fn with_bearer(builder: RequestBuilder, token: &Masked<String>) -> RequestBuilder {
    builder.header(AUTHORIZATION, format!("Bearer {}", token.expose()))
}

async fn send(builder: RequestBuilder) -> GatewayResult<String> {
    let response = builder
        .send()
        .await
        .map_err(|e| GatewayError::Transport(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();

    if status.is_success() {
        debug!("{} {}", status.as_u16(), url);
        return Ok(body);
    }

    warn!("{} {}", status.as_u16(), url);
    if status == StatusCode::UNAUTHORIZED {
        return Err(GatewayError::Unauthorized);
    }

    let message = extract_error_message(&body).unwrap_or_else(|| {
        if status.is_server_error() {
            "Server error".to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    Err(GatewayError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn decode<T: DeserializeOwned>(body: String) -> GatewayResult<T> {
    serde_json::from_str(&body).map_err(|e| GatewayError::Decode(format!("Failed to parse response: {}", e)))
}

/// `{"error": "..."}` is what the booking backend sends; `{"message": "..."}`
/// is accepted too.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed.get("error").and_then(|error| error.as_str()) {
        return Some(msg.to_string());
    }

    parsed
        .get("message")
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}
