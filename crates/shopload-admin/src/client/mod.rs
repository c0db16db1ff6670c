//! HTTP client for the Shopify Admin REST API.

mod images;
mod inventory;
mod products;
mod variants;

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AdminError;
use crate::retry::retry_with_backoff;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Retry behaviour for transient Admin API failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Base delay for exponential back-off: `base * 2^(attempt-1)` ms.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }
}

/// Client for one store's Admin REST API.
///
/// Use [`AdminClient::new`] for a real shop or [`AdminClient::with_base_url`]
/// to point at a mock server in tests.
pub struct AdminClient {
    client: Client,
    access_token: String,
    base_url: Url,
    retry: RetryPolicy,
}

/// Body and `Link` header of a successful response.
struct RawResponse {
    body: String,
    link: Option<String>,
}

impl AdminClient {
    /// Creates a client for `https://{shop_domain}/admin/api/{api_version}/`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`AdminError::InvalidBaseUrl`] if the shop domain does not form a URL.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, AdminError> {
        let base_url = format!("https://{shop_domain}/admin/api/{api_version}/");
        Self::with_base_url(&base_url, access_token, timeout_secs, retry)
    }

    /// Creates a client rooted at an arbitrary base URL (for wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`AdminError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shopload/0.1 (catalog-import)")
            .build()?;

        // Exactly one trailing slash, so relative joins append instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AdminError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
            retry,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AdminError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| AdminError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends one request with retry, mapping non-2xx statuses to typed errors.
    /// `POST` is not idempotent and is re-sent only after a `429`.
    async fn execute<B>(
        &self,
        method: Method,
        url: &Url,
        payload: Option<&B>,
    ) -> Result<RawResponse, AdminError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let idempotent = method != Method::POST;
        retry_with_backoff(
            self.retry.max_retries,
            self.retry.backoff_base_ms,
            idempotent,
            || {
                let method = method.clone();
                async move {
                    let mut request = self
                        .client
                        .request(method, url.clone())
                        .header(ACCESS_TOKEN_HEADER, &self.access_token)
                        .header(reqwest::header::ACCEPT, "application/json");
                    if let Some(body) = payload {
                        request = request.json(body);
                    }

                    let response = request.send().await?;
                    let status = response.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after_secs = parse_retry_after(
                            response
                                .headers()
                                .get(reqwest::header::RETRY_AFTER)
                                .and_then(|v| v.to_str().ok()),
                        );
                        return Err(AdminError::RateLimited {
                            url: url.to_string(),
                            retry_after_secs,
                        });
                    }

                    let link = response
                        .headers()
                        .get(reqwest::header::LINK)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    let body = response.text().await?;

                    if !status.is_success() {
                        return Err(AdminError::Api {
                            status: status.as_u16(),
                            url: url.to_string(),
                            body: error_body(&body),
                        });
                    }

                    Ok(RawResponse { body, link })
                }
            },
        )
        .await
    }

    async fn get_field<T: DeserializeOwned>(
        &self,
        url: &Url,
        field: &str,
    ) -> Result<(T, Option<String>), AdminError> {
        let raw = self.execute::<()>(Method::GET, url, None).await?;
        let value = decode_field(&raw.body, field, url)?;
        Ok((value, raw.link))
    }

    async fn send_field<B, T>(
        &self,
        method: Method,
        url: &Url,
        payload: &B,
        field: &str,
    ) -> Result<T, AdminError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let raw = self.execute(method, url, Some(payload)).await?;
        decode_field(&raw.body, field, url)
    }

    async fn delete(&self, url: &Url) -> Result<(), AdminError> {
        self.execute::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}

/// `{"<key>": value}`, the Admin API's request envelope.
struct Envelope<'a, T> {
    key: &'static str,
    value: &'a T,
}

impl<T: Serialize> Serialize for Envelope<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.value)?;
        map.end()
    }
}

/// Seconds to wait from a `Retry-After` value. The store sends fractional
/// seconds (`"2.0"`); missing or garbled values fall back to 2s.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map_or(2, |secs| secs.ceil() as u64)
}

/// Parses the response envelope and deserializes its `field` member.
fn decode_field<T: DeserializeOwned>(body: &str, field: &str, url: &Url) -> Result<T, AdminError> {
    let context = || format!("{field} from {url}");
    let mut root: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AdminError::Deserialize {
            context: context(),
            source: e,
        })?;
    let member = root
        .get_mut(field)
        .map(serde_json::Value::take)
        .unwrap_or(serde_json::Value::Null);
    serde_json::from_value(member).map_err(|e| AdminError::Deserialize {
        context: context(),
        source: e,
    })
}

/// The store's error payload as JSON; plain-text bodies are kept as a string.
fn error_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_owned()))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
