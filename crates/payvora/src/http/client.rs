// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Provides the HTTP client integration for the [Payvora](https://payvora.com) REST API.
//!
//! This module defines and implements a [`PayvoraHttpClient`] for dispatching signed
//! requests to arbitrary Payvora endpoints. It validates caller-supplied arguments,
//! computes the HMAC-SHA256 request signature, attaches the authentication headers,
//! and forwards the request over the underlying [`reqwest::Client`].
//!
//! The client is a thin pass-through boundary: responses come back as a
//! [`PayvoraHttpResponse`] regardless of HTTP status, and all business semantics are
//! left to the remote API and the caller.

use std::{borrow::Cow, sync::Arc, time::Duration};

use bytes::Bytes;
use chrono::Utc;
use reqwest::{
    Method, Request, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{PayvoraErrorResponse, PayvoraHttpError};
use crate::common::{
    consts::{
        PAYVORA_API_KEY_HEADER, PAYVORA_HTTP_URL, PAYVORA_SIGNATURE_HEADER,
        PAYVORA_TIMESTAMP_HEADER, PAYVORA_USER_AGENT,
    },
    credential::Credential,
    env::get_env_var,
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Represents a Payvora HTTP response.
///
/// Returned for every delivered request, including non-2xx statuses, so callers
/// can interpret HTTP status codes themselves.
#[derive(Debug, Clone)]
pub struct PayvoraHttpResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The raw response body.
    pub body: Bytes,
}

impl PayvoraHttpResponse {
    /// Deserializes the response body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, PayvoraHttpError> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Returns the response body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Provides a lower-level HTTP client for the [Payvora](https://payvora.com) REST API.
///
/// This client wraps the underlying [`reqwest::Client`] to handle functionality
/// specific to Payvora, such as request signing and forming request URLs.
#[derive(Debug, Clone)]
pub(crate) struct PayvoraHttpInnerClient {
    base_url: String,
    client: reqwest::Client,
    credential: Credential,
}

impl PayvoraHttpInnerClient {
    /// Creates a new [`PayvoraHttpInnerClient`] using the default Payvora HTTP URL,
    /// optionally overridden with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP transport cannot be constructed.
    fn new(
        credential: Credential,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, PayvoraHttpError> {
        let client = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(
                timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| PayvoraHttpError::BuildError(e.to_string()))?;

        Ok(Self {
            base_url: base_url.unwrap_or_else(|| PAYVORA_HTTP_URL.to_string()),
            client,
            credential,
        })
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(PAYVORA_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Builds a fully formed, signed request for the given arguments.
    ///
    /// The signing string is `path + timestamp + method + body`, where the body
    /// segment is the empty string for GET requests and the JSON serialization of
    /// `params` (defaulting to `{}`) otherwise. For GET/DELETE the params become
    /// URL query parameters; for POST/PUT the exact signed JSON string is sent as
    /// the request body.
    fn build_request(
        &self,
        method: &Method,
        path: &str,
        params: Option<Value>,
        timestamp: i64,
    ) -> Result<Request, PayvoraHttpError> {
        if !path.starts_with('/') {
            return Err(PayvoraHttpError::ValidationError(format!(
                "path must start with '/', was '{path}'"
            )));
        }

        let params: Map<String, Value> = match params {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(PayvoraHttpError::ValidationError(format!(
                    "params must be a key-value object, was {}",
                    json_type_name(&other)
                )));
            }
        };

        let payload = serde_json::to_string(&params)?;
        let body_segment = if *method == Method::GET { "" } else { &payload };

        let timestamp = timestamp.to_string();
        let signature = self
            .credential
            .sign(path, &timestamp, method.as_str(), body_segment);

        let mut url = format!("{}{path}", self.base_url);
        if matches!(*method, Method::GET | Method::DELETE)
            && let Some(query) = build_query(&params)?
        {
            url.push('?');
            url.push_str(&query);
        }

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(PAYVORA_API_KEY_HEADER, self.credential.api_key().as_str())
            .header(PAYVORA_SIGNATURE_HEADER, signature)
            .header(PAYVORA_TIMESTAMP_HEADER, timestamp);

        if matches!(*method, Method::POST | Method::PUT) {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        builder
            .build()
            .map_err(|e| PayvoraHttpError::BuildError(e.to_string()))
    }

    /// Dispatches a single signed request and returns the response unmodified.
    ///
    /// Validation failures are logged and returned without any network activity.
    /// Non-2xx responses are logged and returned as `Ok` so callers can inspect
    /// status and body; only undeliverable requests produce an error.
    async fn send_request(
        &self,
        method: Method,
        path: &str,
        params: Option<Value>,
    ) -> Result<PayvoraHttpResponse, PayvoraHttpError> {
        let request = match self.build_request(&method, path, params, Utc::now().timestamp()) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!("Rejected request {method} {path}: {err}");
                return Err(err);
            }
        };

        tracing::trace!("{method} {}", request.url());

        let resp = match self.client.execute(request).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::error!("{method} {path} failed: {err}");
                return Err(err.into());
            }
        };

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!("{method} {path} failed reading response body: {err}");
                return Err(err.into());
            }
        };

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_slice::<PayvoraErrorResponse>(&body) {
                tracing::warn!(
                    "{method} {path} returned {status}: {} ({})",
                    error_resp.error.message,
                    error_resp.error.code,
                );
            } else {
                tracing::warn!(
                    "{method} {path} returned {status}: {}",
                    String::from_utf8_lossy(&body),
                );
            }
        }

        Ok(PayvoraHttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Provides a HTTP client for connecting to the [Payvora](https://payvora.com) REST API.
///
/// All endpoints of the Payvora API are authenticated, so the client always holds
/// credentials. The client is cheap to clone and safe to use concurrently; each
/// call is an independent request/response round trip with no shared mutable state.
#[derive(Debug, Clone)]
pub struct PayvoraHttpClient {
    inner: Arc<PayvoraHttpInnerClient>,
}

impl PayvoraHttpClient {
    /// Creates a new [`PayvoraHttpClient`] configured with credentials, optionally
    /// using a custom base URL and request timeout.
    ///
    /// Key and secret emptiness is not enforced locally: requests signed with bad
    /// credentials fail authentication server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP transport cannot be constructed.
    pub fn new(
        api_key: String,
        api_secret: String,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, PayvoraHttpError> {
        let credential = Credential::new(api_key, api_secret);
        let inner = PayvoraHttpInnerClient::new(credential, base_url, timeout_secs)?;

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new [`PayvoraHttpClient`] instance using environment variables and
    /// the default Payvora HTTP base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are not set or invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::with_credentials(None, None, None, None)
    }

    /// Creates a new [`PayvoraHttpClient`] configured with credentials.
    ///
    /// If `api_key` or `api_secret` are `None`, they will be sourced from the
    /// `PAYVORA_API_KEY` and `PAYVORA_API_SECRET` environment variables; a `None`
    /// base URL falls back to `PAYVORA_BASE_URL` and then the default Payvora URL.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is neither provided nor present in the
    /// environment, or if the underlying HTTP transport cannot be constructed.
    pub fn with_credentials(
        api_key: Option<String>,
        api_secret: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => get_env_var("PAYVORA_API_KEY")?,
        };
        let api_secret = match api_secret {
            Some(secret) => secret,
            None => get_env_var("PAYVORA_API_SECRET")?,
        };
        let base_url = base_url.or_else(|| get_env_var("PAYVORA_BASE_URL").ok());

        Ok(Self::new(api_key, api_secret, base_url, timeout_secs)?)
    }

    /// Returns the base url being used by the client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the public API key being used by the client.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.inner.credential.api_key().as_str()
    }

    /// Sends a signed `GET` request to the given endpoint path.
    ///
    /// Parameters are serialized as URL query parameters; the signature body
    /// segment is always the empty string for `GET`.
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation fails or the request cannot be
    /// delivered; non-2xx responses are returned as `Ok` for caller inspection.
    pub async fn get(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<PayvoraHttpResponse, PayvoraHttpError> {
        self.inner.send_request(Method::GET, path, params).await
    }

    /// Sends a signed `POST` request to the given endpoint path.
    ///
    /// Parameters are serialized as the JSON request body (defaulting to `{}`);
    /// the exact signed bytes are sent over the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation fails or the request cannot be
    /// delivered; non-2xx responses are returned as `Ok` for caller inspection.
    pub async fn post(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<PayvoraHttpResponse, PayvoraHttpError> {
        self.inner.send_request(Method::POST, path, params).await
    }

    /// Sends a signed `PUT` request to the given endpoint path.
    ///
    /// Parameters are serialized as the JSON request body (defaulting to `{}`);
    /// the exact signed bytes are sent over the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation fails or the request cannot be
    /// delivered; non-2xx responses are returned as `Ok` for caller inspection.
    pub async fn put(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<PayvoraHttpResponse, PayvoraHttpError> {
        self.inner.send_request(Method::PUT, path, params).await
    }

    /// Sends a signed `DELETE` request to the given endpoint path.
    ///
    /// Parameters are serialized as URL query parameters; the signature body
    /// segment is the JSON serialization of the parameters, matching the server's
    /// verification rule for non-`GET` methods.
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation fails or the request cannot be
    /// delivered; non-2xx responses are returned as `Ok` for caller inspection.
    pub async fn delete(
        &self,
        path: &str,
        params: Option<Value>,
    ) -> Result<PayvoraHttpResponse, PayvoraHttpError> {
        self.inner.send_request(Method::DELETE, path, params).await
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializes a flat parameter object as a URL query string.
///
/// Returns `None` for an empty object. Values must be scalars; nested arrays or
/// objects fail validation (query parameters have no nesting convention).
fn build_query(params: &Map<String, Value>) -> Result<Option<String>, PayvoraHttpError> {
    if params.is_empty() {
        return Ok(None);
    }

    serde_urlencoded::to_string(params).map(Some).map_err(|e| {
        PayvoraHttpError::ValidationError(format!(
            "query parameters must be flat scalar values: {e}"
        ))
    })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    const API_KEY: &str = "test_api_key";
    const API_SECRET: &str = "test_api_secret";
    const TIMESTAMP: i64 = 1_700_000_000;

    #[fixture]
    fn client() -> PayvoraHttpInnerClient {
        let credential = Credential::new(API_KEY, API_SECRET);
        PayvoraHttpInnerClient::new(credential, None, None).unwrap()
    }

    fn header_str<'a>(request: &'a Request, name: &str) -> &'a str {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[rstest]
    fn build_request_get_signs_empty_body_segment(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(&Method::GET, "/auth-test", None, TIMESTAMP)
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://api.payvora.com/api/v1/auth-test"
        );
        assert!(request.url().query().is_none());
        assert!(request.body().is_none());
        assert_eq!(header_str(&request, PAYVORA_API_KEY_HEADER), API_KEY);
        assert_eq!(header_str(&request, PAYVORA_TIMESTAMP_HEADER), "1700000000");
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "a5d06dcb35aa64d447a056ed8ab02243b083469869e291e35370653aa0628de9"
        );
    }

    #[rstest]
    fn build_request_get_params_excluded_from_signature(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(
                &Method::GET,
                "/wallets",
                Some(json!({"currency": "USD"})),
                TIMESTAMP,
            )
            .unwrap();

        assert_eq!(request.url().query(), Some("currency=USD"));
        assert!(request.body().is_none());
        // Reference vector computed over "/wallets" + timestamp + "GET" with no body segment
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "479cc01a004e1e8097cc6a26e85905646a7a5d351c26b551b32e1ef93df8d8db"
        );
    }

    #[rstest]
    fn build_request_post_signs_and_sends_same_bytes(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(
                &Method::POST,
                "/customer",
                Some(json!({"email": "a@b.com"})),
                TIMESTAMP,
            )
            .unwrap();

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"email":"a@b.com"}"#);
        assert!(request.url().query().is_none());
        assert_eq!(header_str(&request, CONTENT_TYPE.as_str()), "application/json");
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "83fdc94bd5eba4294daa0132dfbccec09ba15059deb6924b33a8e84806ba32f0"
        );
    }

    #[rstest]
    fn build_request_post_defaults_to_empty_object(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(&Method::POST, "/auth-test", None, TIMESTAMP)
            .unwrap();

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"{}");
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "f555c2fa5aeb250ac7aa2cc5d78fb2f815335e8ead86a48b53528b513c74415e"
        );
    }

    #[rstest]
    fn build_request_put_signs_body(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(
                &Method::PUT,
                "/customer/123",
                Some(json!({"email": "c@d.com"})),
                TIMESTAMP,
            )
            .unwrap();

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"email":"c@d.com"}"#);
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "c1a67a54a64f5c570ac83c5cf71bd5a4a607e95c25183ddb7550843bedd8e65e"
        );
    }

    #[rstest]
    fn build_request_delete_signs_body_segment_sends_query(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(
                &Method::DELETE,
                "/customer/123",
                Some(json!({"force": true})),
                TIMESTAMP,
            )
            .unwrap();

        assert_eq!(request.url().query(), Some("force=true"));
        assert!(request.body().is_none());
        // Body segment for DELETE is the JSON payload even though it travels as query
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "8208708f029176c375fd08366c01ef996ed38dbce1dbc3ff3ab787cbeaccc321"
        );
    }

    #[rstest]
    fn build_request_rejects_path_without_leading_slash(client: PayvoraHttpInnerClient) {
        let result = client.build_request(&Method::GET, "auth-test", None, TIMESTAMP);

        match result {
            Err(PayvoraHttpError::ValidationError(msg)) => {
                assert!(msg.contains("must start with '/'"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[rstest]
    fn build_request_null_params_treated_as_absent(client: PayvoraHttpInnerClient) {
        let request = client
            .build_request(&Method::GET, "/auth-test", Some(Value::Null), TIMESTAMP)
            .unwrap();

        assert!(request.url().query().is_none());
        assert_eq!(
            header_str(&request, PAYVORA_SIGNATURE_HEADER),
            "a5d06dcb35aa64d447a056ed8ab02243b083469869e291e35370653aa0628de9"
        );
    }

    #[rstest]
    #[case(json!([1, 2, 3]), "array")]
    #[case(json!("email"), "string")]
    #[case(json!(42), "number")]
    #[case(json!(true), "bool")]
    fn build_request_rejects_non_object_params(
        client: PayvoraHttpInnerClient,
        #[case] params: Value,
        #[case] expected_kind: &str,
    ) {
        let result = client.build_request(&Method::POST, "/customer", Some(params), TIMESTAMP);

        match result {
            Err(PayvoraHttpError::ValidationError(msg)) => {
                assert!(msg.contains(expected_kind), "unexpected message: {msg}");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[rstest]
    fn build_query_empty_object_is_none() {
        let params = Map::new();

        assert_eq!(build_query(&params).unwrap(), None);
    }

    #[rstest]
    fn build_query_serializes_scalars_in_key_order() {
        let Value::Object(params) = json!({"status": "open", "limit": 10}) else {
            panic!("Expected object");
        };

        let query = build_query(&params).unwrap();

        assert_eq!(query.as_deref(), Some("limit=10&status=open"));
    }

    #[rstest]
    fn build_query_rejects_nested_values() {
        let Value::Object(params) = json!({"filter": {"status": "open"}}) else {
            panic!("Expected object");
        };

        let result = build_query(&params);

        assert!(matches!(
            result,
            Err(PayvoraHttpError::ValidationError(_))
        ));
    }

    #[rstest]
    fn response_json_parses_body() {
        let response = PayvoraHttpResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::from_static(br#"{"ok": true}"#),
        };

        let value: Value = response.json().unwrap();

        assert_eq!(value, json!({"ok": true}));
        assert_eq!(response.body_text(), r#"{"ok": true}"#);
    }

    #[rstest]
    fn client_accessors_expose_configuration() {
        let client = PayvoraHttpClient::new(
            API_KEY.to_string(),
            API_SECRET.to_string(),
            Some("http://localhost:8080/api/v1".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(client.api_key(), API_KEY);
    }

    #[rstest]
    fn debug_output_redacts_secret() {
        let client = PayvoraHttpClient::new(
            API_KEY.to_string(),
            API_SECRET.to_string(),
            None,
            None,
        )
        .unwrap();

        let dbg_out = format!("{client:?}");

        assert!(!dbg_out.contains(API_SECRET));
        assert!(dbg_out.contains("<redacted>"));
    }
}
