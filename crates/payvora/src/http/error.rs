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

//! Error structures and enumerations for the Payvora integration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the JSON structure of an error response returned by the Payvora API.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PayvoraErrorResponse {
    /// The top-level error object included in the Payvora error response.
    pub error: PayvoraErrorMessage,
}

/// Contains the specific error details provided by the Payvora API.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PayvoraErrorMessage {
    /// A short identifier or category for the error, as returned by Payvora.
    pub code: String,
    /// A human-readable explanation of the error condition.
    pub message: String,
}

/// A typed error enumeration for the Payvora HTTP client.
///
/// Non-2xx HTTP responses are not represented here: the client returns them
/// as ordinary responses so callers can inspect status and body themselves.
#[derive(Debug, Clone, Error)]
pub enum PayvoraHttpError {
    /// Errors returned directly by Payvora.
    #[error("Payvora error {code}: {message}")]
    PayvoraError { code: String, message: String },
    /// Failure during JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// Request argument validation error (no request was sent).
    #[error("Parameter validation error: {0}")]
    ValidationError(String),
    /// Failure constructing the underlying HTTP transport.
    #[error("Build error: {0}")]
    BuildError(String),
    /// Generic network error (connection failure, timeout, etc).
    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<reqwest::Error> for PayvoraHttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::NetworkError(error.to_string())
    }
}

impl From<String> for PayvoraHttpError {
    fn from(error: String) -> Self {
        Self::ValidationError(error)
    }
}

// Allow use of the `?` operator on `serde_json` results inside the HTTP
// client implementation by converting them into our typed error.
impl From<serde_json::Error> for PayvoraHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<PayvoraErrorResponse> for PayvoraHttpError {
    fn from(error: PayvoraErrorResponse) -> Self {
        Self::PayvoraError {
            code: error.error.code,
            message: error.error.message,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_error_response_from_json() {
        let json =
            r#"{"error": {"code": "unauthorized", "message": "Invalid API key or signature."}}"#;

        let error_response: PayvoraErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(error_response.error.code, "unauthorized");
        assert_eq!(error_response.error.message, "Invalid API key or signature.");
    }

    #[rstest]
    fn test_http_error_from_error_response() {
        let error_response = PayvoraErrorResponse {
            error: PayvoraErrorMessage {
                code: "invalid_request".to_string(),
                message: "Unknown endpoint".to_string(),
            },
        };

        let http_error: PayvoraHttpError = error_response.into();

        assert_eq!(
            http_error.to_string(),
            "Payvora error invalid_request: Unknown endpoint"
        );
    }

    #[rstest]
    fn test_http_error_from_json_error() {
        let json_err = serde_json::from_str::<PayvoraErrorResponse>("invalid json").unwrap_err();

        let http_error: PayvoraHttpError = json_err.into();

        assert!(http_error.to_string().contains("JSON error"));
    }

    #[rstest]
    fn test_http_error_from_string() {
        let http_error: PayvoraHttpError = "path must start with '/'".to_string().into();

        assert_eq!(
            http_error.to_string(),
            "Parameter validation error: path must start with '/'"
        );
    }
}
