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

//! Payvora API credential storage and signing helpers.

use std::fmt::Debug;

use aws_lc_rs::hmac;
use ustr::Ustr;
use zeroize::ZeroizeOnDrop;

/// API credentials required for signing Payvora REST requests.
///
/// The API secret is used only as the HMAC key and is never transmitted.
/// Secrets are automatically zeroized on drop.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    #[zeroize(skip)]
    api_key: Ustr,
    api_secret: Box<[u8]>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Credential))
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl Credential {
    /// Creates a new [`Credential`] instance from the API key and secret.
    ///
    /// The secret is used as the raw HMAC key bytes (no decoding is applied).
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_secret_bytes = api_secret.into().into_bytes();

        Self {
            api_key: Ustr::from(api_key.as_str()),
            api_secret: api_secret_bytes.into_boxed_slice(),
        }
    }

    /// Returns the API key associated with this credential.
    #[must_use]
    pub fn api_key(&self) -> &Ustr {
        &self.api_key
    }

    /// Produces the Payvora request signature for the provided segments.
    ///
    /// The signing string is `path + timestamp + method + body`, where `path` is the
    /// caller-supplied endpoint path (not the versioned URL path), `timestamp` is the
    /// Unix time in whole seconds, `method` is the uppercase HTTP method name, and
    /// `body` is the JSON payload segment (the empty string for GET requests). Callers
    /// are responsible for ensuring that `body` matches the bytes sent over the wire.
    ///
    /// The digest is HMAC-SHA256 keyed by the API secret, encoded as lowercase hex.
    #[must_use]
    pub fn sign(&self, path: &str, timestamp: &str, method: &str, body: &str) -> String {
        let message = format!("{path}{timestamp}{method}{body}");
        let key = hmac::Key::new(hmac::HMAC_SHA256, &self.api_secret);
        let tag = hmac::sign(&key, message.as_bytes());
        hex::encode(tag.as_ref())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
