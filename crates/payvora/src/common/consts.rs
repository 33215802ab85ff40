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

// Payvora payments API constants
pub const PAYVORA_HTTP_URL: &str = "https://api.payvora.com/api/v1";

// Authentication header names
pub const PAYVORA_API_KEY_HEADER: &str = "X-Api-Key";
pub const PAYVORA_SIGNATURE_HEADER: &str = "X-Api-Signature";
pub const PAYVORA_TIMESTAMP_HEADER: &str = "X-Api-Timestamp";

/// User agent sent with every request, e.g. `PayvoraRustSDK/0.55.0`.
pub const PAYVORA_USER_AGENT: &str = concat!("PayvoraRustSDK/", env!("CARGO_PKG_VERSION"));
