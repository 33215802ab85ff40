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

//! [NautilusTrader](http://nautilustrader.io) adapter for the
//! [Payvora](https://payvora.com) payments REST API.
//!
//! The `nautilus-payvora` crate provides a thin signed-request HTTP client for the
//! **Payvora v1 API**: it validates caller-supplied arguments, computes the HMAC-SHA256
//! request signature, attaches the authentication headers, and forwards the request over
//! HTTPS. All business semantics (checkouts, customers, wallets, swaps, transfers) live
//! on the remote server; this crate never interprets them.
//!
//! The client is deliberately thin: no request queueing, no rate limiting, no retries,
//! and no response caching. Each call is a single signed request/response round trip,
//! and non-2xx responses are returned to the caller for inspection rather than raised
//! as errors. Locally detected validation failures (malformed path or parameter shape)
//! are logged and surfaced as typed errors before any network activity.
//!
//! # Platform
//!
//! [NautilusTrader](http://nautilustrader.io) is an open-source, high-performance, production-grade
//! algorithmic trading platform, providing quantitative traders with the ability to backtest
//! portfolios of automated trading strategies on historical data with an event-driven engine,
//! and also deploy those same strategies live, with no code changes.
//!
//! NautilusTrader's design, architecture, and implementation philosophy prioritizes software
//! correctness and safety at the highest level, with the aim of supporting mission-critical trading
//! system backtesting and live deployment workloads.
//!
//! # Documentation
//!
//! See <https://docs.rs/nautilus-payvora> for the latest API documentation.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod http;
