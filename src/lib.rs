//! Client library for the Messenger Platform webhook and send APIs.
//!
//! The crate covers the four concerns of a Messenger integration:
//!
//! - deserializing inbound webhook callbacks ([`MessengerClient::deserialize_callback`])
//! - verifying webhook authenticity via the `X-Hub-Signature` header
//!   ([`MessengerClient::is_valid_request`])
//! - building and POSTing outbound messages (`send_*` methods on
//!   [`MessengerClient`])
//! - mapping send-API error responses into a typed failure ([`SendError`])
//!
//! The HTTP engine is pluggable behind the [`transport::HttpTransport`]
//! trait; the default client uses `reqwest`. Hosting the webhook endpoint,
//! persistence and retry policy are the caller's responsibility. One attempt
//! is made per send; the configured timeout is the only cancellation
//! mechanism.
//!
//! A single [`MessengerClient`] holds no per-call mutable state and can be
//! shared freely across tasks. Page access tokens and the app secret are
//! per-call parameters, so one client instance can serve multiple pages.

pub mod client;
pub mod error;
pub mod schemas;
pub mod security;
pub mod transport;

pub use client::MessengerClient;
pub use error::SendError;
pub use schemas::*;
