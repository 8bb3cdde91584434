#![allow(clippy::needless_doctest_main)]
//! `http_client_mock` provides in-process test doubles for HTTP clients: decide ahead of time
//! what your client should reply, then exercise the code that depends on it without
//! any network I/O.
//!
//! # Table of Contents
//! 1. [Getting started](#getting-started)
//! 2. [Response strategies](#response-strategies)
//! 3. [Failures](#failures)
//! 4. [Test isolation](#test-isolation)
//! 5. [Runtime compatibility](#runtime-compatibility)
//!
//! ## Getting started
//! ```rust
//! use http_client_mock::{MockClient, ResponseContent};
//! use http_body_util::BodyExt;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Person {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[async_std::main]
//! async fn main() {
//!     // Arrange the behaviour of the client: it will reply 200 with Frederik, whatever we ask.
//!     let frederik = Person { id: 1, name: "Frederik".into() };
//!     let client = MockClient::with_response(ResponseContent::new(200, frederik.clone()));
//!
//!     // Act
//!     let response = client.get("http://localhost/people/1").await.unwrap();
//!
//!     // Assert
//!     assert_eq!(response.status(), 200);
//!     let body = response.into_body().collect().await.unwrap().to_bytes();
//!     let person: Person = serde_json::from_slice(&body).unwrap();
//!     assert_eq!(person, frederik);
//! }
//! ```
//!
//! ## Response strategies
//!
//! Each [`MockClient`] is bound to a [`ResponseStrategy`]:
//! - a fixed response, returned on every call ([`MockClient::with_json_response`]);
//! - a sequence of responses, one per call ([`MockClient::with_json_responses`]);
//! - a callback computing the response from the [`Request`] ([`MockClient::with_callback`]).
//!
//! Contents are encoded as JSON by default. Use [`MockClient::with_raw_response`] to reply with a
//! body that must reach the caller byte-for-byte (e.g. a malformed payload), or plug your own
//! [`BodyEncoder`] via [`MockClientBuilder::respond_with`].
//!
//! ## Failures
//!
//! Nothing is swallowed: a sequence that has run out of responses, a callback returning an error
//! or a content that cannot be encoded all surface as an [`Error`] returned by
//! [`MockClient::send`]. Errors returned by callbacks are passed through untouched - check
//! [`Error::callback_error`] to recover them.
//!
//! ## Test isolation
//!
//! Each instance of [`MockClient`] is fully isolated. You should set up one for each test,
//! to ensure no cross-test interference.
//!
//! ## Runtime compatibility
//!
//! `http_client_mock` does not spawn tasks nor perform I/O: it can be used with both
//! [`async_std`] and [`tokio`] as futures runtimes.
//!
//! [`async_std`]: https://docs.rs/async-std/
//! [`tokio`]: https://docs.rs/tokio/
mod client;
mod encoder;
mod error;
mod handler;
pub mod http;
mod request;
mod response_content;
mod strategy;

pub use client::{MockClient, MockClientBuilder};
pub use encoder::{BodyEncoder, EncodedBody, JsonEncoder, RawEncoder};
pub use error::{BoxError, Error};
pub use handler::{InterceptionHandler, Transport};
pub use request::{BodyPrintLimit, Request};
pub use response_content::{RawBody, ResponseContent};
pub use strategy::{ResponseCallback, ResponseSequence, ResponseStrategy};
