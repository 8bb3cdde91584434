//! Convenient re-exports of http types that are part of `http_client_mock`'s public API.
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, Response, StatusCode};
pub use http_body_util::Full;
pub use hyper::body::Bytes;
pub use url::Url;
