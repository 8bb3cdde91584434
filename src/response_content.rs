use http::StatusCode;
use std::convert::TryInto;

/// A canned response: the status code the mock client should reply with and the content
/// that will be encoded into the response body.
///
/// `ResponseContent` is immutable once built - it can only be read back through
/// [`status_code`](#method.status_code) and [`content`](#method.content).
///
/// ### Example:
/// ```rust
/// use http_client_mock::ResponseContent;
/// use http::StatusCode;
///
/// let response = ResponseContent::new(202, "accepted");
///
/// assert_eq!(response.status_code(), StatusCode::ACCEPTED);
/// assert_eq!(*response.content(), "accepted");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseContent<T> {
    status_code: StatusCode,
    content: T,
}

// Like the rest of the setup API, `new` is meant to be called while arranging a test:
// an invalid status code is a mistake in the test itself.
// Hence we prefer to panic and accept the widest possible set of inputs rather than
// push a `Result` on every caller.
impl<T> ResponseContent<T> {
    /// Build a `ResponseContent` out of a status code and the content of the body.
    pub fn new<S>(s: S, content: T) -> Self
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
    {
        let status_code = s.try_into().expect("Failed to convert into status code.");
        Self {
            status_code,
            content,
        }
    }

    /// The status code of the response.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The content that will be encoded into the response body.
    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn into_parts(self) -> (StatusCode, T) {
        (self.status_code, self.content)
    }
}

impl<T> From<(StatusCode, T)> for ResponseContent<T> {
    fn from((status_code, content): (StatusCode, T)) -> Self {
        Self {
            status_code,
            content,
        }
    }
}

/// A response body which is already in its final wire format.
///
/// Used together with [`RawEncoder`] to reply with bytes the JSON encoder would never produce,
/// e.g. a malformed payload.
///
/// [`RawEncoder`]: crate::RawEncoder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawBody(pub String);

impl RawBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawBody {
    fn from(body: String) -> Self {
        Self(body)
    }
}

impl From<&str> for RawBody {
    fn from(body: &str) -> Self {
        Self(body.to_owned())
    }
}
