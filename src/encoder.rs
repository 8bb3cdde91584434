use crate::error::Error;
use crate::RawBody;
use hyper::body::Bytes;
use serde::Serialize;

pub const JSON_MIME: &str = "application/json; charset=utf-8";

/// A response body, ready to be attached to an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBody {
    pub bytes: Bytes,
    /// The value of the `Content-Type` header.
    pub mime: String,
}

/// Anything that implements `BodyEncoder<T>` can turn the content of a [`ResponseContent<T>`]
/// into the body of an HTTP response.
///
/// Two encoders are provided out of the box:
/// - [`JsonEncoder`], for any `T: Serialize`;
/// - [`RawEncoder`], for bodies that are already in their final wire format.
///
/// You can plug in your own encoder via [`MockClientBuilder::respond_with`]:
///
/// ```rust
/// use http_client_mock::{BodyEncoder, EncodedBody, Error};
///
/// /// Encode numbers as plain text.
/// struct PlainTextEncoder;
///
/// impl BodyEncoder<u64> for PlainTextEncoder {
///     fn encode(&self, content: &u64) -> Result<EncodedBody, Error> {
///         Ok(EncodedBody {
///             bytes: content.to_string().into(),
///             mime: "text/plain".into(),
///         })
///     }
/// }
///
/// let body = PlainTextEncoder.encode(&42).unwrap();
/// assert_eq!(&body.bytes[..], b"42");
/// ```
///
/// [`ResponseContent<T>`]: crate::ResponseContent
/// [`MockClientBuilder::respond_with`]: crate::MockClientBuilder::respond_with
pub trait BodyEncoder<T>: Send + Sync {
    fn encode(&self, content: &T) -> Result<EncodedBody, Error>;
}

/// Encode the content as UTF-8 JSON, setting `Content-Type` to `application/json; charset=utf-8`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonEncoder;

impl<T: Serialize> BodyEncoder<T> for JsonEncoder {
    fn encode(&self, content: &T) -> Result<EncodedBody, Error> {
        let bytes = serde_json::to_vec(content).map_err(Error::Serialization)?;
        Ok(EncodedBody {
            bytes: bytes.into(),
            mime: JSON_MIME.to_string(),
        })
    }
}

/// Attach a [`RawBody`] verbatim, without any encoding.
///
/// `Content-Type` defaults to `application/json; charset=utf-8`: raw bodies are mostly used to simulate
/// broken JSON payloads. Use [`RawEncoder::with_mime`] to change it.
#[derive(Clone, Debug)]
pub struct RawEncoder {
    mime: String,
}

impl RawEncoder {
    pub fn new() -> Self {
        Self::with_mime(JSON_MIME)
    }

    pub fn with_mime(mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
        }
    }
}

impl Default for RawEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BodyEncoder<RawBody> for RawEncoder {
    fn encode(&self, content: &RawBody) -> Result<EncodedBody, Error> {
        Ok(EncodedBody {
            bytes: Bytes::copy_from_slice(content.as_str().as_bytes()),
            mime: self.mime.clone(),
        })
    }
}
