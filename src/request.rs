use std::fmt;

use http::{HeaderMap, Method};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{BoxError, Error};

pub const BODY_PRINT_LIMIT: usize = 10_000;

/// Specifies limitations on printing request bodies when logging requests. Some bodies may be
/// too large to reasonably print and it may be desirable to limit them.
#[derive(Debug, Copy, Clone)]
pub enum BodyPrintLimit {
    /// Maximum length of a body to print in bytes.
    Limited(usize),
    /// There is no limit to the size of a body that may be printed.
    Unlimited,
}

impl Default for BodyPrintLimit {
    fn default() -> Self {
        BodyPrintLimit::Limited(BODY_PRINT_LIMIT)
    }
}

/// An outgoing request intercepted by a [`MockClient`].
///
/// Response callbacks receive their own copy of the `Request`, with the body already read
/// into memory.
///
/// [`MockClient`]: crate::MockClient
///
/// ### Implementation notes:
/// We can't hand `http::Request<B>` to callbacks directly: reading the body consumes it,
/// and it would force every callback to deal with the body type of the caller.
/// We perform the extraction once, when the request is intercepted, and store the result.
#[derive(Debug, Clone)]
pub struct Request {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as UTF-8 text, with invalid sequences replaced.
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub(crate) async fn from_http<B>(request: http::Request<B>) -> Result<Request, Error>
    where
        B: hyper::body::Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = request.into_parts();
        let url = match parts.uri.authority() {
            Some(_) => parts.uri.to_string(),
            None => format!("http://localhost{}", parts.uri),
        }
        .parse::<Url>()?;

        let body = body
            .collect()
            .await
            .map_err(|e| Error::Body(e.into()))?
            .to_bytes();

        Ok(Self {
            url,
            method: parts.method,
            headers: parts.headers,
            body: body.to_vec(),
        })
    }

    pub(crate) fn print_with_limit(
        &self,
        mut buffer: impl fmt::Write,
        body_print_limit: BodyPrintLimit,
    ) -> fmt::Result {
        writeln!(buffer, "{} {}", self.method, self.url)?;
        for name in self.headers.keys() {
            let values = self
                .headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()))
                .collect::<Vec<_>>();
            writeln!(buffer, "{}: {}", name, values.join(","))?;
        }

        match body_print_limit {
            BodyPrintLimit::Limited(limit) if self.body.len() > limit => {
                // Back off to the closest char boundary at or before the limit.
                let truncated = (limit.saturating_sub(3)..=limit)
                    .rev()
                    .find_map(|end| std::str::from_utf8(&self.body[..end]).ok());
                match truncated {
                    Some(truncated) => {
                        writeln!(buffer, "{}", truncated)?;
                        writeln!(
                            buffer,
                            "We truncated the body because it was too large: {} bytes (limit: {} bytes)",
                            self.body.len(),
                            limit
                        )
                    }
                    None => writeln!(
                        buffer,
                        "Body is likely binary (invalid utf-8) size is {} bytes",
                        self.body.len()
                    ),
                }
            }
            _ => {
                if let Ok(body) = std::str::from_utf8(&self.body) {
                    writeln!(buffer, "{}", body)
                } else {
                    writeln!(
                        buffer,
                        "Body is likely binary (invalid utf-8) size is {} bytes",
                        self.body.len()
                    )
                }
            }
        }
    }
}

// The body print limit only applies to logs: `Display` prints the whole body.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print_with_limit(f, BodyPrintLimit::Unlimited)
    }
}
