/// A type-erased error, as returned by user-supplied callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong when a [`MockClient`] serves a request.
///
/// None of these failures is recovered internally: they are returned to the caller of
/// [`MockClient::send`] exactly as they occurred, so that your test can assert on them.
///
/// [`MockClient`]: crate::MockClient
/// [`MockClient::send`]: crate::MockClient::send
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A [`ResponseSequence`] was asked for more responses than it was configured with.
    ///
    /// [`ResponseSequence`]: crate::ResponseSequence
    #[error("The mock client ran out of responses: it was configured with {configured} response(s) and all of them have been used.")]
    OutOfResponses { configured: usize },
    /// The response callback failed. The boxed value is the error returned by the callback,
    /// untouched.
    #[error(transparent)]
    Callback(BoxError),
    /// The response content could not be encoded into a body.
    #[error("Failed to serialize the response content.")]
    Serialization(#[source] serde_json::Error),
    /// The request URL could not be parsed.
    #[error("Invalid request url.")]
    InvalidUrl(#[from] url::ParseError),
    /// The request or the response could not be assembled.
    #[error("Failed to assemble an HTTP message.")]
    InvalidRequest(#[from] http::Error),
    /// The request body could not be read.
    #[error("Failed to read the request body.")]
    Body(#[source] BoxError),
}

impl Error {
    /// `true` if this error signals that a [`ResponseSequence`] has been exhausted.
    ///
    /// [`ResponseSequence`]: crate::ResponseSequence
    pub fn is_out_of_responses(&self) -> bool {
        matches!(self, Error::OutOfResponses { .. })
    }

    /// If this error was returned by a response callback, try to view it as an `E`.
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::Error;
    /// use std::fmt;
    ///
    /// #[derive(Debug)]
    /// struct Boom;
    ///
    /// impl fmt::Display for Boom {
    ///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    ///         write!(f, "boom")
    ///     }
    /// }
    ///
    /// impl std::error::Error for Boom {}
    ///
    /// let error = Error::Callback(Box::new(Boom));
    /// assert!(error.callback_error::<Boom>().is_some());
    /// assert_eq!(error.to_string(), "boom");
    /// ```
    pub fn callback_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::Callback(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Take ownership of the error returned by a response callback, if that is what this is.
    pub fn into_callback_error(self) -> Result<BoxError, Self> {
        match self {
            Error::Callback(e) => Ok(e),
            other => Err(other),
        }
    }
}
