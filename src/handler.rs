use crate::encoder::BodyEncoder;
use crate::error::Error;
use crate::request::BodyPrintLimit;
use crate::{Request, ResponseStrategy};
use async_trait::async_trait;
use http::Response;
use http_body_util::Full;
use hyper::body::Bytes;
use log::{debug, log_enabled, Level};
use tokio::sync::RwLock;

/// The extension point of [`MockClient`]: whatever is in charge of turning a [`Request`]
/// into a response.
///
/// [`InterceptionHandler`] is the implementation used by all the setup methods of
/// [`MockClient`], but you can plug your own via [`MockClient::from_transport`].
///
/// [`MockClient`]: crate::MockClient
/// [`MockClient::from_transport`]: crate::MockClient::from_transport
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response<Full<Bytes>>, Error>;

    /// The requests intercepted so far, in the order they were received.
    ///
    /// `None` if the transport does not record requests.
    async fn received_requests(&self) -> Option<Vec<Request>> {
        None
    }
}

pub(crate) enum RequestRecording {
    Enabled,
    Disabled,
}

/// Sits where a real client would open a connection: it intercepts every request and
/// replies with whatever its [`ResponseStrategy`] produces, encoded by its [`BodyEncoder`].
///
/// The handler itself is stateless, all state lives in the strategy - apart from the
/// recorded requests, used for assertions and for debugging.
pub struct InterceptionHandler<T> {
    strategy: ResponseStrategy<T>,
    encoder: Box<dyn BodyEncoder<T>>,
    received_requests: Option<RwLock<Vec<Request>>>,
    body_print_limit: BodyPrintLimit,
}

impl<T> InterceptionHandler<T>
where
    T: Clone + Send + Sync,
{
    pub fn new<E>(strategy: ResponseStrategy<T>, encoder: E) -> Self
    where
        E: BodyEncoder<T> + 'static,
    {
        Self::configured(
            strategy,
            Box::new(encoder),
            RequestRecording::Enabled,
            BodyPrintLimit::default(),
        )
    }

    pub(crate) fn configured(
        strategy: ResponseStrategy<T>,
        encoder: Box<dyn BodyEncoder<T>>,
        recording: RequestRecording,
        body_print_limit: BodyPrintLimit,
    ) -> Self {
        let received_requests = match recording {
            RequestRecording::Enabled => Some(RwLock::new(Vec::new())),
            RequestRecording::Disabled => None,
        };
        Self {
            strategy,
            encoder,
            received_requests,
            body_print_limit,
        }
    }

    /// Produce the response for an intercepted request.
    ///
    /// Failures - an exhausted sequence, a failing callback, content that cannot be encoded -
    /// are returned unchanged.
    pub async fn handle(&self, request: Request) -> Result<Response<Full<Bytes>>, Error> {
        if log_enabled!(Level::Debug) {
            let mut printed = String::new();
            if request
                .print_with_limit(&mut printed, self.body_print_limit)
                .is_ok()
            {
                debug!("Intercepted request:\n{}", printed);
            }
        }

        if let Some(received_requests) = &self.received_requests {
            received_requests.write().await.push(request.clone());
        }

        let (status_code, content) = self.strategy.next(&request).await?.into_parts();
        let body = self.encoder.encode(&content)?;

        let response = Response::builder()
            .status(status_code)
            .header(http::header::CONTENT_TYPE, body.mime)
            .body(Full::new(body.bytes))?;
        Ok(response)
    }

    pub fn strategy(&self) -> &ResponseStrategy<T> {
        &self.strategy
    }
}

#[async_trait]
impl<T> Transport for InterceptionHandler<T>
where
    T: Clone + Send + Sync,
{
    async fn send(&self, request: Request) -> Result<Response<Full<Bytes>>, Error> {
        self.handle(request).await
    }

    async fn received_requests(&self) -> Option<Vec<Request>> {
        match &self.received_requests {
            Some(received_requests) => Some(received_requests.read().await.clone()),
            None => None,
        }
    }
}
