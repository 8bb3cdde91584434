use crate::encoder::{BodyEncoder, JsonEncoder, RawEncoder};
use crate::error::{BoxError, Error};
use crate::handler::{InterceptionHandler, RequestRecording, Transport};
use crate::request::BodyPrintLimit;
use crate::{RawBody, Request, ResponseContent, ResponseStrategy};
use http::{Method, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use serde::Serialize;
use std::convert::TryInto;
use std::future::Future;
use std::sync::Arc;

/// A stand-in for an HTTP client which never touches the network.
///
/// Every request sent through a `MockClient` is intercepted and answered according to the
/// strategy chosen when the client was set up:
/// - [`MockClient::with_json_response`] always replies with the same response;
/// - [`MockClient::with_json_responses`] replies with a different response on each call;
/// - [`MockClient::with_callback`] computes the response from the request;
/// - [`MockClient::with_raw_response`] replies with a body that is never re-encoded.
///
/// ## Best practices
///
/// Set up a new `MockClient` in each test: sequences keep track of how many responses they have
/// handed out, sharing a client across tests would make them interfere with each other.
///
/// `MockClient` is cheap to clone - clones share the same responses and recorded requests.
#[derive(Clone)]
pub struct MockClient {
    transport: Arc<dyn Transport>,
}

impl MockClient {
    /// You can use `MockClient::builder` if you need to specify custom configuration - e.g.
    /// disable request recording.
    pub fn builder() -> MockClientBuilder {
        MockClientBuilder::new()
    }

    /// Plug a custom [`Transport`] into a `MockClient`.
    pub fn from_transport<Tr>(transport: Tr) -> Self
    where
        Tr: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Reply to every request with `status` and `content`, encoded as JSON.
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::MockClient;
    /// use http_body_util::BodyExt;
    /// use serde_json::json;
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     // Arrange
    ///     let client = MockClient::with_json_response(200, json!({ "id": 1, "name": "Frederik" }));
    ///
    ///     // Act
    ///     let response = client.get("http://localhost/people/1").await.unwrap();
    ///
    ///     // Assert
    ///     assert_eq!(response.status(), 200);
    ///     assert_eq!(
    ///         response.headers()["content-type"],
    ///         "application/json; charset=utf-8"
    ///     );
    ///     let body = response.into_body().collect().await.unwrap().to_bytes();
    ///     assert_eq!(&body[..], br#"{"id":1,"name":"Frederik"}"#);
    /// }
    /// ```
    pub fn with_json_response<S, T>(status: S, content: T) -> Self
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        Self::builder().json_response(status, content)
    }

    /// Reply to every request with `response`, its content encoded as JSON.
    pub fn with_response<T>(response: ResponseContent<T>) -> Self
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        Self::builder().response(response)
    }

    /// Reply to the n-th request with the n-th element of `responses`.
    ///
    /// Once all responses have been used, every further request fails with
    /// [`Error::OutOfResponses`].
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::{MockClient, ResponseContent};
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     // Arrange
    ///     let client = MockClient::with_json_responses(vec![
    ///         ResponseContent::new(200, "first"),
    ///         ResponseContent::new(202, "second"),
    ///     ]);
    ///
    ///     // Act
    ///     let first = client.get("http://localhost").await.unwrap();
    ///     let second = client.get("http://localhost").await.unwrap();
    ///     let third = client.get("http://localhost").await;
    ///
    ///     // Assert
    ///     assert_eq!(first.status(), 200);
    ///     assert_eq!(second.status(), 202);
    ///     assert!(third.unwrap_err().is_out_of_responses());
    /// }
    /// ```
    pub fn with_json_responses<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = ResponseContent<T>>,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        Self::builder().json_responses(responses)
    }

    /// Let `callback` compute the response to each request.
    ///
    /// If `callback` fails, its error is returned by [`send`](#method.send) as
    /// [`Error::Callback`], untouched.
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::{MockClient, Request, ResponseContent};
    /// use std::convert::Infallible;
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     // Arrange
    ///     let client = MockClient::with_callback(|request: Request| async move {
    ///         if request.body == b"1" {
    ///             Ok::<_, Infallible>(ResponseContent::new(200, "fine"))
    ///         } else {
    ///             Ok(ResponseContent::new(404, "not found"))
    ///         }
    ///     });
    ///
    ///     // Act
    ///     let response = client.post("http://localhost", "2").await.unwrap();
    ///
    ///     // Assert
    ///     assert_eq!(response.status(), 404);
    /// }
    /// ```
    pub fn with_callback<F, Fut, E, T>(callback: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseContent<T>, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        Self::builder().callback(callback)
    }

    /// Reply to every request with `status` and `body`, attached as it is.
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::MockClient;
    /// use http_body_util::BodyExt;
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     let client = MockClient::with_raw_response(200, "{not valid json");
    ///
    ///     let response = client.get("http://localhost").await.unwrap();
    ///     let body = response.into_body().collect().await.unwrap().to_bytes();
    ///
    ///     assert_eq!(&body[..], b"{not valid json");
    /// }
    /// ```
    pub fn with_raw_response<S, B>(status: S, body: B) -> Self
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
        B: Into<RawBody>,
    {
        Self::builder().raw_response(status, body)
    }

    /// Send a request through the mock client.
    ///
    /// URIs without an authority (e.g. `/people/1`) are resolved against `http://localhost`.
    /// URIs with an authority but no scheme (e.g. `localhost:8080/people`) are not valid
    /// `http::Uri`s and fail with [`Error::InvalidRequest`].
    pub async fn send<B>(&self, request: http::Request<B>) -> Result<Response<Full<Bytes>>, Error>
    where
        B: hyper::body::Body,
        B::Error: Into<BoxError>,
    {
        let request = Request::from_http(request).await?;
        self.transport.send(request).await
    }

    /// Send a `GET` request to `url`.
    pub async fn get(&self, url: &str) -> Result<Response<Full<Bytes>>, Error> {
        self.send_bytes(Method::GET, url, Bytes::new()).await
    }

    /// Send a `POST` request to `url`, with `body` as request body.
    pub async fn post<B>(&self, url: &str, body: B) -> Result<Response<Full<Bytes>>, Error>
    where
        B: Into<Bytes>,
    {
        self.send_bytes(Method::POST, url, body.into()).await
    }

    async fn send_bytes(
        &self,
        method: Method,
        url: &str,
        body: Bytes,
    ) -> Result<Response<Full<Bytes>>, Error> {
        let request = http::Request::builder()
            .method(method)
            .uri(url)
            .body(Full::new(body))?;
        self.send(request).await
    }

    /// Return all the requests intercepted by this `MockClient` so far, in order.
    ///
    /// If request recording has been disabled using
    /// [`MockClientBuilder::disable_request_recording`], it returns `None`.
    ///
    /// ### Example:
    /// ```rust
    /// use http_client_mock::MockClient;
    /// use http::Method;
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     // Arrange
    ///     let client = MockClient::with_json_response(204, ());
    ///
    ///     // Act
    ///     client.get("http://localhost/hello").await.unwrap();
    ///
    ///     // Assert
    ///     let received_requests = client.received_requests().await.unwrap();
    ///     assert_eq!(received_requests.len(), 1);
    ///     assert_eq!(received_requests[0].method, Method::GET);
    ///     assert_eq!(received_requests[0].url.path(), "/hello");
    /// }
    /// ```
    pub async fn received_requests(&self) -> Option<Vec<Request>> {
        self.transport.received_requests().await
    }
}

impl std::fmt::Debug for MockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClient").finish_non_exhaustive()
    }
}

/// A builder providing a fluent API to assemble a [`MockClient`] step-by-step.
/// Use [`MockClient::builder`] to get started.
pub struct MockClientBuilder {
    record_incoming_requests: bool,
    body_print_limit: BodyPrintLimit,
}

impl MockClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            record_incoming_requests: true,
            body_print_limit: BodyPrintLimit::default(),
        }
    }

    /// By default, [`MockClient`] records all intercepted requests, so that you can inspect
    /// them with [`MockClient::received_requests`].
    ///
    /// You can disable request recording using `MockClientBuilder::disable_request_recording`.
    ///
    /// ### Example (Request recording disabled):
    ///
    /// ```rust
    /// use http_client_mock::MockClient;
    ///
    /// #[async_std::main]
    /// async fn main() {
    ///     // Arrange
    ///     let client = MockClient::builder()
    ///         .disable_request_recording()
    ///         .json_response(200, "ok");
    ///
    ///     // Act
    ///     client.get("http://localhost").await.unwrap();
    ///
    ///     // Assert
    ///     assert!(client.received_requests().await.is_none());
    /// }
    /// ```
    pub fn disable_request_recording(mut self) -> Self {
        self.record_incoming_requests = false;
        self
    }

    /// Intercepted requests are logged at `debug` level.
    /// By default, the size of the printed body is limited - you can change this limit with
    /// `MockClientBuilder::body_print_limit`.
    pub fn body_print_limit(mut self, limit: BodyPrintLimit) -> Self {
        self.body_print_limit = limit;
        self
    }

    /// Finalise the builder with an arbitrary strategy and encoder.
    pub fn respond_with<T, E>(self, strategy: ResponseStrategy<T>, encoder: E) -> MockClient
    where
        T: Clone + Send + Sync + 'static,
        E: BodyEncoder<T> + 'static,
    {
        let recording = if self.record_incoming_requests {
            RequestRecording::Enabled
        } else {
            RequestRecording::Disabled
        };
        let handler = InterceptionHandler::configured(
            strategy,
            Box::new(encoder),
            recording,
            self.body_print_limit,
        );
        MockClient::from_transport(handler)
    }

    /// See [`MockClient::with_json_response`].
    pub fn json_response<S, T>(self, status: S, content: T) -> MockClient
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        self.response(ResponseContent::new(status, content))
    }

    /// See [`MockClient::with_response`].
    pub fn response<T>(self, response: ResponseContent<T>) -> MockClient
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        self.respond_with(ResponseStrategy::fixed(response), JsonEncoder)
    }

    /// See [`MockClient::with_json_responses`].
    pub fn json_responses<I, T>(self, responses: I) -> MockClient
    where
        I: IntoIterator<Item = ResponseContent<T>>,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        self.respond_with(ResponseStrategy::sequence(responses), JsonEncoder)
    }

    /// See [`MockClient::with_callback`].
    pub fn callback<F, Fut, E, T>(self, callback: F) -> MockClient
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseContent<T>, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        T: Serialize + Clone + Send + Sync + 'static,
    {
        self.respond_with(ResponseStrategy::callback(callback), JsonEncoder)
    }

    /// See [`MockClient::with_raw_response`].
    pub fn raw_response<S, B>(self, status: S, body: B) -> MockClient
    where
        S: TryInto<StatusCode>,
        <S as TryInto<StatusCode>>::Error: std::fmt::Debug,
        B: Into<RawBody>,
    {
        self.respond_with(
            ResponseStrategy::fixed(ResponseContent::new(status, body.into())),
            RawEncoder::new(),
        )
    }
}
