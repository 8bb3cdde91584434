use async_trait::async_trait;
use http::Method;
use http_body_util::{BodyExt, Full};
use http_client_mock::http::{Bytes, Response};
use http_client_mock::{
    BodyEncoder, BodyPrintLimit, EncodedBody, Error, MockClient, RawBody, RawEncoder, Request,
    ResponseContent, ResponseStrategy, Transport,
};
use serde::Deserialize;
use std::convert::Infallible;

#[async_std::test]
async fn requests_are_recorded_in_order() {
    // Arrange
    let client = MockClient::with_json_response(200, "ok");

    // Act
    client.get("http://localhost/first").await.unwrap();
    client.post("http://localhost/second", "payload").await.unwrap();

    // Assert
    let received_requests = client.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 2);
    assert_eq!(received_requests[0].method, Method::GET);
    assert_eq!(received_requests[0].url.path(), "/first");
    assert!(received_requests[0].body.is_empty());
    assert_eq!(received_requests[1].method, Method::POST);
    assert_eq!(received_requests[1].url.path(), "/second");
    assert_eq!(received_requests[1].body, b"payload");
}

#[async_std::test]
async fn failed_requests_are_recorded_too() {
    // Arrange
    let client = MockClient::with_json_responses(vec![ResponseContent::new(200, 1)]);

    // Act
    client.get("http://localhost").await.unwrap();
    client.get("http://localhost").await.unwrap_err();

    // Assert
    assert_eq!(client.received_requests().await.unwrap().len(), 2);
}

#[async_std::test]
async fn request_recording_can_be_disabled() {
    // Arrange
    let client = MockClient::builder()
        .disable_request_recording()
        .json_response(200, "ok");

    // Act
    client.get("http://localhost").await.unwrap();

    // Assert
    assert!(client.received_requests().await.is_none());
}

#[async_std::test]
async fn clones_share_recorded_requests() {
    // Arrange
    let client = MockClient::with_json_response(200, "ok");
    let clone = client.clone();

    // Act
    clone.get("http://localhost").await.unwrap();

    // Assert
    assert_eq!(client.received_requests().await.unwrap().len(), 1);
}

#[async_std::test]
async fn relative_uris_are_resolved_against_localhost() {
    // Arrange
    let client = MockClient::with_json_response(200, "ok");
    let request = http::Request::builder()
        .uri("/people?id=1")
        .body(Full::new(Bytes::new()))
        .unwrap();

    // Act
    client.send(request).await.unwrap();

    // Assert
    let received_requests = client.received_requests().await.unwrap();
    assert_eq!(
        received_requests[0].url.as_str(),
        "http://localhost/people?id=1"
    );
}

#[async_std::test]
async fn callbacks_see_method_headers_and_json_body() {
    #[derive(Deserialize)]
    struct Lookup {
        id: u64,
    }

    // Arrange
    let client = MockClient::with_callback(|request: Request| async move {
        let lookup: Lookup = request.body_json()?;
        let tenant = request
            .headers
            .get("x-tenant")
            .map(|value| value.to_str().unwrap_or_default().to_string())
            .unwrap_or_default();
        Ok::<_, serde_json::Error>(ResponseContent::new(
            200,
            format!("{} {} {}", request.method, tenant, lookup.id),
        ))
    });
    let request = http::Request::builder()
        .method(Method::PUT)
        .uri("http://localhost/lookup")
        .header("x-tenant", "acme")
        .body(Full::new(Bytes::from_static(br#"{"id":42}"#)))
        .unwrap();

    // Act
    let response = client.send(request).await.unwrap();

    // Assert
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], br#""PUT acme 42""#);
}

#[async_std::test]
async fn a_callback_failing_to_parse_the_body_surfaces_the_parsing_error() {
    // Arrange
    let client = MockClient::with_callback(|request: Request| async move {
        let id: u64 = request.body_json()?;
        Ok::<_, serde_json::Error>(ResponseContent::new(200, id))
    });

    // Act
    let error = client.post("http://localhost", "not json").await.unwrap_err();

    // Assert
    assert!(error.callback_error::<serde_json::Error>().is_some());
}

#[async_std::test]
async fn custom_encoders_can_be_plugged_in() {
    struct PlainText;

    impl BodyEncoder<u64> for PlainText {
        fn encode(&self, content: &u64) -> Result<EncodedBody, Error> {
            Ok(EncodedBody {
                bytes: content.to_string().into(),
                mime: "text/plain".into(),
            })
        }
    }

    // Arrange
    let client = MockClient::builder().respond_with(
        ResponseStrategy::fixed(ResponseContent::new(200, 42u64)),
        PlainText,
    );

    // Act
    let response = client.get("http://localhost").await.unwrap();

    // Assert
    assert_eq!(response.headers()["content-type"], "text/plain");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"42");
}

#[async_std::test]
async fn custom_transports_can_be_plugged_in() {
    struct Teapot;

    #[async_trait]
    impl Transport for Teapot {
        async fn send(&self, _request: Request) -> Result<Response<Full<Bytes>>, Error> {
            Ok(Response::builder()
                .status(418)
                .body(Full::new(Bytes::new()))?)
        }
    }

    // Arrange
    let client = MockClient::from_transport(Teapot);

    // Act
    let response = client.get("http://localhost").await.unwrap();

    // Assert
    assert_eq!(response.status(), 418);
    assert!(client.received_requests().await.is_none());
}

#[async_std::test]
async fn sequences_report_remaining_responses() {
    // Arrange
    let strategy = ResponseStrategy::sequence(vec![
        ResponseContent::new(200, "a"),
        ResponseContent::new(200, "b"),
    ]);
    let request = Request {
        url: "http://localhost".parse().unwrap(),
        method: Method::GET,
        headers: Default::default(),
        body: vec![],
    };

    // Act & Assert
    let sequence = match &strategy {
        ResponseStrategy::Sequence(sequence) => sequence,
        _ => unreachable!(),
    };
    assert_eq!(sequence.remaining(), 2);
    assert_eq!(*strategy.next(&request).await.unwrap().content(), "a");
    assert_eq!(sequence.remaining(), 1);
    assert_eq!(*strategy.next(&request).await.unwrap().content(), "b");
    assert_eq!(sequence.remaining(), 0);
    assert!(strategy.next(&request).await.unwrap_err().is_out_of_responses());
    assert_eq!(sequence.remaining(), 0);
}

#[async_std::test]
async fn infallible_callbacks_are_supported() {
    // Arrange
    let client = MockClient::with_callback(|_request: Request| async {
        Ok::<_, Infallible>(ResponseContent::new(204, ()))
    });

    // Act
    let response = client.get("http://localhost").await.unwrap();

    // Assert
    assert_eq!(response.status(), 204);
}

#[test]
fn requests_are_displayed_with_their_body() {
    let request = Request {
        url: "http://localhost/hello".parse().unwrap(),
        method: Method::POST,
        headers: Default::default(),
        body: b"world".to_vec(),
    };

    assert_eq!(request.to_string(), "POST http://localhost/hello\nworld\n");
}

#[async_std::test]
async fn interception_handlers_can_be_driven_directly() {
    use http_client_mock::{InterceptionHandler, JsonEncoder};

    // Arrange
    let handler = InterceptionHandler::new(
        ResponseStrategy::sequence(vec![ResponseContent::new(200, "only")]),
        JsonEncoder,
    );
    let request = Request {
        url: "http://localhost".parse().unwrap(),
        method: Method::GET,
        headers: Default::default(),
        body: vec![],
    };

    // Act
    let first = handler.handle(request.clone()).await.unwrap();
    let second = handler.handle(request).await;

    // Assert
    assert_eq!(first.status(), 200);
    assert!(second.unwrap_err().is_out_of_responses());
    match handler.strategy() {
        ResponseStrategy::Sequence(sequence) => assert_eq!(sequence.remaining(), 0),
        other => panic!("Unexpected strategy: {:?}", other),
    }
    assert_eq!(handler.received_requests().await.unwrap().len(), 2);
}

#[async_std::test]
async fn raw_bodies_can_carry_a_custom_content_type() {
    // Arrange
    let client = MockClient::builder().respond_with(
        ResponseStrategy::fixed(ResponseContent::new(200, RawBody::from("<p>hi</p>"))),
        RawEncoder::with_mime("text/html"),
    );

    // Act
    let response = client.get("http://localhost").await.unwrap();

    // Assert
    assert_eq!(response.headers()["content-type"], "text/html");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"<p>hi</p>");
}

#[async_std::test]
async fn body_print_limit_does_not_alter_recorded_requests() {
    // Arrange
    let client = MockClient::builder()
        .body_print_limit(BodyPrintLimit::Limited(2))
        .json_response(200, "ok");

    // Act
    client
        .post("http://localhost", "a body longer than the limit")
        .await
        .unwrap();

    // Assert
    let received_requests = client.received_requests().await.unwrap();
    assert_eq!(received_requests[0].body, b"a body longer than the limit");
}
