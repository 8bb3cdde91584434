use crate::error::{BoxError, Error};
use crate::{Request, ResponseContent};
use futures::future::BoxFuture;
use futures::FutureExt;
use log::debug;
use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// How a [`MockClient`] picks the response for each request it intercepts.
///
/// ## Fixed responses
///
/// [`ResponseStrategy::Fixed`] replies with the same [`ResponseContent`] to every request,
/// no matter how many times it is called.
///
/// ## Sequenced responses
///
/// [`ResponseStrategy::Sequence`] replies with the first response on the first call, with the
/// second on the second call, and so on. Once all responses have been handed out, every
/// further call fails with [`Error::OutOfResponses`].
///
/// ## Computed responses
///
/// [`ResponseStrategy::Callback`] hands each [`Request`] to a function of yours, which decides
/// what to reply - or fails, in which case its error is returned to the caller as it is.
///
/// [`MockClient`]: crate::MockClient
pub enum ResponseStrategy<T> {
    Fixed(ResponseContent<T>),
    Sequence(ResponseSequence<T>),
    Callback(ResponseCallback<T>),
}

impl<T: Clone> ResponseStrategy<T> {
    pub fn fixed(response: ResponseContent<T>) -> Self {
        ResponseStrategy::Fixed(response)
    }

    pub fn sequence<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = ResponseContent<T>>,
    {
        ResponseStrategy::Sequence(ResponseSequence::new(responses))
    }

    pub fn callback<F, Fut, E>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseContent<T>, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        T: 'static,
    {
        ResponseStrategy::Callback(ResponseCallback::new(f))
    }

    /// Produce the response for `request`.
    pub async fn next(&self, request: &Request) -> Result<ResponseContent<T>, Error> {
        match self {
            ResponseStrategy::Fixed(response) => Ok(response.clone()),
            ResponseStrategy::Sequence(sequence) => sequence.next(),
            ResponseStrategy::Callback(callback) => callback.call(request.clone()).await,
        }
    }
}

impl<T: Debug> Debug for ResponseStrategy<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseStrategy::Fixed(response) => f.debug_tuple("Fixed").field(response).finish(),
            ResponseStrategy::Sequence(sequence) => {
                f.debug_tuple("Sequence").field(sequence).finish()
            }
            ResponseStrategy::Callback(callback) => {
                f.debug_tuple("Callback").field(callback).finish()
            }
        }
    }
}

/// An ordered list of responses, handed out one per call.
///
/// The list itself never changes after construction: a cursor tracks how many responses
/// have been served so far.
///
/// The cursor is atomic, hence a `ResponseSequence` can be shared between tasks. Every response
/// is still handed out exactly once, but the order in which concurrent requests observe them
/// is the order in which they reach the sequence, not the order in which they were sent.
#[derive(Debug)]
pub struct ResponseSequence<T> {
    responses: Vec<ResponseContent<T>>,
    cursor: AtomicUsize,
}

impl<T: Clone> ResponseSequence<T> {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = ResponseContent<T>>,
    {
        Self {
            responses: responses.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Hand out the next response, or fail with [`Error::OutOfResponses`] if they have all
    /// been used.
    pub fn next(&self) -> Result<ResponseContent<T>, Error> {
        let configured = self.responses.len();
        // Stop the cursor one past the end: it must not wrap around on very long runs.
        let index = self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |i| {
                (i < configured).then(|| i + 1)
            })
            .map_err(|_| {
                debug!("Response sequence exhausted after {} response(s).", configured);
                Error::OutOfResponses { configured }
            })?;
        Ok(self.responses[index].clone())
    }

    /// How many responses are still available.
    pub fn remaining(&self) -> usize {
        self.responses.len() - self.cursor.load(Ordering::SeqCst)
    }
}

type CallbackFn<T> =
    dyn Fn(Request) -> BoxFuture<'static, Result<ResponseContent<T>, BoxError>> + Send + Sync;

/// A user-supplied function computing the response for each request.
///
/// It holds no state of its own: every call is forwarded to the function.
///
/// ### Implementation notes:
/// The function is boxed, and so is the future it returns, to keep `ResponseStrategy`
/// a plain enum instead of a type parametrised over every closure it could hold.
pub struct ResponseCallback<T>(Box<CallbackFn<T>>);

impl<T> ResponseCallback<T> {
    pub fn new<F, Fut, E>(f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResponseContent<T>, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
        T: 'static,
    {
        Self(Box::new(move |request| {
            f(request)
                .map(|outcome| outcome.map_err(Into::<BoxError>::into))
                .boxed()
        }))
    }

    pub async fn call(&self, request: Request) -> Result<ResponseContent<T>, Error> {
        (self.0)(request).await.map_err(Error::Callback)
    }
}

impl<T> Debug for ResponseCallback<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Closures do not implement `Debug`.
        write!(f, "<callback>")
    }
}
