//! Scripted transport for offline tests.

use crate::error::{CosError, NetworkError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

/// One canned COS answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Bodiless answer with the given status.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Empty 200.
    pub fn ok() -> Self {
        Self::status(200)
    }

    /// 200 carrying an XML (or any) body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            ..Self::status(200)
        }
    }

    /// What a successful DELETE returns.
    pub fn no_content() -> Self {
        Self::status(204)
    }

    /// A COS `<Error>` document with `code` as both code and message, and
    /// the request id header COS always sends alongside it.
    pub fn cos_error(status: u16, code: &str) -> Self {
        Self {
            body: super::TestFixtures::error_xml(code, code).into(),
            ..Self::status(status)
        }
        .with_header("x-cos-request-id", "NjVhNGYxYmJfMTQ4NzM1MGJf")
    }

    /// Add one header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add several headers.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    fn into_response(self) -> HttpResponse {
        HttpResponse {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Builds an answer from every request received so far, the current one
/// last.
pub type Responder = Box<dyn Fn(&[HttpRequest]) -> MockResponse + Send + Sync>;

enum Scripted {
    Fixed(MockResponse),
    Computed(Responder),
}

/// Transport that answers from a FIFO queue, then from an optional default,
/// and records every request it receives.
///
/// A request nothing is left to answer fails as a connection error naming
/// the request, so a scenario that sends more than the test scripted stops
/// there.
#[derive(Default)]
pub struct MockTransport {
    queue: Mutex<VecDeque<Scripted>>,
    fallback: Option<MockResponse>,
    recorded: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Transport with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport answering `responses` in order.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            queue: Mutex::new(responses.into_iter().map(Scripted::Fixed).collect()),
            ..Self::default()
        }
    }

    /// Answer every request with `response` once the queue is empty.
    pub fn with_default(response: MockResponse) -> Self {
        Self {
            fallback: Some(response),
            ..Self::default()
        }
    }

    /// Append an answer after the ones already queued.
    pub fn queue_response(&self, response: MockResponse) {
        self.queue.lock().push_back(Scripted::Fixed(response));
    }

    /// Append an answer computed when its request arrives.
    pub fn queue_responder<F>(&self, responder: F)
    where
        F: Fn(&[HttpRequest]) -> MockResponse + Send + Sync + 'static,
    {
        self.queue
            .lock()
            .push_back(Scripted::Computed(Box::new(responder)));
    }

    /// Append a 200 whose body is the body of the latest PUT, the way a
    /// GET after an upload answers.
    pub fn queue_echo_of_last_put(&self) {
        self.queue_responder(|history| {
            let body = history
                .iter()
                .rev()
                .find(|r| r.method == "PUT")
                .and_then(|r| r.body.clone())
                .unwrap_or_default();
            let length = body.len().to_string();
            MockResponse::ok_with_body(body).with_header("content-length", length)
        });
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.recorded.lock().clone()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.recorded.lock().len()
    }

    /// Most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.recorded.lock().last().cloned()
    }

    /// The `index`-th request received, counting from zero.
    pub fn request(&self, index: usize) -> Option<HttpRequest> {
        self.recorded.lock().get(index).cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CosError> {
        let scripted = self.queue.lock().pop_front();
        let described = format!("{} {}", request.method, request.url);
        let answer = {
            let mut recorded = self.recorded.lock();
            recorded.push(request);
            match scripted {
                Some(Scripted::Fixed(response)) => Some(response),
                Some(Scripted::Computed(responder)) => Some(responder(recorded.as_slice())),
                None => self.fallback.clone(),
            }
        };

        answer.map(MockResponse::into_response).ok_or_else(|| {
            CosError::Network(NetworkError::ConnectionFailed {
                message: format!("no scripted response for {}", described),
            })
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued", &self.queue.lock().len())
            .field("recorded", &self.recorded.lock().len())
            .finish()
    }
}
