//! Boundary to the HTTP transport.
//!
//! Connections, authentication, redirects and retries all live behind
//! [`Transport`]. This crate only hands over finished request bytes and reads
//! back the response content type and body.

use crate::error::EwsError;
use std::cell::RefCell;
use std::io::{BufRead, Cursor};

/// A fully encoded request, ready to be posted (and re-posted) as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Path the request is posted to
    pub path: String,
    /// Content-Type header value
    pub content_type: String,
    /// SOAP envelope bytes
    pub body: Vec<u8>,
}

/// The parts of an HTTP response the decoder needs.
#[derive(Debug)]
pub struct TransportResponse<B> {
    pub status: u16,
    /// Content-Type header, if the server sent one
    pub content_type: Option<String>,
    /// Response body, read forward only
    pub body: B,
}

/// Blocking HTTP POST to an EWS endpoint.
///
/// Any error is terminal for the invocation; callers do not retry.
pub trait Transport {
    type Body: BufRead;

    fn post(&self, request: &PreparedRequest) -> Result<TransportResponse<Self::Body>, EwsError>;
}

/// Transport that answers every request with the same captured response.
///
/// Requests are recorded so callers can inspect exactly what was sent.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
    requests: RefCell<Vec<PreparedRequest>>,
}

impl ReplayTransport {
    /// Answer with status 200, the given content type and body.
    pub fn new(content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: content_type.map(str::to_string),
            body: body.into(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for ReplayTransport {
    type Body = Cursor<Vec<u8>>;

    fn post(&self, request: &PreparedRequest) -> Result<TransportResponse<Self::Body>, EwsError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(TransportResponse {
            status: self.status,
            content_type: self.content_type.clone(),
            body: Cursor::new(self.body.clone()),
        })
    }
}
