//! Error types for EWS methods.

use serde::Serialize;
use thiserror::Error;

/// Errors that abort an EWS method invocation.
#[derive(Error, Debug)]
pub enum EwsError {
    #[error("Envelope encoding error: {0}")]
    Encoding(#[source] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown {kind} value: {value:?}")]
    UnknownValue { kind: &'static str, value: String },
}

impl EwsError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// A fault that stopped a response decoding pass early.
///
/// Faults are recorded in the decode outcome next to whatever was decoded
/// before the stream broke, they never discard partial results.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum DecodeFault {
    /// Malformed XML in the response body
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The response body could not be read
    #[error("IO error while reading response: {0}")]
    Io(String),
}

impl From<quick_xml::Error> for DecodeFault {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Io(io.to_string()),
            other => Self::Xml(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for DecodeFault {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.to_string())
    }
}

impl DecodeFault {
    /// The document ended while `element` was still open.
    pub(crate) fn unexpected_end(element: &str) -> Self {
        Self::Xml(format!("unexpected end of document inside <{element}>"))
    }
}
