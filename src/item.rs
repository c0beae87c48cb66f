//! Decoded response entities.

use crate::error::DecodeFault;
use serde::Serialize;
use std::fmt;

/// One entity decoded from a response, e.g. a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseItem {
    /// `Id` attribute of the identifier element
    pub id: Option<String>,
    /// `ChangeKey` attribute of the same identifier element
    pub change_key: Option<String>,
    /// Text of the `DisplayName` element
    pub display_name: Option<String>,
}

impl fmt::Display for ResponseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {} changeKey: {} displayName: {}",
            self.id.as_deref().unwrap_or("-"),
            self.change_key.as_deref().unwrap_or("-"),
            self.display_name.as_deref().unwrap_or("-"),
        )
    }
}

/// Result of one response decoding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeOutcome {
    /// Items in document order
    pub items: Vec<ResponseItem>,
    /// Server-reported error: a non-success response code or a SOAP fault string
    pub error_detail: Option<String>,
    /// Set when reading stopped before the end of the document
    pub fault: Option<DecodeFault>,
}

impl DecodeOutcome {
    /// True when the server reported no error and the whole body was read.
    pub fn is_success(&self) -> bool {
        self.error_detail.is_none() && self.fault.is_none()
    }
}
