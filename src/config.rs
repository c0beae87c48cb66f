//! Configuration types for EWS methods.

use crate::types::{BaseShape, DistinguishedFolderId, Traversal};
use serde::{Deserialize, Serialize};

/// Path of the EWS endpoint, relative to the server root.
pub const EWS_ENDPOINT_PATH: &str = "/ews/exchange.asmx";
/// Content type sent with every request.
pub const REQUEST_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";
/// Content type a response must carry, byte for byte, to be decoded.
pub const SOAP_RESPONSE_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwsConfig {
    /// Endpoint and content type settings
    pub settings: SettingsConfig,

    /// Options applied to methods built without explicit ones
    pub defaults: MethodOptions,
}

/// Endpoint and content type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Path requests are posted to
    pub endpoint_path: String,

    /// Content-Type header of outgoing requests
    pub request_content_type: String,

    /// Response Content-Type that marks a SOAP body, compared exactly
    pub soap_content_type: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            endpoint_path: EWS_ENDPOINT_PATH.to_string(),
            request_content_type: REQUEST_CONTENT_TYPE.to_string(),
            soap_content_type: SOAP_RESPONSE_CONTENT_TYPE.to_string(),
        }
    }
}

impl SettingsConfig {
    /// Whether a response with this Content-Type carries a SOAP body.
    ///
    /// Exchange answers `text/xml; charset=utf-8`; anything else, including
    /// other spellings of the same media type, is not decoded.
    pub fn is_soap_response(&self, content_type: Option<&str>) -> bool {
        content_type == Some(self.soap_content_type.as_str())
    }
}

/// Per-method shape, traversal and folder selection.
///
/// Set before the envelope is generated and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodOptions {
    /// Response shape, omitted from the request when unset
    pub base_shape: Option<BaseShape>,

    /// Traversal attribute, omitted when unset
    pub traversal: Option<Traversal>,

    /// Folder the method targets
    pub folder: DistinguishedFolderId,
}

impl Default for MethodOptions {
    fn default() -> Self {
        Self {
            base_shape: None,
            traversal: None,
            folder: DistinguishedFolderId::MsgFolderRoot,
        }
    }
}

impl MethodOptions {
    pub fn with_base_shape(mut self, base_shape: BaseShape) -> Self {
        self.base_shape = Some(base_shape);
        self
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = Some(traversal);
        self
    }

    pub fn with_folder(mut self, folder: DistinguishedFolderId) -> Self {
        self.folder = folder;
        self
    }
}
