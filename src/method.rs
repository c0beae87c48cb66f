//! The EWS method contract and the shared request/response algorithm.
//!
//! A concrete method only names itself, names the elements its response items
//! are made of, and writes its body. Envelope generation, transport and
//! decoding are the same for every method and live in free functions here.

use crate::config::{MethodOptions, SettingsConfig};
use crate::decoder::{decode_response, ItemSelector};
use crate::envelope::{build_envelope, write_shape};
use crate::error::EwsError;
use crate::item::DecodeOutcome;
use crate::transport::{PreparedRequest, Transport};
use std::io::Write;
use tracing::{debug, warn};

/// One EWS SOAP operation.
pub trait EwsMethod {
    /// Root element of the request body, e.g. `FindFolder`
    fn method_name(&self) -> &str;

    /// Local name of a response item element, e.g. `Folder`
    fn response_item_name(&self) -> &str;

    /// Local name of the element holding an item's `Id` and `ChangeKey`
    fn response_item_id(&self) -> &str;

    /// Shape, traversal and folder this method was built with.
    fn options(&self) -> &MethodOptions;

    /// Write the content of `<m:{method_name}>`.
    fn write_body(&self, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Write the `<m:{item}Shape>` element for `method`, if it has a base shape.
pub fn write_method_shape(method: &dyn EwsMethod, writer: &mut dyn Write) -> std::io::Result<()> {
    write_shape(writer, method.response_item_name(), method.options().base_shape)
}

/// Full SOAP envelope for `method`.
pub fn generate_envelope(method: &dyn EwsMethod) -> Result<Vec<u8>, EwsError> {
    build_envelope(method.method_name(), method.options().traversal, |writer| {
        method.write_body(writer)
    })
}

/// Encode `method` once into a request the transport may send repeatedly.
pub fn prepare_request(
    method: &dyn EwsMethod,
    settings: &SettingsConfig,
) -> Result<PreparedRequest, EwsError> {
    Ok(PreparedRequest {
        path: settings.endpoint_path.clone(),
        content_type: settings.request_content_type.clone(),
        body: generate_envelope(method)?,
    })
}

/// Items are decoded with the element names `method` declares.
pub fn item_selector(method: &dyn EwsMethod) -> ItemSelector<'_> {
    ItemSelector {
        element: method.response_item_name(),
        id_element: method.response_item_id(),
    }
}

/// Runs EWS methods over a transport.
pub struct EwsClient<T> {
    settings: SettingsConfig,
    transport: T,
}

impl<T: Transport> EwsClient<T> {
    pub fn new(settings: SettingsConfig, transport: T) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build, send and decode one invocation of `method`.
    ///
    /// Fails only when the envelope cannot be encoded or the transport fails.
    /// Server errors end up in [`DecodeOutcome::error_detail`]. A response
    /// whose Content-Type is not the SOAP one yields an empty outcome.
    pub fn execute(&self, method: &dyn EwsMethod) -> Result<DecodeOutcome, EwsError> {
        let request = prepare_request(method, &self.settings)?;
        debug!(
            method = method.method_name(),
            path = %request.path,
            bytes = request.body.len(),
            "Sending EWS request"
        );

        let response = self.transport.post(&request)?;

        if !self.settings.is_soap_response(response.content_type.as_deref()) {
            warn!(
                method = method.method_name(),
                status = response.status,
                content_type = ?response.content_type,
                "Response is not a SOAP body, skipping decode"
            );
            return Ok(DecodeOutcome::default());
        }

        debug!(
            method = method.method_name(),
            status = response.status,
            "Decoding EWS response"
        );
        Ok(decode_response(response.body, item_selector(method)))
    }
}
