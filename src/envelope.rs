//! Outbound SOAP envelope assembly.

use crate::error::EwsError;
use crate::types::{BaseShape, Traversal};
use std::io::Write;
use tracing::debug;

/// SOAP 1.1 envelope namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Exchange types namespace, bound to the `t` prefix.
pub const TYPES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/types";
/// Exchange messages namespace, bound to the `m` prefix.
pub const MESSAGES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";

/// Build a complete envelope for `method_name`.
///
/// `body` writes the method specific content between `<m:{method_name}>` and
/// its closing tag. Output only depends on the arguments, so the same bytes
/// can be sent again without rebuilding them. Any write error aborts the build
/// and nothing is returned.
pub fn build_envelope<F>(
    method_name: &str,
    traversal: Option<Traversal>,
    body: F,
) -> Result<Vec<u8>, EwsError>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let mut out = Vec::new();
    write_envelope(&mut out, method_name, traversal, body).map_err(EwsError::Encoding)?;

    debug!(method = method_name, bytes = out.len(), "Built SOAP envelope");
    Ok(out)
}

fn write_envelope<F>(
    out: &mut dyn Write,
    method_name: &str,
    traversal: Option<Traversal>,
    body: F,
) -> std::io::Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    write!(
        out,
        "<soap:Envelope xmlns:soap=\"{SOAP_NS}\" xmlns:t=\"{TYPES_NS}\" xmlns:m=\"{MESSAGES_NS}\"><soap:Body>"
    )?;
    write!(out, "<m:{method_name}")?;
    if let Some(traversal) = traversal {
        traversal.write(out)?;
    }
    out.write_all(b">")?;
    body(&mut *out)?;
    write!(out, "</m:{method_name}>")?;
    out.write_all(b"</soap:Body></soap:Envelope>")?;
    out.flush()
}

/// Write `<m:{item_name}Shape>` around the base shape, if one is set.
///
/// The element name follows the response item type (`Folder` gives
/// `FolderShape`, `Item` gives `ItemShape`).
pub fn write_shape(
    writer: &mut dyn Write,
    item_name: &str,
    shape: Option<BaseShape>,
) -> std::io::Result<()> {
    if let Some(shape) = shape {
        write!(writer, "<m:{item_name}Shape>")?;
        shape.write(writer)?;
        write!(writer, "</m:{item_name}Shape>")?;
    }
    Ok(())
}
