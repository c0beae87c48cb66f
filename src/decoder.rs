//! Streaming decoder for EWS SOAP responses.
//!
//! The decoder walks the response once, forward only, and never builds a
//! document tree. Three scans look at the current event: one pulls the text of
//! a named element, one collects response errors, one assembles response
//! items. Everything they do not recognize is skipped, so new server fields
//! never break decoding.
//!
//! Uses quick-xml, which does not expand external entities.

use crate::error::DecodeFault;
use crate::item::{DecodeOutcome, ResponseItem};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;
use tracing::{debug, error};

/// Element carrying the per-message response code.
pub const RESPONSE_CODE: &str = "ResponseCode";
/// Response code reported when a message succeeded.
pub const NO_ERROR: &str = "NoError";
/// SOAP 1.1 fault description element.
pub const FAULT_STRING: &str = "faultstring";
/// Element carrying an item's display name.
pub const DISPLAY_NAME: &str = "DisplayName";

/// Which elements make up a response item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSelector<'a> {
    /// Local name of the item element, e.g. `Folder`
    pub element: &'a str,
    /// Local name of the nested element carrying `Id` and `ChangeKey`, e.g. `FolderId`
    pub id_element: &'a str,
}

/// A parse event reduced to what the scans look at.
#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlEvent {
    Start {
        local_name: String,
        attributes: Vec<(String, String)>,
    },
    End {
        local_name: String,
    },
    Characters(String),
    /// Comments, processing instructions, declarations
    Other,
    EndDocument,
}

impl XmlEvent {
    fn is_start(&self, name: &str) -> bool {
        matches!(self, Self::Start { local_name, .. } if local_name == name)
    }

    fn is_end(&self, name: &str) -> bool {
        matches!(self, Self::End { local_name } if local_name == name)
    }
}

/// Forward-only cursor over the response events.
///
/// Empty elements are reported as a start followed by an end, and adjacent
/// text and CDATA chunks are merged into one characters event. Reaching the
/// end of input while an element is still open is a fault.
struct EventCursor<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: XmlEvent,
    pending: Option<XmlEvent>,
    /// Local names of the elements opened and not yet closed
    open: Vec<String>,
    exhausted: bool,
}

impl<R: BufRead> EventCursor<R> {
    fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            current: XmlEvent::Other,
            pending: None,
            open: Vec::new(),
            exhausted: false,
        }
    }

    /// Move to the next event. Returns `false` once the document has ended.
    fn advance(&mut self) -> Result<bool, DecodeFault> {
        if let Some(event) = self.pending.take() {
            self.current = event;
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        let event = match self.read_event()? {
            XmlEvent::Characters(mut text) => {
                loop {
                    match self.read_event()? {
                        XmlEvent::Characters(more) => text.push_str(&more),
                        XmlEvent::EndDocument => {
                            self.exhausted = true;
                            break;
                        }
                        next => {
                            self.pending = Some(next);
                            break;
                        }
                    }
                }
                XmlEvent::Characters(text)
            }
            XmlEvent::EndDocument => {
                self.exhausted = true;
                self.current = XmlEvent::EndDocument;
                return Ok(false);
            }
            other => other,
        };
        self.current = event;
        Ok(true)
    }

    fn read_event(&mut self) -> Result<XmlEvent, DecodeFault> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(ref e) => {
                let local_name = local_name_str(e.local_name().as_ref());
                self.open.push(local_name.clone());
                XmlEvent::Start {
                    local_name,
                    attributes: attributes(e)?,
                }
            }
            Event::Empty(ref e) => XmlEvent::Start {
                local_name: local_name_str(e.local_name().as_ref()),
                attributes: attributes(e)?,
            },
            Event::End(ref e) => {
                self.open.pop();
                XmlEvent::End {
                    local_name: local_name_str(e.local_name().as_ref()),
                }
            }
            Event::Text(ref e) => XmlEvent::Characters(e.unescape()?.into_owned()),
            Event::CData(ref e) => XmlEvent::Characters(String::from_utf8_lossy(e).into_owned()),
            Event::Eof => match self.open.last() {
                Some(element) => return Err(DecodeFault::unexpected_end(element)),
                None => XmlEvent::EndDocument,
            },
            _ => XmlEvent::Other,
        };
        Ok(event)
    }
}

fn local_name_str(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Attributes keyed by local name, values unescaped.
fn attributes(e: &BytesStart) -> Result<Vec<(String, String)>, DecodeFault> {
    let mut result = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let name = local_name_str(attr.key.local_name().as_ref());
        let value = attr.unescape_value()?.into_owned();
        result.push((name, value));
    }
    Ok(result)
}

/// Text of the element starting at the current event.
///
/// Returns `None` unless the current event starts `local_name`. Otherwise the
/// cursor is moved to the matching end event and the last characters event
/// seen on the way is returned; earlier ones are overwritten, not appended.
fn handle_tag<R: BufRead>(
    cursor: &mut EventCursor<R>,
    local_name: &str,
) -> Result<Option<String>, DecodeFault> {
    if !cursor.current.is_start(local_name) {
        return Ok(None);
    }

    let mut result = None;
    while !cursor.current.is_end(local_name) {
        if !cursor.advance()? {
            return Err(DecodeFault::unexpected_end(local_name));
        }
        if let XmlEvent::Characters(ref text) = cursor.current {
            result = Some(text.clone());
        }
    }
    Ok(result)
}

/// Record a failing response code or a SOAP fault string.
///
/// A fault string overwrites an earlier response code error; a detail is
/// never cleared once set.
fn handle_errors<R: BufRead>(
    cursor: &mut EventCursor<R>,
    error_detail: &mut Option<String>,
) -> Result<(), DecodeFault> {
    if let Some(code) = handle_tag(cursor, RESPONSE_CODE)? {
        if code != NO_ERROR {
            *error_detail = Some(code);
        }
    }
    if let Some(fault) = handle_tag(cursor, FAULT_STRING)? {
        *error_detail = Some(fault);
    }
    Ok(())
}

/// Build the item starting at the current event, if it starts one.
fn handle_item<R: BufRead>(
    cursor: &mut EventCursor<R>,
    selector: ItemSelector<'_>,
) -> Result<Option<ResponseItem>, DecodeFault> {
    if !cursor.current.is_start(selector.element) {
        return Ok(None);
    }

    let mut item = ResponseItem::default();
    while !cursor.current.is_end(selector.element) {
        if !cursor.advance()? {
            return Err(DecodeFault::unexpected_end(selector.element));
        }
        match cursor.current {
            XmlEvent::Start {
                ref local_name,
                ref attributes,
            } if local_name == selector.id_element => {
                let (mut id, mut change_key) = (None, None);
                for (name, value) in attributes {
                    match name.as_str() {
                        "Id" => id = Some(value.clone()),
                        "ChangeKey" => change_key = Some(value.clone()),
                        _ => {}
                    }
                }
                item.id = id;
                item.change_key = change_key;
            }
            _ => {
                if let Some(display_name) = handle_tag(cursor, DISPLAY_NAME)? {
                    item.display_name = Some(display_name);
                }
            }
        }
    }
    Ok(Some(item))
}

fn scan<R: BufRead>(
    cursor: &mut EventCursor<R>,
    selector: ItemSelector<'_>,
    outcome: &mut DecodeOutcome,
) -> Result<(), DecodeFault> {
    while cursor.advance()? {
        handle_errors(cursor, &mut outcome.error_detail)?;
        if let Some(item) = handle_item(cursor, selector)? {
            outcome.items.push(item);
        }
    }
    Ok(())
}

/// Decode a SOAP response body.
///
/// Never fails: a read or parse fault is logged, stored in
/// [`DecodeOutcome::fault`] and ends the pass with everything decoded up to
/// that point. The source is consumed and dropped before returning.
pub fn decode_response<R: BufRead>(source: R, selector: ItemSelector<'_>) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();
    let mut cursor = EventCursor::new(source);

    if let Err(fault) = scan(&mut cursor, selector, &mut outcome) {
        error!(
            item = selector.element,
            items = outcome.items.len(),
            error = %fault,
            "Error while parsing SOAP response"
        );
        outcome.fault = Some(fault);
    }
    if let Some(ref detail) = outcome.error_detail {
        error!(item = selector.element, detail = %detail, "EWS error response");
    }

    debug!(
        item = selector.element,
        items = outcome.items.len(),
        "Decoded SOAP response"
    );
    outcome
}
