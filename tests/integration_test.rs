//! Integration tests for the ews-soap crate.
//!
//! These tests exercise the public API surface end-to-end, combining
//! configuration, envelope generation, transport replay and decoding.

use ews_soap::config::{EwsConfig, MethodOptions, SettingsConfig};
use ews_soap::decoder::{decode_response, ItemSelector};
use ews_soap::envelope::{build_envelope, write_shape};
use ews_soap::error::{DecodeFault, EwsError};
use ews_soap::item::{DecodeOutcome, ResponseItem};
use ews_soap::method::{generate_envelope, prepare_request, EwsClient, EwsMethod};
use ews_soap::methods::{CreateFolder, FindFolder, GetFolder, MethodKind};
use ews_soap::transport::ReplayTransport;
use ews_soap::types::{BaseShape, DistinguishedFolderId, Traversal};
use std::io::Write;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

const FOLDER: ItemSelector<'static> = ItemSelector {
    element: "Folder",
    id_element: "FolderId",
};

fn client(content_type: Option<&str>, body: &str) -> EwsClient<ReplayTransport> {
    EwsClient::new(
        SettingsConfig::default(),
        ReplayTransport::new(content_type, body),
    )
}

fn item(id: &str, change_key: &str, display_name: &str) -> ResponseItem {
    ResponseItem {
        id: Some(id.to_string()),
        change_key: Some(change_key.to_string()),
        display_name: Some(display_name.to_string()),
    }
}

// ============================================================================
// Captured responses
// ============================================================================

const FIND_FOLDER_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Header>
    <h:ServerVersionInfo MajorVersion="14" MinorVersion="3" xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types"/>
  </s:Header>
  <s:Body xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <m:FindFolderResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages"
                          xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:FindFolderResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
          <m:RootFolder TotalItemsInView="3" IncludesLastItemInRange="true">
            <t:Folders>
              <t:Folder>
                <t:FolderId Id="AAMkAD1" ChangeKey="AQAAABY1"/>
                <t:ParentFolderId Id="root" ChangeKey="root-ck"/>
                <t:FolderClass>IPF.Note</t:FolderClass>
                <t:DisplayName>Inbox</t:DisplayName>
                <t:TotalCount>12</t:TotalCount>
                <t:ChildFolderCount>0</t:ChildFolderCount>
                <t:UnreadCount>2</t:UnreadCount>
              </t:Folder>
              <t:CalendarFolder>
                <t:FolderId Id="AAMkAD2" ChangeKey="AgAAABY2"/>
                <t:DisplayName>Calendar</t:DisplayName>
              </t:CalendarFolder>
              <t:Folder>
                <t:FolderId ChangeKey="AQAAABY3" Id="AAMkAD3"/>
                <t:DisplayName>Sent Items</t:DisplayName>
              </t:Folder>
            </t:Folders>
          </m:RootFolder>
        </m:FindFolderResponseMessage>
      </m:ResponseMessages>
    </m:FindFolderResponse>
  </s:Body>
</s:Envelope>"#;

const ERROR_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:GetFolderResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages">
      <m:ResponseMessages>
        <m:GetFolderResponseMessage ResponseClass="Error">
          <m:MessageText>The specified folder could not be found in the store.</m:MessageText>
          <m:ResponseCode>ErrorFolderNotFound</m:ResponseCode>
          <m:DescriptiveLinkKey>0</m:DescriptiveLinkKey>
        </m:GetFolderResponseMessage>
      </m:ResponseMessages>
    </m:GetFolderResponse>
  </s:Body>
</s:Envelope>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:ResponseCode xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages">ErrorFoo</m:ResponseCode>
    <s:Fault>
      <faultcode xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">a:ErrorSchemaValidation</faultcode>
      <faultstring xml:lang="en-US">Detailed failure</faultstring>
    </s:Fault>
  </s:Body>
</s:Envelope>"#;

// ============================================================================
// End-to-end: envelope generation
// ============================================================================

#[test]
fn test_e2e_find_folder_envelope() {
    let method = FindFolder::new(
        MethodOptions::default()
            .with_base_shape(BaseShape::AllProperties)
            .with_traversal(Traversal::Shallow)
            .with_folder(DistinguishedFolderId::MsgFolderRoot),
    );
    let xml = String::from_utf8(generate_envelope(&method).unwrap()).unwrap();

    assert_eq!(
        xml,
        "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:t=\"http://schemas.microsoft.com/exchange/services/2006/types\" \
         xmlns:m=\"http://schemas.microsoft.com/exchange/services/2006/messages\">\
         <soap:Body><m:FindFolder Traversal=\"Shallow\">\
         <m:FolderShape><t:BaseShape>AllProperties</t:BaseShape></m:FolderShape>\
         <m:ParentFolderIds><t:DistinguishedFolderId Id=\"msgfolderroot\"/></m:ParentFolderIds>\
         </m:FindFolder></soap:Body></soap:Envelope>"
    );
}

#[test]
fn test_e2e_envelope_is_deterministic_for_every_combination() {
    let shapes = [None, Some(BaseShape::IdOnly), Some(BaseShape::Default), Some(BaseShape::AllProperties)];
    let traversals = [None, Some(Traversal::Shallow), Some(Traversal::Deep)];

    for shape in shapes {
        for traversal in traversals {
            let options = MethodOptions {
                base_shape: shape,
                traversal,
                folder: DistinguishedFolderId::Inbox,
            };
            let method = FindFolder::new(options);
            let first = generate_envelope(&method).unwrap();
            let second = generate_envelope(&method).unwrap();
            assert_eq!(first, second, "shape {shape:?}, traversal {traversal:?}");
        }
    }
}

#[test]
fn test_e2e_envelope_is_well_formed_xml() {
    let method = CreateFolder::new(
        MethodOptions::default().with_folder(DistinguishedFolderId::Inbox),
        "Tom & Jerry's <stuff>",
    );
    let envelope = generate_envelope(&method).unwrap();

    let mut reader = quick_xml::Reader::from_reader(envelope.as_slice());
    let mut buf = Vec::new();
    let mut display_name = None;
    let mut in_display_name = false;
    loop {
        match reader.read_event_into(&mut buf).unwrap() {
            quick_xml::events::Event::Start(e) => {
                in_display_name = e.local_name().as_ref() == b"DisplayName";
            }
            quick_xml::events::Event::Text(t) if in_display_name => {
                display_name = Some(t.unescape().unwrap().into_owned());
            }
            quick_xml::events::Event::End(_) => in_display_name = false,
            quick_xml::events::Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    assert_eq!(display_name.as_deref(), Some("Tom & Jerry's <stuff>"));
}

#[test]
fn test_e2e_custom_body_with_build_envelope() {
    let bytes = build_envelope("FindItem", Some(Traversal::Shallow), |w| {
        write_shape(w, "Item", Some(BaseShape::IdOnly))?;
        w.write_all(b"<m:ParentFolderIds>")?;
        DistinguishedFolderId::Inbox.write(w)?;
        w.write_all(b"</m:ParentFolderIds>")
    })
    .unwrap();
    let xml = String::from_utf8(bytes).unwrap();
    assert!(xml.contains("<m:ItemShape><t:BaseShape>IdOnly</t:BaseShape></m:ItemShape>"));
}

#[test]
fn test_e2e_prepared_request_replays_same_bytes() {
    let method = GetFolder::new(MethodOptions::default().with_base_shape(BaseShape::Default));
    let request = prepare_request(&method, &SettingsConfig::default()).unwrap();

    let transport = ReplayTransport::new(Some(SOAP_CONTENT_TYPE), ERROR_RESPONSE);
    let client = EwsClient::new(SettingsConfig::default(), transport);
    client.execute(&method).unwrap();
    client.execute(&method).unwrap();

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], request);
    assert_eq!(sent[1], request);
}

// ============================================================================
// End-to-end: decoding through the client
// ============================================================================

#[test]
fn test_e2e_find_folder_items() {
    let client = client(Some(SOAP_CONTENT_TYPE), FIND_FOLDER_RESPONSE);
    let method = FindFolder::new(MethodOptions::default().with_traversal(Traversal::Deep));

    let outcome = client.execute(&method).unwrap();

    assert_eq!(
        outcome.items,
        vec![
            item("AAMkAD1", "AQAAABY1", "Inbox"),
            item("AAMkAD3", "AQAAABY3", "Sent Items"),
        ]
    );
    assert!(outcome.is_success());
}

#[test]
fn test_e2e_response_code_error() {
    let client = client(Some(SOAP_CONTENT_TYPE), ERROR_RESPONSE);
    let method = GetFolder::new(MethodOptions::default());

    let outcome = client.execute(&method).unwrap();

    assert!(outcome.items.is_empty());
    assert_eq!(outcome.error_detail.as_deref(), Some("ErrorFolderNotFound"));
    assert!(outcome.fault.is_none());
}

#[test]
fn test_e2e_fault_string_overrides_response_code() {
    let client = client(Some(SOAP_CONTENT_TYPE), FAULT_RESPONSE);
    let method = GetFolder::new(MethodOptions::default());

    let outcome = client.execute(&method).unwrap();
    assert_eq!(outcome.error_detail.as_deref(), Some("Detailed failure"));
}

#[test]
fn test_e2e_html_response_not_decoded() {
    let client = client(Some("text/html"), FAULT_RESPONSE);
    let outcome = client.execute(&GetFolder::new(MethodOptions::default())).unwrap();
    assert_eq!(outcome, DecodeOutcome::default());
}

#[test]
fn test_e2e_content_type_compared_exactly() {
    for content_type in [Some("text/xml;charset=utf-8"), Some("TEXT/XML; CHARSET=UTF-8"), None] {
        let client = client(content_type, FIND_FOLDER_RESPONSE);
        let outcome = client.execute(&FindFolder::new(MethodOptions::default())).unwrap();
        assert!(outcome.items.is_empty(), "content type {content_type:?}");
    }
}

#[test]
fn test_e2e_custom_soap_content_type_from_config() {
    let yaml = r#"
settings:
  soap_content_type: "text/xml;charset=utf-8"
"#;
    let config: EwsConfig = serde_yaml::from_str(yaml).unwrap();
    let transport = ReplayTransport::new(Some("text/xml;charset=utf-8"), FIND_FOLDER_RESPONSE);
    let client = EwsClient::new(config.settings, transport);

    let outcome = client.execute(&FindFolder::new(config.defaults)).unwrap();
    assert_eq!(outcome.items.len(), 2);
}

#[test]
fn test_e2e_truncated_response_keeps_items() {
    let cut = FIND_FOLDER_RESPONSE
        .find("<t:CalendarFolder>")
        .unwrap();
    let truncated = format!("{}</t:Wrong>", &FIND_FOLDER_RESPONSE[..cut]);
    let client = client(Some(SOAP_CONTENT_TYPE), &truncated);

    let outcome = client.execute(&FindFolder::new(MethodOptions::default())).unwrap();

    assert_eq!(outcome.items, vec![item("AAMkAD1", "AQAAABY1", "Inbox")]);
    assert!(matches!(outcome.fault, Some(DecodeFault::Xml(_))));
    assert!(!outcome.is_success());
}

#[test]
fn test_e2e_body_cut_off_inside_item() {
    let cut = FIND_FOLDER_RESPONSE.find("Calendar</t:DisplayName>").unwrap();
    let client = client(Some(SOAP_CONTENT_TYPE), &FIND_FOLDER_RESPONSE[..cut]);

    let outcome = client.execute(&FindFolder::new(MethodOptions::default())).unwrap();

    assert_eq!(outcome.items, vec![item("AAMkAD1", "AQAAABY1", "Inbox")]);
    assert_eq!(
        outcome.fault,
        Some(DecodeFault::Xml(
            "unexpected end of document inside <DisplayName>".to_string()
        ))
    );
    assert!(!outcome.is_success());
}

#[test]
fn test_e2e_create_folder_response() {
    let response = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body>
        <m:CreateFolderResponse xmlns:m="urn:m" xmlns:t="urn:t">
          <m:ResponseMessages>
            <m:CreateFolderResponseMessage ResponseClass="Success">
              <m:ResponseCode>NoError</m:ResponseCode>
              <m:Folders><t:Folder><t:FolderId Id="new-id" ChangeKey="new-ck"/></t:Folder></m:Folders>
            </m:CreateFolderResponseMessage>
          </m:ResponseMessages>
        </m:CreateFolderResponse>
    </s:Body></s:Envelope>"#;
    let client = client(Some(SOAP_CONTENT_TYPE), response);
    let method = CreateFolder::new(MethodOptions::default(), "Receipts");

    let outcome = client.execute(&method).unwrap();

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].id.as_deref(), Some("new-id"));
    assert_eq!(outcome.items[0].display_name, None);
    assert!(outcome.is_success());
}

// ============================================================================
// Decoder directly
// ============================================================================

#[test]
fn test_decode_same_bytes_twice_is_equal() {
    let first = decode_response(FIND_FOLDER_RESPONSE.as_bytes(), FOLDER);
    let second = decode_response(FIND_FOLDER_RESPONSE.as_bytes(), FOLDER);
    assert_eq!(first, second);
}

#[test]
fn test_decode_other_item_type() {
    let selector = ItemSelector {
        element: "CalendarFolder",
        id_element: "FolderId",
    };
    let outcome = decode_response(FIND_FOLDER_RESPONSE.as_bytes(), selector);
    assert_eq!(outcome.items, vec![item("AAMkAD2", "AgAAABY2", "Calendar")]);
}

#[test]
fn test_decode_outcome_json() {
    let outcome = decode_response(ERROR_RESPONSE.as_bytes(), FOLDER);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["error_detail"], "ErrorFolderNotFound");
    assert_eq!(json["items"], serde_json::json!([]));
    assert!(json["fault"].is_null());
}

// ============================================================================
// Method lookup
// ============================================================================

#[test]
fn test_method_kind_round_trip_through_client() {
    let client = client(Some(SOAP_CONTENT_TYPE), FIND_FOLDER_RESPONSE);
    let method = MethodKind::FindFolder
        .build(MethodOptions::default().with_base_shape(BaseShape::IdOnly), None)
        .unwrap();

    let outcome = client.execute(method.as_ref()).unwrap();
    assert_eq!(outcome.items.len(), 2);

    let sent = String::from_utf8(client.transport().requests()[0].body.clone()).unwrap();
    assert!(sent.contains("<m:FindFolder>"));
    assert!(sent.contains("<t:BaseShape>IdOnly</t:BaseShape>"));
}

#[test]
fn test_unknown_method_rejected() {
    let err = "DeleteFolder".parse::<MethodKind>().unwrap_err();
    assert!(matches!(err, EwsError::UnknownValue { kind: "method", .. }));
}

#[test]
fn test_method_trait_object_facets() {
    let methods: Vec<Box<dyn EwsMethod>> = vec![
        Box::new(FindFolder::new(MethodOptions::default())),
        Box::new(GetFolder::new(MethodOptions::default())),
        Box::new(CreateFolder::new(MethodOptions::default(), "x")),
    ];
    let names: Vec<_> = methods.iter().map(|m| m.method_name().to_string()).collect();
    assert_eq!(names, ["FindFolder", "GetFolder", "CreateFolder"]);
}
