//! Exchange Web Services SOAP methods.
//!
//! Builds EWS request envelopes and decodes the streamed XML responses into
//! folder-like items plus an error indicator.
//!
//! # Features
//!
//! - Closed vocabularies for base shape, traversal and distinguished folders
//! - Deterministic envelope generation, safe to resend
//! - Single forward-only pass over the response, unknown elements skipped
//! - Response codes and SOAP faults reported without discarding decoded items
//! - Parse and I/O faults surfaced next to partial results
//!
//! # Example
//!
//! ```
//! use ews_soap::config::{MethodOptions, SettingsConfig};
//! use ews_soap::methods::FindFolder;
//! use ews_soap::transport::ReplayTransport;
//! use ews_soap::types::Traversal;
//! use ews_soap::EwsClient;
//!
//! let response = r#"<Folder><FolderId Id="1" ChangeKey="a"/><DisplayName>Inbox</DisplayName></Folder>"#;
//! let transport = ReplayTransport::new(Some("text/xml; charset=utf-8"), response);
//! let client = EwsClient::new(SettingsConfig::default(), transport);
//!
//! let method = FindFolder::new(MethodOptions::default().with_traversal(Traversal::Shallow));
//! let outcome = client.execute(&method)?;
//! assert_eq!(outcome.items[0].display_name.as_deref(), Some("Inbox"));
//! # Ok::<(), ews_soap::EwsError>(())
//! ```

pub mod config;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod item;
pub mod method;
pub mod methods;
pub mod transport;
pub mod types;

pub use config::{EwsConfig, MethodOptions};
pub use decoder::{decode_response, ItemSelector};
pub use envelope::build_envelope;
pub use error::{DecodeFault, EwsError};
pub use item::{DecodeOutcome, ResponseItem};
pub use method::{generate_envelope, prepare_request, EwsClient, EwsMethod};
pub use transport::{PreparedRequest, Transport, TransportResponse};
