//! Closed protocol vocabularies that serialize into envelope fragments.
//!
//! Every value here is part of the EWS wire vocabulary. The sets are fixed:
//! a value that is not one of the declared variants cannot be expressed.

use crate::error::EwsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// How much detail the server returns for each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseShape {
    IdOnly,
    Default,
    AllProperties,
}

impl BaseShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdOnly => "IdOnly",
            Self::Default => "Default",
            Self::AllProperties => "AllProperties",
        }
    }

    /// Append `<t:BaseShape>..</t:BaseShape>`.
    pub fn write(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(b"<t:BaseShape>")?;
        writer.write_all(self.as_str().as_bytes())?;
        writer.write_all(b"</t:BaseShape>")
    }
}

/// Folder listing depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traversal {
    /// Immediate children only
    Shallow,
    /// The whole subtree
    Deep,
}

impl Traversal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallow => "Shallow",
            Self::Deep => "Deep",
        }
    }

    /// Append the ` Traversal=".."` attribute, leading space included.
    pub fn write(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(b" Traversal=\"")?;
        writer.write_all(self.as_str().as_bytes())?;
        writer.write_all(b"\"")
    }
}

/// Well-known folders addressed by name instead of by opaque id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistinguishedFolderId {
    #[default]
    MsgFolderRoot,
    Inbox,
    PublicFoldersRoot,
}

impl DistinguishedFolderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MsgFolderRoot => "msgfolderroot",
            Self::Inbox => "inbox",
            Self::PublicFoldersRoot => "publicfoldersroot",
        }
    }

    /// Append `<t:DistinguishedFolderId Id=".."/>`.
    pub fn write(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(b"<t:DistinguishedFolderId Id=\"")?;
        writer.write_all(self.as_str().as_bytes())?;
        writer.write_all(b"\"/>")
    }
}

macro_rules! wire_value {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EwsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$(Self::$variant),+]
                    .into_iter()
                    .find(|value| value.as_str() == s)
                    .ok_or_else(|| EwsError::unknown($kind, s))
            }
        }
    };
}

wire_value!(BaseShape, "base shape", [IdOnly, Default, AllProperties]);
wire_value!(Traversal, "traversal", [Shallow, Deep]);
wire_value!(
    DistinguishedFolderId,
    "distinguished folder",
    [MsgFolderRoot, Inbox, PublicFoldersRoot]
);
