//! Concrete EWS methods.

mod create_folder;
mod find_folder;
mod get_folder;

pub use create_folder::CreateFolder;
pub use find_folder::FindFolder;
pub use get_folder::GetFolder;

use crate::config::MethodOptions;
use crate::error::EwsError;
use crate::method::EwsMethod;
use std::fmt;
use std::str::FromStr;

/// The methods this crate implements, by EWS operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    FindFolder,
    GetFolder,
    CreateFolder,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FindFolder => "FindFolder",
            Self::GetFolder => "GetFolder",
            Self::CreateFolder => "CreateFolder",
        }
    }

    /// Instantiate the method. `display_name` is only used by `CreateFolder`,
    /// which requires it.
    pub fn build(
        &self,
        options: MethodOptions,
        display_name: Option<&str>,
    ) -> Result<Box<dyn EwsMethod>, EwsError> {
        let method: Box<dyn EwsMethod> = match self {
            Self::FindFolder => Box::new(FindFolder::new(options)),
            Self::GetFolder => Box::new(GetFolder::new(options)),
            Self::CreateFolder => {
                let name = display_name.ok_or_else(|| {
                    EwsError::Config("CreateFolder needs a display name".to_string())
                })?;
                Box::new(CreateFolder::new(options, name))
            }
        };
        Ok(method)
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodKind {
    type Err = EwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::FindFolder, Self::GetFolder, Self::CreateFolder]
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EwsError::unknown("method", s))
    }
}
