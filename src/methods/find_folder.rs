use crate::config::MethodOptions;
use crate::method::{write_method_shape, EwsMethod};
use std::io::Write;

/// Lists the folders below a distinguished folder.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/findfolder>.
#[derive(Debug, Clone)]
pub struct FindFolder {
    options: MethodOptions,
}

impl FindFolder {
    pub fn new(options: MethodOptions) -> Self {
        Self { options }
    }
}

impl EwsMethod for FindFolder {
    fn method_name(&self) -> &str {
        "FindFolder"
    }

    fn response_item_name(&self) -> &str {
        "Folder"
    }

    fn response_item_id(&self) -> &str {
        "FolderId"
    }

    fn options(&self) -> &MethodOptions {
        &self.options
    }

    fn write_body(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        write_method_shape(self, writer)?;
        writer.write_all(b"<m:ParentFolderIds>")?;
        self.options.folder.write(writer)?;
        writer.write_all(b"</m:ParentFolderIds>")
    }
}
