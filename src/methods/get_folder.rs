use crate::config::MethodOptions;
use crate::method::{write_method_shape, EwsMethod};
use std::io::Write;

/// Fetches a distinguished folder.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/getfolder>.
#[derive(Debug, Clone)]
pub struct GetFolder {
    options: MethodOptions,
}

impl GetFolder {
    pub fn new(options: MethodOptions) -> Self {
        Self { options }
    }
}

impl EwsMethod for GetFolder {
    fn method_name(&self) -> &str {
        "GetFolder"
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
        writer.write_all(b"<m:FolderIds>")?;
        self.options.folder.write(writer)?;
        writer.write_all(b"</m:FolderIds>")
    }
}
