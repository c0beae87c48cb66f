use crate::config::MethodOptions;
use crate::method::EwsMethod;
use quick_xml::escape::escape;
use std::io::Write;

/// Creates a folder under a distinguished folder.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/createfolder>.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    options: MethodOptions,
    display_name: String,
}

impl CreateFolder {
    pub fn new(options: MethodOptions, display_name: impl Into<String>) -> Self {
        Self {
            options,
            display_name: display_name.into(),
        }
    }
}

impl EwsMethod for CreateFolder {
    fn method_name(&self) -> &str {
        "CreateFolder"
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
        writer.write_all(b"<m:ParentFolderId>")?;
        self.options.folder.write(writer)?;
        writer.write_all(b"</m:ParentFolderId>")?;
        writer.write_all(b"<m:Folders><t:Folder><t:DisplayName>")?;
        writer.write_all(escape(self.display_name.as_str()).as_bytes())?;
        writer.write_all(b"</t:DisplayName></t:Folder></m:Folders>")
    }
}
