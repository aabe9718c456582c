use crate::ProtoPlugin;
use modscope_api::ParseError;
use modscope_plugin::{SchemaFile, SchemaParseCap};
use std::path::Path;

impl SchemaParseCap for ProtoPlugin {
    fn parse_schema_file(&self, source: &str, path: &Path) -> Result<SchemaFile, ParseError> {
        let mut file = crate::parser::parse_schema(source).map_err(|e| e.into_parse_error(path))?;
        file.path = path.to_path_buf();
        tracing::debug!(
            path = %path.display(),
            package = file.package.as_deref().unwrap_or(""),
            messages = file.messages.len(),
            "parsed schema file"
        );
        Ok(file)
    }
}
