use crate::ProtoPlugin;
use modscope_plugin::SchemaCaps;
use std::sync::Arc;

pub fn proto_caps(extension: &str) -> SchemaCaps {
    let plugin = Arc::new(ProtoPlugin::with_extension(extension));
    SchemaCaps {
        matcher: plugin.clone(),
        parser: plugin,
    }
}
