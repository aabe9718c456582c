use crate::GoPlugin;
use modscope_plugin::{PluginError, SourceCaps};
use std::sync::Arc;

pub fn go_caps() -> Result<SourceCaps, PluginError> {
    let plugin = Arc::new(GoPlugin::new()?);
    Ok(SourceCaps {
        matcher: plugin.clone(),
        parser: plugin.clone(),
        project: plugin,
    })
}
