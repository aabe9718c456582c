use super::module::{Module, Msg};
use crate::error::Warning;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of one discovery run: the module inventory plus every non-fatal
/// diagnostic collected while building it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct Inventory {
    pub modules: Vec<Module>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl Inventory {
    pub fn new(modules: Vec<Module>, warnings: Vec<Warning>) -> Self {
        Self { modules, warnings }
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Looks a message up by its canonical URI across all modules.
    pub fn find_msg_by_uri(&self, uri: &str) -> Option<(&Module, &Msg)> {
        self.modules
            .iter()
            .find_map(|m| m.msgs.iter().find(|msg| msg.uri == uri).map(|msg| (m, msg)))
    }

    pub fn msg_count(&self) -> usize {
        self.modules.iter().map(|m| m.msgs.len()).sum()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.modules
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// JSON schema describing the serialized [`Inventory`], for generators that
/// validate the payload before templating against it.
pub fn inventory_json_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(Inventory)).unwrap_or(serde_json::Value::Null)
}
