use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A remote-procedure message exposed by a module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Msg {
    /// Bare message type name, e.g. `MsgCreateUser`.
    pub name: String,
    /// Package-qualified identifier, e.g. `moon.moon.MsgCreateUser`.
    #[serde(rename = "URI")]
    pub uri: String,
    /// Absolute path of the schema file declaring the message.
    pub file_path: PathBuf,
}

/// One discovered application module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Module {
    pub name: String,
    pub types_import_path: String,
    pub msgs: Vec<Msg>,
}

impl Module {
    pub fn new(name: impl Into<String>, types_import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types_import_path: types_import_path.into(),
            msgs: Vec::new(),
        }
    }

    pub fn msg(&self, name: &str) -> Option<&Msg> {
        self.msgs.iter().find(|m| m.name == name)
    }
}
