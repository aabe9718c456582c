use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Structural facts extracted from one schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    pub path: PathBuf,
    pub syntax: Option<String>,
    pub package: Option<String>,
    pub imports: Vec<String>,
    /// File-level options, name to raw constant text.
    pub options: Vec<(String, String)>,
    /// Messages in declaration order; nested messages follow their parent
    /// under a dotted name (`Outer.Inner`).
    pub messages: Vec<MessageDecl>,
    pub enums: Vec<String>,
    pub services: Vec<ServiceDecl>,
}

impl SchemaFile {
    pub fn message(&self, name: &str) -> Option<&MessageDecl> {
        self.messages.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldLabel {
    Singular,
    Optional,
    Required,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    /// Type as written, `map<K, V>` for map fields.
    pub type_name: String,
    pub number: u32,
    pub label: FieldLabel,
    /// Name of the enclosing `oneof`, if any.
    pub oneof: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDecl {
    pub name: String,
    pub rpcs: Vec<RpcDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcDecl {
    pub name: String,
    pub request: String,
    pub response: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

/// One handler registration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRegistration {
    /// Bare message type name (`MsgCreateUser`, never `types.MsgCreateUser`).
    pub message: String,
    /// The registering call, e.g. `RegisterConcrete`.
    pub via: String,
    /// Registered as an implementation of the message interface, which is
    /// what marks the type as a handled message rather than any codec type.
    pub implements_msg: bool,
    /// 1-based source line of the message argument.
    pub line: usize,
}

/// Output of a registration scan over one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationScan {
    pub registrations: Vec<HandlerRegistration>,
    /// First syntax error position (1-based line, column) if the tree had errors.
    pub syntax_error: Option<(usize, usize)>,
}

impl RegistrationScan {
    pub fn message_names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.message.as_str())
    }

    pub fn msg_implementations(&self) -> impl Iterator<Item = &str> {
        self.registrations
            .iter()
            .filter(|r| r.implements_msg)
            .map(|r| r.message.as_str())
    }
}
