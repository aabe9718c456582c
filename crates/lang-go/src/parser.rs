use crate::queries::go_registrations::{GO_REGISTRATIONS_SCM, RegistrationIndices};
use modscope_plugin::utils::{first_error_position, load_query, node_text};
use modscope_plugin::{HandlerRegistration, PluginError, RegistrationScan};
use std::sync::Arc;
use tree_sitter::{Node, Parser, Query, QueryCursor, StreamingIterator};

const REGISTER_IMPLEMENTATIONS: &str = "RegisterImplementations";
const MSG_INTERFACE: &str = "Msg";

/// Extracts message handler registrations from Go source by walking the
/// syntax tree of each registering call.
pub struct GoParser {
    pub language: tree_sitter::Language,
    query: Arc<Query>,
    indices: RegistrationIndices,
}

impl Clone for GoParser {
    fn clone(&self) -> Self {
        Self {
            language: self.language.clone(),
            query: Arc::clone(&self.query),
            indices: self.indices.clone(),
        }
    }
}

impl GoParser {
    pub fn new() -> Result<Self, PluginError> {
        let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
        let query = load_query(&language, GO_REGISTRATIONS_SCM)?;
        let indices = RegistrationIndices::new(&query)?;
        Ok(Self {
            language,
            query: Arc::new(query),
            indices,
        })
    }

    pub fn parse_registrations(&self, source: &str) -> Result<RegistrationScan, PluginError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| PluginError::Language(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| PluginError::Language("Failed to parse go file".to_string()))?;

        let mut scan = RegistrationScan {
            registrations: Vec::new(),
            syntax_error: first_error_position(tree.root_node()),
        };

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, tree.root_node(), source.as_bytes());
        while let Some(mat) = matches.next() {
            let Some(method) = mat.captures.iter().find(|c| c.index == self.indices.method) else {
                continue;
            };
            let Some(args) = mat.captures.iter().find(|c| c.index == self.indices.args) else {
                continue;
            };
            let method = node_text(&method.node, source);
            scan.registrations.extend(registered_types(args.node, source, method));
        }

        // Nested registering calls can surface out of source order.
        scan.registrations.sort_by_key(|r| r.line);
        Ok(scan)
    }
}

fn registered_types(args: Node, source: &str, method: &str) -> Vec<HandlerRegistration> {
    let mut cursor = args.walk();
    let named: Vec<Node> = args.named_children(&mut cursor).collect();

    let implements_msg = method == REGISTER_IMPLEMENTATIONS;
    if implements_msg {
        let interface = named.first().and_then(|n| interface_name(*n, source));
        if interface != Some(MSG_INTERFACE) {
            return Vec::new();
        }
    }

    named
        .iter()
        .filter_map(|arg| {
            composite_type_name(*arg, source).map(|message| HandlerRegistration {
                message: message.to_string(),
                via: method.to_string(),
                implements_msg,
                line: arg.start_position().row + 1,
            })
        })
        .collect()
}

/// `&MsgX{}`, `MsgX{}`, `&types.MsgX{}` -> `MsgX`.
fn composite_type_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            if node_text(&operator, source) != "&" {
                return None;
            }
            composite_type_name(node.child_by_field_name("operand")?, source)
        }
        "parenthesized_expression" => composite_type_name(node.named_child(0)?, source),
        "composite_literal" => type_name(node.child_by_field_name("type")?, source),
        _ => None,
    }
}

fn type_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    match node.kind() {
        "type_identifier" => Some(node_text(&node, source)),
        "qualified_type" => Some(node_text(&node.child_by_field_name("name")?, source)),
        "generic_type" => type_name(node.child_by_field_name("type")?, source),
        _ => None,
    }
}

/// `(*sdk.Msg)(nil)` -> `Msg`.
fn interface_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let callee = match node.kind() {
        "call_expression" => node.child_by_field_name("function")?,
        "type_conversion_expression" => node.child_by_field_name("type")?,
        _ => return None,
    };
    let text = node_text(&callee, source)
        .trim_matches(|c: char| c == '(' || c == ')' || c == '*' || c.is_whitespace());
    text.rsplit('.').next().map(str::trim)
}
