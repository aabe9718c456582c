use crate::PluginError;
use tree_sitter::{Language, Node, Query};

/// Loads a Tree-sitter query from an SCM string.
pub fn load_query(language: &Language, scm: &str) -> Result<Query, PluginError> {
    Query::new(language, scm).map_err(|e| PluginError::Query(format!("{:?}", e)))
}

/// Gets the index of a capture name in a query.
pub fn get_capture_index(query: &Query, name: &str) -> Result<u32, PluginError> {
    query
        .capture_index_for_name(name)
        .ok_or_else(|| PluginError::MissingCapture(name.to_string()))
}

/// Source text of a node, empty if the node spans invalid UTF-8.
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// 1-based (line, column) of the first ERROR or MISSING node under `root`.
pub fn first_error_position(root: Node) -> Option<(usize, usize)> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return Some((pos.row + 1, pos.column + 1));
        }
        if node.has_error() {
            let children: Vec<Node> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    let pos = root.start_position();
    Some((pos.row + 1, pos.column + 1))
}

/// Macro to define a struct for capture indices and a `new` method to initialize it from a query.
#[macro_export]
macro_rules! decl_indices {
    ($name:ident, { $($field:ident => $capture:expr),+ $(,)? }) => {
        #[derive(Clone)]
        pub struct $name {
            $(pub $field: u32,)+
        }

        impl $name {
            pub fn new(query: &tree_sitter::Query) -> std::result::Result<Self, $crate::PluginError> {
                Ok(Self {
                    $($field: $crate::utils::get_capture_index(query, $capture)?,)+
                })
            }
        }
    };
}
