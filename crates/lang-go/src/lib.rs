pub mod cap;
pub mod gomod;
pub mod parser;
pub mod queries;

pub use cap::go_caps;
pub use parser::GoParser;

/// Source plugin for Go module trees.
pub struct GoPlugin {
    parser: GoParser,
}

impl GoPlugin {
    pub fn new() -> Result<Self, modscope_plugin::PluginError> {
        Ok(Self {
            parser: GoParser::new()?,
        })
    }

    pub fn parser(&self) -> &GoParser {
        &self.parser
    }
}
