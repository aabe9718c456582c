use crate::parser::{Rule, describe_rule};
use modscope_api::ParseError;
use pest::error::LineColLocation;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    #[error("{line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("{line}:{column}: invalid field number '{text}'")]
    InvalidFieldNumber {
        text: String,
        line: usize,
        column: usize,
    },
}

impl ProtoError {
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        ProtoError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        match self {
            ProtoError::Syntax { line, column, .. }
            | ProtoError::InvalidFieldNumber { line, column, .. } => (*line, *column),
        }
    }

    pub fn into_parse_error(self, path: &Path) -> ParseError {
        let (line, column) = self.position();
        let message = match self {
            ProtoError::Syntax { message, .. } => message,
            ProtoError::InvalidFieldNumber { text, .. } => format!("invalid field number '{text}'"),
        };
        ParseError::new(path, line, column, message)
    }
}

impl From<pest::error::Error<Rule>> for ProtoError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos(pos) => pos,
            LineColLocation::Span(start, _) => start,
        };
        let err = err.renamed_rules(describe_rule);
        ProtoError::syntax(line, column, err.variant.message())
    }
}

pub type ProtoResult<T> = Result<T, ProtoError>;
