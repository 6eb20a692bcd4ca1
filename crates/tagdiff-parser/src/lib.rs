//! tagdiff Parser
//!
//! Builds a document tree from the token stream of `tagdiff-lexer` using
//! recursive descent with a precomputed closing-tag boundary per element
//! (see [`matching_close_offset`]). The tree is an arena: elements own their
//! children by id and every non-root node keeps its parent's id.
//!
//! Also renders trees back to markup.

pub mod ast;
pub mod parser;
pub mod render;

pub use ast::{Attribute, Declaration, Element, Node, NodeId, NodeRef, Text, Tree};
pub use parser::{matching_close_offset, Parser};
pub use render::render;

use tagdiff_lexer::{DeclarationError, Token};

/// Fatal tree-building error. No partial tree survives any of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A closing tag names a different element than the tag it closes.
    #[error("Parse error at token {position}: closing tag `</{found}>` does not match `<{expected}>`")]
    TagMismatch {
        expected: String,
        found: String,
        position: usize,
    },

    /// The boundary scan ran off the end of input.
    #[error("Parse error at token {position}: closing tag for `<{name}>` not found")]
    Unterminated { name: String, position: usize },

    /// A leading declaration read from raw text did not scan.
    #[error("Parse error: {0}")]
    Declaration(#[from] DeclarationError),

    #[error("Parse error at token {position}: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("Parse error at token {position}: expected {expected}, got end of input")]
    UnexpectedEnd {
        expected: &'static str,
        position: usize,
    },

    /// Anything after the root element. Only one root is supported.
    #[error("Parse error at token {position}: unexpected content after the root element")]
    TrailingContent { position: usize },
}

/// Build a tree from a token stream.
pub fn parse(tokens: Vec<Token>) -> Result<Tree, ParseError> {
    Parser::parse(tokens)
}

/// Tokenize and parse source text.
pub fn parse_str(source: &str) -> Result<Tree, ParseError> {
    Parser::parse_str(source)
}
