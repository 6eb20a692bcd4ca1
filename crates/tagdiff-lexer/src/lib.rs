//! tagdiff Lexer
//!
//! Tokenizes documents in the tagdiff markup dialect (a small XML-like
//! language without comments, CDATA, entities or self-closing tags).
//! Produces structural markers (`<`, `>`, `/`, `?`, `=`, `"`) and text runs.
//!
//! Also exposes the raw-text helper scans that share the scanner's cursor:
//! `Cursor::skip_until`, `scan_attributes` and `Cursor::scan_declaration`.
//!
//! # Example
//!
//! ```
//! use tagdiff_lexer::{tokenize, Token};
//!
//! let tokens = tokenize("<a>hi</a>");
//! assert_eq!(tokens[1], Token::Text("a".into()));
//! assert_eq!(tokens.len(), 8);
//! ```

pub mod cursor;
pub mod scanner;
pub mod token;

pub use cursor::{scan_attributes, Cursor, DeclarationError, Landing, Prolog};
pub use scanner::{normalize_whitespace, Scanner};
pub use token::Token;

/// Tokenize a whole document. See [`Scanner`].
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::tokenize(source)
}
