use std::fmt;

/// Token classification for tagdiff markup.
///
/// Structural markers carry no data; `Text` carries the literal run
/// (tag names, attribute names and values, element text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Structure
    LBracket,
    RBracket,
    Slash,
    QuestionMark,

    // Attributes
    Equals,
    Quote,

    // Literals (carry data)
    Text(String),
}

impl Token {
    /// The text carried by a `Text` token.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text(_))
    }

    /// The markup this token was scanned from. Text is returned verbatim.
    pub fn source_text(&self) -> &str {
        match self {
            Token::LBracket => "<",
            Token::RBracket => ">",
            Token::Slash => "/",
            Token::QuestionMark => "?",
            Token::Equals => "=",
            Token::Quote => "\"",
            Token::Text(text) => text,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => write!(f, "{text:?}"),
            other => f.write_str(other.source_text()),
        }
    }
}
