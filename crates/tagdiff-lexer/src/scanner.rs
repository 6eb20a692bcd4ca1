use crate::cursor::Cursor;
use crate::token::Token;

/// Collapse every whitespace run to a single space, then drop the space that
/// sits directly between `>` and `<`.
///
/// Whitespace-only text between two tags disappears; whitespace inside text
/// survives as one space.
pub fn normalize_whitespace(source: &str) -> String {
    let mut collapsed = String::with_capacity(source.len());
    let mut in_space = false;

    for c in source.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    collapsed.replace("> <", "><")
}

/// tagdiff markup scanner.
///
/// Walks the whitespace-normalized document once with a `Cursor`, emitting
/// structural markers as it meets them and buffering everything else into
/// the pending text run:
/// - `<` opens a tag and starts its name
/// - `/` inside a tag starts a closing-tag name
/// - a space ends any pending name inside a tag, and is kept inside element
///   text once the text has started
/// - between quotes inside a tag every character is literal
pub struct Scanner {
    cursor: Cursor,
    tokens: Vec<Token>,
    pending: String,
    in_identifier: bool,
    in_tag: bool,
    in_quote: bool,
    /// Element text has begun since the last `<` or `>`.
    in_text: bool,
}

impl Scanner {
    /// Create a scanner for the given source. Whitespace is normalized here.
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(&normalize_whitespace(source)),
            tokens: Vec::new(),
            pending: String::new(),
            in_identifier: false,
            in_tag: false,
            in_quote: false,
            in_text: false,
        }
    }

    /// Tokenize the entire source. Never fails: malformed markup is left for
    /// the tree builder to reject.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens();
        tracing::debug!(tokens = scanner.tokens.len(), "tokenized document");
        scanner.tokens
    }

    fn scan_tokens(&mut self) {
        while !self.cursor.is_at_end() {
            self.scan_token();
            self.cursor.advance();
        }
        self.flush();
    }

    fn scan_token(&mut self) {
        let ch = self.cursor.peek();

        if self.in_quote && ch != '"' {
            self.pending.push(ch);
            return;
        }

        match ch {
            '<' => {
                self.flush();
                self.in_tag = true;
                self.in_identifier = true;
                self.in_text = false;
                self.emit(Token::LBracket);
            }
            '>' => {
                self.flush();
                self.in_tag = false;
                self.in_identifier = false;
                self.in_text = false;
                self.emit(Token::RBracket);
            }
            '"' => {
                self.flush();
                if self.in_tag {
                    self.in_quote = !self.in_quote;
                }
                self.emit_marker(Token::Quote);
            }
            '=' => {
                self.flush();
                self.emit_marker(Token::Equals);
            }
            '?' => {
                self.flush();
                self.emit_marker(Token::QuestionMark);
            }
            '/' => {
                self.flush();
                if self.in_tag {
                    self.in_identifier = true;
                }
                self.emit_marker(Token::Slash);
            }
            ' ' => {
                if self.in_tag {
                    self.flush();
                    self.in_identifier = false;
                } else if self.in_text {
                    self.pending.push(' ');
                }
            }
            c => {
                if !self.in_tag {
                    self.in_text = true;
                }
                self.pending.push(c);
            }
        }
    }

    // --- Helpers ---

    /// Emit the pending text run, if any.
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.tokens.push(Token::Text(text));
        }
    }

    fn emit(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Emit a marker that may also appear inside element text.
    fn emit_marker(&mut self, token: Token) {
        if !self.in_tag {
            self.in_text = true;
        }
        self.emit(token);
    }
}
