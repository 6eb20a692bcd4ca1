//! Tree builder for tagdiff markup.
//!
//! Recursive descent over the token stream from `tagdiff-lexer`:
//!
//! ```text
//! document   ::= declaration? node
//! declaration::= '<' '?' Text attribute* '?' '>'
//! node       ::= tag_open content tag_close
//! tag_open   ::= '<' Text attribute* '>'
//! tag_close  ::= '<' '/' Text '>'
//! attribute  ::= Text '=' '"' Text? '"'
//! content    ::= ε | text_run | node+
//! ```
//!
//! Before a node's content is parsed, `matching_close_offset` locates the
//! node's closing tag. Content parsing stops at that boundary, so the parser
//! never has to guess whether the next `<` starts a sibling or closes the
//! current element.

use crate::ast::{Arena, Attribute, Declaration, Element, Node, NodeId, Text, Tree};
use crate::ParseError;
use tagdiff_lexer::{normalize_whitespace, Cursor, Token};

/// Index of the `<` that opens the closing tag matching the tag opened at
/// `open_index`.
///
/// Scans forward with a depth counter: `<` followed by a name opens a level,
/// `<` followed by `/` closes one. Returns `None` when the input ends before
/// the depth returns to zero, or when `open_index` is out of range.
pub fn matching_close_offset(tokens: &[Token], open_index: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (offset, pair) in tokens.get(open_index..)?.windows(2).enumerate() {
        match pair {
            [Token::LBracket, Token::Text(_)] => depth += 1,
            [Token::LBracket, Token::Slash] => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open_index + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// tagdiff tree builder.
///
/// Converts a flat token stream into a `Tree` whose root is the outermost
/// element. Parent links are assigned as soon as an element's children are
/// all built.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    arena: Arena,
    declaration: Option<Declaration>,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            arena: Arena::default(),
            declaration: None,
        }
    }

    /// Build a tree from a token stream.
    pub fn parse(tokens: Vec<Token>) -> Result<Tree, ParseError> {
        Parser::new(tokens).parse_document()
    }

    /// Build a tree straight from source text.
    ///
    /// A leading declaration is read from the raw text with the lexer's
    /// cursor; the rest of the document is tokenized and parsed.
    pub fn parse_str(source: &str) -> Result<Tree, ParseError> {
        let normalized = normalize_whitespace(source);
        let mut cursor = Cursor::new(normalized.trim_start());

        let declaration = cursor.scan_declaration()?.map(Declaration::from);

        let mut parser = Parser::new(tagdiff_lexer::tokenize(&cursor.rest()));
        parser.declaration = declaration;
        parser.parse_document()
    }

    /// Parse a full document.
    fn parse_document(mut self) -> Result<Tree, ParseError> {
        if self.declaration.is_none() && self.at_declaration() {
            self.declaration = Some(self.parse_declaration()?);
        }

        if self.is_at_end() {
            return Err(ParseError::UnexpectedEnd {
                expected: "root element",
                position: self.pos,
            });
        }

        let root = self.parse_node()?;

        if !self.is_at_end() {
            return Err(ParseError::TrailingContent { position: self.pos });
        }

        let tokens = self.tokens.len();
        let tree = self.arena.finish(root, self.declaration);
        tracing::debug!(
            root = tree.root_ref().name().unwrap_or_default(),
            nodes = tree.len(),
            tokens,
            "parsed document"
        );
        Ok(tree)
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Parse one element, its content and its closing tag.
    fn parse_node(&mut self) -> Result<NodeId, ParseError> {
        let open = self.pos;
        let (name, attributes) = self.parse_tag_open()?;

        let boundary =
            matching_close_offset(&self.tokens, open).ok_or_else(|| ParseError::Unterminated {
                name: name.clone(),
                position: open,
            })?;
        tracing::trace!(%name, open, boundary, "located closing tag");

        let children = self.parse_content(boundary)?;
        self.parse_tag_close(&name)?;

        let id = self.arena.push(Node::Element(Element {
            name,
            attributes,
            children,
        }));
        self.arena.adopt(id);
        Ok(id)
    }

    /// Parse everything between the current position and `boundary`.
    ///
    /// A stretch without any `<` is a single text run; otherwise it must be
    /// a sequence of elements.
    fn parse_content(&mut self, boundary: usize) -> Result<Vec<NodeId>, ParseError> {
        if self.pos >= boundary {
            return Ok(Vec::new());
        }

        let run = &self.tokens[self.pos..boundary];
        if !run.contains(&Token::LBracket) {
            let content: String = run.iter().map(Token::source_text).collect();
            self.pos = boundary;
            return Ok(vec![self.arena.push(Node::Text(Text { content }))]);
        }

        let mut children = Vec::new();
        while self.pos < boundary {
            if self.peek() != Some(&Token::LBracket) {
                return Err(self.unexpected("'<'"));
            }
            children.push(self.parse_node()?);
        }
        Ok(children)
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// `'<' name attribute* '>'`
    fn parse_tag_open(&mut self) -> Result<(String, Vec<Attribute>), ParseError> {
        self.expect(&Token::LBracket, "'<'")?;
        let name = self.expect_text("tag name")?;
        let attributes = self.parse_attributes()?;
        self.expect(&Token::RBracket, "'>'")?;
        Ok((name, attributes))
    }

    /// `'<' '/' name '>'`, where name must equal the opening tag's name.
    fn parse_tag_close(&mut self, name: &str) -> Result<(), ParseError> {
        self.expect(&Token::LBracket, "'<'")?;
        self.expect(&Token::Slash, "'/'")?;

        let position = self.pos;
        let found = self.expect_text("closing tag name")?;
        if found != name {
            return Err(ParseError::TagMismatch {
                expected: name.to_string(),
                found,
                position,
            });
        }

        self.expect(&Token::RBracket, "'>'")
    }

    /// `'<' '?' name attribute* '?' '>'`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        self.expect(&Token::LBracket, "'<'")?;
        self.expect(&Token::QuestionMark, "'?'")?;
        let name = self.expect_text("declaration name")?;
        let attributes = self.parse_attributes()?;
        self.expect(&Token::QuestionMark, "'?'")?;
        self.expect(&Token::RBracket, "'>'")?;
        Ok(Declaration { name, attributes })
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();
        while self.peek().is_some_and(Token::is_text) {
            attributes.push(self.parse_attribute()?);
        }
        Ok(attributes)
    }

    /// `name '=' '"' value? '"'`
    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let name = self.expect_text("attribute name")?;
        self.expect(&Token::Equals, "'=' after attribute name")?;
        self.expect(&Token::Quote, "opening '\"'")?;

        let value = match self.peek() {
            Some(Token::Text(value)) => {
                let value = value.clone();
                self.advance();
                value
            }
            _ => String::new(),
        };

        self.expect(&Token::Quote, "closing '\"'")?;
        Ok(Attribute { name, value })
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at_declaration(&self) -> bool {
        matches!(
            self.tokens.get(self.pos..self.pos + 2),
            Some([Token::LBracket, Token::QuestionMark])
        )
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> Result<(), ParseError> {
        if self.peek() == Some(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_text(&mut self, expected: &'static str) -> Result<String, ParseError> {
        if let Some(Token::Text(text)) = self.peek() {
            let text = text.clone();
            self.advance();
            Ok(text)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                expected,
                found: token.to_string(),
                position: self.pos,
            },
            None => ParseError::UnexpectedEnd {
                expected,
                position: self.pos,
            },
        }
    }
}
