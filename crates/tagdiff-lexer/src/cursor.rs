//! Character cursor shared by the scanner and the raw-text helper scans.
//!
//! The cursor only moves forward, except for a single `back()` step that
//! undoes the most recent move.

/// Where `Cursor::skip_until` leaves the cursor relative to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// On the last character before the match.
    Before,
    /// On the first character of the match.
    At,
    /// On the first character after the match.
    After,
}

/// A `<?name key="value"?>` declaration read straight from source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prolog {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

/// Why a raw-text declaration scan failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("declaration is missing its closing `?>`")]
    Unterminated,

    #[error("declaration has no name")]
    MissingName,

    #[error("declaration attributes `{0}` are not `name=\"value\"` pairs")]
    MalformedAttributes(String),
}

/// Forward cursor over the characters of a document.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    previous: usize,
}

impl Cursor {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            previous: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Current character, or `'\0'` past the end.
    pub fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    pub fn advance(&mut self) {
        self.previous = self.pos;
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Undo the last move.
    pub fn back(&mut self) {
        self.pos = self.previous;
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        let mut rest = self.chars[self.pos.min(self.chars.len())..].iter();
        pattern.chars().all(|c| rest.next() == Some(&c))
    }

    /// Text from the cursor to the end of input.
    pub fn rest(&self) -> String {
        self.chars[self.pos.min(self.chars.len())..].iter().collect()
    }

    /// Index of the first occurrence of `pattern` strictly after the cursor.
    pub fn index_of(&self, pattern: &str) -> Option<usize> {
        self.find_from(pattern, self.pos + 1)
    }

    /// Move the cursor to the next occurrence of `pattern` (searched strictly
    /// after the current position) and return the text it skipped over,
    /// from the cursor up to the first character of the match.
    ///
    /// Returns `None` and leaves the cursor untouched when there is no match.
    pub fn skip_until(&mut self, pattern: &str, landing: Landing) -> Option<String> {
        let found = self.index_of(pattern)?;
        let skipped = self.chars[self.pos..found].iter().collect();

        self.previous = self.pos;
        self.pos = match landing {
            Landing::Before => found - 1,
            Landing::At => found,
            Landing::After => found + pattern.chars().count(),
        };
        Some(skipped)
    }

    /// Scan a `<?name attrs?>` declaration starting at the cursor.
    ///
    /// Returns `Ok(None)` when the cursor is not on `<?`. On any error the
    /// cursor does not move.
    pub fn scan_declaration(&mut self) -> Result<Option<Prolog>, DeclarationError> {
        if !self.starts_with("<?") {
            return Ok(None);
        }
        let start = self.pos;

        self.advance(); // consume `<`, land on `?`
        let Some(body) = self.skip_until("?>", Landing::After) else {
            self.back();
            return Err(DeclarationError::Unterminated);
        };

        let body = body.strip_prefix('?').unwrap_or(&body).trim();
        let (name, attrs) = body.split_once(' ').unwrap_or((body, ""));
        let prolog = if name.is_empty() {
            Err(DeclarationError::MissingName)
        } else {
            scan_attributes(attrs)
                .map(|attributes| Prolog {
                    name: name.to_string(),
                    attributes,
                })
                .ok_or_else(|| DeclarationError::MalformedAttributes(attrs.trim().to_string()))
        };

        match prolog {
            Ok(prolog) => {
                self.previous = start;
                Ok(Some(prolog))
            }
            Err(e) => {
                self.pos = start;
                self.previous = start;
                Err(e)
            }
        }
    }

    fn find_from(&self, pattern: &str, from: usize) -> Option<usize> {
        let needle: Vec<char> = pattern.chars().collect();
        if needle.is_empty() || from > self.chars.len() {
            return None;
        }
        self.chars[from..]
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
            .map(|offset| from + offset)
    }
}

/// Split an attribute string such as `id="bk101" lang="en"` into
/// name/value pairs, in source order.
///
/// The text is split on `"`; every even part is a `name=` and the part after
/// it is the value. Names are trimmed, values are kept verbatim. Returns
/// `None` when any part does not form a `name="value"` pair.
pub fn scan_attributes(text: &str) -> Option<Vec<(String, String)>> {
    let parts: Vec<&str> = text.split('"').collect();
    let mut attributes = Vec::new();

    for pair in parts.chunks(2) {
        match pair {
            [name, value] => {
                let name = name.trim().strip_suffix('=')?.trim_end();
                if name.is_empty() || name.contains(char::is_whitespace) {
                    return None;
                }
                attributes.push((name.to_string(), (*value).to_string()));
            }
            [rest] if rest.trim().is_empty() => {}
            _ => return None,
        }
    }

    Some(attributes)
}
