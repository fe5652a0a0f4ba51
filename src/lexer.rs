use crate::error::LexError;
use miette::NamedSource;

/// Represents the different kinds of tokens the lexer can produce.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// A literal text run.
    Text(String),
    /// An opening tag `<name>` or `<name:args>`. `args` is the raw argument
    /// string between the first `:` and the closing `>`, unsplit.
    TagOpen { name: String, args: String },
    /// A closing tag `</name>`.
    TagClose { name: String },
    /// A backslash escape; carries the escaped character.
    Escape(char),
}

/// A token with its type and byte span in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub ttype: TokenType,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, pos_start: usize, pos_end: usize) -> Token {
        Token {
            ttype,
            pos_start,
            pos_end,
        }
    }
}

/// Returns whether `c` may appear in a tag name. A leading `!` (decoration
/// negation) or `#` (hex color) is additionally allowed in first position.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A single-pass tokenizer for TagMark markup.
///
/// The lexer recognizes tag *syntax* only; it never consults the resolver
/// registry. Anything that does not form well-formed tag syntax degrades to
/// text instead of erroring — the only fatal condition is a trailing
/// backslash with nothing to escape.
pub struct Lexer<'a> {
    input: &'a str,
    source_name: String,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::new_with_name(input, "input")
    }

    pub fn new_with_name(input: &'a str, source_name: &str) -> Self {
        Self {
            input,
            source_name: source_name.to_string(),
            position: 0,
        }
    }

    pub fn lex(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                '\\' => tokens.push(self.read_escape()?),
                '<' => match self.scan_tag() {
                    Some((ttype, end)) => {
                        tokens.push(Token::new(ttype, self.position, end));
                        self.position = end;
                    }
                    // Not tag syntax; the `<` is literal text.
                    None => tokens.push(self.read_text()),
                },
                _ => tokens.push(self.read_text()),
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn read_escape(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // consume the backslash
        match self.advance() {
            Some(escaped) => Ok(Token::new(TokenType::Escape(escaped), start, self.position)),
            None => Err(LexError::TrailingEscape {
                src: NamedSource::new(self.source_name.clone(), self.input.to_string()),
                span: (start, 1).into(),
            }),
        }
    }

    /// Reads a text run up to the next backslash or `<`. A `<` that turns
    /// out not to start a tag is consumed here as a single literal character,
    /// so repeated calls always make progress.
    fn read_text(&mut self) -> Token {
        let start = self.position;
        let mut value = String::new();
        if self.peek() == Some('<') {
            self.advance();
            value.push('<');
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                break;
            }
            if c == '<' {
                if self.scan_tag().is_some() {
                    break;
                }
                self.advance();
                value.push('<');
                continue;
            }
            self.advance();
            value.push(c);
        }
        Token::new(TokenType::Text(value), start, self.position)
    }

    /// Attempts to scan a tag starting at the current `<` without consuming
    /// anything. Returns the token type and the byte offset just past the
    /// closing `>` on success.
    fn scan_tag(&self) -> Option<(TokenType, usize)> {
        let rest = &self.input[self.position..];
        debug_assert!(rest.starts_with('<'));
        let mut chars = rest.char_indices().skip(1).peekable();

        let (_, mut c) = *chars.peek()?;
        let closing = c == '/';
        if closing {
            chars.next();
        }

        let mut name = String::new();
        // A hex color (`<#rrggbb>`) or a negated decoration (`<!bold>`) is
        // still one tag name to the lexer.
        if let Some(&(_, first)) = chars.peek() {
            if first == '#' || first == '!' {
                name.push(first);
                chars.next();
            }
        }
        while let Some(&(_, ch)) = chars.peek() {
            if is_name_char(ch) {
                name.push(ch);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() || name == "#" || name == "!" {
            return None;
        }

        let (idx, next) = chars.next()?;
        c = next;
        if c == '>' {
            let end = self.position + idx + 1;
            let ttype = if closing {
                TokenType::TagClose { name }
            } else {
                TokenType::TagOpen {
                    name,
                    args: String::new(),
                }
            };
            return Some((ttype, end));
        }
        if closing || c != ':' {
            return None;
        }

        // Scan the raw argument section up to an unquoted `>`. Quoted
        // segments may contain `<`, `>` and the separator; a backslash
        // escapes the character after it.
        let args_start = idx + 1;
        let mut quote: Option<char> = None;
        let mut escaped = false;
        for (i, ch) in chars {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '\'' | '"' => match quote {
                    None => quote = Some(ch),
                    Some(q) if q == ch => quote = None,
                    Some(_) => {}
                },
                '>' if quote.is_none() => {
                    let args = rest[args_start..i].to_string();
                    return Some((TokenType::TagOpen { name, args }, self.position + i + 1));
                }
                '<' if quote.is_none() => return None,
                _ => {}
            }
        }
        None
    }
}
