use crate::color::TextColor;
use crate::error::ParseError;
use miette::NamedSource;
use std::collections::VecDeque;
use std::sync::Arc;

/// A single tag argument, carrying its source span for diagnostics.
#[derive(Debug, Clone)]
pub struct TagArgument {
    value: String,
    pos_start: usize,
    pos_end: usize,
    src: Arc<NamedSource<String>>,
}

impl TagArgument {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn span(&self) -> (usize, usize) {
        (self.pos_start, self.pos_end)
    }

    /// Builds an [`ParseError::InvalidArgument`] pointing at this argument.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::InvalidArgument {
            src: (*self.src).clone(),
            span: (self.pos_start, self.pos_end.saturating_sub(self.pos_start)).into(),
            message: message.into(),
        }
    }

    pub fn as_int(&self) -> Result<i64, ParseError> {
        self.value
            .parse()
            .map_err(|_| self.error(format!("Expected an integer, found '{}'", self.value)))
    }

    pub fn as_float(&self) -> Result<f64, ParseError> {
        self.value
            .parse()
            .map_err(|_| self.error(format!("Expected a number, found '{}'", self.value)))
    }

    pub fn as_bool(&self) -> Result<bool, ParseError> {
        match self.value.as_str() {
            "true" | "on" => Ok(true),
            "false" | "off" => Ok(false),
            other => Err(self.error(format!("Expected a boolean, found '{other}'"))),
        }
    }

    pub fn as_color(&self) -> Result<TextColor, ParseError> {
        TextColor::parse(&self.value).ok_or_else(|| {
            self.error(format!(
                "Expected a color name or '#rrggbb' hex literal, found '{}'",
                self.value
            ))
        })
    }
}

/// An ordered, once-consumable queue of tag arguments.
///
/// Resolving a tag pops from the front; a resolver may drain the queue
/// partially or fully. Missing required arguments surface as a
/// [`ParseError::MissingArgument`] pointing at the tag.
#[derive(Debug, Clone)]
pub struct ArgumentQueue {
    args: VecDeque<TagArgument>,
    tag: String,
    tag_span: (usize, usize),
    src: Arc<NamedSource<String>>,
}

impl ArgumentQueue {
    /// Consumes and returns the next argument, if any.
    pub fn pop(&mut self) -> Option<TagArgument> {
        self.args.pop_front()
    }

    /// Consumes the next argument or fails with a description of what the
    /// tag expected there.
    pub fn pop_or(&mut self, expected: &str) -> Result<TagArgument, ParseError> {
        self.args
            .pop_front()
            .ok_or_else(|| ParseError::MissingArgument {
                src: (*self.src).clone(),
                span: (
                    self.tag_span.0,
                    self.tag_span.1.saturating_sub(self.tag_span.0),
                )
                    .into(),
                tag: self.tag.clone(),
                expected: expected.to_string(),
            })
    }

    pub fn peek(&self) -> Option<&TagArgument> {
        self.args.front()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }
}

/// Splits a raw argument string on unescaped `:` separators into an
/// [`ArgumentQueue`].
///
/// A segment may be quoted with `'` or `"` to embed separators; within a
/// segment, a backslash escapes the quote characters, the separator and
/// itself. `base_offset` is the byte offset of `raw` within the original
/// input, so each argument carries a usable span.
pub fn tokenize(
    raw: &str,
    base_offset: usize,
    tag: &str,
    tag_span: (usize, usize),
    src: Arc<NamedSource<String>>,
) -> ArgumentQueue {
    let mut args = VecDeque::new();
    if !raw.is_empty() {
        let mut value = String::new();
        let mut seg_start = 0;
        let mut quote: Option<char> = None;
        let mut chars = raw.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    if let Some((_, next)) = chars.next() {
                        match next {
                            '\'' | '"' | ':' | '\\' => value.push(next),
                            other => {
                                value.push('\\');
                                value.push(other);
                            }
                        }
                    } else {
                        value.push('\\');
                    }
                }
                '\'' | '"' => match quote {
                    None if value.is_empty() => quote = Some(c),
                    Some(q) if q == c => quote = None,
                    _ => value.push(c),
                },
                ':' if quote.is_none() => {
                    args.push_back(TagArgument {
                        value: std::mem::take(&mut value),
                        pos_start: base_offset + seg_start,
                        pos_end: base_offset + i,
                        src: Arc::clone(&src),
                    });
                    seg_start = i + c.len_utf8();
                }
                _ => value.push(c),
            }
        }
        args.push_back(TagArgument {
            value,
            pos_start: base_offset + seg_start,
            pos_end: base_offset + raw.len(),
            src: Arc::clone(&src),
        });
    }

    ArgumentQueue {
        args,
        tag: tag.to_string(),
        tag_span,
        src,
    }
}
