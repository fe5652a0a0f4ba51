use crate::args;
use crate::error::{ParseError, TagMarkError};
use crate::lexer::{Lexer, Token, TokenType};
use crate::tags::{Context, Tag, TagResolver};
use miette::NamedSource;
use std::sync::Arc;

/// A node in the parse tree, before tag resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A literal text run. No two consecutive siblings are ever both text.
    Text(String),
    /// A tag with its raw (unsplit) argument string and children.
    Tag {
        /// Lowercased tag name.
        name: String,
        raw_args: String,
        /// Byte offset of `raw_args` within the input.
        args_pos: usize,
        children: Vec<Element>,
        pos_start: usize,
        pos_end: usize,
    },
}

/// Upper bound on pre-process expansion passes, so a placeholder expanding
/// to itself cannot loop forever.
const MAX_PREPROCESS_PASSES: usize = 8;

/// A lenient stack-based parser for TagMark token streams.
///
/// The parser consults the resolver only for `has` checks (an unclaimed
/// open tag stays literal text) and for expanding pre-process tags before
/// the tree is built. Actual tag resolution happens in
/// [`crate::resolver::resolve_root`].
pub struct Parser<'r> {
    source: Arc<NamedSource<String>>,
    input: String,
    tokens: Vec<Token>,
    resolver: &'r (dyn TagResolver + Send + Sync),
    strict: bool,
}

struct OpenTag {
    name: String,
    raw_args: String,
    args_pos: usize,
    pos_start: usize,
    children: Vec<Element>,
}

impl<'r> Parser<'r> {
    pub fn new(
        input: &str,
        resolver: &'r (dyn TagResolver + Send + Sync),
        strict: bool,
    ) -> Result<Self, TagMarkError> {
        Self::new_with_name(input, resolver, strict, "input")
    }

    pub fn new_with_name(
        input: &str,
        resolver: &'r (dyn TagResolver + Send + Sync),
        strict: bool,
        name: &str,
    ) -> Result<Self, TagMarkError> {
        let input = preprocess(input, resolver, name)?;
        let tokens = Lexer::new_with_name(&input, name).lex()?;
        let source = Arc::new(NamedSource::new(name, input.clone()));
        Ok(Self {
            source,
            input,
            tokens,
            resolver,
            strict,
        })
    }

    /// The input after pre-process expansion; all spans refer to this text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn source(&self) -> Arc<NamedSource<String>> {
        Arc::clone(&self.source)
    }

    /// Builds the parse tree. Never fails in lenient mode: unknown tags,
    /// unmatched closes and unterminated tags all degrade to text or
    /// implicit closes.
    pub fn parse(&self) -> Result<Vec<Element>, TagMarkError> {
        let mut root: Vec<Element> = Vec::new();
        let mut stack: Vec<OpenTag> = Vec::new();

        for token in &self.tokens {
            match &token.ttype {
                TokenType::Text(value) => push_text(&mut stack, &mut root, value),
                TokenType::Escape(c) => {
                    let mut buf = [0u8; 4];
                    push_text(&mut stack, &mut root, c.encode_utf8(&mut buf));
                }
                TokenType::TagOpen { name, args } => {
                    let lower = name.to_ascii_lowercase();
                    if !self.resolver.has(&lower) {
                        if self.strict {
                            return Err(ParseError::UnknownTag {
                                src: (*self.source).clone(),
                                span: (token.pos_start, token.pos_end - token.pos_start).into(),
                                name: lower,
                            }
                            .into());
                        }
                        log::trace!("unknown tag <{lower}> kept as literal text");
                        push_text(
                            &mut stack,
                            &mut root,
                            &self.input[token.pos_start..token.pos_end],
                        );
                        continue;
                    }
                    // `<name:` is 1 + name + 1 bytes before the raw args.
                    let args_pos = token.pos_start + 1 + name.len() + 1;
                    stack.push(OpenTag {
                        name: lower,
                        raw_args: args.clone(),
                        args_pos,
                        pos_start: token.pos_start,
                        children: Vec::new(),
                    });
                }
                TokenType::TagClose { name } => {
                    let lower = name.to_ascii_lowercase();
                    match stack.iter().rposition(|open| open.name == lower) {
                        Some(index) => {
                            // Everything above the match is auto-closed here,
                            // innermost first, keeping its children.
                            while stack.len() > index {
                                let Some(open) = stack.pop() else { break };
                                let element = finish(open, token.pos_end);
                                attach(&mut stack, &mut root, element);
                            }
                        }
                        None if self.strict => {
                            return Err(ParseError::UnexpectedClose {
                                src: (*self.source).clone(),
                                span: (token.pos_start, token.pos_end - token.pos_start).into(),
                                name: lower,
                            }
                            .into());
                        }
                        None => {
                            log::trace!("unmatched close tag </{lower}> kept as literal text");
                            push_text(
                                &mut stack,
                                &mut root,
                                &self.input[token.pos_start..token.pos_end],
                            );
                        }
                    }
                }
            }
        }

        // Implicit close at end of input, innermost first.
        while let Some(open) = stack.pop() {
            if self.strict {
                return Err(ParseError::UnclosedTag {
                    src: (*self.source).clone(),
                    span: (open.pos_start, self.input.len() - open.pos_start).into(),
                    name: open.name,
                }
                .into());
            }
            let element = finish(open, self.input.len());
            attach(&mut stack, &mut root, element);
        }

        Ok(root)
    }
}

fn finish(open: OpenTag, pos_end: usize) -> Element {
    Element::Tag {
        name: open.name,
        raw_args: open.raw_args,
        args_pos: open.args_pos,
        children: open.children,
        pos_start: open.pos_start,
        pos_end,
    }
}

/// Appends `element` to the children of the innermost open tag, or to the
/// root when no tag is open.
fn attach(stack: &mut Vec<OpenTag>, root: &mut Vec<Element>, element: Element) {
    let target = match stack.last_mut() {
        Some(open) => &mut open.children,
        None => root,
    };
    target.push(element);
}

/// Appends a text run, coalescing with a preceding text sibling.
fn push_text(stack: &mut Vec<OpenTag>, root: &mut Vec<Element>, value: &str) {
    if value.is_empty() {
        return;
    }
    let target = match stack.last_mut() {
        Some(open) => &mut open.children,
        None => root,
    };
    if let Some(Element::Text(existing)) = target.last_mut() {
        existing.push_str(value);
    } else {
        target.push(Element::Text(value.to_string()));
    }
}

/// Expands pre-process tags into raw markup and re-lexes, repeating until a
/// fixpoint (or the pass bound). Resolution failures here are ignored; the
/// main resolution pass reports them with proper spans.
fn preprocess(
    input: &str,
    resolver: &(dyn TagResolver + Send + Sync),
    name: &str,
) -> Result<String, TagMarkError> {
    let mut text = input.to_string();
    for pass in 0..MAX_PREPROCESS_PASSES {
        let tokens = Lexer::new_with_name(&text, name).lex()?;
        let src = Arc::new(NamedSource::new(name, text.clone()));
        let ctx = Context::new(Arc::clone(&src));

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut replaced = false;
        for token in &tokens {
            let TokenType::TagOpen { name: tag_name, args } = &token.ttype else {
                continue;
            };
            let lower = tag_name.to_ascii_lowercase();
            if !resolver.has(&lower) {
                continue;
            }
            let args_pos = token.pos_start + 1 + tag_name.len() + 1;
            let mut queue = args::tokenize(
                args,
                args_pos,
                &lower,
                (token.pos_start, token.pos_end),
                Arc::clone(&src),
            );
            if let Ok(Tag::PreProcess(replacement)) = resolver.resolve(&lower, &mut queue, &ctx) {
                out.push_str(&text[cursor..token.pos_start]);
                out.push_str(&replacement);
                cursor = token.pos_end;
                replaced = true;
            }
        }
        if !replaced {
            break;
        }
        out.push_str(&text[cursor..]);
        log::debug!("pre-process pass {pass} expanded input to {} bytes", out.len());
        text = out;
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard::StandardTags;
    use crate::tags::parsed;

    fn parse_ok(input: &str) -> Vec<Element> {
        let parser = Parser::new(input, &StandardTags, false).unwrap();
        parser.parse().unwrap()
    }

    fn text(value: &str) -> Element {
        Element::Text(value.to_string())
    }

    fn tag_name(element: &Element) -> &str {
        match element {
            Element::Tag { name, .. } => name,
            Element::Text(_) => panic!("expected a tag, found text"),
        }
    }

    fn tag_children(element: &Element) -> &[Element] {
        match element {
            Element::Tag { children, .. } => children,
            Element::Text(_) => panic!("expected a tag, found text"),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_ok("hello"), vec![text("hello")]);
    }

    #[test]
    fn test_nested_tags() {
        let root = parse_ok("<red>a<bold>b</bold>c</red>");
        assert_eq!(root.len(), 1);
        assert_eq!(tag_name(&root[0]), "red");
        let children = tag_children(&root[0]);
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], text("a"));
        assert_eq!(tag_name(&children[1]), "bold");
        assert_eq!(children[2], text("c"));
    }

    #[test]
    fn test_implicit_close_at_eof() {
        let root = parse_ok("<red><bold>x");
        assert_eq!(tag_name(&root[0]), "red");
        let inner = tag_children(&root[0]);
        assert_eq!(tag_name(&inner[0]), "bold");
        assert_eq!(tag_children(&inner[0]), &[text("x")]);
    }

    #[test]
    fn test_auto_close_of_overlapping_tags() {
        // </red> also closes the still-open <bold> above it.
        let root = parse_ok("<red><bold>a</red>b");
        assert_eq!(root.len(), 2);
        assert_eq!(tag_name(&root[0]), "red");
        assert_eq!(root[1], text("b"));
        let inner = tag_children(&root[0]);
        assert_eq!(tag_name(&inner[0]), "bold");
    }

    #[test]
    fn test_unknown_open_tag_is_text() {
        assert_eq!(
            parse_ok("<notarealtag>hi</notarealtag>"),
            vec![text("<notarealtag>hi</notarealtag>")]
        );
    }

    #[test]
    fn test_unmatched_close_is_text() {
        assert_eq!(parse_ok("a</red>b"), vec![text("a</red>b")]);
    }

    #[test]
    fn test_close_is_case_insensitive() {
        let root = parse_ok("<RED>a</red>");
        assert_eq!(tag_name(&root[0]), "red");
        assert_eq!(tag_children(&root[0]), &[text("a")]);
    }

    #[test]
    fn test_text_coalescing_around_escapes() {
        assert_eq!(parse_ok(r"a\<b"), vec![text("a<b")]);
        assert_eq!(parse_ok(r"\<red>text"), vec![text("<red>text")]);
    }

    #[test]
    fn test_strict_unknown_tag() {
        let parser = Parser::new("<nope>x", &StandardTags, true).unwrap();
        assert!(matches!(
            parser.parse(),
            Err(TagMarkError::Parse(ParseError::UnknownTag { .. }))
        ));
    }

    #[test]
    fn test_strict_unclosed_tag() {
        let parser = Parser::new("<bold>x", &StandardTags, true).unwrap();
        assert!(matches!(
            parser.parse(),
            Err(TagMarkError::Parse(ParseError::UnclosedTag { .. }))
        ));
    }

    #[test]
    fn test_strict_unexpected_close() {
        let parser = Parser::new("x</red>", &StandardTags, true).unwrap();
        assert!(matches!(
            parser.parse(),
            Err(TagMarkError::Parse(ParseError::UnexpectedClose { .. }))
        ));
    }

    #[test]
    fn test_preprocess_expansion() {
        let chain = crate::tags::TagResolverChain::new()
            .and(parsed("name", "<red>Alice</red>"))
            .and(StandardTags);
        let parser = Parser::new("hi <name>!", &chain, false).unwrap();
        assert_eq!(parser.input(), "hi <red>Alice</red>!");
        let root = parser.parse().unwrap();
        assert_eq!(root[0], text("hi "));
        assert_eq!(tag_name(&root[1]), "red");
    }

    #[test]
    fn test_preprocess_expansion_is_bounded() {
        let chain = crate::tags::TagResolverChain::new()
            .and(parsed("loop", "<loop>"))
            .and(StandardTags);
        // Must terminate; the leftover tag is handled downstream.
        let parser = Parser::new("<loop>", &chain, false).unwrap();
        assert_eq!(parser.input(), "<loop>");
    }
}
