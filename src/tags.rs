use crate::args::ArgumentQueue;
use crate::component::Component;
use crate::error::ParseError;
use crate::resolver::Fancy;
use crate::style::Style;
use miette::NamedSource;
use std::sync::Arc;

/// The semantic value a tag name plus arguments resolves to.
///
/// A `Tag` is produced fresh for every occurrence; resolvers must never
/// share state between resolutions.
#[derive(Debug, Clone)]
pub enum Tag {
    /// Replaces the tag's span with a literal component subtree.
    Inserting(Component),
    /// Applies a style delta to everything between the open and close tag.
    Styling(Style),
    /// A stateful per-subtree color effect (gradient, rainbow).
    Fancy(Fancy),
    /// Macro-expands to raw markup before the main parse.
    PreProcess(String),
    /// Affects the parse itself rather than producing content.
    Directive(Directive),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Escapes every enclosing style scope; children resolve unstyled at
    /// the root.
    Reset,
}

/// Ambient state handed to resolvers: the named source of the current
/// parse, for diagnostic construction.
#[derive(Debug, Clone)]
pub struct Context {
    source: Arc<NamedSource<String>>,
}

impl Context {
    pub(crate) fn new(source: Arc<NamedSource<String>>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Arc<NamedSource<String>> {
        Arc::clone(&self.source)
    }

    /// A cloned [`NamedSource`] suitable for embedding in a [`ParseError`].
    pub fn named_source(&self) -> NamedSource<String> {
        (*self.source).clone()
    }
}

/// Maps tag names to [`Tag`] values.
///
/// Names arrive lowercased. `has` must be cheap and side-effect free; once a
/// resolver claims a name, its `resolve` outcome is final — an error does
/// not fall through to the next resolver in a chain.
pub trait TagResolver {
    fn has(&self, name: &str) -> bool;

    fn resolve(
        &self,
        name: &str,
        args: &mut ArgumentQueue,
        ctx: &Context,
    ) -> Result<Tag, ParseError>;
}

/// Whether `name` is a syntactically valid tag name: letters, digits, `_`
/// and `-`, with an optional leading `!` or `#`.
pub fn is_valid_tag_name(name: &str) -> bool {
    let body = name
        .strip_prefix(['!', '#'])
        .unwrap_or(name);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// An ordered chain of resolvers. The first resolver claiming a name wins;
/// nested chains flatten naturally at resolution time.
#[derive(Clone, Default)]
pub struct TagResolverChain {
    resolvers: Vec<Arc<dyn TagResolver + Send + Sync>>,
}

impl TagResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, resolver: Arc<dyn TagResolver + Send + Sync>) {
        self.resolvers.push(resolver);
    }

    /// Appends `other` behind this chain's existing resolvers.
    #[must_use]
    pub fn and(mut self, other: impl TagResolver + Send + Sync + 'static) -> Self {
        self.resolvers.push(Arc::new(other));
        self
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl TagResolver for TagResolverChain {
    fn has(&self, name: &str) -> bool {
        self.resolvers.iter().any(|r| r.has(name))
    }

    fn resolve(
        &self,
        name: &str,
        args: &mut ArgumentQueue,
        ctx: &Context,
    ) -> Result<Tag, ParseError> {
        if !is_valid_tag_name(name) {
            return Err(ParseError::InvalidTagName {
                src: ctx.named_source(),
                span: (0, 0).into(),
                name: name.to_string(),
            });
        }
        for resolver in &self.resolvers {
            if resolver.has(name) {
                return resolver.resolve(name, args, ctx);
            }
        }
        Err(ParseError::UnknownTag {
            src: ctx.named_source(),
            span: (0, 0).into(),
            name: name.to_string(),
        })
    }
}

/// A single-name resolver that yields a fixed tag value per occurrence.
#[derive(Debug, Clone)]
pub struct Placeholder {
    name: String,
    tag: Tag,
}

/// A placeholder whose replacement is raw markup, expanded before the main
/// parse (a pre-process tag).
pub fn parsed(name: impl Into<String>, markup: impl Into<String>) -> Placeholder {
    Placeholder {
        name: name.into().to_ascii_lowercase(),
        tag: Tag::PreProcess(markup.into()),
    }
}

/// A placeholder replaced by a pre-built component subtree, untouched by
/// surrounding styles.
pub fn component(name: impl Into<String>, value: Component) -> Placeholder {
    Placeholder {
        name: name.into().to_ascii_lowercase(),
        tag: Tag::Inserting(value),
    }
}

impl TagResolver for Placeholder {
    fn has(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.name)
    }

    fn resolve(
        &self,
        _name: &str,
        _args: &mut ArgumentQueue,
        _ctx: &Context,
    ) -> Result<Tag, ParseError> {
        Ok(self.tag.clone())
    }
}
