use crate::component::Component;
use crate::error::TagMarkError;
use crate::parser::Parser;
use crate::resolver::resolve_root;
use crate::standard::StandardTags;
use crate::tags::{Context, TagResolver, TagResolverChain};
use std::sync::{Arc, OnceLock};

/// A configured markup instance: a resolver chain plus parse options.
///
/// Instances are cheap to clone and safe to share across threads. The
/// zero-configuration entry points [`deserialize`] and [`serialize`] use a
/// process-wide default instance with only the built-in tags.
#[derive(Clone)]
pub struct TagMark {
    resolver: Arc<dyn TagResolver + Send + Sync>,
    strict: bool,
    source_name: String,
}

impl TagMark {
    /// An instance with the built-in tags, lenient parsing.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TagMarkBuilder {
        TagMarkBuilder::default()
    }

    fn instance() -> &'static TagMark {
        static INSTANCE: OnceLock<TagMark> = OnceLock::new();
        INSTANCE.get_or_init(TagMark::new)
    }

    /// Parses markup into a component tree.
    pub fn deserialize(&self, input: &str) -> Result<Component, TagMarkError> {
        self.run(input, self.resolver.as_ref())
    }

    /// Parses markup with `tags` consulted before this instance's own
    /// resolvers, typically for per-message placeholders.
    pub fn deserialize_with(
        &self,
        input: &str,
        tags: impl TagResolver + Send + Sync,
    ) -> Result<Component, TagMarkError> {
        let pair = Pair {
            first: &tags,
            second: self.resolver.as_ref(),
        };
        self.run(input, &pair)
    }

    /// Renders a component tree back to markup.
    pub fn serialize(&self, component: &Component) -> String {
        crate::serializer::serialize(component)
    }

    fn run(
        &self,
        input: &str,
        resolver: &(dyn TagResolver + Send + Sync),
    ) -> Result<Component, TagMarkError> {
        let parser = Parser::new_with_name(input, resolver, self.strict, &self.source_name)?;
        let elements = parser.parse()?;
        let ctx = Context::new(parser.source());
        resolve_root(&elements, resolver, &ctx)
    }
}

impl Default for TagMark {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`TagMark`] instance. User resolvers are consulted in the order
/// they were added; the built-in tags always come last, so any of them can
/// be shadowed.
#[derive(Default)]
pub struct TagMarkBuilder {
    chain: TagResolverChain,
    strict: bool,
    source_name: Option<String>,
}

impl TagMarkBuilder {
    /// Appends a resolver behind those already added.
    pub fn tags(mut self, resolver: impl TagResolver + Send + Sync + 'static) -> Self {
        self.chain.push(Arc::new(resolver));
        self
    }

    /// In strict mode unknown tags, stray closes and unclosed tags are
    /// errors instead of degrading to text.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The source name shown in diagnostics. Defaults to `input`.
    pub fn source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    pub fn build(self) -> TagMark {
        TagMark {
            resolver: Arc::new(self.chain.and(StandardTags)),
            strict: self.strict,
            source_name: self.source_name.unwrap_or_else(|| "input".to_string()),
        }
    }
}

struct Pair<'a> {
    first: &'a (dyn TagResolver + Send + Sync),
    second: &'a (dyn TagResolver + Send + Sync),
}

impl TagResolver for Pair<'_> {
    fn has(&self, name: &str) -> bool {
        self.first.has(name) || self.second.has(name)
    }

    fn resolve(
        &self,
        name: &str,
        args: &mut crate::args::ArgumentQueue,
        ctx: &Context,
    ) -> Result<crate::tags::Tag, crate::error::ParseError> {
        if self.first.has(name) {
            self.first.resolve(name, args, ctx)
        } else {
            self.second.resolve(name, args, ctx)
        }
    }
}

/// Parses markup with the default instance.
pub fn deserialize(input: &str) -> Result<Component, TagMarkError> {
    TagMark::instance().deserialize(input)
}

/// Renders a component tree back to markup.
pub fn serialize(component: &Component) -> String {
    crate::serializer::serialize(component)
}
