use crate::style::{Decoration, Style};
use serde::Serialize;

/// The kind of content a component carries.
///
/// A single closed enum rather than a hierarchy of node types; generic tree
/// walks (the serializer, the plain-text projection, style merging) never
/// care which kind they are looking at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// A literal text run.
    Text(String),
    /// A translation key plus ordered arguments, substituted by a renderer.
    Translatable {
        key: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<Component>,
    },
    /// A key binding reference, shown as the bound key by a renderer.
    Keybind(String),
    /// An entity selector pattern.
    Selector(String),
}

/// An immutable node in a rich-text tree.
///
/// A component stores only the style fields its own tags set; the effective
/// style of a node is its ancestors' styles merged root-to-leaf. Once built,
/// a component is never mutated — all modification produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Component {
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
}

impl Component {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Text(content.into()),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn translatable(key: impl Into<String>, arguments: Vec<Component>) -> Self {
        Self {
            kind: ComponentKind::Translatable {
                key: key.into(),
                arguments,
            },
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn keybind(key: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Keybind(key.into()),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn selector(pattern: impl Into<String>) -> Self {
        Self {
            kind: ComponentKind::Selector(pattern.into()),
            style: Style::default(),
            children: Vec::new(),
        }
    }

    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::new()
    }

    /// The literal text content of this node, empty for non-text kinds.
    pub fn content(&self) -> &str {
        match &self.kind {
            ComponentKind::Text(s) => s,
            _ => "",
        }
    }

    /// Returns a copy of this component with `style` applied.
    #[must_use]
    pub fn styled(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy of this component with `child` appended.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Flattens the tree into its unstyled text, depth-first. Non-text kinds
    /// degrade to their key or pattern.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out
    }

    /// The JSON form of this tree. Empty styles and child lists are omitted.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn write_plain(&self, out: &mut String) {
        match &self.kind {
            ComponentKind::Text(s) => out.push_str(s),
            ComponentKind::Translatable { key, .. } => out.push_str(key),
            ComponentKind::Keybind(key) => out.push_str(key),
            ComponentKind::Selector(pattern) => out.push_str(pattern),
        }
        for child in &self.children {
            child.write_plain(out);
        }
    }
}

/// A transient, exclusively-owned builder. Mutable only during construction;
/// `build` produces the immutable [`Component`].
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    kind: Option<ComponentKind>,
    style: Style,
    children: Vec<Component>,
}

impl ComponentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.kind = Some(ComponentKind::Text(content.into()));
        self
    }

    pub fn kind(mut self, kind: ComponentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: crate::color::TextColor) -> Self {
        self.style.color = Some(color);
        self
    }

    pub fn decoration(mut self, decoration: Decoration, state: bool) -> Self {
        self.style.set_decoration(decoration, Some(state));
        self
    }

    pub fn append(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    pub fn append_all(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Component {
        Component {
            kind: self.kind.unwrap_or_else(|| ComponentKind::Text(String::new())),
            style: self.style,
            children: self.children,
        }
    }
}
