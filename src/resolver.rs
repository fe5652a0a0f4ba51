use crate::args;
use crate::color::TextColor;
use crate::component::{Component, ComponentKind};
use crate::error::TagMarkError;
use crate::parser::Element;
use crate::style::Style;
use crate::tags::{Context, Directive, Tag, TagResolver};

/// A stateful per-character color effect spanning a tag's subtree.
///
/// Before its subtree resolves, the effect is initialized with the total
/// number of visible characters it covers; [`Fancy::advance`] then yields
/// one color per character in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Fancy {
    Gradient {
        colors: Vec<TextColor>,
        phase: f64,
        length: usize,
        index: usize,
    },
    Rainbow {
        phase: f64,
        reversed: bool,
        length: usize,
        index: usize,
    },
}

impl Fancy {
    pub fn gradient(colors: Vec<TextColor>, phase: f64) -> Self {
        Fancy::Gradient {
            colors,
            phase,
            length: 0,
            index: 0,
        }
    }

    pub fn rainbow(phase: f64, reversed: bool) -> Self {
        Fancy::Rainbow {
            phase,
            reversed,
            length: 0,
            index: 0,
        }
    }

    fn init(&mut self, len: usize) {
        match self {
            Fancy::Gradient { length, index, .. } | Fancy::Rainbow { length, index, .. } => {
                *length = len;
                *index = 0;
            }
        }
    }

    /// The color for the next character.
    fn advance(&mut self) -> TextColor {
        match self {
            Fancy::Gradient {
                colors,
                phase,
                length,
                index,
            } => {
                let base = if *length <= 1 {
                    0.0
                } else {
                    *index as f64 / (*length - 1) as f64
                };
                *index += 1;
                let mut t = base + *phase;
                if t > 1.0 {
                    t -= 1.0;
                } else if t < 0.0 {
                    t += 1.0;
                }
                let segments = colors.len().saturating_sub(1);
                if segments == 0 {
                    return colors.first().copied().unwrap_or(TextColor::WHITE);
                }
                let scaled = t * segments as f64;
                let slot = (scaled.floor() as usize).min(segments - 1);
                TextColor::lerp(colors[slot], colors[slot + 1], scaled - slot as f64)
            }
            Fancy::Rainbow {
                phase,
                reversed,
                length,
                index,
            } => {
                let len = (*length).max(1) as f64;
                let pos = if *reversed {
                    (*length).saturating_sub(*index) as f64
                } else {
                    *index as f64
                };
                *index += 1;
                let hue = (pos / len + *phase).rem_euclid(1.0) * 360.0;
                TextColor::from_hsv(hue, 1.0, 1.0)
            }
        }
    }
}

/// The outcome of resolving a sibling list: the components that stay in
/// place, and the components a `<reset>` directive lifts out of every
/// enclosing style scope to the end of the root.
struct Resolved {
    nodes: Vec<Component>,
    reset: Vec<Component>,
}

/// Resolves a parse tree into a single component.
///
/// The result is a text component whose children carry style deltas; a
/// sole child with no sibling from a reset directive is returned directly
/// instead of being wrapped.
pub fn resolve_root(
    elements: &[Element],
    resolver: &(dyn TagResolver + Send + Sync),
    ctx: &Context,
) -> Result<Component, TagMarkError> {
    let mut fancy = Vec::new();
    let Resolved { mut nodes, reset } = resolve_children(elements, resolver, ctx, &mut fancy)?;
    nodes.extend(reset);

    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return Ok(node);
        }
    }
    Ok(Component::builder().append_all(nodes).build())
}

fn resolve_children(
    elements: &[Element],
    resolver: &(dyn TagResolver + Send + Sync),
    ctx: &Context,
    fancy: &mut Vec<Fancy>,
) -> Result<Resolved, TagMarkError> {
    let mut nodes: Vec<Component> = Vec::new();
    let mut reset: Vec<Component> = Vec::new();

    for element in elements {
        match element {
            Element::Text(value) => {
                if fancy.is_empty() {
                    nodes.push(Component::text(value.clone()));
                } else {
                    push_colored_runs(&mut nodes, value, fancy);
                }
            }
            Element::Tag {
                name,
                raw_args,
                args_pos,
                children,
                pos_start,
                pos_end,
            } => {
                let mut queue = args::tokenize(
                    raw_args,
                    *args_pos,
                    name,
                    (*pos_start, *pos_end),
                    ctx.source(),
                );
                match resolver.resolve(name, &mut queue, ctx)? {
                    Tag::Styling(style) => {
                        let inner = resolve_children(children, resolver, ctx, fancy)?;
                        nodes.push(componentify(style, inner.nodes));
                        reset.extend(inner.reset);
                    }
                    Tag::Inserting(component) => {
                        nodes.push(component);
                        let inner = resolve_children(children, resolver, ctx, fancy)?;
                        nodes.extend(inner.nodes);
                        reset.extend(inner.reset);
                    }
                    Tag::Fancy(mut effect) => {
                        effect.init(count_chars(children));
                        fancy.push(effect);
                        let inner = resolve_children(children, resolver, ctx, fancy);
                        fancy.pop();
                        let inner = inner?;
                        nodes.push(componentify(Style::default(), inner.nodes));
                        reset.extend(inner.reset);
                    }
                    Tag::Directive(Directive::Reset) => {
                        // Reset content escapes every enclosing scope, so it
                        // resolves with no inherited fancy state either.
                        let mut inner_fancy = Vec::new();
                        let inner =
                            resolve_children(children, resolver, ctx, &mut inner_fancy)?;
                        reset.extend(inner.nodes);
                        reset.extend(inner.reset);
                    }
                    Tag::PreProcess(_) => {
                        // Expansion did not reach a fixpoint within the pass
                        // bound; keep the tag literal rather than recursing.
                        log::warn!("pre-process tag <{name}> left unexpanded, keeping it literal");
                        let raw = if raw_args.is_empty() {
                            format!("<{name}>")
                        } else {
                            format!("<{name}:{raw_args}>")
                        };
                        if fancy.is_empty() {
                            nodes.push(Component::text(raw));
                        } else {
                            push_colored_runs(&mut nodes, &raw, fancy);
                        }
                        let inner = resolve_children(children, resolver, ctx, fancy)?;
                        nodes.extend(inner.nodes);
                        reset.extend(inner.reset);
                    }
                }
            }
        }
    }

    Ok(Resolved { nodes, reset })
}

/// Splits `text` into single-color runs under the active fancy effects.
/// Every effect advances once per character; the innermost one supplies
/// the color. Adjacent characters with equal colors share a run.
fn push_colored_runs(nodes: &mut Vec<Component>, text: &str, fancy: &mut [Fancy]) {
    let mut run = String::new();
    let mut run_color: Option<TextColor> = None;

    for c in text.chars() {
        let mut color = TextColor::WHITE;
        for effect in fancy.iter_mut() {
            color = effect.advance();
        }
        if let Some(prev) = run_color {
            if prev != color && !run.is_empty() {
                nodes.push(
                    Component::text(std::mem::take(&mut run)).styled(Style::colored(prev)),
                );
            }
        }
        run_color = Some(color);
        run.push(c);
    }
    if let Some(color) = run_color {
        nodes.push(Component::text(run).styled(Style::colored(color)));
    }
}

/// The number of visible characters below `elements`, which fancy effects
/// spread their colors across. Inserted components do not advance effects
/// and are not counted.
fn count_chars(elements: &[Element]) -> usize {
    elements
        .iter()
        .map(|element| match element {
            Element::Text(value) => value.chars().count(),
            Element::Tag { children, .. } => count_chars(children),
        })
        .sum()
}

/// Wraps resolved children in a single component carrying `style`. When the
/// first child is a bare text leaf it becomes the component's own content,
/// which keeps the common `<red>text</red>` shape flat.
fn componentify(style: Style, nodes: Vec<Component>) -> Component {
    let mut nodes = nodes;
    let absorb_first = matches!(
        nodes.first(),
        Some(first)
            if first.style.is_empty()
                && first.children.is_empty()
                && matches!(first.kind, ComponentKind::Text(_))
    );
    let content = if absorb_first {
        match nodes.remove(0).kind {
            ComponentKind::Text(s) => s,
            _ => String::new(),
        }
    } else {
        String::new()
    };
    Component::builder()
        .content(content)
        .style(style)
        .append_all(nodes)
        .build()
}
