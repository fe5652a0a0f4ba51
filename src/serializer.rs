use crate::component::{Component, ComponentKind};
use crate::style::{Decoration, HoverEvent, Style};
use crate::utils::{escape_text, quote_argument};

/// Renders a component tree back to markup.
///
/// The output is canonical rather than byte-faithful to whatever input
/// produced the tree: tags appear in a fixed order per node and close tags
/// on the trailing path are omitted, the same shorthand the parser accepts.
pub fn serialize(component: &Component) -> String {
    let mut out = String::new();
    emit(component, true, &mut out);
    out
}

fn emit(component: &Component, last: bool, out: &mut String) {
    let tags = open_tags(&component.style);
    for tag in &tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }

    match &component.kind {
        ComponentKind::Text(content) => out.push_str(&escape_text(content)),
        ComponentKind::Translatable { key, arguments } => {
            out.push_str("<lang:");
            out.push_str(&quote_argument(key));
            for argument in arguments {
                out.push(':');
                out.push_str(&quote_argument(&argument.plain_text()));
            }
            out.push('>');
        }
        ComponentKind::Keybind(key) => {
            out.push_str("<key:");
            out.push_str(&quote_argument(key));
            out.push('>');
        }
        ComponentKind::Selector(pattern) => {
            out.push_str("<selector:");
            out.push_str(&quote_argument(pattern));
            out.push('>');
        }
    }

    let count = component.children.len();
    for (i, child) in component.children.iter().enumerate() {
        emit(child, last && i + 1 == count, out);
    }

    if !last {
        for tag in tags.iter().rev() {
            out.push_str("</");
            // The close tag carries the name only, never the arguments.
            out.push_str(tag.split(':').next().unwrap_or(tag));
            out.push('>');
        }
    }
}

/// The open tag bodies for a style delta, in canonical order.
fn open_tags(style: &Style) -> Vec<String> {
    let mut tags = Vec::new();
    if let Some(color) = style.color {
        tags.push(color.to_string());
    }
    if let Some(shadow) = style.shadow_color {
        tags.push(format!("shadow:{shadow}"));
    }
    for decoration in Decoration::ALL {
        match style.decoration(decoration) {
            Some(true) => tags.push(decoration.tag_name().to_string()),
            Some(false) => tags.push(format!("!{}", decoration.tag_name())),
            None => {}
        }
    }
    if let Some(font) = &style.font {
        tags.push(format!("font:{}", quote_argument(font)));
    }
    if let Some(insertion) = &style.insertion {
        tags.push(format!("insert:{}", quote_argument(insertion)));
    }
    if let Some(click) = &style.click {
        tags.push(format!(
            "click:{}:{}",
            click.action(),
            quote_argument(click.value())
        ));
    }
    if let Some(HoverEvent::ShowText(text)) = &style.hover {
        tags.push(format!(
            "hover:show_text:{}",
            quote_argument(&text.plain_text())
        ));
    }
    tags
}
