use crate::args::ArgumentQueue;
use crate::color::TextColor;
use crate::component::Component;
use crate::error::ParseError;
use crate::resolver::Fancy;
use crate::style::{ClickEvent, Decoration, HoverEvent, Style};
use crate::tags::{Context, Tag, TagResolver};

/// The built-in tag set.
///
/// This is itself just one resolver; the entry point places it last in the
/// chain so user-supplied resolvers can shadow any built-in name.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTags;

fn decoration_by_name(name: &str) -> Option<Decoration> {
    match name {
        "bold" | "b" => Some(Decoration::Bold),
        "italic" | "i" | "em" => Some(Decoration::Italic),
        "underlined" | "u" => Some(Decoration::Underlined),
        "strikethrough" | "st" => Some(Decoration::Strikethrough),
        "obfuscated" | "obf" => Some(Decoration::Obfuscated),
        _ => None,
    }
}

fn is_hex_name(name: &str) -> bool {
    name.len() == 7
        && name.starts_with('#')
        && name[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl TagResolver for StandardTags {
    fn has(&self, name: &str) -> bool {
        if is_hex_name(name) {
            return true;
        }
        if let Some(negated) = name.strip_prefix('!') {
            return decoration_by_name(negated).is_some();
        }
        if TextColor::from_name(name).is_some() || decoration_by_name(name).is_some() {
            return true;
        }
        matches!(
            name,
            "color"
                | "colour"
                | "c"
                | "click"
                | "hover"
                | "font"
                | "insert"
                | "insertion"
                | "shadow"
                | "key"
                | "lang"
                | "tr"
                | "translate"
                | "selector"
                | "sel"
                | "newline"
                | "br"
                | "reset"
                | "gradient"
                | "rainbow"
        )
    }

    fn resolve(
        &self,
        name: &str,
        args: &mut ArgumentQueue,
        ctx: &Context,
    ) -> Result<Tag, ParseError> {
        if is_hex_name(name) {
            // Guaranteed well-formed by `is_hex_name`.
            let color = TextColor::from_hex(name).unwrap_or(TextColor::WHITE);
            return Ok(Tag::Styling(Style::colored(color)));
        }
        if let Some(negated) = name.strip_prefix('!') {
            if let Some(decoration) = decoration_by_name(negated) {
                return Ok(Tag::Styling(Style::decorated(decoration, false)));
            }
        }
        if let Some(color) = TextColor::from_name(name) {
            return Ok(Tag::Styling(Style::colored(color)));
        }
        if let Some(decoration) = decoration_by_name(name) {
            // An optional boolean argument selects the explicit off state:
            // `<bold:false>` behaves like `<!bold>`.
            let state = match args.pop() {
                Some(arg) => arg.as_bool()?,
                None => true,
            };
            return Ok(Tag::Styling(Style::decorated(decoration, state)));
        }

        match name {
            "color" | "colour" | "c" => {
                let color = args.pop_or("a color name or '#rrggbb' hex literal")?;
                Ok(Tag::Styling(Style::colored(color.as_color()?)))
            }
            "click" => {
                let action = args.pop_or("a click action")?;
                let value = args.pop_or("the click value")?;
                match ClickEvent::from_action(action.value(), value.into_value()) {
                    Some(click) => Ok(Tag::Styling(Style {
                        click: Some(click),
                        ..Style::default()
                    })),
                    None => {
                        Err(action.error(format!("Unknown click action '{}'", action.value())))
                    }
                }
            }
            "hover" => {
                let action = args.pop_or("a hover action")?;
                if action.value() != "show_text" {
                    return Err(action.error(format!(
                        "Unknown hover action '{}', only 'show_text' is supported",
                        action.value()
                    )));
                }
                let value = args.pop_or("the hover text")?;
                Ok(Tag::Styling(Style {
                    hover: Some(HoverEvent::ShowText(Box::new(Component::text(
                        value.into_value(),
                    )))),
                    ..Style::default()
                }))
            }
            "font" => {
                let font = args.pop_or("a font key")?;
                Ok(Tag::Styling(Style {
                    font: Some(font.into_value()),
                    ..Style::default()
                }))
            }
            "insert" | "insertion" => {
                let text = args.pop_or("the insertion text")?;
                Ok(Tag::Styling(Style {
                    insertion: Some(text.into_value()),
                    ..Style::default()
                }))
            }
            "shadow" => {
                let color = args.pop_or("a shadow color")?;
                Ok(Tag::Styling(Style {
                    shadow_color: Some(color.as_color()?),
                    ..Style::default()
                }))
            }
            "key" => {
                let key = args.pop_or("a key binding name")?;
                Ok(Tag::Inserting(Component::keybind(key.into_value())))
            }
            "lang" | "tr" | "translate" => {
                let key = args.pop_or("a translation key")?;
                let mut arguments = Vec::new();
                while let Some(arg) = args.pop() {
                    arguments.push(Component::text(arg.into_value()));
                }
                Ok(Tag::Inserting(Component::translatable(
                    key.into_value(),
                    arguments,
                )))
            }
            "selector" | "sel" => {
                let pattern = args.pop_or("a selector pattern")?;
                Ok(Tag::Inserting(Component::selector(pattern.into_value())))
            }
            "newline" | "br" => Ok(Tag::Inserting(Component::text("\n"))),
            "reset" => Ok(Tag::Directive(crate::tags::Directive::Reset)),
            "gradient" => resolve_gradient(args),
            "rainbow" => resolve_rainbow(args),
            unknown => Err(ParseError::UnknownTag {
                src: ctx.named_source(),
                span: (0, 0).into(),
                name: unknown.to_string(),
            }),
        }
    }
}

/// `<gradient:[color:]+[phase]>` — at least two colors, optionally followed
/// by a phase in `[-1, 1]`. With no arguments the palette defaults to
/// white-to-black.
fn resolve_gradient(args: &mut ArgumentQueue) -> Result<Tag, ParseError> {
    let mut colors = Vec::new();
    let mut phase = 0.0;
    while let Some(arg) = args.pop() {
        if let Ok(color) = arg.as_color() {
            colors.push(color);
            continue;
        }
        let value = arg.as_float()?;
        if !args.is_empty() {
            // A phase may only appear as the final argument.
            return Err(arg.error(format!(
                "Expected a color name or '#rrggbb' hex literal, found '{}'",
                arg.value()
            )));
        }
        if !(-1.0..=1.0).contains(&value) {
            return Err(arg.error(format!(
                "Gradient phase must be between -1 and 1, found {value}"
            )));
        }
        phase = value;
    }
    if colors.is_empty() {
        colors = vec![TextColor::WHITE, TextColor::BLACK];
    }
    if colors.len() < 2 {
        colors.push(colors[0]);
    }
    Ok(Tag::Fancy(Fancy::gradient(colors, phase)))
}

/// `<rainbow[:[!]phase]>` — a leading `!` reverses the hue direction.
fn resolve_rainbow(args: &mut ArgumentQueue) -> Result<Tag, ParseError> {
    let mut reversed = false;
    let mut phase = 0.0;
    if let Some(arg) = args.pop() {
        let mut value = arg.value();
        if let Some(rest) = value.strip_prefix('!') {
            reversed = true;
            value = rest;
        }
        if !value.is_empty() {
            phase = value.parse::<f64>().map_err(|_| {
                arg.error(format!("Expected a rainbow phase, found '{}'", arg.value()))
            })?;
        }
    }
    Ok(Tag::Fancy(Fancy::rainbow(phase, reversed)))
}
