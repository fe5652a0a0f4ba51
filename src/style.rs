use crate::color::TextColor;
use crate::component::Component;
use serde::Serialize;

/// The five text decorations. Each one is tri-state on a [`Style`]:
/// explicitly on, explicitly off, or unset (inherited).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    Bold,
    Italic,
    Underlined,
    Strikethrough,
    Obfuscated,
}

impl Decoration {
    /// Canonical ordering, used by the serializer.
    pub const ALL: [Decoration; 5] = [
        Decoration::Bold,
        Decoration::Italic,
        Decoration::Underlined,
        Decoration::Strikethrough,
        Decoration::Obfuscated,
    ];

    pub fn tag_name(self) -> &'static str {
        match self {
            Decoration::Bold => "bold",
            Decoration::Italic => "italic",
            Decoration::Underlined => "underlined",
            Decoration::Strikethrough => "strikethrough",
            Decoration::Obfuscated => "obfuscated",
        }
    }
}

/// A click action attached to a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "value")]
pub enum ClickEvent {
    OpenUrl(String),
    OpenFile(String),
    RunCommand(String),
    SuggestCommand(String),
    ChangePage(String),
    CopyToClipboard(String),
}

impl ClickEvent {
    pub fn from_action(action: &str, value: String) -> Option<Self> {
        match action {
            "open_url" => Some(ClickEvent::OpenUrl(value)),
            "open_file" => Some(ClickEvent::OpenFile(value)),
            "run_command" => Some(ClickEvent::RunCommand(value)),
            "suggest_command" => Some(ClickEvent::SuggestCommand(value)),
            "change_page" => Some(ClickEvent::ChangePage(value)),
            "copy_to_clipboard" => Some(ClickEvent::CopyToClipboard(value)),
            _ => None,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ClickEvent::OpenUrl(_) => "open_url",
            ClickEvent::OpenFile(_) => "open_file",
            ClickEvent::RunCommand(_) => "run_command",
            ClickEvent::SuggestCommand(_) => "suggest_command",
            ClickEvent::ChangePage(_) => "change_page",
            ClickEvent::CopyToClipboard(_) => "copy_to_clipboard",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ClickEvent::OpenUrl(v)
            | ClickEvent::OpenFile(v)
            | ClickEvent::RunCommand(v)
            | ClickEvent::SuggestCommand(v)
            | ClickEvent::ChangePage(v)
            | ClickEvent::CopyToClipboard(v) => v,
        }
    }
}

/// A hover payload attached to a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverEvent {
    ShowText(Box<Component>),
}

/// An immutable style value.
///
/// A `Style` only records the fields a tag explicitly set; everything else
/// is `None` and inherited from the enclosing scope. Nested tags combine
/// exclusively through [`Style::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<TextColor>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colored(color: TextColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn decorated(decoration: Decoration, state: bool) -> Self {
        let mut style = Self::default();
        style.set_decoration(decoration, Some(state));
        style
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn decoration(&self, decoration: Decoration) -> Option<bool> {
        match decoration {
            Decoration::Bold => self.bold,
            Decoration::Italic => self.italic,
            Decoration::Underlined => self.underlined,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::Obfuscated => self.obfuscated,
        }
    }

    pub fn set_decoration(&mut self, decoration: Decoration, state: Option<bool>) {
        match decoration {
            Decoration::Bold => self.bold = state,
            Decoration::Italic => self.italic = state,
            Decoration::Underlined => self.underlined = state,
            Decoration::Strikethrough => self.strikethrough = state,
            Decoration::Obfuscated => self.obfuscated = state,
        }
    }

    /// Merges `other` on top of `self`: fields set in `other` win, fields
    /// unset in `other` keep `self`'s value. Associative; this is the single
    /// path through which nested tag styles combine.
    #[must_use]
    pub fn merge(&self, other: &Style) -> Style {
        Style {
            color: other.color.or(self.color),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underlined: other.underlined.or(self.underlined),
            strikethrough: other.strikethrough.or(self.strikethrough),
            obfuscated: other.obfuscated.or(self.obfuscated),
            font: other.font.clone().or_else(|| self.font.clone()),
            insertion: other.insertion.clone().or_else(|| self.insertion.clone()),
            click: other.click.clone().or_else(|| self.click.clone()),
            hover: other.hover.clone().or_else(|| self.hover.clone()),
            shadow_color: other.shadow_color.or(self.shadow_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Style::new().is_empty());
        assert!(!Style::colored(TextColor::WHITE).is_empty());
        assert!(!Style::decorated(Decoration::Bold, false).is_empty());
    }

    #[test]
    fn test_merge_other_wins_on_set_fields() {
        let red = Style::colored(TextColor::new(0xff, 0x55, 0x55));
        let blue = Style::colored(TextColor::new(0x55, 0x55, 0xff));
        assert_eq!(red.merge(&blue).color, blue.color);
        assert_eq!(blue.merge(&red).color, red.color);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut outer = Style::colored(TextColor::BLACK);
        outer.bold = Some(true);
        let inner = Style::decorated(Decoration::Italic, true);

        let merged = outer.merge(&inner);
        assert_eq!(merged.color, Some(TextColor::BLACK));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
        assert_eq!(merged.underlined, None);
    }

    #[test]
    fn test_merge_associative() {
        let a = Style::colored(TextColor::BLACK);
        let b = Style::decorated(Decoration::Bold, true);
        let mut c = Style::colored(TextColor::WHITE);
        c.italic = Some(false);

        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn test_explicit_off_survives_merge() {
        let on = Style::decorated(Decoration::Bold, true);
        let off = Style::decorated(Decoration::Bold, false);
        assert_eq!(on.merge(&off).bold, Some(false));
    }

    #[test]
    fn test_click_actions() {
        let click = ClickEvent::from_action("run_command", "/help".into()).unwrap();
        assert_eq!(click.action(), "run_command");
        assert_eq!(click.value(), "/help");
        assert!(ClickEvent::from_action("explode", "x".into()).is_none());
    }
}
