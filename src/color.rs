use serde::Serialize;
use std::fmt;

/// An RGB text color.
///
/// Equality and hashing are purely structural over the three channels; a
/// color parsed from `red` and one parsed from `#ff5555` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The named color table. Names are matched case-insensitively and the
/// serializer prefers a name over a hex literal on an exact channel match.
pub const NAMED_COLORS: [(&str, TextColor); 16] = [
    ("black", TextColor::new(0x00, 0x00, 0x00)),
    ("dark_blue", TextColor::new(0x00, 0x00, 0xaa)),
    ("dark_green", TextColor::new(0x00, 0xaa, 0x00)),
    ("dark_aqua", TextColor::new(0x00, 0xaa, 0xaa)),
    ("dark_red", TextColor::new(0xaa, 0x00, 0x00)),
    ("dark_purple", TextColor::new(0xaa, 0x00, 0xaa)),
    ("gold", TextColor::new(0xff, 0xaa, 0x00)),
    ("gray", TextColor::new(0xaa, 0xaa, 0xaa)),
    ("dark_gray", TextColor::new(0x55, 0x55, 0x55)),
    ("blue", TextColor::new(0x55, 0x55, 0xff)),
    ("green", TextColor::new(0x55, 0xff, 0x55)),
    ("aqua", TextColor::new(0x55, 0xff, 0xff)),
    ("red", TextColor::new(0xff, 0x55, 0x55)),
    ("light_purple", TextColor::new(0xff, 0x55, 0xff)),
    ("yellow", TextColor::new(0xff, 0xff, 0x55)),
    ("white", TextColor::new(0xff, 0xff, 0xff)),
];

impl TextColor {
    pub const WHITE: TextColor = TextColor::new(0xff, 0xff, 0xff);
    pub const BLACK: TextColor = TextColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex literal.
    pub fn from_hex(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    /// Looks up a color by its well-known name.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Parses either a named color or a `#rrggbb` literal.
    pub fn parse(value: &str) -> Option<Self> {
        if value.starts_with('#') {
            Self::from_hex(value)
        } else {
            Self::from_name(value)
        }
    }

    /// The well-known name of this color, if its channels match the named
    /// table exactly.
    pub fn name(&self) -> Option<&'static str> {
        NAMED_COLORS.iter().find(|(_, c)| c == self).map(|(n, _)| *n)
    }

    pub fn as_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors. `t` is clamped to `[0, 1]`;
    /// `t == 0` yields exactly `a` and `t == 1` yields exactly `b`.
    pub fn lerp(a: TextColor, b: TextColor, t: f64) -> TextColor {
        let t = t.clamp(0.0, 1.0);
        let channel = |x: u8, y: u8| -> u8 {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8
        };
        TextColor::new(
            channel(a.r, b.r),
            channel(a.g, b.g),
            channel(a.b, b.b),
        )
    }

    /// Converts an HSV triple to RGB. `h` is in degrees, `s` and `v` in `[0, 1]`.
    pub fn from_hsv(h: f64, s: f64, v: f64) -> TextColor {
        let h = h.rem_euclid(360.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        TextColor::new(
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.as_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        assert_eq!(
            TextColor::from_hex("#ff0080"),
            Some(TextColor::new(0xff, 0x00, 0x80))
        );
        assert_eq!(TextColor::from_hex("#ff008"), None);
        assert_eq!(TextColor::from_hex("ff0080"), None);
        assert_eq!(TextColor::from_hex("#gg0080"), None);
    }

    #[test]
    fn test_named_lookup_case_insensitive() {
        assert_eq!(TextColor::from_name("RED"), Some(TextColor::new(0xff, 0x55, 0x55)));
        assert_eq!(TextColor::from_name("light_purple"), Some(TextColor::new(0xff, 0x55, 0xff)));
        assert_eq!(TextColor::from_name("crimson"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for (name, color) in NAMED_COLORS {
            assert_eq!(color.name(), Some(name));
            assert_eq!(TextColor::parse(name), Some(color));
        }
        assert_eq!(TextColor::new(1, 2, 3).name(), None);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = TextColor::new(10, 200, 0);
        let b = TextColor::new(250, 0, 255);
        assert_eq!(TextColor::lerp(a, b, 0.0), a);
        assert_eq!(TextColor::lerp(a, b, 1.0), b);
        assert_eq!(TextColor::lerp(a, b, 0.5), TextColor::new(130, 100, 128));
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(TextColor::from_hsv(0.0, 1.0, 1.0), TextColor::new(255, 0, 0));
        assert_eq!(TextColor::from_hsv(120.0, 1.0, 1.0), TextColor::new(0, 255, 0));
        assert_eq!(TextColor::from_hsv(240.0, 1.0, 1.0), TextColor::new(0, 0, 255));
        assert_eq!(TextColor::from_hsv(360.0, 1.0, 1.0), TextColor::new(255, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(TextColor::new(0xff, 0x55, 0x55).to_string(), "red");
        assert_eq!(TextColor::new(0x12, 0x34, 0x56).to_string(), "#123456");
    }
}
