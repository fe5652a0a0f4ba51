/// Escapes text content so it lexes back to the same literal: backslashes
/// double, `<` gains a leading backslash.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '<' => out.push_str(r"\<"),
            _ => out.push(c),
        }
    }
    out
}

/// Quotes a tag argument when its raw form would not survive the argument
/// tokenizer: separators, quotes, angle brackets, backslashes, whitespace
/// and the empty string all force single quotes.
pub fn quote_argument(value: &str) -> String {
    let needs_quoting = value.is_empty()
        || value
            .chars()
            .any(|c| matches!(c, ':' | '\'' | '"' | '<' | '>' | '\\') || c.is_whitespace());
    if !needs_quoting {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\'' => out.push_str(r"\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("<red>"), r"\<red>");
        assert_eq!(escape_text(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_quote_argument() {
        assert_eq!(quote_argument("simple"), "simple");
        assert_eq!(quote_argument("key.jump"), "key.jump");
        assert_eq!(quote_argument("a:b"), "'a:b'");
        assert_eq!(quote_argument("/say hi"), "'/say hi'");
        assert_eq!(quote_argument("don't"), r"'don\'t'");
        assert_eq!(quote_argument(""), "''");
    }
}
