use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum TagMarkError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum LexError {
    #[error("Trailing escape character")]
    #[diagnostic(
        code(lexer::trailing_escape),
        help("A backslash at the end of the input escapes nothing. Remove it, or write `\\\\` for a literal backslash.")
    )]
    TrailingEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("This backslash has nothing to escape")]
        span: SourceSpan,
    },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Missing argument for tag '{tag}'")]
    #[diagnostic(
        code(parser::missing_argument),
        help("The tag requires more arguments than were given.")
    )]
    MissingArgument {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected} here")]
        span: SourceSpan,
        tag: String,
        expected: String,
    },

    #[error("Invalid tag argument")]
    #[diagnostic(
        code(parser::invalid_argument),
        help("An argument could not be interpreted the way the tag expects.")
    )]
    InvalidArgument {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid tag name '{name}'")]
    #[diagnostic(
        code(parser::invalid_tag_name),
        help("Tag names may only contain letters, digits, '_' and '-', optionally prefixed with '!' or '#'.")
    )]
    InvalidTagName {
        #[source_code]
        src: NamedSource<String>,
        #[label("This is not a valid tag name")]
        span: SourceSpan,
        name: String,
    },

    #[error("Unknown tag '{name}'")]
    #[diagnostic(
        code(parser::unknown_tag),
        help("No resolver claims this tag name. This is only an error in strict mode.")
    )]
    UnknownTag {
        #[source_code]
        src: NamedSource<String>,
        #[label("No resolver knows this tag")]
        span: SourceSpan,
        name: String,
    },

    #[error("Unclosed tag '{name}'")]
    #[diagnostic(
        code(parser::unclosed_tag),
        help("The tag is still open at the end of the input. This is only an error in strict mode.")
    )]
    UnclosedTag {
        #[source_code]
        src: NamedSource<String>,
        #[label("Opened here, never closed")]
        span: SourceSpan,
        name: String,
    },

    #[error("Unexpected closing tag '{name}'")]
    #[diagnostic(
        code(parser::unexpected_close),
        help("No tag with this name is open at this point. This is only an error in strict mode.")
    )]
    UnexpectedClose {
        #[source_code]
        src: NamedSource<String>,
        #[label("Nothing to close here")]
        span: SourceSpan,
        name: String,
    },
}
