pub mod api;
pub mod args;
pub mod color;
pub mod component;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod serializer;
pub mod standard;
pub mod style;
pub mod tags;
pub mod utils;

pub use api::{deserialize, serialize, TagMark, TagMarkBuilder};
pub use component::{Component, ComponentKind};
pub use error::TagMarkError;
pub use style::Style;
