//! Mind-map graph: parsing and layout

pub mod layout;
pub mod parser;

pub use layout::{spring_layout, DEFAULT_SEED};
pub use parser::{parse_indented_text, MindMapGraph, ParseError};
