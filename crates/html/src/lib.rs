pub mod dom_utils;
pub mod selector;

mod document;
mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::document::Document;
pub use crate::dom_builder::{build_dom, is_void_element, parse_declarations, parse_fragment};
pub use crate::entities::{decode_entities, escape_attr, escape_text};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
