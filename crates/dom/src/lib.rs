pub mod query;
pub mod snapshot;

mod builder;
mod document;
mod entities;
mod tokenizer;
mod types;

pub use crate::document::{Document, DomError, MutationRecord};
pub use crate::snapshot::to_html;
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, NodeData, NodeId, Token};
