#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod answer;
mod base;
pub mod documents;
mod error;
pub mod extract;
mod quick;
pub mod search;

pub use answer::{Answer, AnswerOrigin, AnswerService};
pub use base::{KnowledgeBase, Lookup, NOT_FOUND};
pub use documents::{Document, default_documents};
pub use error::{KnowledgeError, Result};
pub use extract::{ExtractionRule, default_extraction_rules};
pub use quick::quick_answer;
pub use search::{ScoredDocument, search_knowledge_base};
