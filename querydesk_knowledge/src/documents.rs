//! The fixed documentation set served by `/search`.

use serde::Serialize;

/// A reference document with the keywords that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Lowercase keywords matched as substrings of the query.
    pub keywords: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new(id: &str, title: &str, content: &str, keywords: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// The TypeScript book excerpts.
#[must_use]
pub fn default_documents() -> Vec<Document> {
    vec![
        Document::new(
            "fat-arrow",
            "Fat Arrow Functions",
            "The author affectionately calls the => syntax the 'fat arrow'. This is a shorthand \
             syntax for function expressions in TypeScript and JavaScript. It provides a more \
             concise way to write function expressions.",
            &["=>", "fat arrow", "arrow function", "affectionately", "shorthand"],
        ),
        Document::new(
            "double-bang",
            "Boolean Conversion Operator",
            "The !! operator (double bang or double negation) converts any value into an explicit \
             boolean. It uses double negation to coerce a value to its boolean equivalent. The \
             first ! converts the value to boolean and inverts it, the second ! inverts it back \
             to the correct boolean value.",
            &["!!", "double bang", "double negation", "boolean"],
        ),
        Document::new(
            "compiler-api",
            "TypeScript Compiler API",
            "The node.getChildren() method lets you walk every child node of a ts.Node in the \
             TypeScript compiler API. This is useful for traversing the Abstract Syntax Tree (AST).",
            &["getchildren", "ts.node", "child node", "compiler api", "walk"],
        ),
        Document::new(
            "trivia",
            "Trivia in TypeScript",
            "Code pieces like comments and whitespace that aren't in the AST are called 'trivia'. \
             Trivia includes formatting details that don't affect code execution but are \
             important for maintaining the original source code format.",
            &["trivia", "comments", "whitespace"],
        ),
    ]
}

/// Render documents as the reference text embedded in the LLM system prompt.
#[must_use]
pub fn reference_text(documents: &[Document]) -> String {
    let mut text = String::from("The TypeScript Book Documentation:\n");
    for doc in documents {
        text.push('\n');
        text.push_str(&doc.title);
        text.push_str(":\n");
        text.push_str(&doc.content);
        text.push('\n');
    }
    text
}
