//! Token sequences and the tokenizer boundary.

mod plain_text;
mod text_utils;

use alloc::{string::String, vec::Vec};

pub use plain_text::{LineBreakMode, PlainTextTokenizer};

/// Reserved token marking a paragraph or line break: a backslash followed by
/// `n`, as produced by the document extractors.
pub const PARAGRAPH_BREAK: &str = "\\n";

pub fn is_paragraph_break(token: &str) -> bool {
    token == PARAGRAPH_BREAK
}

/// Failure to turn a document into tokens.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TokenizeError {
    #[error("document is not valid UTF-8 (first bad byte at offset {offset})")]
    InvalidUtf8 { offset: usize },
}

/// Turns a raw document into an ordered token sequence.
///
/// Implementations must report parse failures as errors rather than
/// returning an empty sequence.
pub trait Tokenizer {
    fn tokenize(&self, document: &[u8]) -> Result<Vec<String>, TokenizeError>;
}
