use alloc::{string::String, vec::Vec};
use core::str;

use super::{
    PARAGRAPH_BREAK, TokenizeError, Tokenizer, is_paragraph_break,
    text_utils::{is_blank_line, next_word_at},
};

const UTF8_BOM: &str = "\u{feff}";

/// Where the tokenizer places paragraph-break markers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineBreakMode {
    /// Every line boundary becomes a break, matching page-extracted text.
    EveryLine,
    /// Only blank-line separated paragraphs produce a break.
    #[default]
    BlankLine,
    /// Line structure is ignored.
    Ignore,
}

/// Whitespace tokenizer for UTF-8 plain text documents.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlainTextTokenizer {
    pub line_breaks: LineBreakMode,
}

impl PlainTextTokenizer {
    pub const fn new(line_breaks: LineBreakMode) -> Self {
        Self { line_breaks }
    }

    fn push_break(tokens: &mut Vec<String>) {
        if tokens.last().is_some_and(|last| !is_paragraph_break(last)) {
            tokens.push(String::from(PARAGRAPH_BREAK));
        }
    }
}

impl Tokenizer for PlainTextTokenizer {
    fn tokenize(&self, document: &[u8]) -> Result<Vec<String>, TokenizeError> {
        let text = str::from_utf8(document).map_err(|err| TokenizeError::InvalidUtf8 {
            offset: err.valid_up_to(),
        })?;
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let mut tokens = Vec::new();
        let mut pending_blank = false;

        for line in text.lines() {
            if is_blank_line(line) {
                pending_blank = true;
                continue;
            }

            match self.line_breaks {
                LineBreakMode::EveryLine => Self::push_break(&mut tokens),
                LineBreakMode::BlankLine if pending_blank => Self::push_break(&mut tokens),
                LineBreakMode::BlankLine | LineBreakMode::Ignore => {}
            }
            pending_blank = false;

            let mut cursor = 0usize;
            while let Some((word, next_cursor)) = next_word_at(line, cursor) {
                tokens.push(String::from(word));
                cursor = next_cursor;
            }
        }

        log::debug!(
            "tokenizer: {} tokens from {} bytes mode={:?}",
            tokens.len(),
            document.len(),
            self.line_breaks
        );
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "En un lugar de la Mancha,\nde cuyo nombre\n\n\nno quiero acordarme.\n";

    fn tokens(mode: LineBreakMode, doc: &str) -> Vec<String> {
        PlainTextTokenizer::new(mode)
            .tokenize(doc.as_bytes())
            .unwrap()
    }

    #[test]
    fn blank_lines_separate_paragraphs() {
        let out = tokens(LineBreakMode::BlankLine, DOC);
        assert_eq!(
            out,
            [
                "En", "un", "lugar", "de", "la", "Mancha,", "de", "cuyo", "nombre", "\\n", "no",
                "quiero", "acordarme."
            ]
        );
    }

    #[test]
    fn every_line_mode_never_doubles_or_leads_with_breaks() {
        let out = tokens(LineBreakMode::EveryLine, "\n\nuno dos\ntres\n\n\ncuatro\n\n");
        assert_eq!(out, ["uno", "dos", "\\n", "tres", "\\n", "cuatro"]);
    }

    #[test]
    fn ignore_mode_emits_words_only() {
        let out = tokens(LineBreakMode::Ignore, DOC);
        assert!(out.iter().all(|token| !is_paragraph_break(token)));
        assert_eq!(out.len(), 12);
    }

    #[test]
    fn bom_and_crlf_are_tolerated() {
        let out = tokens(LineBreakMode::BlankLine, "\u{feff}Hola\r\n\r\nmundo\r\n");
        assert_eq!(out, ["Hola", "\\n", "mundo"]);
    }

    #[test]
    fn empty_document_is_an_empty_sequence() {
        assert!(tokens(LineBreakMode::EveryLine, "").is_empty());
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let err = PlainTextTokenizer::default()
            .tokenize(b"ok \xff\xfe")
            .unwrap_err();
        assert_eq!(err, TokenizeError::InvalidUtf8 { offset: 3 });
    }
}
