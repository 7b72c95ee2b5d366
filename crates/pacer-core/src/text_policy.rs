//! Focus-point selection and clean-length policies shared by pacing and view.

use crate::content::is_paragraph_break;

const PARAGRAPH_FOCUS: &str = " ";

/// A token split around its fixation character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FocusSplit<'a> {
    pub left: &'a str,
    pub focus: &'a str,
    pub right: &'a str,
}

impl FocusSplit<'_> {
    /// Character index of the focus character within the original token.
    pub fn focus_char_index(&self) -> usize {
        self.left.chars().count()
    }
}

/// Letters and digits in any script count towards the clean form.
pub fn is_focus_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Number of letter/digit characters in `word`.
pub fn clean_len(word: &str) -> usize {
    word.chars().filter(|&c| is_focus_char(c)).count()
}

/// Rank of the letter that should carry the fixation for a word with
/// `clean_len` letters.
pub fn focus_letter_rank(clean_len: usize) -> usize {
    match clean_len {
        0 | 1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}

/// Split `word` into text before the focus character, the focus character
/// and the remainder.
///
/// The paragraph-break marker yields a single blank focus so the frame shows
/// as a pause. Tokens without letters or digits focus their first character.
pub fn focus_split(word: &str) -> FocusSplit<'_> {
    if is_paragraph_break(word) {
        return FocusSplit {
            left: "",
            focus: PARAGRAPH_FOCUS,
            right: "",
        };
    }

    let start = focus_byte_index(word);
    let Some(ch) = word[start..].chars().next() else {
        return FocusSplit {
            left: "",
            focus: "",
            right: "",
        };
    };
    let end = start + ch.len_utf8();

    FocusSplit {
        left: &word[..start],
        focus: &word[start..end],
        right: &word[end..],
    }
}

fn focus_byte_index(word: &str) -> usize {
    let target = focus_letter_rank(clean_len(word));
    let mut current_letter = 0usize;

    for (byte_index, c) in word.char_indices() {
        if is_focus_char(c) {
            if current_letter == target {
                return byte_index;
            }
            current_letter += 1;
        }
    }

    0
}
