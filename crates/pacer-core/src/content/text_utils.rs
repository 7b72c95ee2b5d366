/// Next whitespace-delimited word in `line` starting at byte `cursor`.
pub(super) fn next_word_at(line: &str, mut cursor: usize) -> Option<(&str, usize)> {
    let rest = line.get(cursor..)?;
    let trimmed = rest.trim_start();
    cursor += rest.len() - trimmed.len();
    if trimmed.is_empty() {
        return None;
    }

    let end = trimmed
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(trimmed.len(), |(idx, _)| idx);

    Some((&trimmed[..end], cursor + end))
}

pub(super) fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}
