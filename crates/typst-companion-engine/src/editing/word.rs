use std::sync::LazyLock;

use regex::Regex;

/// Default editor word definition: a decimal number, or a run of characters
/// that are neither whitespace nor ASCII punctuation (`_` counts as a word
/// character). Number digits are ASCII only.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(-?[0-9]*\.[0-9][0-9A-Za-z_]*)|([^`~!@#$%^&*()\-=+\[{\]}\\|;:'",.<>/?\s]+)"#)
        .expect("word pattern is valid")
});

/// Character span of the word touching `character` in `line`.
///
/// A caret directly before or after a word still touches it, so `hello|`
/// resolves to `hello`.
pub fn word_range_in_line(line: &str, character: usize) -> Option<(usize, usize)> {
    WORD.find_iter(line)
        .map(|m| (char_index(line, m.start()), char_index(line, m.end())))
        .find(|&(start, end)| start <= character && character <= end)
}

/// Number of chars before byte offset `byte` in `text`
pub(crate) fn char_index(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Byte offset of char column `character` in `text`, clamped to the end
pub(crate) fn byte_index(text: &str, character: usize) -> usize {
    text.char_indices()
        .nth(character)
        .map_or(text.len(), |(byte, _)| byte)
}
