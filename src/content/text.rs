//! Word boundaries for splitting text leaves.
//!
//! A word is a maximal run of non-whitespace UAX #29 segments. Splitting
//! after `n` words keeps the whitespace that follows the last kept word in
//! the prefix, so the two halves always concatenate back to the original.

use unicode_segmentation::UnicodeSegmentation;

/// Byte offsets at which each word of `text` starts.
pub fn word_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut after_space = true;

    for (offset, segment) in text.split_word_bound_indices() {
        let blank = segment.chars().all(char::is_whitespace);
        if !blank && after_space {
            starts.push(offset);
        }
        after_space = blank;
    }

    starts
}

/// Number of words in `text`.
pub fn word_count(text: &str) -> usize {
    word_starts(text).len()
}

/// Split `text` after its first `words` words.
///
/// Returns `(prefix, suffix)`. With `words == 0` the prefix is empty; with
/// `words` at or past the word count the suffix is empty.
pub fn split_after_words(text: &str, words: usize) -> (&str, &str) {
    if words == 0 {
        return ("", text);
    }

    let starts = word_starts(text);
    match starts.get(words) {
        Some(&at) => text.split_at(at),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_starts() {
        assert_eq!(word_starts("one two  three"), vec![0, 4, 9]);
        assert_eq!(word_starts("  lead"), vec![2]);
        assert!(word_starts("   ").is_empty());
    }

    #[test]
    fn test_punctuation_stays_with_word() {
        // "end," is one word even though UAX #29 segments the comma apart.
        assert_eq!(word_count("the end, again"), 3);
        assert_eq!(split_after_words("the end, again", 2), ("the end, ", "again"));
    }

    #[test]
    fn test_split_after_words() {
        let text = "w1 w2 w3 w4";
        assert_eq!(split_after_words(text, 0), ("", "w1 w2 w3 w4"));
        assert_eq!(split_after_words(text, 2), ("w1 w2 ", "w3 w4"));
        assert_eq!(split_after_words(text, 4), ("w1 w2 w3 w4", ""));
        assert_eq!(split_after_words(text, 9), ("w1 w2 w3 w4", ""));
    }

    #[test]
    fn test_split_is_lossless() {
        let text = "\tsome  spaced\nout text ";
        for n in 0..=word_count(text) {
            let (head, tail) = split_after_words(text, n);
            assert_eq!(format!("{head}{tail}"), text);
        }
    }
}
