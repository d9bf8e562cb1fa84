//! Sentence boundary detection for pasted lesson text.
//!
//! A boundary is a run of whitespace that immediately follows `.`, `!` or
//! `?`. The punctuation stays with the fragment before the boundary and the
//! whole whitespace run is dropped, so `"A.  B"` yields `"A."` and `"B"`.
//!
//! "Whitespace" is the ECMAScript `\s` class (see [`is_space`]), not
//! [`char::is_whitespace`]: U+FEFF counts as a space and U+0085 does not.

/// Characters that may end a sentence.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Whether `ch` separates words and sentences.
///
/// Matches the ECMAScript `\s` class: ASCII tab, line feed, vertical tab,
/// form feed, carriage return and space, plus U+00A0, U+1680,
/// U+2000..=U+200A, U+2028, U+2029, U+202F, U+205F, U+3000 and U+FEFF.
pub fn is_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Iterator over the trimmed, non-empty sentence fragments of a text.
///
/// Created by [`split_sentences`].
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    rest: &'a str,
}

/// Split `text` into sentence fragments.
///
/// Fragments are yielded in source order, trimmed, and never empty. Text
/// without any terminator followed by whitespace comes back as a single
/// fragment.
///
/// # Examples
///
/// ```
/// use instalearn_reels::split_sentences;
///
/// let parts: Vec<&str> = split_sentences("Rust is fast. Is it safe? Yes!").collect();
/// assert_eq!(parts, ["Rust is fast.", "Is it safe?", "Yes!"]);
/// ```
pub fn split_sentences(text: &str) -> Sentences<'_> {
    Sentences { rest: text }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let (fragment, rest) = split_at_boundary(self.rest);
            self.rest = rest;

            let trimmed = fragment.trim_matches(is_space);
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        None
    }
}

/// Cut `text` at its first boundary, returning the fragment and the
/// remainder with the boundary whitespace removed.
fn split_at_boundary(text: &str) -> (&str, &str) {
    let mut prev = None;
    for (pos, ch) in text.char_indices() {
        if is_space(ch) && prev.is_some_and(|p| TERMINATORS.contains(&p)) {
            return (&text[..pos], text[pos..].trim_start_matches(is_space));
        }
        prev = Some(ch);
    }
    (text, "")
}
