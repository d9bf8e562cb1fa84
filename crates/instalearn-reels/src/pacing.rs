//! Display-time calculation for reels.
//!
//! Longer fragments stay on screen longer: every reel gets a base time plus a
//! fixed amount per word, clamped to [`MIN_SECONDS`, `MAX_SECONDS`].

/// Base display time in seconds.
pub const BASE_SECONDS: f64 = 3.0;

/// Additional display time per word, in seconds.
pub const PER_WORD_SECONDS: f64 = 0.5;

/// Shortest display time a reel can have.
pub const MIN_SECONDS: f64 = 3.0;

/// Longest display time a reel can have.
pub const MAX_SECONDS: f64 = 8.0;

/// Number of words in `fragment`, split on [`crate::segment::is_space`].
pub fn word_count(fragment: &str) -> usize {
    fragment
        .split(crate::segment::is_space)
        .filter(|word| !word.is_empty())
        .count()
}

/// Display time in seconds for a sentence fragment.
///
/// ```
/// use instalearn_reels::pacing::duration_for;
///
/// assert_eq!(duration_for("Hi."), 3.5);
/// assert_eq!(duration_for("one two three four"), 5.0);
/// ```
pub fn duration_for(fragment: &str) -> f64 {
    duration_for_words(word_count(fragment))
}

/// Display time in seconds for a fragment of `words` words.
pub fn duration_for_words(words: usize) -> f64 {
    let raw = BASE_SECONDS + words as f64 * PER_WORD_SECONDS;
    raw.min(MAX_SECONDS).max(MIN_SECONDS)
}
