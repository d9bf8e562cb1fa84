//! instalearn-reels: turns pasted lesson text into microlearning reels.
//!
//! The text is split into sentences; each sentence becomes a [`Reel`] with a
//! position-derived id, a randomized style, and a display time that grows
//! with the sentence's word count.
//!
//! # Quick start
//!
//! ```
//! use instalearn_reels::generate;
//!
//! let reels = generate("Ownership moves values. Borrowing lends them!");
//! assert_eq!(reels.len(), 2);
//! assert_eq!(reels[0].id().as_str(), "reel-0");
//! assert_eq!(reels[0].content(), "Ownership moves values.");
//! assert_eq!(reels[1].duration(), 4.5);
//! ```

pub mod pacing;
pub mod segment;
pub mod style;
pub mod types;

pub use segment::{is_space, split_sentences, Sentences};
pub use style::{Chooser, RandomChooser, ReelStyle, SequenceChooser};
pub use types::{Reel, ReelId};

/// Generate a reel batch from `text`, styling it with an entropy-seeded RNG.
///
/// Empty or whitespace-only input yields an empty batch; this never fails.
pub fn generate(text: &str) -> Vec<Reel> {
    generate_with(text, &mut RandomChooser::from_entropy())
}

/// Generate a reel batch from `text`, drawing style choices from `chooser`.
///
/// # Examples
///
/// ```
/// use instalearn_reels::{generate_with, SequenceChooser};
/// use instalearn_reels::style::{Color, TextAlign};
///
/// let mut picks = SequenceChooser::new(vec![0, 1, 2]);
/// let reels = generate_with("Short.", &mut picks);
/// assert_eq!(reels[0].style().text_align, TextAlign::Center);
/// assert_eq!(reels[0].style().color, Color::Amber);
/// ```
pub fn generate_with<C: Chooser + ?Sized>(text: &str, chooser: &mut C) -> Vec<Reel> {
    let reels: Vec<Reel> = split_sentences(text)
        .enumerate()
        .map(|(index, fragment)| {
            let style = ReelStyle::pick(index, &mut *chooser);
            Reel::new(index, fragment, style)
        })
        .collect();

    tracing::debug!(reels = reels.len(), chars = text.len(), "Generated reel batch");
    reels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::{MAX_SECONDS, MIN_SECONDS};
    use crate::style::{Color, FontSize, FontStyle, FontWeight, TextAlign};
    use std::collections::HashSet;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Hi.",
        "A. B. C.",
        "No punctuation at all here",
        "Line one.\nLine two!\n\nLine three?",
        "Trailing spaces.    ",
        "  Leading and trailing.  Middle!   End?  ",
        "Numbers like 3.14 don't split. But this does.",
        "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty.",
        "!!! ??? ...",
        "Wait... what?! Okay.",
    ];

    #[test]
    fn test_generate_three_sentences() {
        let reels = generate("A. B. C.");
        let ids: Vec<&str> = reels.iter().map(|r| r.id().as_str()).collect();
        let contents: Vec<&str> = reels.iter().map(|r| r.content()).collect();
        assert_eq!(ids, ["reel-0", "reel-1", "reel-2"]);
        assert_eq!(contents, ["A.", "B.", "C."]);
    }

    #[test]
    fn test_generate_empty_inputs() {
        assert!(generate("").is_empty());
        assert!(generate("   ").is_empty());
        assert!(generate("\n\t").is_empty());
    }

    #[test]
    fn test_generate_no_terminator_single_reel() {
        let reels = generate("  a whole paragraph without an ending  ");
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].content(), "a whole paragraph without an ending");
    }

    #[test]
    fn test_generate_single_word_duration() {
        // One word: 3 + 1 * 0.5
        let reels = generate("Hi.");
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].duration(), 3.5);
    }

    #[test]
    fn test_generate_twenty_words_clamped() {
        let sentence = (1..=20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let reels = generate(&sentence);
        assert_eq!(reels.len(), 1);
        assert_eq!(reels[0].word_count(), 20);
        assert_eq!(reels[0].duration(), 8.0);
    }

    #[test]
    fn test_count_matches_fragments() {
        for text in SAMPLES {
            let expected = split_sentences(text).count();
            assert_eq!(generate(text).len(), expected, "input: {text:?}");
        }
    }

    #[test]
    fn test_durations_within_bounds() {
        for text in SAMPLES {
            for reel in generate(text) {
                assert!(
                    (MIN_SECONDS..=MAX_SECONDS).contains(&reel.duration()),
                    "{} has duration {}",
                    reel.id(),
                    reel.duration()
                );
            }
        }
    }

    #[test]
    fn test_ids_distinct_and_stable() {
        for text in SAMPLES {
            let first: Vec<ReelId> = generate(text).iter().map(|r| r.id().clone()).collect();
            let second: Vec<ReelId> = generate(text).iter().map(|r| r.id().clone()).collect();
            assert_eq!(first, second);

            let unique: HashSet<&ReelId> = first.iter().collect();
            assert_eq!(unique.len(), first.len());
        }
    }

    #[test]
    fn test_content_and_duration_deterministic() {
        for text in SAMPLES {
            let a = generate(text);
            let b = generate(text);
            for (x, y) in a.iter().zip(&b) {
                assert_eq!(x.content(), y.content());
                assert_eq!(x.duration(), y.duration());
            }
        }
    }

    #[test]
    fn test_order_follows_source() {
        let reels = generate("First one. Second one! Third one?");
        let contents: Vec<&str> = reels.iter().map(|r| r.content()).collect();
        assert_eq!(contents, ["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn test_exact_styles_with_scripted_chooser() {
        // Reel 0: weight, align, color. Reel 1: weight, align. Reel 2: weight, align.
        let mut chooser = SequenceChooser::new(vec![1, 2, 4, 0, 0, 1, 1]);
        let reels = generate_with("Zero. One. Two.", &mut chooser);

        let s0 = reels[0].style();
        assert_eq!(s0.font_weight, FontWeight::Bold);
        assert_eq!(s0.text_align, TextAlign::Right);
        assert_eq!(s0.color, Color::Indigo);
        assert_eq!(s0.font_style, FontStyle::Italic);
        assert_eq!(s0.font_size, FontSize::Large);

        let s1 = reels[1].style();
        assert_eq!(s1.font_weight, FontWeight::Normal);
        assert_eq!(s1.text_align, TextAlign::Left);
        assert_eq!(s1.color, Color::White);
        assert_eq!(s1.font_style, FontStyle::Normal);
        assert_eq!(s1.font_size, FontSize::Regular);

        let s2 = reels[2].style();
        assert_eq!(s2.font_weight, FontWeight::Bold);
        assert_eq!(s2.text_align, TextAlign::Center);
        assert_eq!(s2.color, Color::White);
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        let a = generate_with(text, &mut RandomChooser::seeded(1234));
        let b = generate_with(text, &mut RandomChooser::seeded(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_batch_roundtrip() {
        let reels = generate_with("Alpha beta. Gamma!", &mut RandomChooser::seeded(5));
        let json = serde_json::to_string(&reels).unwrap();
        let back: Vec<Reel> = serde_json::from_str(&json).unwrap();
        assert_eq!(reels, back);
    }
}
