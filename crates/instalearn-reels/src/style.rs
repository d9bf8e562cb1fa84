//! Visual style descriptors and the random source that picks them.
//!
//! Styling is the only non-deterministic part of reel generation. All random
//! picks go through a [`Chooser`] so hosts and tests can substitute a fixed
//! sequence for a real RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Style fields
// ---------------------------------------------------------------------------

/// CSS font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub const ALL: [FontWeight; 2] = [FontWeight::Normal, FontWeight::Bold];

    pub fn as_css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// CSS font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// CSS text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub const ALL: [TextAlign; 3] = [TextAlign::Left, TextAlign::Center, TextAlign::Right];

    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Text color, drawn from a fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "#ffffff")]
    White,
    #[serde(rename = "#ff3040")]
    Red,
    #[serde(rename = "#fcaf45")]
    Amber,
    #[serde(rename = "#833ab4")]
    Purple,
    #[serde(rename = "#5851DB")]
    Indigo,
}

impl Color {
    /// The palette accent colors are drawn from. White is both a palette
    /// entry and the default.
    pub const PALETTE: [Color; 5] = [
        Color::White,
        Color::Red,
        Color::Amber,
        Color::Purple,
        Color::Indigo,
    ];

    /// Hex notation as used in CSS.
    pub fn hex(self) -> &'static str {
        match self {
            Color::White => "#ffffff",
            Color::Red => "#ff3040",
            Color::Amber => "#fcaf45",
            Color::Purple => "#833ab4",
            Color::Indigo => "#5851DB",
        }
    }
}

/// One of the two fixed font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontSize {
    #[serde(rename = "1.5rem")]
    Large,
    #[serde(rename = "1.25rem")]
    Regular,
}

impl FontSize {
    pub fn as_css(self) -> &'static str {
        match self {
            FontSize::Large => "1.5rem",
            FontSize::Regular => "1.25rem",
        }
    }
}

// ---------------------------------------------------------------------------
// ReelStyle
// ---------------------------------------------------------------------------

/// Complete style descriptor of a reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelStyle {
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
    pub color: Color,
    pub font_size: FontSize,
}

impl ReelStyle {
    /// Pick the style for the reel at `index`.
    ///
    /// Random draws are made in a fixed order: font weight, text alignment,
    /// then color (only for indices divisible by 3). Italics every 5th reel
    /// and the large size every 4th reel are positional, not random.
    pub fn pick<C: Chooser + ?Sized>(index: usize, chooser: &mut C) -> Self {
        let font_weight = FontWeight::ALL[chooser.choose_index(FontWeight::ALL.len())];
        let text_align = TextAlign::ALL[chooser.choose_index(TextAlign::ALL.len())];

        let font_style = if index % 5 == 0 {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };

        let color = if index % 3 == 0 {
            Color::PALETTE[chooser.choose_index(Color::PALETTE.len())]
        } else {
            Color::White
        };

        let font_size = if index % 4 == 0 {
            FontSize::Large
        } else {
            FontSize::Regular
        };

        Self {
            font_weight,
            font_style,
            text_align,
            color,
            font_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Choosers
// ---------------------------------------------------------------------------

/// Source of uniform random choices.
pub trait Chooser {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// [`Chooser`] backed by a `rand` RNG.
#[derive(Debug, Clone)]
pub struct RandomChooser<R = StdRng> {
    rng: R,
}

impl RandomChooser<StdRng> {
    /// Chooser seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible chooser for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// [`Chooser`] that replays a fixed sequence of picks, cycling when it runs
/// out. Each pick is reduced modulo the requested length.
#[derive(Debug, Clone)]
pub struct SequenceChooser {
    picks: Vec<usize>,
    pos: usize,
}

impl SequenceChooser {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, pos: 0 }
    }
}

impl Chooser for SequenceChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        pick % len
    }
}
