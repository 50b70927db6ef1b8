//! # Intervals
//!
//! An [`Interval`] is a diatonic degree (`number`, 1 = unison, 8 = octave)
//! plus a chromatic `quality`: the signed semitone offset from that degree's
//! natural spelling in the major scale.
//!
//! ## Quality Naming
//! Degrees whose `number mod 7` is 1, 4 or 5 are perfect-class, the rest are
//! major-class:
//!
//! | quality | perfect-class | major-class |
//! |---------|---------------|-------------|
//! | +1      | augmented (A) | augmented (A) |
//! | 0       | perfect (P)   | major (M)   |
//! | -1      | diminished (D)| minor (m)   |
//! | -2      | perfect (P)*  | diminished (D) |
//!
//! Values outside the table fall back to "perfect" / "major" naming. The text
//! form is lossy for those; the numeric fields are always exact.
//!
//! ## Arithmetic
//! Adding or subtracting intervals combines the diatonic numbers and the
//! semitone counts, then re-derives the quality and folds it into `[-6, 6]`,
//! so `P5 + P5` is `M9` rather than a doubly augmented something.
//!
//! ## Example
//! ```rust
//! use chordid::Interval;
//!
//! let third: Interval = "M3".parse()?;
//! let fifth: Interval = "P5".parse()?;
//! assert_eq!(third.to_semitones(), 4);
//! assert_eq!((fifth - third).to_string(), "m3");
//! assert_eq!((fifth + fifth).name(), "major 9th");
//! # Ok::<(), chordid::TheoryError>(())
//! ```

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::TheoryError;

/// Highest degree accepted from text or [`Interval::new`]; seven octaves.
pub const MAX_DEGREE: i32 = 50;

/// Semitones above the tonic for each natural degree of the major scale.
pub(crate) const MAJOR_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Semitones of the unaltered degree `number` (octaves excluded).
pub(crate) fn natural_semitones(number: i32) -> i32 {
    MAJOR_SEMITONES[(number - 1).rem_euclid(7) as usize]
}

/// A diatonic degree plus a chromatic quality.
///
/// Ordering is by `(number, quality)`, which is the order every interval
/// sequence in this crate is kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    number: i32,
    quality: i32,
}

impl Interval {
    /// Create an interval, rejecting degrees outside `1..=MAX_DEGREE`.
    ///
    /// Qualities of magnitude 12 or more are folded back by whole octaves.
    pub fn new(number: i32, quality: i32) -> Result<Self, TheoryError> {
        if !(1..=MAX_DEGREE).contains(&number) {
            return Err(TheoryError::InvalidDegree(number));
        }
        Ok(Self::from_parts(number, quality))
    }

    /// Unchecked constructor for arithmetic results, which may be descending.
    pub(crate) fn from_parts(number: i32, quality: i32) -> Self {
        Self {
            number,
            quality: quality % 12,
        }
    }

    /// Constructor for the compile-time tables.
    pub(crate) const fn canonical(number: i32, quality: i32) -> Self {
        Self { number, quality }
    }

    /// Build the interval spanning `number` degrees and `semitones` semitones,
    /// choosing the smallest-magnitude quality.
    pub(crate) fn spanning(number: i32, semitones: i32) -> Self {
        let mut quality = semitones - natural_semitones(number);
        while quality > 6 {
            quality -= 12;
        }
        while quality < -6 {
            quality += 12;
        }
        Self::from_parts(number, quality)
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    /// Unisons, fourths, fifths and their compounds.
    pub fn is_perfect_class(&self) -> bool {
        is_perfect_degree(self.number)
    }

    /// Total semitone span, compound octaves included.
    pub fn to_semitones(&self) -> i32 {
        let steps = self.number - 1;
        steps.div_euclid(7) * 12 + natural_semitones(self.number) + self.quality
    }

    /// Quality as a word: "perfect", "major", "minor", "augmented", "diminished".
    pub fn quality_name(&self) -> &'static str {
        if self.quality == 1 {
            return "augmented";
        }
        if self.is_perfect_class() {
            match self.quality {
                -1 => "diminished",
                _ => "perfect",
            }
        } else {
            match self.quality {
                -2 => "diminished",
                -1 => "minor",
                _ => "major",
            }
        }
    }

    /// Full name, e.g. "minor 7th" or "perfect 11th".
    pub fn name(&self) -> String {
        format!(
            "{} {}{}",
            self.quality_name(),
            self.number,
            ordinal_suffix(self.number)
        )
    }

    fn abbreviation(&self) -> char {
        match self.quality_name() {
            "augmented" => 'A',
            "diminished" => 'D',
            "perfect" => 'P',
            "minor" => 'm',
            _ => 'M',
        }
    }
}

pub(crate) fn is_perfect_degree(number: i32) -> bool {
    matches!(number.rem_euclid(7), 1 | 4 | 5)
}

/// Only 10 through 19 are "th" regardless of the last digit: 111 is "111st".
fn ordinal_suffix(number: i32) -> &'static str {
    match (number.rem_euclid(10), number.div_euclid(10)) {
        (_, 1) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, other: Interval) -> Interval {
        Interval::spanning(
            self.number + other.number - 1,
            self.to_semitones() + other.to_semitones(),
        )
    }
}

impl Sub for Interval {
    type Output = Interval;

    /// The interval from `other` up to `self`.
    fn sub(self, other: Interval) -> Interval {
        Interval::spanning(
            self.number + 1 - other.number,
            self.to_semitones() - other.to_semitones(),
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.abbreviation(), self.number)
    }
}

impl FromStr for Interval {
    type Err = TheoryError;

    /// Parse `M3`, `m7`, `P5`, `A4`, `D5`...
    ///
    /// `p`, `a` and `d` are accepted in lowercase. An unrecognized quality
    /// letter reads as quality 0 rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let mut chars = text.chars();
        let letter = match chars.next() {
            Some('p') => 'P',
            Some('a') => 'A',
            Some('d') => 'D',
            Some(c) => c,
            None => return Err(TheoryError::MalformedInterval(s.to_string())),
        };
        let number: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| TheoryError::MalformedInterval(s.to_string()))?;

        let quality = if is_perfect_degree(number) {
            match letter {
                'A' => 1,
                'D' => -1,
                _ => 0,
            }
        } else {
            match letter {
                'm' => -1,
                'A' => 1,
                'D' => -2,
                _ => 0,
            }
        };
        Interval::new(number, quality)
    }
}
