//! # Chord Module
//!
//! Root-relative chord shapes, their classification and the chord-ID codec.
//!
//! ## Sub-modules
//! - `id` - Chord-ID encoding and decoding
//! - `rooted` - [`RootedChord`] (a chord anchored at a note) and its analyses
//!
//! ## Key Types
//! - [`Chord`] - Sorted interval set above an implicit root
//! - [`RootedChord`] - Chord plus a concrete base note
//! - [`ParsedChord`] - Result of [`parse_chord_id`], bare or rooted
//!
//! ## Canonical Tables
//! Each [`ChordQuality`] owns a table of the stacked-thirds degrees that
//! both the encoder and the decoder read:
//!
//! | quality | 1  | 3  | 5  | 7  | 9  | 11  | 13  |
//! |---------|----|----|----|----|----|-----|-----|
//! | dom     | P1 | M3 | P5 | m7 | M9 | P11 | M13 |
//! | maj     | P1 | M3 | P5 | M7 | M9 | P11 | M13 |
//! | min     | P1 | m3 | P5 | m7 | M9 | P11 | M13 |
//! | dim     | P1 | m3 | D5 | D7 | M9 | P11 | M13 |
//!
//! ## Chord-ID Grammar
//! ```text
//! <root?>^<aug?><sus2|sus4?><dom|maj|min|dim?><main degree?><alterations and additions>
//! ```
//! - root: a letter A-G followed by `#`s or `b`s
//! - main degree: one of 1 3 5 7 9 11 13 (default 5)
//! - alteration: `#`s, `b`s or `♮` followed by a degree, e.g. `b5`, `#9`
//! - addition: `add` followed by optional `#`s or `b`s and a degree, e.g. `add9`
//!
//! The quality is omitted for dominant chords and for major chords whose
//! main degree is 5 or less; the main degree is omitted when it is 1 or 5.
//!
//! ## Example
//! ```rust
//! use chordid::{parse_chord_id, Chord, Interval};
//!
//! let chord = Chord::new(vec!["m3".parse::<Interval>()?, "P5".parse()?, "m7".parse()?]);
//! assert_eq!(chord.id(), "^min7");
//!
//! let parsed = parse_chord_id("C^min7")?;
//! assert_eq!(parsed.chord(), &chord);
//! assert_eq!(parsed.id(), "C^min7");
//! # Ok::<(), chordid::TheoryError>(())
//! ```

mod id;
mod rooted;

#[cfg(test)]
mod tests;

use std::fmt;
use std::iter;

use crate::interval::Interval;
use crate::note::Note;

pub use id::parse_chord_id;
pub use rooted::{ParsedChord, RootedChord, ScaleMatches};

pub(crate) const P1: Interval = Interval::canonical(1, 0);
pub(crate) const M2: Interval = Interval::canonical(2, 0);
pub(crate) const M3: Interval = Interval::canonical(3, 0);
pub(crate) const MIN3: Interval = Interval::canonical(3, -1);
pub(crate) const P4: Interval = Interval::canonical(4, 0);
pub(crate) const D5: Interval = Interval::canonical(5, -1);
pub(crate) const P5: Interval = Interval::canonical(5, 0);
pub(crate) const A5: Interval = Interval::canonical(5, 1);
pub(crate) const D7: Interval = Interval::canonical(7, -2);
pub(crate) const MIN7: Interval = Interval::canonical(7, -1);
pub(crate) const M7: Interval = Interval::canonical(7, 0);
const M9: Interval = Interval::canonical(9, 0);
const P11: Interval = Interval::canonical(11, 0);
const M13: Interval = Interval::canonical(13, 0);

const DOMINANT_TABLE: [Interval; 7] = [P1, M3, P5, MIN7, M9, P11, M13];
const MAJOR_TABLE: [Interval; 7] = [P1, M3, P5, M7, M9, P11, M13];
const MINOR_TABLE: [Interval; 7] = [P1, MIN3, P5, MIN7, M9, P11, M13];
const DIMINISHED_TABLE: [Interval; 7] = [P1, MIN3, D5, D7, M9, P11, M13];

/// Chord quality as it appears in a chord-ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Dominant,
    Major,
    Minor,
    Diminished,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 4] = [
        ChordQuality::Dominant,
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
    ];

    /// The chord-ID tag: `dom`, `maj`, `min` or `dim`.
    pub fn tag(self) -> &'static str {
        match self {
            ChordQuality::Dominant => "dom",
            ChordQuality::Major => "maj",
            ChordQuality::Minor => "min",
            ChordQuality::Diminished => "dim",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        ChordQuality::ALL.into_iter().find(|quality| quality.tag() == tag)
    }

    /// Canonical degrees 1, 3, 5 ... 13 for this quality.
    pub fn table(self) -> &'static [Interval; 7] {
        match self {
            ChordQuality::Dominant => &DOMINANT_TABLE,
            ChordQuality::Major => &MAJOR_TABLE,
            ChordQuality::Minor => &MINOR_TABLE,
            ChordQuality::Diminished => &DIMINISHED_TABLE,
        }
    }

    /// Table entry for an odd degree in 1..=13.
    pub(crate) fn expected(self, number: i32) -> Option<Interval> {
        if number % 2 == 1 && (1..=13).contains(&number) {
            Some(self.table()[(number as usize - 1) / 2])
        } else {
            None
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Suspension replacing the third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sus {
    Sus2,
    Sus4,
}

impl Sus {
    pub fn tag(self) -> &'static str {
        match self {
            Sus::Sus2 => "sus2",
            Sus::Sus4 => "sus4",
        }
    }

    /// The interval standing in for the third.
    pub fn interval(self) -> Interval {
        match self {
            Sus::Sus2 => M2,
            Sus::Sus4 => P4,
        }
    }
}

/// Harmonic extent named by the highest odd degree present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Structure {
    /// A lone perfect fifth.
    Power,
    Unison,
    Third,
    Triad,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Structure {
    pub fn name(self) -> &'static str {
        match self {
            Structure::Power => "power",
            Structure::Unison => "unison",
            Structure::Third => "third",
            Structure::Triad => "triad",
            Structure::Seventh => "seventh",
            Structure::Ninth => "ninth",
            Structure::Eleventh => "eleventh",
            Structure::Thirteenth => "thirteenth",
        }
    }

    fn from_degree(number: i32) -> Option<Self> {
        match number {
            1 => Some(Structure::Unison),
            3 => Some(Structure::Third),
            5 => Some(Structure::Triad),
            7 => Some(Structure::Seventh),
            9 => Some(Structure::Ninth),
            11 => Some(Structure::Eleventh),
            13 => Some(Structure::Thirteenth),
            _ => None,
        }
    }
}

/// Intervals above an implicit root, sorted by (number, quality) without
/// duplicates. The root itself is not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Chord {
    intervals: Vec<Interval>,
}

impl Chord {
    pub fn new(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        intervals.sort();
        intervals.dedup();
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, interval: &Interval) -> bool {
        self.intervals.contains(interval)
    }

    fn has_degree(&self, number: i32) -> bool {
        self.intervals.iter().any(|i| i.number() == number)
    }

    /// dim needs m3, D5 and D7; otherwise min on m3, maj on M7, else dom.
    pub fn quality(&self) -> ChordQuality {
        if self.contains(&MIN3) && self.contains(&D5) && self.contains(&D7) {
            ChordQuality::Diminished
        } else if self.contains(&MIN3) {
            ChordQuality::Minor
        } else if self.contains(&M7) {
            ChordQuality::Major
        } else {
            ChordQuality::Dominant
        }
    }

    /// A suspension needs the third to be absent. sus2 wins over sus4.
    pub fn sus(&self) -> Option<Sus> {
        if self.has_degree(3) {
            None
        } else if self.contains(&M2) {
            Some(Sus::Sus2)
        } else if self.contains(&P4) {
            Some(Sus::Sus4)
        } else {
            None
        }
    }

    /// Named by the highest odd degree present; `None` when there is no odd
    /// degree or the highest one is above 13.
    pub fn structure(&self) -> Option<Structure> {
        if self.intervals == [P5] {
            return Some(Structure::Power);
        }
        self.intervals
            .iter()
            .map(Interval::number)
            .filter(|n| n % 2 == 1)
            .max()
            .and_then(Structure::from_degree)
    }

    /// The chord-ID without a root, e.g. `^min7`.
    pub fn id(&self) -> String {
        id::encode(self, None)
    }

    /// The base followed by the note at each interval.
    pub fn notes(&self, base: Note) -> Vec<Note> {
        iter::once(base)
            .chain(self.intervals.iter().map(|&interval| base + interval))
            .collect()
    }

    /// One chord per interval: each step lifts the current root by an
    /// octave and re-measures everything from the new lowest tone.
    pub fn inversions(&self) -> Vec<Chord> {
        let mut current = self.intervals.clone();
        let mut inversions = Vec::with_capacity(current.len());

        for _ in 0..self.intervals.len() {
            let (Some(&lowest), Some(highest)) = (current.first(), current.last()) else {
                break;
            };
            let octaves_above = (highest.number() - 1) / 7 + 1;
            current.push(Interval::canonical(7 * octaves_above + 1, 0));
            current = current[1..].iter().map(|&i| i - lowest).collect();
            inversions.push(Chord::new(current.clone()));
        }

        inversions
    }
}

impl FromIterator<Interval> for Chord {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Chord::new(iter)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
