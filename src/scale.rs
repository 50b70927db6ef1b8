//! # Scales
//!
//! Built-in scales are generated on demand from the major template
//! (M2 M3 P4 P5 M6 M7 above the base) by a fixed recipe per [`ScaleKind`]:
//!
//! | kind                    | recipe                                  |
//! |-------------------------|-----------------------------------------|
//! | major                   | template as is                          |
//! | natural minor           | flatten 3, 6, 7                         |
//! | harmonic minor          | flatten 3, 6                            |
//! | melodic minor           | flatten 3                               |
//! | major pentatonic scale  | drop 4, 7                               |
//! | minor pentatonic scale  | flatten 3, 7; drop 2, 6                 |
//! | blues scale             | minor pentatonic plus an augmented 4th  |
//!
//! [`Scale::generate`] takes a scale name and falls back to the major
//! template for names it does not know. Use [`ScaleKind::from_str`] when an
//! unknown name should be an error instead.

use std::collections::BTreeSet;
use std::fmt;
use std::iter;
use std::str::FromStr;

use tracing::debug;

use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::Note;

/// The built-in scale templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
}

/// Alterations applied to the major template.
struct Recipe {
    flatten: &'static [i32],
    drop: &'static [i32],
    add: Option<Interval>,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 7] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
        ScaleKind::MajorPentatonic,
        ScaleKind::MinorPentatonic,
        ScaleKind::Blues,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::NaturalMinor => "natural minor",
            ScaleKind::HarmonicMinor => "harmonic minor",
            ScaleKind::MelodicMinor => "melodic minor",
            ScaleKind::MajorPentatonic => "major pentatonic scale",
            ScaleKind::MinorPentatonic => "minor pentatonic scale",
            ScaleKind::Blues => "blues scale",
        }
    }

    fn recipe(self) -> Recipe {
        match self {
            ScaleKind::Major => Recipe {
                flatten: &[],
                drop: &[],
                add: None,
            },
            ScaleKind::NaturalMinor => Recipe {
                flatten: &[3, 6, 7],
                drop: &[],
                add: None,
            },
            ScaleKind::HarmonicMinor => Recipe {
                flatten: &[3, 6],
                drop: &[],
                add: None,
            },
            ScaleKind::MelodicMinor => Recipe {
                flatten: &[3],
                drop: &[],
                add: None,
            },
            ScaleKind::MajorPentatonic => Recipe {
                flatten: &[],
                drop: &[4, 7],
                add: None,
            },
            ScaleKind::MinorPentatonic => Recipe {
                flatten: &[3, 7],
                drop: &[2, 6],
                add: None,
            },
            ScaleKind::Blues => Recipe {
                flatten: &[3, 7],
                drop: &[2, 6],
                add: Some(Interval::canonical(4, 1)),
            },
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleKind {
    type Err = TheoryError;

    /// Case-insensitive; the trailing " scale" of the pentatonic and blues
    /// names is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let short = wanted.strip_suffix(" scale").unwrap_or(&wanted);
        ScaleKind::ALL
            .into_iter()
            .find(|kind| {
                let name = kind.name();
                name == wanted || name.strip_suffix(" scale").unwrap_or(name) == short
            })
            .ok_or_else(|| TheoryError::UnknownScaleName(s.to_string()))
    }
}

/// A base note plus intervals above it, kept sorted by (number, quality).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    base: Note,
    intervals: Vec<Interval>,
}

impl Scale {
    pub fn new(base: Note, intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        intervals.sort();
        intervals.dedup();
        Self { base, intervals }
    }

    /// Build a built-in scale on `base`.
    pub fn of_kind(kind: ScaleKind, base: Note) -> Self {
        let recipe = kind.recipe();
        let template = (2..=7)
            .filter(|degree| !recipe.drop.contains(degree))
            .map(|degree| {
                let quality = if recipe.flatten.contains(&degree) { -1 } else { 0 };
                Interval::canonical(degree, quality)
            });
        Scale::new(base, template.chain(recipe.add))
    }

    /// Build a scale by name, using the major template for unknown names.
    pub fn generate(name: &str, base: Note) -> Self {
        let kind = name.parse::<ScaleKind>().unwrap_or_else(|err| {
            debug!(%err, "using the major template");
            ScaleKind::Major
        });
        Scale::of_kind(kind, base)
    }

    pub fn base(&self) -> Note {
        self.base
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// The base followed by the note at each interval.
    pub fn notes(&self) -> Vec<Note> {
        iter::once(self.base)
            .chain(self.intervals.iter().map(|&interval| self.base + interval))
            .collect()
    }

    pub fn pitch_classes(&self) -> BTreeSet<i32> {
        self.notes().iter().map(Note::pitch_class).collect()
    }

    /// Whether the note's pitch class occurs in the scale, in any octave.
    pub fn contains(&self, note: &Note) -> bool {
        self.contains_pitch_class(note.pitch_class())
    }

    pub fn contains_pitch_class(&self, pitch_class: i32) -> bool {
        self.pitch_classes().contains(&pitch_class.rem_euclid(12))
    }
}
