//! # Notes
//!
//! A [`Note`] is a spelled pitch: a [`Letter`], a net accidental count
//! (positive = sharps, negative = flats) and an octave in scientific pitch
//! notation (C4 = middle C, A4 = 440 Hz).
//!
//! ## Spelling vs Pitch
//! Spelling is part of a note's identity: `C#4` and `Db4` are different
//! notes that sound the same. Equality is structural; use
//! [`Note::cmp_pitch`] or [`Note::midi`] to compare by sound.
//!
//! The octave always follows the letter, never the sounding pitch. `B#4`
//! sounds as `C5` and `Cb5` sounds as `B4`, so MIDI numbers are computed from
//! the letter and the accidentals without reducing modulo 12 first.
//!
//! ## Enharmonic Respelling
//! [`Note::enharmonic_equiv`] re-spells a note, keeping its sounding pitch:
//!
//! | options                          | C#4  | C4   | B4   |
//! |----------------------------------|------|------|------|
//! | default (natural)                | C#4  | C4   | B4   |
//! | favor flat                       | Db4  | C4   | B4   |
//! | favor sharp, force               | C#4  | B#3  | B4   |
//! | favor flat, force                | Db4  | C4   | Cb5  |
//! | letter D                         | Db4  | Dbb4 | Dbbb5 |
//!
//! ## Example
//! ```rust
//! use chordid::{Interval, Note};
//!
//! let g_sharp: Note = "G#4".parse()?;
//! let third: Interval = "M3".parse()?;
//! let b_sharp = g_sharp + third;
//! assert_eq!(b_sharp.to_string(), "B#4");
//! assert_eq!(b_sharp.midi(), 72);
//! assert_eq!(b_sharp - g_sharp, third);
//! # Ok::<(), chordid::TheoryError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::TheoryError;
use crate::interval::{natural_semitones, Interval, MAJOR_SEMITONES};

/// Note letters in scale order starting from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Letter {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position in C D E F G A B.
    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn from_index(index: i32) -> Letter {
        Letter::ALL[index.rem_euclid(7) as usize]
    }

    /// The letter `steps` positions further along C-D-E-F-G-A-B (wrapping).
    pub fn step(self, steps: i32) -> Letter {
        Letter::from_index(self.index() + steps)
    }

    /// Pitch class of the unaltered letter (C = 0).
    pub fn natural_pitch_class(self) -> i32 {
        MAJOR_SEMITONES[self as usize]
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Octaves beyond this in either direction are rejected when parsing.
pub const MAX_OCTAVE: i32 = 100;

/// Canonical sharp-biased spelling of each pitch class.
const CHROMATIC: [(Letter, i32); 12] = [
    (Letter::C, 0),
    (Letter::C, 1),
    (Letter::D, 0),
    (Letter::D, 1),
    (Letter::E, 0),
    (Letter::F, 0),
    (Letter::F, 1),
    (Letter::G, 0),
    (Letter::G, 1),
    (Letter::A, 0),
    (Letter::A, 1),
    (Letter::B, 0),
];

/// Accidental preference for canonical respelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Favor {
    /// Sharp names for black keys, no accidentals on white keys.
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Favor {
    /// Parse `natural`, `sharp` or `flat` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "natural" => Some(Favor::Natural),
            "sharp" => Some(Favor::Sharp),
            "flat" => Some(Favor::Flat),
            _ => None,
        }
    }
}

/// Options for [`Note::enharmonic_equiv`].
///
/// A target `letter` takes precedence over `favor` and `force`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnharmonicOptions {
    pub favor: Favor,
    /// Also respell naturals: C/F as B#/E# when favoring sharps, B/E as Cb/Fb
    /// when favoring flats.
    pub force: bool,
    pub letter: Option<Letter>,
}

impl EnharmonicOptions {
    pub fn favoring(favor: Favor) -> Self {
        Self {
            favor,
            ..Self::default()
        }
    }

    pub fn with_letter(letter: Letter) -> Self {
        Self {
            letter: Some(letter),
            ..Self::default()
        }
    }

    pub fn forced(self) -> Self {
        Self {
            force: true,
            ..self
        }
    }
}

/// A spelled pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: Letter,
    accidental: i32,
    octave: i32,
}

impl Default for Note {
    /// Middle C.
    fn default() -> Self {
        Self::new(Letter::C, 0, 4)
    }
}

impl Note {
    pub fn new(letter: Letter, accidental: i32, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Note for an absolute chromatic number (MIDI numbering, C4 = 60),
    /// spelled with sharps.
    pub fn from_midi(number: i32) -> Self {
        let (letter, accidental) = CHROMATIC[number.rem_euclid(12) as usize];
        Self::new(letter, accidental, number.div_euclid(12) - 1)
    }

    /// Spell `midi` with the given letter and accidental, choosing the octave
    /// that keeps the sounding pitch.
    fn spelled(letter: Letter, accidental: i32, midi: i32) -> Self {
        let octave = (midi - letter.natural_pitch_class() - accidental).div_euclid(12) - 1;
        Self::new(letter, accidental, octave)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    /// Net accidentals: +n for n sharps, -n for n flats.
    pub fn accidental(&self) -> i32 {
        self.accidental
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Pitch class 0-11 (floor modulo, so `Cb` is 11).
    pub fn pitch_class(&self) -> i32 {
        (self.letter.natural_pitch_class() + self.accidental).rem_euclid(12)
    }

    /// MIDI note number. Not clamped to 0-127.
    pub fn midi(&self) -> i32 {
        12 * (self.octave + 1) + self.letter.natural_pitch_class() + self.accidental
    }

    /// Equal-tempered frequency in Hz, A4 = 440.
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf(f64::from(self.midi() - 69) / 12.0)
    }

    /// Absolute chromatic position used by note and interval arithmetic.
    /// Same numbering as [`Note::midi`].
    pub fn to_semitones(&self) -> i32 {
        self.midi()
    }

    /// Compare by sounding pitch, ignoring spelling.
    pub fn cmp_pitch(&self, other: &Note) -> Ordering {
        self.midi().cmp(&other.midi())
    }

    /// Letter and accidentals without the octave, e.g. `Bb`.
    pub fn name(&self) -> String {
        format!("{}{}", self.letter, accidental_text(self.accidental))
    }

    /// Re-spell this note without changing its sounding pitch.
    pub fn enharmonic_equiv(&self, options: EnharmonicOptions) -> Note {
        let pitch_class = self.pitch_class();

        let (letter, accidental) = match options.letter {
            Some(letter) => {
                let mut diff = pitch_class - letter.natural_pitch_class();
                if diff > 6 {
                    diff -= 12;
                } else if diff <= -6 {
                    diff += 12;
                }
                (letter, diff)
            }
            None => {
                let (mut letter, mut accidental) = CHROMATIC[pitch_class as usize];
                if options.favor == Favor::Flat && accidental > 0 {
                    letter = letter.step(1);
                    accidental = -1;
                }
                if options.force && accidental == 0 {
                    match (options.favor, letter) {
                        (Favor::Sharp, Letter::C | Letter::F) => {
                            letter = letter.step(-1);
                            accidental = 1;
                        }
                        (Favor::Flat, Letter::B | Letter::E) => {
                            letter = letter.step(1);
                            accidental = -1;
                        }
                        _ => {}
                    }
                }
                (letter, accidental)
            }
        };

        Note::spelled(letter, accidental, self.midi())
    }
}

/// `#` or `b` repeated for the net count.
pub(crate) fn accidental_text(accidental: i32) -> String {
    if accidental >= 0 {
        "#".repeat(accidental as usize)
    } else {
        "b".repeat(accidental.unsigned_abs() as usize)
    }
}

/// Parse a run of only `#` or only `b` into a net count.
pub(crate) fn parse_accidentals(text: &str) -> Option<i32> {
    if text.chars().all(|c| c == '#') {
        Some(text.len() as i32)
    } else if text.chars().all(|c| c == 'b') {
        Some(-(text.len() as i32))
    } else {
        None
    }
}

impl Add<Interval> for Note {
    type Output = Note;

    /// The note `interval` above this one, spelled on the diatonic target
    /// letter (C + A4 is F#, C + D5 is Gb).
    fn add(self, interval: Interval) -> Note {
        let steps = self.letter.index() + interval.number() - 1;
        let letter = Letter::from_index(steps);
        let octave = self.octave + steps.div_euclid(7);
        let natural = Note::new(letter, 0, octave).midi();
        let accidental = self.to_semitones() + interval.to_semitones() - natural;
        Note::new(letter, accidental, octave)
    }
}

impl Sub for Note {
    type Output = Interval;

    /// The interval from `other` up to `self`, named by letter distance.
    fn sub(self, other: Note) -> Interval {
        let self_index = self.letter.index();
        let other_index = other.letter.index();

        let mut octaves = self.octave - other.octave;
        if self_index < other_index {
            octaves -= 1;
        }
        let number = (self_index - other_index).rem_euclid(7) + 1 + octaves * 7;

        let chromatic = self.to_semitones() - other.to_semitones();
        let baseline = natural_semitones(number) + octaves * 12;
        Interval::from_parts(number, chromatic - baseline)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    /// Parse `C4`, `F#3`, `Bbb2`, `C-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TheoryError::MalformedNote(s.to_string());
        let text = s.trim();

        let letter = text
            .chars()
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(malformed)?;
        let rest = &text[1..];

        let octave_start = rest
            .find(|c: char| c == '-' || c.is_ascii_digit())
            .ok_or_else(malformed)?;
        let (accidentals, octave) = rest.split_at(octave_start);

        let accidental = parse_accidentals(accidentals).ok_or_else(malformed)?;
        let octave: i32 = octave.parse().map_err(|_| malformed())?;
        if !(-MAX_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(malformed());
        }

        Ok(Note::new(letter, accidental, octave))
    }
}
