//! Chord-ID encoding and decoding.
//!
//! The encoder reads a chord against its quality's canonical table; the
//! decoder rebuilds the table up to the main degree and then applies the
//! suspension, the augmented fifth, additions and alterations. Decoding an
//! encoded ID and encoding it again gives back the same ID.

use tracing::trace;

use super::{Chord, ChordQuality, ParsedChord, RootedChord, Sus, A5, P5};
use crate::error::TheoryError;
use crate::interval::Interval;
use crate::note::{accidental_text, Letter, Note};

/// Degrees allowed as the main number.
const MAIN_DEGREES: [i32; 7] = [1, 3, 5, 7, 9, 11, 13];

/// Main number used when the ID names none.
const DEFAULT_MAIN: i32 = 5;

/// Octave given to a root parsed from a chord-ID.
const ROOT_OCTAVE: i32 = 4;

const NATURAL_SIGN: &str = "♮";

pub(crate) fn encode(chord: &Chord, root: Option<&Note>) -> String {
    let quality = chord.quality();
    let table = quality.table();

    let mut main = (1..table.len())
        .rev()
        .find(|&k| chord.contains(&table[k]))
        .map_or(1, |k| 2 * k as i32 + 1);
    let sus = chord.sus();
    let aug = chord.contains(&A5);

    let mut alterations = Vec::new();
    let mut additions = Vec::new();
    for &interval in chord.intervals() {
        if sus.map(Sus::interval) == Some(interval) || (aug && interval == A5) {
            continue;
        }
        let number = interval.number();
        match quality.expected(number) {
            Some(expected) if expected == interval => {}
            Some(_) if degree_count(chord, number) == 1 => alterations.push(interval),
            _ => additions.push(interval),
        }
    }

    if aug || alterations.iter().any(|i| i.number() == 5) {
        main = main.max(5);
    }

    let mut id = String::new();
    if let Some(root) = root {
        id.push_str(&root.name());
    }
    id.push('^');
    if aug {
        id.push_str("aug");
    }
    if let Some(sus) = sus {
        id.push_str(sus.tag());
    }
    let show_quality = match quality {
        ChordQuality::Dominant => false,
        ChordQuality::Major => main > 5,
        ChordQuality::Minor | ChordQuality::Diminished => true,
    };
    if show_quality {
        id.push_str(quality.tag());
    }
    if main != 1 && main != 5 {
        id.push_str(&main.to_string());
    }
    for alteration in &alterations {
        if alteration.quality() == 0 {
            id.push_str(NATURAL_SIGN);
        } else {
            id.push_str(&accidental_text(alteration.quality()));
        }
        id.push_str(&alteration.number().to_string());
    }
    for addition in &additions {
        id.push_str("add");
        id.push_str(&accidental_text(addition.quality()));
        id.push_str(&addition.number().to_string());
    }

    trace!(%id, intervals = chord.len(), "encoded chord");
    id
}

fn degree_count(chord: &Chord, number: i32) -> usize {
    chord
        .intervals()
        .iter()
        .filter(|i| i.number() == number)
        .count()
}

/// Parse a chord-ID such as `^7`, `Eb^min9` or `F#^sus4add9`.
///
/// A root prefix yields [`ParsedChord::Rooted`] with the root in octave 4;
/// without one the result is [`ParsedChord::Bare`].
///
/// # Errors
/// - [`TheoryError::MalformedChordId`] for grammar mismatches, with the
///   1-based character position where reading stopped
/// - [`TheoryError::InvalidDegree`] for a degree of 0 or an added or
///   altered degree above 50
///
/// # Example
/// ```rust
/// use chordid::{parse_chord_id, ParsedChord};
///
/// let parsed = parse_chord_id("G^7b9")?;
/// let ParsedChord::Rooted(chord) = parsed else { panic!("expected a root") };
/// let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();
/// assert_eq!(notes, vec!["G4", "B4", "D5", "F5", "Ab5"]);
/// # Ok::<(), chordid::TheoryError>(())
/// ```
pub fn parse_chord_id(text: &str) -> Result<ParsedChord, TheoryError> {
    let text = text.trim();
    let mut cursor = Cursor::new(text);

    let root = cursor.root()?;
    if !cursor.eat("^") {
        return Err(cursor.error("expected '^'"));
    }

    let aug = cursor.eat("aug");
    let sus = if cursor.eat("sus2") {
        Some(Sus::Sus2)
    } else if cursor.eat("sus4") {
        Some(Sus::Sus4)
    } else if cursor.rest().starts_with("sus") {
        return Err(cursor.error("expected sus2 or sus4"));
    } else {
        None
    };

    let mut quality = ChordQuality::Dominant;
    for candidate in ChordQuality::ALL {
        if cursor.eat(candidate.tag()) {
            quality = candidate;
            break;
        }
    }

    let main_position = cursor.position;
    let main = match cursor.number()? {
        None => DEFAULT_MAIN,
        Some(0) => return Err(TheoryError::InvalidDegree(0)),
        Some(n) if MAIN_DEGREES.contains(&n) => n,
        Some(n) => {
            return Err(cursor.error_at(
                main_position,
                format!("main degree {} is not one of 1, 3, 5, 7, 9, 11, 13", n),
            ))
        }
    };

    let mut alterations = Vec::new();
    let mut additions = Vec::new();
    while cursor.peek().is_some() {
        if cursor.eat("add") {
            let accidental = cursor.accidentals();
            let number = cursor.degree()?;
            additions.push(Interval::new(number, accidental)?);
        } else if cursor.eat(NATURAL_SIGN) {
            let number = cursor.degree()?;
            alterations.push(Interval::new(number, 0)?);
        } else {
            let accidental = cursor.accidentals();
            if accidental == 0 {
                return Err(cursor.error("expected an alteration or an addition"));
            }
            let number = cursor.degree()?;
            alterations.push(Interval::new(number, accidental)?);
        }
    }

    let table = quality.table();
    let mut intervals: Vec<Interval> = table[1..=(main / 2) as usize].to_vec();
    if aug {
        match intervals.iter().position(|&i| i == P5) {
            Some(index) => intervals[index] = A5,
            None => intervals.push(A5),
        }
    }
    if let Some(sus) = sus {
        intervals.retain(|i| i.number() != 3);
        intervals.push(sus.interval());
    }
    intervals.extend(additions);
    for alteration in alterations {
        intervals.retain(|i| i.number() != alteration.number());
        intervals.push(alteration);
    }

    let chord = Chord::new(intervals);
    trace!(id = text, intervals = chord.len(), "decoded chord-ID");
    Ok(match root {
        Some(root) => ParsedChord::Rooted(RootedChord::new(root, chord)),
        None => ParsedChord::Bare(chord),
    })
}

/// Character cursor over a chord-ID.
struct Cursor<'a> {
    id: &'a str,
    offset: usize,
    /// Characters consumed so far.
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(id: &'a str) -> Self {
        Self {
            id,
            offset: 0,
            position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.id[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        self.position += 1;
        Some(c)
    }

    fn eat(&mut self, word: &str) -> bool {
        if self.rest().starts_with(word) {
            self.offset += word.len();
            self.position += word.chars().count();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> TheoryError {
        self.error_at(self.position, message)
    }

    fn error_at(&self, consumed: usize, message: impl Into<String>) -> TheoryError {
        TheoryError::MalformedChordId {
            id: self.id.to_string(),
            position: consumed + 1,
            message: message.into(),
        }
    }

    fn root(&mut self) -> Result<Option<Note>, TheoryError> {
        match self.peek() {
            None => Err(self.error("empty chord ID")),
            Some('^') => Ok(None),
            Some(c) => {
                let letter = Letter::from_char(c)
                    .ok_or_else(|| self.error("expected a root letter A-G or '^'"))?;
                self.bump();
                let accidental = self.accidentals();
                Ok(Some(Note::new(letter, accidental, ROOT_OCTAVE)))
            }
        }
    }

    /// A run of only `#` or only `b`, as a net count.
    fn accidentals(&mut self) -> i32 {
        match self.peek() {
            Some('#') => {
                let mut count = 0;
                while self.peek() == Some('#') {
                    self.bump();
                    count += 1;
                }
                count
            }
            Some('b') => {
                let mut count = 0;
                while self.peek() == Some('b') {
                    self.bump();
                    count -= 1;
                }
                count
            }
            _ => 0,
        }
    }

    fn number(&mut self) -> Result<Option<i32>, TheoryError> {
        let start = self.position;
        let digits: String = self.rest().chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Ok(None);
        }
        for _ in 0..digits.len() {
            self.bump();
        }
        digits
            .parse()
            .map(Some)
            .map_err(|_| self.error_at(start, format!("degree {} is out of range", digits)))
    }

    fn degree(&mut self) -> Result<i32, TheoryError> {
        self.number()?.ok_or_else(|| self.error("expected a degree"))
    }
}
