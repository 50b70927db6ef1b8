//! Chords anchored at a concrete root note.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::Chord;
use crate::interval::Interval;
use crate::note::{EnharmonicOptions, Favor, Note};
use crate::scale::{Scale, ScaleKind};

/// A [`Chord`] with its root spelled as a note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootedChord {
    base: Note,
    chord: Chord,
}

impl RootedChord {
    pub fn new(base: Note, chord: Chord) -> Self {
        Self { base, chord }
    }

    pub fn base(&self) -> Note {
        self.base
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    pub fn intervals(&self) -> &[Interval] {
        self.chord.intervals()
    }

    /// The chord-ID with the root prefix, e.g. `Eb^maj7`.
    pub fn id(&self) -> String {
        super::id::encode(&self.chord, Some(&self.base))
    }

    pub fn notes(&self) -> Vec<Note> {
        self.chord.notes(self.base)
    }

    /// Inversions of the shape, each rooted at the note that becomes the bass.
    pub fn inversions(&self) -> Vec<RootedChord> {
        let notes = self.notes();
        self.chord
            .inversions()
            .into_iter()
            .zip(notes.into_iter().skip(1))
            .map(|(chord, bass)| RootedChord::new(bass, chord))
            .collect()
    }

    /// The same shape on each of the 12 chromatic roots in the base's octave,
    /// spelled with sharps for black keys.
    pub fn transpositions(&self) -> Vec<RootedChord> {
        self.transpositions_with(Favor::Natural)
    }

    pub fn transpositions_with(&self, favor: Favor) -> Vec<RootedChord> {
        let octave_start = 12 * (self.base.octave() + 1);
        (0..12)
            .map(|pitch_class| {
                let root = Note::from_midi(octave_start + pitch_class)
                    .enharmonic_equiv(EnharmonicOptions::favoring(favor));
                RootedChord::new(root, self.chord.clone())
            })
            .collect()
    }

    /// Every contiguous run of at least two notes as its own chord, keyed by
    /// the diatonic number between the run's outer notes.
    ///
    /// Notes are taken in staff order, which matches sounding order unless
    /// the spelling crosses letters (`C#4` sits below `Dbb4`).
    pub fn subchords(&self) -> BTreeMap<i32, Vec<RootedChord>> {
        let notes = self.sorted_notes();
        let mut subchords: BTreeMap<i32, Vec<RootedChord>> = BTreeMap::new();

        for (i, &low) in notes.iter().enumerate() {
            for j in i + 1..notes.len() {
                let intervals = notes[i + 1..=j].iter().map(|&note| note - low);
                let span = (notes[j] - low).number();
                subchords
                    .entry(span)
                    .or_default()
                    .push(RootedChord::new(low, Chord::new(intervals)));
            }
        }

        subchords
    }

    /// Interval between every pair of notes, lower to upper, keyed by its
    /// diatonic number.
    pub fn intervals_between_notes(&self) -> BTreeMap<i32, Vec<Interval>> {
        let notes = self.sorted_notes();
        let mut between: BTreeMap<i32, Vec<Interval>> = BTreeMap::new();

        for (i, &low) in notes.iter().enumerate() {
            for &high in &notes[i + 1..] {
                let interval = high - low;
                between.entry(interval.number()).or_default().push(interval);
            }
        }

        between
    }

    /// Chords reached by adding the missing canonical degrees one at a time,
    /// lowest first. The starting chord is not included.
    pub fn extensions(&self) -> Vec<RootedChord> {
        let table = self.chord.quality().table();
        let mut current = self.chord.clone();
        let mut extensions = Vec::new();

        for interval in &table[1..] {
            if !current.contains(interval) {
                current = current
                    .intervals()
                    .iter()
                    .copied()
                    .chain(Some(*interval))
                    .collect();
                extensions.push(RootedChord::new(self.base, current.clone()));
            }
        }

        extensions
    }

    /// Chords reached by dropping the highest odd degree until one interval
    /// is left. The starting chord is not included.
    pub fn simplifications(&self) -> Vec<RootedChord> {
        let mut current = self.chord.intervals().to_vec();
        let mut simplifications = Vec::new();

        while current.len() > 1 {
            let Some(highest) = current
                .iter()
                .map(Interval::number)
                .filter(|n| n % 2 == 1)
                .max()
            else {
                break;
            };
            let Some(index) = current.iter().position(|i| i.number() == highest) else {
                break;
            };
            current.remove(index);
            simplifications.push(RootedChord::new(self.base, Chord::new(current.clone())));
        }

        simplifications
    }

    /// Rate every built-in scale on every root by how many of the chord's
    /// pitch classes it contains.
    pub fn find_matching_scales(&self) -> ScaleMatches {
        self.find_matching_scales_in(&ScaleKind::ALL, Favor::Natural)
    }

    /// [`RootedChord::find_matching_scales`] restricted to `kinds`, with
    /// scale roots spelled according to `favor`.
    pub fn find_matching_scales_in(&self, kinds: &[ScaleKind], favor: Favor) -> ScaleMatches {
        let chord_classes: BTreeSet<i32> = self.notes().iter().map(Note::pitch_class).collect();
        let mut matches = ScaleMatches {
            total: chord_classes.len(),
            by_matched: BTreeMap::new(),
        };

        for pitch_class in 0..12 {
            let root = Note::from_midi(60 + pitch_class)
                .enharmonic_equiv(EnharmonicOptions::favoring(favor));
            for &kind in kinds {
                let scale_classes = Scale::of_kind(kind, root).pitch_classes();
                let matched = chord_classes.intersection(&scale_classes).count();
                matches
                    .by_matched
                    .entry(matched)
                    .or_default()
                    .push(format!("{} {}", root.name(), kind.name()));
            }
        }

        matches
    }

    /// Notes in staff order, sounding pitch breaking ties, so the interval
    /// from an earlier note to a later one never has a number below 1.
    fn sorted_notes(&self) -> Vec<Note> {
        let mut notes = self.notes();
        notes.sort_by(|a, b| {
            staff_position(a)
                .cmp(&staff_position(b))
                .then_with(|| a.cmp_pitch(b))
        });
        notes
    }
}

/// Diatonic steps above C-1, ignoring accidentals.
fn staff_position(note: &Note) -> i32 {
    note.octave() * 7 + note.letter().index()
}

/// Scale labels such as `"C major"` grouped by the share of the chord's
/// pitch classes each scale contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleMatches {
    total: usize,
    by_matched: BTreeMap<usize, Vec<String>>,
}

impl ScaleMatches {
    /// Number of distinct pitch classes in the chord.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Groups from the best proportion down.
    pub fn groups(&self) -> Vec<(f64, &[String])> {
        self.by_matched
            .iter()
            .rev()
            .map(|(&matched, labels)| (self.proportion(matched), labels.as_slice()))
            .collect()
    }

    /// Labels whose proportion is exactly `proportion`.
    pub fn labels_at(&self, proportion: f64) -> &[String] {
        self.by_matched
            .iter()
            .find(|(matched, _)| self.proportion(**matched) == proportion)
            .map(|(_, labels)| labels.as_slice())
            .unwrap_or(&[])
    }

    fn proportion(&self, matched: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            matched as f64 / self.total as f64
        }
    }
}

/// The result of decoding a chord-ID: with a root prefix the chord is rooted,
/// otherwise it is a bare shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedChord {
    Bare(Chord),
    Rooted(RootedChord),
}

impl ParsedChord {
    pub fn chord(&self) -> &Chord {
        match self {
            ParsedChord::Bare(chord) => chord,
            ParsedChord::Rooted(rooted) => rooted.chord(),
        }
    }

    pub fn root(&self) -> Option<Note> {
        match self {
            ParsedChord::Bare(_) => None,
            ParsedChord::Rooted(rooted) => Some(rooted.base()),
        }
    }

    pub fn id(&self) -> String {
        match self {
            ParsedChord::Bare(chord) => chord.id(),
            ParsedChord::Rooted(rooted) => rooted.id(),
        }
    }

    /// The rooted chord, anchoring a bare shape at `default_root`.
    pub fn rooted_or(self, default_root: Note) -> RootedChord {
        match self {
            ParsedChord::Rooted(rooted) => rooted,
            ParsedChord::Bare(chord) => {
                debug!(root = %default_root, id = %chord.id(), "rooting bare chord-ID");
                RootedChord::new(default_root, chord)
            }
        }
    }
}
