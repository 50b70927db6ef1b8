//! # chordid
//!
//! Music theory values and the chord-ID notation.
//!
//! ## Modules
//! - `interval` - Diatonic degree plus chromatic quality
//! - `note` - Spelled pitches, MIDI numbers, frequencies and respelling
//! - `scale` - Built-in scale templates and membership queries
//! - `chord` - Chord shapes, the chord-ID codec and rooted-chord analyses
//! - `report` - Serializable per-chord analysis
//! - `settings` - YAML settings for reports
//!
//! ## Entry Points
//! - [`parse_chord_id()`] - Decode a chord-ID
//! - [`chord_report()`] - Decode a chord-ID and analyse it in one call
//!
//! ## Example
//! ```rust
//! let report = chordid::chord_report("A^min7")?;
//! assert_eq!(report.notes, vec!["A4", "C5", "E5", "G5"]);
//! assert_eq!(report.extensions, vec!["A^min9", "A^min11", "A^min13"]);
//! # Ok::<(), chordid::TheoryError>(())
//! ```

pub mod chord;
pub mod error;
pub mod interval;
pub mod note;
pub mod report;
pub mod scale;
pub mod settings;

pub use chord::{
    parse_chord_id, Chord, ChordQuality, ParsedChord, RootedChord, ScaleMatches, Structure, Sus,
};
pub use error::TheoryError;
pub use interval::Interval;
pub use note::{EnharmonicOptions, Favor, Letter, Note};
pub use report::ChordReport;
pub use scale::{Scale, ScaleKind};
pub use settings::Settings;

/// Analyse a chord-ID with the default settings.
pub fn chord_report(id: &str) -> Result<ChordReport, TheoryError> {
    chord_report_with(id, &Settings::default())
}

/// Analyse a chord-ID; bare IDs are rooted at `settings.default_root`.
pub fn chord_report_with(id: &str, settings: &Settings) -> Result<ChordReport, TheoryError> {
    let parsed = parse_chord_id(id)?;
    Ok(ChordReport::build(&parsed, settings))
}
