//! # Error Types
//!
//! This module defines all error types for the chordid library.
//!
//! Every error carries the offending input so callers can report it back
//! verbatim. Arithmetic on already-constructed values never fails; errors only
//! come out of the text boundaries (note names, interval names, chord-IDs,
//! scale names, settings files).
//!
//! ## Error Types
//! - `MalformedNote` - note text not of the form `<A-G><accidentals><octave>`
//! - `MalformedInterval` - interval text without a readable degree
//! - `MalformedChordId` - chord-ID grammar mismatch with a character position
//! - `UnknownScaleName` - scale name outside the built-in recipe table
//! - `InvalidDegree` - interval number below 1 or above 50
//! - `Settings` - invalid YAML settings
//!
//! ## Usage
//! ```rust
//! use chordid::{parse_chord_id, TheoryError};
//!
//! match parse_chord_id("C^min7") {
//!     Ok(chord) => println!("{}", chord.id()),
//!     Err(TheoryError::MalformedChordId { position, message, .. }) => {
//!         eprintln!("bad chord-ID at {}: {}", position, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// Note text that is not `<A-G><'#'* | 'b'*><octave>`.
    ///
    /// # Example
    /// ```
    /// # use chordid::TheoryError;
    /// let err = TheoryError::MalformedNote("H4".to_string());
    /// assert_eq!(err.to_string(), "Malformed note 'H4': expected a letter A-G, accidentals and an octave (e.g. C#4)");
    /// ```
    #[error("Malformed note '{0}': expected a letter A-G, accidentals and an octave (e.g. C#4)")]
    MalformedNote(String),

    /// Interval text such as `M` or `Px` whose degree cannot be read.
    #[error("Malformed interval '{0}': expected a quality letter followed by a degree (e.g. M3)")]
    MalformedInterval(String),

    /// Chord-ID grammar mismatch.
    ///
    /// `position` is the 1-based character index where parsing stopped.
    ///
    /// # Example
    /// ```
    /// # use chordid::TheoryError;
    /// let err = TheoryError::MalformedChordId {
    ///     id: "Cmin7".to_string(),
    ///     position: 2,
    ///     message: "expected '^'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed chord ID 'Cmin7' at position 2: expected '^'");
    /// ```
    #[error("Malformed chord ID '{id}' at position {position}: {message}")]
    MalformedChordId {
        id: String,
        position: usize,
        message: String,
    },

    /// Scale name outside the built-in table.
    ///
    /// `Scale::generate` recovers from this by using the major template.
    #[error("Unknown scale name: {0}")]
    UnknownScaleName(String),

    /// Interval number outside 1 (unison) to 50.
    #[error("Invalid interval degree {0}: degrees run from 1 to 50")]
    InvalidDegree(i32),

    /// Invalid settings file.
    #[error("Invalid settings: {0}")]
    Settings(String),
}
