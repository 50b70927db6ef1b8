//! Per-chord analysis record for serving layers.
//!
//! Everything is rendered as text: chord-IDs for chords, `C#4`-style names
//! for notes. Scale matches are keyed by the proportion in its shortest
//! round-trip form (`1.0`, `0.6666666666666666`).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::chord::{ParsedChord, RootedChord};
use crate::settings::Settings;

/// Analysis of one chord.
///
/// # Fields
/// - `id`: the chord-ID as encoded (no root prefix if the input had none)
/// - `notes`: sounding notes from the root up
/// - `intervals`: subchord IDs keyed by the diatonic span of the subchord
/// - `inversions`, `simplifications`, `extensions`, `transpositions`: rooted chord-IDs
/// - `scales`: `"<root> <scale>"` labels keyed by the share of chord pitch classes matched
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChordReport {
    pub id: String,
    pub notes: Vec<String>,
    pub intervals: BTreeMap<i32, Vec<String>>,
    pub inversions: Vec<String>,
    pub simplifications: Vec<String>,
    pub extensions: Vec<String>,
    pub scales: BTreeMap<String, Vec<String>>,
    pub transpositions: Vec<String>,
}

impl ChordReport {
    pub fn build(parsed: &ParsedChord, settings: &Settings) -> Self {
        let id = parsed.id();
        let chord = parsed.clone().rooted_or(settings.default_root);

        let intervals = chord
            .subchords()
            .into_iter()
            .map(|(span, subchords)| (span, ids(&subchords)))
            .collect();

        let scales = chord
            .find_matching_scales_in(&settings.scales, settings.spelling)
            .groups()
            .into_iter()
            .map(|(proportion, labels)| (format!("{:?}", proportion), labels.to_vec()))
            .collect();

        Self {
            id,
            notes: chord.notes().iter().map(|n| n.to_string()).collect(),
            intervals,
            inversions: ids(&chord.inversions()),
            simplifications: ids(&chord.simplifications()),
            extensions: ids(&chord.extensions()),
            scales,
            transpositions: ids(&chord.transpositions_with(settings.spelling)),
        }
    }
}

fn ids(chords: &[RootedChord]) -> Vec<String> {
    chords.iter().map(RootedChord::id).collect()
}
