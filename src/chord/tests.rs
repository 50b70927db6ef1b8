use pretty_assertions::assert_eq;

use super::*;
use crate::error::TheoryError;
use crate::note::{Favor, Note};
use crate::scale::ScaleKind;

fn chord(intervals: &[&str]) -> Chord {
    intervals.iter().map(|text| text.parse::<Interval>().unwrap()).collect()
}

fn note(text: &str) -> Note {
    text.parse().unwrap()
}

fn rooted(root: &str, intervals: &[&str]) -> RootedChord {
    RootedChord::new(note(root), chord(intervals))
}

fn ids(chords: &[RootedChord]) -> Vec<String> {
    chords.iter().map(RootedChord::id).collect()
}

fn interval_names(chord: &Chord) -> Vec<String> {
    chord.intervals().iter().map(|i| i.to_string()).collect()
}

fn malformed_at(text: &str) -> (usize, String) {
    match parse_chord_id(text) {
        Err(TheoryError::MalformedChordId { position, message, .. }) => (position, message),
        other => panic!("expected a malformed chord-ID error for {:?}, got {:?}", text, other),
    }
}

#[test]
fn test_new_sorts_and_dedups() {
    let c = chord(&["P5", "M3", "P5", "m3"]);
    assert_eq!(interval_names(&c), vec!["m3", "M3", "P5"]);
}

#[test]
fn test_quality() {
    assert_eq!(chord(&["m3", "P5", "m7"]).quality(), ChordQuality::Minor);
    assert_eq!(chord(&["m3", "D5", "D7"]).quality(), ChordQuality::Diminished);
    assert_eq!(chord(&["m3", "D5", "m7"]).quality(), ChordQuality::Minor);
    assert_eq!(chord(&["M3", "P5", "M7"]).quality(), ChordQuality::Major);
    assert_eq!(chord(&["M3", "P5", "m7"]).quality(), ChordQuality::Dominant);
    assert_eq!(chord(&["M3", "P5"]).quality(), ChordQuality::Dominant);
}

#[test]
fn test_sus() {
    assert_eq!(chord(&["M2", "P5"]).sus(), Some(Sus::Sus2));
    assert_eq!(chord(&["P4", "P5"]).sus(), Some(Sus::Sus4));
    assert_eq!(chord(&["M2", "P4", "P5"]).sus(), Some(Sus::Sus2));
    // A third rules out a suspension
    assert_eq!(chord(&["M3", "P4"]).sus(), None);
    assert_eq!(chord(&["M3", "P5"]).sus(), None);
}

#[test]
fn test_structure() {
    assert_eq!(chord(&["P5"]).structure(), Some(Structure::Power));
    assert_eq!(chord(&["M3"]).structure(), Some(Structure::Third));
    assert_eq!(chord(&["M3", "P5"]).structure(), Some(Structure::Triad));
    assert_eq!(chord(&["M3", "P5", "m7"]).structure(), Some(Structure::Seventh));
    assert_eq!(chord(&["M3", "P5", "m7", "M9"]).structure(), Some(Structure::Ninth));
    assert_eq!(chord(&["P5", "P8"]).structure(), Some(Structure::Triad));
    assert_eq!(chord(&["M3", "M13"]).structure(), Some(Structure::Thirteenth));
    assert_eq!(chord(&["M2", "P4"]).structure(), None);
    assert_eq!(Chord::default().structure(), None);
    // No name above the thirteenth
    assert_eq!(chord(&["M3", "P15"]).structure(), None);
    assert_eq!(chord(&["M3", "P5", "m7", "A15"]).structure(), None);
}

#[test]
fn test_encode_common_chords() {
    assert_eq!(chord(&["M3", "P5"]).id(), "^");
    assert_eq!(chord(&["m3", "P5"]).id(), "^min");
    assert_eq!(chord(&["M3", "P5", "m7"]).id(), "^7");
    assert_eq!(chord(&["M3", "P5", "M7"]).id(), "^maj7");
    assert_eq!(chord(&["m3", "P5", "m7"]).id(), "^min7");
    assert_eq!(chord(&["m3", "D5", "D7"]).id(), "^dim7");
    assert_eq!(chord(&["m3", "D5", "m7"]).id(), "^min7b5");
    assert_eq!(chord(&["M3", "A5"]).id(), "^aug");
    assert_eq!(chord(&["P4", "P5"]).id(), "^sus4");
    assert_eq!(chord(&["P4", "P5", "m7"]).id(), "^sus47");
    assert_eq!(chord(&["M3", "P5", "M6"]).id(), "^add6");
    assert_eq!(chord(&["M3", "P5", "m7", "m9"]).id(), "^7b9");
    assert_eq!(chord(&["M3", "P5", "m7", "M9", "A11"]).id(), "^9#11");
    assert_eq!(chord(&["m3", "P5", "M7"]).id(), "^min♮7");
    assert_eq!(chord(&["M3"]).id(), "^3");
}

#[test]
fn test_encode_altered_fifth_lifts_main() {
    assert_eq!(chord(&["D5"]).id(), "^b5");
    assert_eq!(chord(&["M3", "D5"]).id(), "^b5");
}

#[test]
fn test_encode_duplicate_degrees_are_additions() {
    assert_eq!(chord(&["M3", "P5", "m7", "m9", "A9"]).id(), "^7addb9add#9");
    assert_eq!(chord(&["M3", "P5", "m7", "M7"]).id(), "^maj7addb7");
    assert_eq!(chord(&["m3", "M3", "P5"]).id(), "^minadd3");
}

#[test]
fn test_rooted_id() {
    assert_eq!(rooted("C4", &["m3", "P5", "m7"]).id(), "C^min7");
    assert_eq!(rooted("Eb3", &["M3", "P5", "M7"]).id(), "Eb^maj7");
    assert_eq!(rooted("F#4", &["M3", "P5"]).id(), "F#^");
}

#[test]
fn test_decode_bare() {
    let cases = [
        ("^", vec!["M3", "P5"]),
        ("^min7", vec!["m3", "P5", "m7"]),
        ("^dom7", vec!["M3", "P5", "m7"]),
        ("^dim", vec!["m3", "D5"]),
        ("^sus4", vec!["P4", "P5"]),
        ("^aug7", vec!["M3", "A5", "m7"]),
        ("^7#9", vec!["M3", "P5", "m7", "A9"]),
        ("^add9", vec!["M3", "P5", "M9"]),
        ("^minaddb6", vec!["m3", "P5", "m6"]),
        ("^min9b5", vec!["m3", "D5", "m7", "M9"]),
        ("^3", vec!["M3"]),
        ("^1", vec![]),
    ];
    for (id, expected) in cases {
        let parsed = parse_chord_id(id).unwrap();
        assert_eq!(parsed.root(), None, "{}", id);
        assert_eq!(interval_names(parsed.chord()), expected, "{}", id);
    }
}

#[test]
fn test_decode_rooted() {
    let parsed = parse_chord_id("Eb^maj7").unwrap();
    assert_eq!(parsed.root(), Some(note("Eb4")));
    let ParsedChord::Rooted(chord) = parsed else {
        panic!("expected a rooted chord");
    };
    let notes: Vec<String> = chord.notes().iter().map(|n| n.to_string()).collect();
    assert_eq!(notes, vec!["Eb4", "G4", "Bb4", "D5"]);

    assert_eq!(parse_chord_id("F##^min").unwrap().root(), Some(note("F##4")));
    assert_eq!(parse_chord_id("  C^7 ").unwrap().id(), "C^7");
}

#[test]
fn test_decode_errors() {
    assert_eq!(malformed_at("Cmin7"), (2, "expected '^'".to_string()));
    assert_eq!(malformed_at(""), (1, "empty chord ID".to_string()));
    assert_eq!(malformed_at("H^7"), (1, "expected a root letter A-G or '^'".to_string()));
    assert_eq!(malformed_at("C#b^"), (3, "expected '^'".to_string()));
    assert_eq!(
        malformed_at("^6"),
        (2, "main degree 6 is not one of 1, 3, 5, 7, 9, 11, 13".to_string())
    );
    assert_eq!(malformed_at("^7x"), (3, "expected an alteration or an addition".to_string()));
    assert_eq!(malformed_at("^sus3"), (2, "expected sus2 or sus4".to_string()));
    assert_eq!(malformed_at("^add"), (5, "expected a degree".to_string()));
    assert_eq!(malformed_at("^♮"), (3, "expected a degree".to_string()));
    assert_eq!(malformed_at("^#b5"), (3, "expected a degree".to_string()));

    assert_eq!(parse_chord_id("^0"), Err(TheoryError::InvalidDegree(0)));
    assert_eq!(parse_chord_id("^add0"), Err(TheoryError::InvalidDegree(0)));
    assert_eq!(parse_chord_id("^add51"), Err(TheoryError::InvalidDegree(51)));
    assert_eq!(parse_chord_id("^#51"), Err(TheoryError::InvalidDegree(51)));
    assert_eq!(
        parse_chord_id("^add2147483647"),
        Err(TheoryError::InvalidDegree(i32::MAX))
    );
    assert_eq!(
        parse_chord_id("^♮2147483647"),
        Err(TheoryError::InvalidDegree(i32::MAX))
    );
    assert_eq!(
        malformed_at("^add2147483648"),
        (5, "degree 2147483648 is out of range".to_string())
    );
    assert_eq!(parse_chord_id("C^add50").unwrap().id(), "C^add50");
}

#[test]
fn test_round_trip_over_grammar_family() {
    let prefixes = ["", "aug", "sus2", "sus4", "augsus4"];
    let qualities = ["", "dom", "maj", "min", "dim"];
    let mains = ["", "1", "3", "7", "9", "11", "13"];
    let tails = [
        "", "b5", "#5", "#9", "b9#11", "add9", "addb6", "♮7", "add2add4", "b13add#11",
    ];

    let mut checked = 0;
    for prefix in prefixes {
        for quality in qualities {
            for main in mains {
                for tail in tails {
                    let text = format!("^{}{}{}{}", prefix, quality, main, tail);
                    let encoded = parse_chord_id(&text).unwrap().id();
                    let again = parse_chord_id(&encoded).unwrap().id();
                    assert_eq!(again, encoded, "from {}", text);
                    checked += 1;
                }
            }
        }
    }
    assert_eq!(checked, 5 * 5 * 7 * 10);
}

#[test]
fn test_round_trip_from_constructed_chords() {
    // One choice per group; each choice is zero or more interval names
    let groups: [&[&str]; 7] = [
        &["", "m3", "M3"],
        &["", "D5", "P5", "A5"],
        &["", "D7", "m7", "M7"],
        &["", "M2", "P4", "M2 P4"],
        &["", "m9", "M9", "A9", "M9 A9"],
        &["", "P11", "A11"],
        &["", "M6", "m13", "M13"],
    ];
    let total: usize = groups.iter().map(|group| group.len()).product();

    for combination in 0..total {
        let mut index = combination;
        let mut names = Vec::new();
        for group in groups {
            names.extend(group[index % group.len()].split_whitespace());
            index /= group.len();
        }

        let built = chord(&names);
        let encoded = built.id();
        let decoded = parse_chord_id(&encoded).unwrap();
        assert_eq!(decoded.id(), encoded, "from {:?}", names);

        let rooted = RootedChord::new(note("Eb4"), built);
        let encoded = rooted.id();
        assert_eq!(parse_chord_id(&encoded).unwrap().id(), encoded);
    }
    assert_eq!(total, 3 * 4 * 4 * 4 * 5 * 3 * 4);
}

#[test]
fn test_round_trip_keeps_root() {
    for text in ["C^min7", "Bb^9#11", "F#^sus4", "Ab^dim7", "Db^augmaj7"] {
        let encoded = parse_chord_id(text).unwrap().id();
        assert_eq!(encoded, text);
    }
}

#[test]
fn test_notes_from_base() {
    let notes: Vec<String> = chord(&["M3", "P5"])
        .notes(note("C4"))
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(notes, vec!["C4", "E4", "G4"]);
}

#[test]
fn test_inversions() {
    let triad = chord(&["M3", "P5"]);
    let inversions = triad.inversions();
    assert_eq!(inversions.len(), 2);
    assert_eq!(interval_names(&inversions[0]), vec!["m3", "m6"]);
    assert_eq!(interval_names(&inversions[1]), vec!["P4", "M6"]);

    let seventh = chord(&["M3", "P5", "m7"]);
    let inversions = seventh.inversions();
    assert_eq!(inversions.len(), 3);
    assert_eq!(interval_names(&inversions[0]), vec!["m3", "D5", "m6"]);
    assert_eq!(interval_names(&inversions[1]), vec!["m3", "P4", "M6"]);
    assert_eq!(interval_names(&inversions[2]), vec!["M2", "A4", "M6"]);

    assert!(Chord::default().inversions().is_empty());
}

#[test]
fn test_rooted_inversions_follow_the_bass() {
    let inversions = rooted("C4", &["M3", "P5"]).inversions();
    let bases: Vec<String> = inversions.iter().map(|c| c.base().to_string()).collect();
    assert_eq!(bases, vec!["E4", "G4"]);

    let notes: Vec<String> = inversions[1].notes().iter().map(|n| n.to_string()).collect();
    assert_eq!(notes, vec!["G4", "C5", "E5"]);
}

#[test]
fn test_transpositions() {
    let c_major = rooted("C4", &["M3", "P5"]);
    let natural = c_major.transpositions();
    assert_eq!(natural.len(), 12);
    assert_eq!(
        ids(&natural),
        vec!["C^", "C#^", "D^", "D#^", "E^", "F^", "F#^", "G^", "G#^", "A^", "A#^", "B^"]
    );
    assert!(natural.iter().all(|c| c.base().octave() == 4));
    assert!(natural.iter().all(|c| c.chord() == c_major.chord()));

    let flat = c_major.transpositions_with(Favor::Flat);
    assert_eq!(
        ids(&flat),
        vec!["C^", "Db^", "D^", "Eb^", "E^", "F^", "Gb^", "G^", "Ab^", "A^", "Bb^", "B^"]
    );
}

#[test]
fn test_subchords() {
    let subchords = rooted("C4", &["M3", "P5"]).subchords();
    let keys: Vec<i32> = subchords.keys().copied().collect();
    assert_eq!(keys, vec![3, 5]);
    assert_eq!(ids(&subchords[&3]), vec!["C^3", "E^min3"]);
    assert_eq!(ids(&subchords[&5]), vec!["C^"]);
}

#[test]
fn test_subchords_of_a_seventh() {
    let subchords = rooted("G3", &["M3", "P5", "m7"]).subchords();
    assert_eq!(ids(&subchords[&3]), vec!["G^3", "B^min3", "D^min3"]);
    assert_eq!(ids(&subchords[&5]), vec!["G^", "B^minb5"]);
    assert_eq!(ids(&subchords[&7]), vec!["G^7"]);
}

#[test]
fn test_subchords_with_crossed_spellings() {
    // C#4 sounds above Dbb4 but sits a letter below it
    let crossed = rooted("C4", &["A1", "D2", "M3", "P5"]);
    let subchords = crossed.subchords();
    let keys: Vec<i32> = subchords.keys().copied().collect();
    assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    assert_eq!(ids(&subchords[&1]), vec!["C^#1"]);

    for chord in subchords.values().flatten() {
        let id = chord.id();
        assert!(parse_chord_id(&id).is_ok(), "{} should decode", id);
    }
    assert!(crossed
        .intervals_between_notes()
        .values()
        .flatten()
        .all(|interval| interval.number() >= 1));
}

#[test]
fn test_intervals_between_notes() {
    let between = rooted("C4", &["M3", "P5"]).intervals_between_notes();
    let rendered: Vec<(i32, Vec<String>)> = between
        .iter()
        .map(|(k, v)| (*k, v.iter().map(|i| i.to_string()).collect()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            (3, vec!["M3".to_string(), "m3".to_string()]),
            (5, vec!["P5".to_string()]),
        ]
    );
}

#[test]
fn test_extensions() {
    assert_eq!(
        ids(&rooted("C4", &["M3", "P5"]).extensions()),
        vec!["C^7", "C^9", "C^11", "C^13"]
    );
    assert_eq!(
        ids(&rooted("A4", &["m3", "P5", "m7"]).extensions()),
        vec!["A^min9", "A^min11", "A^min13"]
    );
    assert!(rooted("C4", &["M3", "P5", "m7", "M9", "P11", "M13"])
        .extensions()
        .is_empty());
}

#[test]
fn test_simplifications() {
    assert_eq!(
        ids(&rooted("C4", &["M3", "P5", "m7", "M9"]).simplifications()),
        vec!["C^7", "C^", "C^3"]
    );
    // Nothing odd to drop
    assert!(rooted("C4", &["M2", "P4"]).simplifications().is_empty());
    assert!(rooted("C4", &["M3"]).simplifications().is_empty());
}

#[test]
fn test_major_triad_scale_matches() {
    let matches = rooted("C4", &["M3", "P5"]).find_matching_scales();
    assert_eq!(matches.total(), 3);

    let full = matches.labels_at(1.0);
    for label in [
        "C major",
        "F major",
        "G major",
        "A natural minor",
        "E natural minor",
        "C major pentatonic scale",
    ] {
        assert!(full.iter().any(|l| l == label), "missing {}", label);
    }
    assert!(!full.iter().any(|l| l == "D major"));
    assert!(matches.labels_at(2.0 / 3.0).iter().any(|l| l == "D major"));

    let groups = matches.groups();
    assert_eq!(groups[0].0, 1.0);
    let labelled: usize = groups.iter().map(|(_, labels)| labels.len()).sum();
    assert_eq!(labelled, 12 * ScaleKind::ALL.len());
}

#[test]
fn test_scale_matches_restricted_and_spelled() {
    let matches = rooted("C4", &["M3", "P5"])
        .find_matching_scales_in(&[ScaleKind::Major], Favor::Flat);
    let full = matches.labels_at(1.0);
    assert_eq!(full, ["C major", "F major", "G major"]);
    assert!(matches.labels_at(2.0 / 3.0).iter().any(|l| l == "Bb major"));
}

#[test]
fn test_parsed_chord_rooting() {
    let bare = parse_chord_id("^min").unwrap();
    assert_eq!(bare.id(), "^min");
    let rooted = bare.rooted_or(note("D3"));
    assert_eq!(rooted.id(), "D^min");
    assert_eq!(rooted.base(), note("D3"));

    let explicit = parse_chord_id("A^7").unwrap().rooted_or(note("D3"));
    assert_eq!(explicit.base(), note("A4"));
}
