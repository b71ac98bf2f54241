//! # Chord JSON Export and Import
//!
//! Chords are exchanged with renderers and saved to disk in this shape:
//!
//! ```json
//! {
//!   "chords": [
//!     {
//!       "name": "M",
//!       "voicings": [
//!         {
//!           "pedals": ["A", "F"],
//!           "notes": [3, "x", 3, "x", 3, 3, 3, 3, "x", "x"],
//!           "intervals": ["1", "x", "3", "x", "5", "1", "3", "5", "x", "x"]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `"x"` marks a muted string in both `notes` and `intervals`. `intervals`
//! is derived from the notes and the pedals (relative to the chord's key),
//! so import only reads `pedals` and `notes`.

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, Voicing};
use crate::error::{CopedantError, Result};
use crate::fretboard::Fretboard;
use crate::pedal::PedalCombination;
use crate::pitch::PitchClass;

/// Muted-string sentinel in `notes` and `intervals`.
pub const MUTED: &str = "x";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSheet {
    pub chords: Vec<ChordEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordEntry {
    pub name: String,
    pub voicings: Vec<VoicingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicingEntry {
    pub pedals: Vec<String>,
    pub notes: Vec<NoteToken>,
    #[serde(default)]
    pub intervals: Vec<String>,
}

/// A fret number or the muted sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteToken {
    Fret(u8),
    Muted(String),
}

impl NoteToken {
    fn from_note(note: Option<u8>) -> Self {
        match note {
            Some(fret) => NoteToken::Fret(fret),
            None => NoteToken::Muted(MUTED.to_string()),
        }
    }

    fn to_note(&self) -> Result<Option<u8>> {
        match self {
            NoteToken::Fret(fret) => Ok(Some(*fret)),
            NoteToken::Muted(s) if s == MUTED => Ok(None),
            NoteToken::Muted(s) => Err(CopedantError::ImportError(format!(
                "Expected a fret number or \"{}\", found \"{}\"",
                MUTED, s
            ))),
        }
    }
}

fn voicing_entry(voicing: &Voicing, fretboard: &Fretboard, key: PitchClass) -> Result<VoicingEntry> {
    let intervals = voicing
        .intervals(fretboard, key)?
        .into_iter()
        .map(|i| i.map_or(MUTED, |i| i.name()).to_string())
        .collect();

    Ok(VoicingEntry {
        pedals: voicing.pedals.names().to_vec(),
        notes: voicing.notes.iter().map(|n| NoteToken::from_note(*n)).collect(),
        intervals,
    })
}

/// Build the export document for `chords` played on `fretboard`.
pub fn export_chords<'a, I>(chords: I, fretboard: &Fretboard) -> Result<ChordSheet>
where
    I: IntoIterator<Item = &'a Chord>,
{
    let chords = chords
        .into_iter()
        .map(|chord| {
            let voicings = chord
                .voicings
                .iter()
                .map(|v| voicing_entry(v, fretboard, chord.key))
                .collect::<Result<Vec<_>>>()?;
            Ok(ChordEntry {
                name: chord.chord_type.clone(),
                voicings,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChordSheet { chords })
}

pub fn to_json(sheet: &ChordSheet) -> Result<String> {
    serde_json::to_string_pretty(sheet).map_err(|e| CopedantError::ExportError(e.to_string()))
}

/// Rebuild chords in `key` from an exported document.
///
/// Every voicing must have one note per string of `fretboard` and a legal
/// combination of pedals from its catalog. Pedal names are put back in
/// catalog order.
pub fn import_chords(json: &str, key: PitchClass, fretboard: &Fretboard) -> Result<Vec<Chord>> {
    let sheet: ChordSheet =
        serde_json::from_str(json).map_err(|e| CopedantError::ImportError(e.to_string()))?;
    from_sheet(&sheet, key, fretboard)
}

pub fn from_sheet(sheet: &ChordSheet, key: PitchClass, fretboard: &Fretboard) -> Result<Vec<Chord>> {
    sheet
        .chords
        .iter()
        .map(|entry| {
            let mut chord = Chord::new(key, entry.name.clone());
            for v in &entry.voicings {
                let notes = v.notes.iter().map(NoteToken::to_note).collect::<Result<Vec<_>>>()?;
                let pedals = fretboard
                    .pedals()
                    .normalize(&PedalCombination::from_names(&v.pedals))?;
                let voicing = Voicing::new(pedals, notes);
                voicing.check_tuning(fretboard)?;
                chord.voicings.push(voicing);
            }
            Ok(chord)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ChordFormulas, ChordGenerator};

    fn e() -> PitchClass {
        PitchClass::from_name("E").unwrap()
    }

    #[test]
    fn test_export_shape() {
        let fretboard = Fretboard::pedal_steel_e9();
        let x = None;
        let mut chord = Chord::new(e(), "M");
        chord.voicings.push(Voicing::new(
            PedalCombination::from_names(&["A", "F"]),
            vec![Some(3), x, Some(3), x, Some(3), Some(3), Some(3), Some(3), x, x],
        ));

        let sheet = export_chords([&chord], &fretboard).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&sheet).unwrap()).unwrap();
        let expected = serde_json::json!({
            "chords": [{
                "name": "M",
                "voicings": [{
                    "pedals": ["A", "F"],
                    "notes": [3, "x", 3, "x", 3, 3, 3, 3, "x", "x"],
                    "intervals": ["1", "x", "3", "x", "5", "1", "3", "5", "x", "x"]
                }]
            }]
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn test_round_trip_generated_chords() {
        let fretboard = Fretboard::pedal_steel_e9();
        let book = ChordGenerator::new(&fretboard)
            .generate_chords(&ChordFormulas::standard(), e())
            .unwrap();

        let json = to_json(&export_chords(&book, &fretboard).unwrap()).unwrap();
        let imported = import_chords(&json, e(), &fretboard).unwrap();

        assert_eq!(imported, book.into_chords());
    }

    #[test]
    fn test_import_rejects_bad_sentinel() {
        let fretboard = Fretboard::guitar_open_e();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": [], "notes": [0, 0, "-", 0, 0, 0], "intervals": []}
        ]}]}"#;
        assert!(matches!(
            import_chords(json, e(), &fretboard),
            Err(CopedantError::ImportError(_))
        ));
    }

    #[test]
    fn test_import_rejects_wrong_string_count() {
        let fretboard = Fretboard::pedal_steel_e9();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": [], "notes": [0, 0, 0, 0, 0, 0]}
        ]}]}"#;
        assert_eq!(
            import_chords(json, e(), &fretboard),
            Err(CopedantError::VoicingTuningMismatch { expected: 10, found: 6 })
        );
    }

    #[test]
    fn test_import_rejects_unknown_pedal() {
        let fretboard = Fretboard::guitar_open_e();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": ["A"], "notes": [0, 0, 0, 0, 0, 0]}
        ]}]}"#;
        assert_eq!(
            import_chords(json, e(), &fretboard),
            Err(CopedantError::UnknownPedal("A".to_string()))
        );
    }

    #[test]
    fn test_import_malformed_json() {
        let fretboard = Fretboard::guitar_open_e();
        assert!(matches!(
            import_chords("{\"chords\": 3}", e(), &fretboard),
            Err(CopedantError::ImportError(_))
        ));
    }

    #[test]
    fn test_import_puts_pedals_in_catalog_order() {
        let fretboard = Fretboard::pedal_steel_e9();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": ["F", "A"], "notes": [3, "x", 3, "x", 3, 3, 3, 3, "x", "x"]}
        ]}]}"#;
        let imported = import_chords(json, e(), &fretboard).unwrap();
        let voicing = &imported[0].voicings[0];
        assert_eq!(voicing.pedals.names(), ["A", "F"]);

        let generated = ChordGenerator::new(&fretboard)
            .generate_voicings(&["1", "3", "5"], e())
            .unwrap();
        assert!(generated.contains(voicing));

        let sheet = export_chords(&imported, &fretboard).unwrap();
        assert_eq!(sheet.chords[0].voicings[0].pedals, vec!["A", "F"]);
    }

    #[test]
    fn test_import_rejects_repeated_pedal() {
        let fretboard = Fretboard::pedal_steel_e9();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": ["A", "A"], "notes": [0, "x", "x", "x", "x", "x", "x", "x", "x", "x"]}
        ]}]}"#;
        assert!(matches!(
            import_chords(json, e(), &fretboard),
            Err(CopedantError::InvalidPedalCombination(_))
        ));
    }

    #[test]
    fn test_import_rejects_excluded_pair() {
        let fretboard = Fretboard::pedal_steel_e9();
        let json = r#"{"chords": [{"name": "M", "voicings": [
            {"pedals": ["E", "F"], "notes": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0]}
        ]}]}"#;
        assert!(matches!(
            import_chords(json, e(), &fretboard),
            Err(CopedantError::InvalidPedalCombination(_))
        ));
    }
}
