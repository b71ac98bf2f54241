//! # Public API
//!
//! One-call entry points for front ends that work with preset names and note
//! names rather than the underlying types.
//!
//! - [`generate_chords()`] - every chord of the standard table on a preset
//! - [`generate_chords_json()`] - the same, serialized for a renderer
//! - [`import_chords_json()`] - read a previously exported chord file
//! - [`scale_intervals()`] - major scale grid as scale-degree names
//!
//! ## Typical Usage
//!
//! ```rust
//! use copedant::generate_chords;
//!
//! let chords = generate_chords("e9", "E")?;
//! let major = chords.get("M").unwrap();
//! assert!(major.voicings[0].pedals.is_empty());
//! # Ok::<(), copedant::CopedantError>(())
//! ```

use crate::error::Result;
use crate::{
    export_chords, import_chords, to_json, Chord, ChordBook, ChordFormulas, ChordGenerator, Fretboard,
    InstrumentPreset, IntervalGrid, PedalCombination, PitchClass,
};

/// Look up a built-in fretboard by preset name ("e9", "open-e", "guitar-standard").
pub fn preset_fretboard(preset: &str) -> Result<Fretboard> {
    preset.parse::<InstrumentPreset>().map(InstrumentPreset::fretboard)
}

/// Generate voicings for every chord of the standard table.
///
/// # Errors
/// `UnknownPreset` or `InvalidNoteName` for bad arguments.
pub fn generate_chords(preset: &str, key: &str) -> Result<ChordBook> {
    let fretboard = preset_fretboard(preset)?;
    let key = PitchClass::from_name(key)?;
    ChordGenerator::new(&fretboard).generate_chords(&ChordFormulas::standard(), key)
}

/// Generate and serialize every chord of the standard table.
///
/// # Example
/// ```rust
/// use copedant::generate_chords_json;
///
/// let json = generate_chords_json("open-e", "A")?;
/// assert!(json.contains("\"name\": \"M\""));
/// # Ok::<(), copedant::CopedantError>(())
/// ```
pub fn generate_chords_json(preset: &str, key: &str) -> Result<String> {
    let fretboard = preset_fretboard(preset)?;
    let key = PitchClass::from_name(key)?;
    let book = ChordGenerator::new(&fretboard).generate_chords(&ChordFormulas::standard(), key)?;
    to_json(&export_chords(&book, &fretboard)?)
}

/// Import an exported chord file for a preset, interpreting it in `key`.
pub fn import_chords_json(json: &str, preset: &str, key: &str) -> Result<Vec<Chord>> {
    let fretboard = preset_fretboard(preset)?;
    let key = PitchClass::from_name(key)?;
    import_chords(json, key, &fretboard)
}

/// Major scale of `key` between two frets (inclusive) as scale-degree names,
/// optionally with pedals engaged.
///
/// # Example
/// ```rust
/// use copedant::scale_intervals;
///
/// let grid = scale_intervals("open-e", "E", 0, 12, &[])?;
/// assert_eq!(grid[0][0], Some("1"));
/// assert_eq!(grid[0][1], None);
/// # Ok::<(), copedant::CopedantError>(())
/// ```
pub fn scale_intervals(
    preset: &str,
    key: &str,
    start_fret: u8,
    end_fret: u8,
    pedals: &[&str],
) -> Result<IntervalGrid> {
    let fretboard = preset_fretboard(preset)?;
    let key = PitchClass::from_name(key)?;
    let grid = fretboard.major_scale(key, start_fret, end_fret);
    let combination = PedalCombination::from_names(pedals);
    fretboard.to_interval_names(key, &grid, (!combination.is_empty()).then_some(&combination))
}
