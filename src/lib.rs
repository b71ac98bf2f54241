pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod export;
pub mod fretboard;
pub mod generator;
pub mod pedal;
pub mod pitch;

pub use api::{generate_chords, generate_chords_json, import_chords_json, preset_fretboard, scale_intervals};
pub use chord::{prune_redundant, Chord, ChordBook, Voicing};
pub use config::InstrumentConfig;
pub use error::*;
pub use export::{export_chords, import_chords, to_json, ChordSheet, MUTED};
pub use fretboard::{Fretboard, InstrumentPreset, IntervalGrid, ScaleGrid};
pub use generator::{ChordFormula, ChordFormulas, ChordGenerator};
pub use pedal::{Pedal, PedalCatalog, PedalChange, PedalCombination};
pub use pitch::{Interval, PitchClass, Spelling};
