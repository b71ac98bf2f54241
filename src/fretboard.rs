//! # Fretboard
//!
//! A [`Fretboard`] is a tuning (one open pitch class per string) plus the
//! catalog of pedals and levers that can be engaged on it. It holds no
//! playing state: the fret and pedal combination are arguments of each query.
//!
//! ## Queries
//! - [`Fretboard::intervals_at`] - key-relative interval of every string at
//!   one fret with a pedal combination engaged (used by the chord search)
//! - [`Fretboard::pitch_grid`] - pitch class of every string at every fret
//! - [`Fretboard::major_scale`] - the same grid with non-scale notes muted
//! - [`Fretboard::to_interval_names`] - convert a pitch grid to scale-degree
//!   names for display
//!
//! ## Example
//! ```rust
//! use copedant::{Fretboard, PedalCombination, PitchClass};
//!
//! let fretboard = Fretboard::pedal_steel_e9();
//! let key = PitchClass::from_name("E")?;
//!
//! // Open strings in E: B D E F# G# B E G# D# F#
//! let open = fretboard.intervals_at(0, &PedalCombination::open(), key)?;
//! let names: Vec<&str> = open.iter().map(|i| i.name()).collect();
//! assert_eq!(names, vec!["5", "b7", "1", "2", "3", "5", "1", "3", "7", "2"]);
//! # Ok::<(), copedant::CopedantError>(())
//! ```

use std::str::FromStr;

use crate::error::{CopedantError, Result};
use crate::pedal::{PedalCatalog, PedalCombination};
use crate::pitch::{note_names, parse_notes, Interval, PitchClass, Spelling};

/// One row per string, one cell per fret; `None` marks a note left out.
pub type ScaleGrid = Vec<Vec<Option<PitchClass>>>;

/// Scale-degree names laid out like a [`ScaleGrid`].
pub type IntervalGrid = Vec<Vec<Option<&'static str>>>;

/// Built-in instrument setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentPreset {
    GuitarStandard,
    GuitarOpenE,
    PedalSteelE9,
}

impl InstrumentPreset {
    pub const ALL: [InstrumentPreset; 3] = [
        InstrumentPreset::GuitarStandard,
        InstrumentPreset::GuitarOpenE,
        InstrumentPreset::PedalSteelE9,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::GuitarStandard => "guitar-standard",
            Self::GuitarOpenE => "open-e",
            Self::PedalSteelE9 => "e9",
        }
    }

    pub fn fretboard(self) -> Fretboard {
        match self {
            Self::GuitarStandard => Fretboard::guitar_standard(),
            Self::GuitarOpenE => Fretboard::guitar_open_e(),
            Self::PedalSteelE9 => Fretboard::pedal_steel_e9(),
        }
    }
}

impl FromStr for InstrumentPreset {
    type Err = CopedantError;

    /// Parse a preset name like "e9", "open-e" or "guitar-standard".
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "guitar-standard" | "guitar" | "standard" => Ok(Self::GuitarStandard),
            "open-e" | "guitar-open-e" => Ok(Self::GuitarOpenE),
            "e9" | "pedal-steel-e9" | "pedal-steel" => Ok(Self::PedalSteelE9),
            _ => Err(CopedantError::UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fretboard {
    tuning: Vec<PitchClass>,
    pedals: PedalCatalog,
}

impl Fretboard {
    /// Pedal string indices must address strings of `tuning`.
    pub fn new(tuning: Vec<PitchClass>, pedals: PedalCatalog) -> Result<Self> {
        for pedal in pedals.pedals() {
            if let Some(change) = pedal.changes.iter().find(|c| c.string >= tuning.len()) {
                return Err(CopedantError::ConfigError(format!(
                    "Pedal '{}' changes string {} but the tuning has {} strings",
                    pedal.name,
                    change.string,
                    tuning.len()
                )));
            }
        }
        Ok(Self { tuning, pedals })
    }

    /// Fretboard without pedals from note names, lowest string first.
    pub fn from_tuning<S: AsRef<str>>(tuning: &[S]) -> Result<Self> {
        Ok(Self {
            tuning: parse_notes(tuning)?,
            pedals: PedalCatalog::empty(),
        })
    }

    pub fn with_pedals(self, pedals: PedalCatalog) -> Result<Self> {
        Self::new(self.tuning, pedals)
    }

    /// E A D G B E
    pub fn guitar_standard() -> Self {
        Self::from_semitones(&[4, 9, 2, 7, 11, 4], PedalCatalog::empty())
    }

    /// E B E G# B E
    pub fn guitar_open_e() -> Self {
        Self::from_semitones(&[4, 11, 4, 8, 11, 4], PedalCatalog::empty())
    }

    /// Ten-string E9 pedal steel with the standard A/B/C pedals and levers:
    /// B D E F# G# B E G# D# F#.
    pub fn pedal_steel_e9() -> Self {
        Self::from_semitones(&[11, 2, 4, 6, 8, 11, 4, 8, 3, 6], PedalCatalog::e9())
    }

    /// Built-in tunings as semitones above C, lowest string first.
    fn from_semitones(semitones: &[i32], pedals: PedalCatalog) -> Self {
        Self {
            tuning: semitones.iter().map(|&s| PitchClass::new(s)).collect(),
            pedals,
        }
    }

    pub fn tuning(&self) -> &[PitchClass] {
        &self.tuning
    }

    pub fn tuning_names(&self, spelling: Spelling) -> Vec<&'static str> {
        note_names(&self.tuning, spelling)
    }

    pub fn pedals(&self) -> &PedalCatalog {
        &self.pedals
    }

    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    /// Key-relative interval of every string at `fret` with `combination`
    /// engaged. Shifts of several pedals on one string add up.
    pub fn intervals_at(
        &self,
        fret: u8,
        combination: &PedalCombination,
        key: PitchClass,
    ) -> Result<Vec<Interval>> {
        let pedals = self.pedals.resolve(combination)?;

        Ok(self
            .tuning
            .iter()
            .enumerate()
            .map(|(string, open)| {
                let shift: i32 = pedals.iter().map(|p| p.shift_for(string)).sum();
                let pitch = open.transpose(fret as i32 + shift);
                Interval::between(pitch, key)
            })
            .collect())
    }

    /// Pitch class of every string for frets `start..=end`.
    pub fn pitch_grid(&self, start: u8, end: u8) -> Vec<Vec<PitchClass>> {
        self.tuning
            .iter()
            .map(|open| (start..=end).map(|fret| open.transpose(fret as i32)).collect())
            .collect()
    }

    /// Pitch grid for frets `start..=end` keeping only notes of the major
    /// scale of `key`.
    pub fn major_scale(&self, key: PitchClass, start: u8, end: u8) -> ScaleGrid {
        self.pitch_grid(start, end)
            .into_iter()
            .map(|string| {
                string
                    .into_iter()
                    .map(|pitch| Interval::between(pitch, key).is_major_scale_degree().then_some(pitch))
                    .collect()
            })
            .collect()
    }

    /// Convert a pitch grid into scale-degree names relative to `key`.
    ///
    /// When `pedals` is given, each row is shifted by the pedals acting on
    /// that string before naming. Muted cells stay muted. Returns a new grid;
    /// `grid` is left untouched.
    pub fn to_interval_names(
        &self,
        key: PitchClass,
        grid: &ScaleGrid,
        pedals: Option<&PedalCombination>,
    ) -> Result<IntervalGrid> {
        grid.iter()
            .enumerate()
            .map(|(string, row)| {
                let shift = match pedals {
                    Some(combination) => self.pedals.shift_for_string(combination, string)?,
                    None => 0,
                };
                Ok(row
                    .iter()
                    .map(|cell| cell.map(|pitch| Interval::between(pitch.transpose(shift), key).name()))
                    .collect())
            })
            .collect()
    }

    /// Major scale of `key` as scale-degree names.
    pub fn major_scale_intervals(&self, key: PitchClass, start: u8, end: u8) -> IntervalGrid {
        let grid = self.major_scale(key, start, end);
        grid.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|pitch| Interval::between(pitch, key).name()))
                    .collect()
            })
            .collect()
    }
}
