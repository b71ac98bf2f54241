//! # Pitch Algebra
//!
//! Integer pitch-class arithmetic and the name tables for notes and
//! intervals. Everything here is a pure function.
//!
//! ## Pitch Classes
//! A pitch class is a note modulo the octave: `0 = C`, `1 = C#/Db`, ... `11 = B`.
//! Sharps and flats map to the same class; the name table is enumerated,
//! not derived.
//!
//! ## Intervals
//! An interval is a pitch class expressed relative to a key, written as a
//! scale degree (`"1"`, `"b3"`, `"5"`, `"b7"`, ...). Several names share an
//! offset (`"9"` is `"2"`, `"#5"` is `"5"`, `"bb7"` is `"6"`), so
//! name → offset is many-to-one while offset → name always returns the
//! canonical spelling.
//!
//! ```rust
//! use copedant::{Interval, PitchClass};
//!
//! let key = PitchClass::from_name("E")?;
//! let note = PitchClass::from_name("G#")?;
//! assert_eq!(Interval::between(note, key).name(), "3");
//! assert_eq!(Interval::from_name("9")?, Interval::from_name("2")?);
//! # Ok::<(), copedant::CopedantError>(())
//! ```

use std::fmt;

use crate::error::{CopedantError, Result};

/// Number of pitch classes in an octave.
pub const SEMITONES: i32 = 12;

/// Offsets of the major scale degrees from the tonic.
pub const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Which accidental to use when naming black keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// A note independent of octave, always in `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Reduce any semitone count into a pitch class.
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(SEMITONES) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let value = match name.trim() {
            "C" => 0,
            "C#" | "Db" => 1,
            "D" => 2,
            "D#" | "Eb" => 3,
            "E" => 4,
            "F" => 5,
            "F#" | "Gb" => 6,
            "G" => 7,
            "G#" | "Ab" => 8,
            "A" => 9,
            "A#" | "Bb" => 10,
            "B" => 11,
            _ => return Err(CopedantError::InvalidNoteName(name.to_string())),
        };
        Ok(Self(value))
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        let flats = spelling == Spelling::Flats;
        match self.0 {
            0 => "C",
            1 => if flats { "Db" } else { "C#" },
            2 => "D",
            3 => if flats { "Eb" } else { "D#" },
            4 => "E",
            5 => "F",
            6 => if flats { "Gb" } else { "F#" },
            7 => "G",
            8 => if flats { "Ab" } else { "G#" },
            9 => "A",
            10 => if flats { "Bb" } else { "A#" },
            11 => "B",
            _ => unreachable!(),
        }
    }

    /// Shift by a signed number of semitones, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// All twelve pitch classes starting at C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..SEMITONES).map(PitchClass::new)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharps))
    }
}

/// A key-relative pitch class, named by scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval(u8);

impl Interval {
    /// Interval of `pitch` above `key`.
    pub fn between(pitch: PitchClass, key: PitchClass) -> Self {
        Self(PitchClass::new(pitch.value() as i32 - key.value() as i32).value())
    }

    pub fn from_offset(offset: u8) -> Result<Self> {
        if (offset as i32) < SEMITONES {
            Ok(Self(offset))
        } else {
            Err(CopedantError::InvalidInterval(offset.to_string()))
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        let offset = match name.trim() {
            "1" => 0,
            "b2" => 1,
            "2" | "9" => 2,
            "b3" => 3,
            "3" => 4,
            "4" | "11" => 5,
            "b5" => 6,
            "5" | "#5" => 7,
            "b6" => 8,
            "6" | "bb7" | "13" => 9,
            "b7" => 10,
            "7" => 11,
            _ => return Err(CopedantError::InvalidInterval(name.to_string())),
        };
        Ok(Self(offset))
    }

    pub fn offset(self) -> u8 {
        self.0
    }

    /// Canonical scale-degree name for this offset.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "1",
            1 => "b2",
            2 => "2",
            3 => "b3",
            4 => "3",
            5 => "4",
            6 => "b5",
            7 => "5",
            8 => "b6",
            9 => "6",
            10 => "b7",
            11 => "7",
            _ => unreachable!(),
        }
    }

    /// Shift by a signed number of semitones, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self(PitchClass::new(self.0 as i32 + semitones).value())
    }

    pub fn is_major_scale_degree(self) -> bool {
        MAJOR_SCALE.contains(&self.0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a list of note names, failing on the first unknown one.
pub fn parse_notes<S: AsRef<str>>(names: &[S]) -> Result<Vec<PitchClass>> {
    names.iter().map(|n| PitchClass::from_name(n.as_ref())).collect()
}

pub fn note_names(notes: &[PitchClass], spelling: Spelling) -> Vec<&'static str> {
    notes.iter().map(|n| n.name(spelling)).collect()
}

/// Parse a list of interval names, failing on the first unknown one.
pub fn parse_intervals<S: AsRef<str>>(names: &[S]) -> Result<Vec<Interval>> {
    names.iter().map(|n| Interval::from_name(n.as_ref())).collect()
}
