//! # Error Types
//!
//! All failures in the crate are reported through [`CopedantError`]. Every
//! error is fail-fast: a query either fully succeeds or returns an error
//! before producing any output.
//!
//! ## Error Types
//! - `InvalidNoteName` - unrecognized note token ("H", "E#", ...)
//! - `InvalidInterval` - unrecognized interval token or offset outside 0..=11
//! - `UnknownPedal` - pedal or lever name missing from the fretboard's catalog
//! - `InvalidPedalCombination` - a pedal engaged twice, or an excluded pair
//! - `VoicingTuningMismatch` - a voicing does not have one note per string
//! - `ConfigError` - invalid YAML copedant file
//! - `ImportError` - malformed chord JSON
//! - `ExportError` - chords that could not be serialized
//! - `UnknownPreset` - unknown instrument preset name
//!
//! ## Usage
//! ```rust
//! use copedant::{CopedantError, PitchClass};
//!
//! match PitchClass::from_name("H") {
//!     Ok(pitch) => println!("pitch class {}", pitch.value()),
//!     Err(CopedantError::InvalidNoteName(name)) => eprintln!("no such note: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopedantError {
    /// Unrecognized note name.
    ///
    /// # Example
    /// ```
    /// # use copedant::CopedantError;
    /// let err = CopedantError::InvalidNoteName("H".to_string());
    /// assert_eq!(err.to_string(), "Invalid note name: H");
    /// ```
    #[error("Invalid note name: {0}")]
    InvalidNoteName(String),

    /// Unrecognized interval name, or an offset outside 0..=11.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// A pedal or lever that is not part of the fretboard's catalog.
    #[error("Unknown pedal: {0}")]
    UnknownPedal(String),

    /// A combination naming a pedal twice or holding an exclusion pair.
    ///
    /// # Example
    /// ```
    /// # use copedant::{PedalCatalog, PedalCombination};
    /// let err = PedalCatalog::e9()
    ///     .resolve(&PedalCombination::from_names(&["E", "F"]))
    ///     .unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid pedal combination: 'E' and 'F' cannot be engaged together"
    /// );
    /// ```
    #[error("Invalid pedal combination: {0}")]
    InvalidPedalCombination(String),

    /// A voicing whose note count differs from the tuning's string count.
    ///
    /// # Example
    /// ```
    /// # use copedant::CopedantError;
    /// let err = CopedantError::VoicingTuningMismatch { expected: 10, found: 6 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Voicing has 6 notes but the tuning has 10 strings"
    /// );
    /// ```
    #[error("Voicing has {found} notes but the tuning has {expected} strings")]
    VoicingTuningMismatch { expected: usize, found: usize },

    /// Invalid copedant configuration file.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Chord JSON that does not follow the export format.
    #[error("Invalid chord file: {0}")]
    ImportError(String),

    /// Chords that could not be serialized.
    ///
    /// # Example
    /// ```
    /// # use copedant::CopedantError;
    /// let err = CopedantError::ExportError("key must be a string".to_string());
    /// assert_eq!(err.to_string(), "Could not write chord file: key must be a string");
    /// ```
    #[error("Could not write chord file: {0}")]
    ExportError(String),

    #[error("Unknown instrument preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, CopedantError>;
