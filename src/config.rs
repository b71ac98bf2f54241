//! # Copedant Configuration
//!
//! Instruments beyond the built-in presets are described in YAML:
//!
//! ```yaml
//! name: E9 Pedal Steel
//! tuning: [B, D, E, F#, G#, B, E, G#, D#, F#]
//! pedals:
//!   - name: A
//!     changes: [[0, 2], [5, 2]]
//!   - name: C
//!     changes: [[5, 2], [6, 2]]
//! exclusions:
//!   - [A, C]
//! chord-formulas:
//!   - name: M
//!     intervals: ["1", "3", "5"]
//! ```
//!
//! String indices follow the order of `tuning`. `pedals`, `exclusions` and
//! `chord-formulas` are optional; without `chord-formulas` the standard table
//! is used.
//!
//! ```rust
//! use copedant::InstrumentConfig;
//!
//! let config = InstrumentConfig::from_yaml("tuning: [E, B, E, G#, B, E]")?;
//! assert_eq!(config.fretboard.string_count(), 6);
//! # Ok::<(), copedant::CopedantError>(())
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::error::{CopedantError, Result};
use crate::fretboard::Fretboard;
use crate::generator::{ChordFormula, ChordFormulas};
use crate::pedal::{Pedal, PedalCatalog};
use crate::pitch::{parse_intervals, parse_notes};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawInstrument {
    pub name: Option<String>,
    pub tuning: Vec<String>,
    #[serde(default)]
    pub pedals: Vec<RawPedal>,
    #[serde(default)]
    pub exclusions: Vec<(String, String)>,
    pub chord_formulas: Option<Vec<RawFormula>>,
}

#[derive(Deserialize, Debug)]
pub struct RawPedal {
    pub name: String,
    pub changes: Vec<(usize, i8)>,
}

#[derive(Deserialize, Debug)]
pub struct RawFormula {
    pub name: String,
    pub intervals: Vec<String>,
}

/// A validated instrument: fretboard plus the chord table to search.
#[derive(Debug, Clone)]
pub struct InstrumentConfig {
    pub name: Option<String>,
    pub fretboard: Fretboard,
    pub formulas: ChordFormulas,
}

impl InstrumentConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawInstrument =
            serde_yaml::from_str(content).map_err(|e| CopedantError::ConfigError(e.to_string()))?;
        let config = Self::from_raw(raw)?;
        debug!(
            name = config.name.as_deref().unwrap_or("unnamed"),
            strings = config.fretboard.string_count(),
            pedals = config.fretboard.pedals().pedals().len(),
            formulas = config.formulas.len(),
            "loaded instrument configuration"
        );
        Ok(config)
    }

    fn from_raw(raw: RawInstrument) -> Result<Self> {
        if raw.tuning.is_empty() {
            return Err(CopedantError::ConfigError("tuning must list at least one string".to_string()));
        }
        let tuning = parse_notes(&raw.tuning)?;

        let pedals = raw
            .pedals
            .iter()
            .map(|p| Pedal::new(p.name.as_str(), &p.changes))
            .collect();
        let catalog = PedalCatalog::new(pedals, raw.exclusions)?;
        let fretboard = Fretboard::new(tuning, catalog)?;

        let formulas = match raw.chord_formulas {
            Some(raw_formulas) => {
                let mut formulas = Vec::with_capacity(raw_formulas.len());
                for f in raw_formulas {
                    if f.intervals.is_empty() {
                        return Err(CopedantError::ConfigError(format!(
                            "Chord formula '{}' has no intervals",
                            f.name
                        )));
                    }
                    parse_intervals(&f.intervals)?;
                    formulas.push(ChordFormula::new(f.name, &f.intervals));
                }
                ChordFormulas::new(formulas)
            }
            None => ChordFormulas::standard(),
        };

        Ok(Self {
            name: raw.name,
            fretboard,
            formulas,
        })
    }
}
