//! # Chord Voicing Generator
//!
//! Finds every single-fret voicing of a chord formula on a [`Fretboard`].
//!
//! ## Search
//! For each fret `0..=11` and each legal pedal combination of the
//! fretboard's catalog:
//! 1. compute the key-relative interval of every string
//! 2. skip unless every interval of the formula sounds somewhere
//! 3. play the strings whose interval belongs to the formula, mute the rest
//! 4. skip if an engaged pedal only moves muted strings (the same voicing
//!    without that pedal is found anyway)
//! 5. keep the voicing
//!
//! Several strings may double the same interval. Voicings are returned fret
//! by fret, and within a fret in the catalog's combination order, so the
//! open (no pedal) voicing of a fret always comes before the pedalled ones.
//!
//! ## Example
//! ```rust
//! use copedant::{ChordGenerator, Fretboard, PitchClass};
//!
//! let fretboard = Fretboard::pedal_steel_e9();
//! let generator = ChordGenerator::new(&fretboard);
//! let e = PitchClass::from_name("E")?;
//!
//! let voicings = generator.generate_voicings(&["1", "3", "5"], e)?;
//! assert!(voicings[0].pedals.is_empty());
//! assert_eq!(voicings[0].fret(), Some(0));
//! # Ok::<(), copedant::CopedantError>(())
//! ```

use tracing::{debug, trace};

use crate::chord::{Chord, ChordBook, Voicing};
use crate::error::Result;
use crate::fretboard::Fretboard;
use crate::pedal::PedalCombination;
use crate::pitch::{parse_intervals, Interval, PitchClass};

/// Frets searched: one octave, the pattern repeats above it.
pub const SEARCH_FRETS: std::ops::Range<u8> = 0..12;

/// A named chord type and the scale degrees it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordFormula {
    pub name: String,
    pub intervals: Vec<String>,
}

impl ChordFormula {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, intervals: &[S]) -> Self {
        Self {
            name: name.into(),
            intervals: intervals.iter().map(|i| i.as_ref().to_string()).collect(),
        }
    }
}

/// Ordered table of chord formulas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordFormulas {
    formulas: Vec<ChordFormula>,
}

impl ChordFormulas {
    pub fn new(formulas: Vec<ChordFormula>) -> Self {
        Self { formulas }
    }

    /// Triads, sevenths, sixths and extensions commonly played on E9.
    pub fn standard() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("M", &["1", "3", "5"]),
            ("m", &["1", "b3", "5"]),
            ("m7", &["1", "b3", "5", "b7"]),
            ("M7", &["1", "3", "5", "7"]),
            ("sus2", &["1", "2", "5"]),
            ("sus4", &["1", "4", "5"]),
            ("add9", &["1", "2", "3", "5"]),
            ("madd9", &["1", "2", "b3", "5"]),
            ("7", &["1", "3", "5", "b7"]),
            ("M6", &["1", "3", "5", "6"]),
            ("aug", &["1", "3", "#5"]),
            ("dim", &["1", "b3", "b5"]),
            ("Mb5", &["1", "3", "b5"]),
            ("m7b5", &["1", "b3", "b5", "b7"]),
            ("mb5bb7", &["1", "b3", "b5", "bb7"]),
            ("M6add9", &["1", "2", "3", "5", "6"]),
            ("M7/6", &["1", "3", "5", "7", "6"]),
            ("mm6", &["1", "b3", "5", "b6"]),
            ("mM6", &["1", "b3", "5", "6"]),
            ("M9", &["1", "3", "5", "7", "2"]),
            ("9", &["1", "3", "5", "b7", "9"]),
            ("7b9", &["1", "3", "5", "b7", "b2"]),
            ("7#9", &["1", "3", "5", "b7", "b3"]),
            ("m9", &["1", "b3", "5", "b7", "b2"]),
            ("mM9", &["1", "b3", "5", "b7", "2"]),
            ("b5b13", &["1", "3", "b5", "b6"]),
            ("11", &["1", "3", "5", "7", "2", "4"]),
            ("13", &["1", "3", "5", "7", "2", "4", "6"]),
        ];

        Self::new(
            table
                .iter()
                .map(|(name, intervals)| ChordFormula::new(*name, *intervals))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&ChordFormula> {
        self.formulas.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChordFormula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

/// Voicing search over one fretboard.
pub struct ChordGenerator<'a> {
    fretboard: &'a Fretboard,
    combinations: Vec<PedalCombination>,
}

impl<'a> ChordGenerator<'a> {
    pub fn new(fretboard: &'a Fretboard) -> Self {
        Self {
            fretboard,
            combinations: fretboard.pedals().combinations(),
        }
    }

    pub fn fretboard(&self) -> &Fretboard {
        self.fretboard
    }

    /// Every single-fret voicing of `formula` (interval names) in `key`.
    pub fn generate_voicings<S: AsRef<str>>(&self, formula: &[S], key: PitchClass) -> Result<Vec<Voicing>> {
        let required = parse_intervals(formula)?;
        let mut voicings = Vec::new();

        for fret in SEARCH_FRETS {
            for combination in &self.combinations {
                if let Some(voicing) = self.voicing_at(fret, combination, key, &required)? {
                    voicings.push(voicing);
                }
            }
        }

        Ok(voicings)
    }

    /// Evaluate a single (fret, combination) candidate.
    fn voicing_at(
        &self,
        fret: u8,
        combination: &PedalCombination,
        key: PitchClass,
        required: &[Interval],
    ) -> Result<Option<Voicing>> {
        let intervals = self.fretboard.intervals_at(fret, combination, key)?;

        if let Some(missing) = required.iter().find(|i| !intervals.contains(*i)) {
            trace!(fret, pedals = ?combination.names(), missing = %missing, "incomplete chord");
            return Ok(None);
        }

        let notes: Vec<Option<u8>> = intervals
            .iter()
            .map(|i| required.contains(i).then_some(fret))
            .collect();
        let voicing = Voicing::new(combination.clone(), notes);

        for pedal in self.fretboard.pedals().resolve(combination)? {
            let necessary = pedal.changes.iter().any(|c| voicing.is_played(c.string));
            if !necessary {
                trace!(fret, pedal = %pedal.name, "pedal only moves muted strings");
                return Ok(None);
            }
        }

        Ok(Some(voicing))
    }

    /// Voicings for every formula of `formulas`, keyed by chord type.
    pub fn generate_chords(&self, formulas: &ChordFormulas, key: PitchClass) -> Result<ChordBook> {
        let mut book = ChordBook::new();

        for formula in formulas.iter() {
            let mut chord = Chord::new(key, formula.name.clone());
            chord.voicings = self.generate_voicings(&formula.intervals, key)?;
            debug!(
                chord_type = %formula.name,
                key = %key,
                voicings = chord.voicings.len(),
                combinations = self.combinations.len(),
                "generated voicings"
            );
            book.insert(chord);
        }

        Ok(book)
    }
}
