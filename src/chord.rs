//! # Chords and Voicings
//!
//! Result types of the voicing search.
//!
//! ```text
//! ChordBook (ordered by the formula table)
//!   └── Chord
//!         ├── key: PitchClass
//!         ├── chord_type: "M", "m7", "7#9", ...
//!         └── Vec<Voicing>
//!               ├── pedals: PedalCombination
//!               └── notes: Vec<Option<u8>>   (fret per string, None = muted)
//! ```
//!
//! All played strings of a voicing share one fret: the bar sits straight
//! across the strings and the pedals do the rest.
//!
//! ## Redundancy
//! [`Voicing::is_subsumed_by`] and [`prune_redundant`] let callers drop
//! voicings that another voicing of the same list already covers. The
//! generator never applies them on its own.

use crate::error::{CopedantError, Result};
use crate::fretboard::Fretboard;
use crate::pedal::PedalCombination;
use crate::pitch::{Interval, PitchClass};

/// One way to play a chord: a fret or `None` per string, plus engaged pedals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Voicing {
    pub pedals: PedalCombination,
    pub notes: Vec<Option<u8>>,
}

impl Voicing {
    pub fn new(pedals: PedalCombination, notes: Vec<Option<u8>>) -> Self {
        Self { pedals, notes }
    }

    pub fn is_played(&self, string: usize) -> bool {
        matches!(self.notes.get(string), Some(Some(_)))
    }

    /// The fret the bar sits on, `None` if every string is muted.
    pub fn fret(&self) -> Option<u8> {
        self.notes.iter().flatten().next().copied()
    }

    pub fn played_strings(&self) -> impl Iterator<Item = usize> + '_ {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| i)
    }

    /// Fails unless there is exactly one note per string of `fretboard`.
    pub fn check_tuning(&self, fretboard: &Fretboard) -> Result<()> {
        if self.notes.len() != fretboard.string_count() {
            return Err(CopedantError::VoicingTuningMismatch {
                expected: fretboard.string_count(),
                found: self.notes.len(),
            });
        }
        Ok(())
    }

    /// Key-relative interval sounded by every string, pedal shifts included.
    pub fn intervals(&self, fretboard: &Fretboard, key: PitchClass) -> Result<Vec<Option<Interval>>> {
        self.check_tuning(fretboard)?;
        let pedals = fretboard.pedals().resolve(&self.pedals)?;

        Ok(self
            .notes
            .iter()
            .zip(fretboard.tuning())
            .enumerate()
            .map(|(string, (note, open))| {
                note.map(|fret| {
                    let shift: i32 = pedals.iter().map(|p| p.shift_for(string)).sum();
                    Interval::between(open.transpose(fret as i32 + shift), key)
                })
            })
            .collect())
    }

    /// `other` engages every pedal of `self` and plays every string `self`
    /// plays, at the same fret.
    pub fn is_subsumed_by(&self, other: &Voicing) -> bool {
        self.pedals.is_subset_of(&other.pedals)
            && self
                .notes
                .iter()
                .enumerate()
                .all(|(string, note)| note.is_none() || other.notes.get(string) == Some(note))
    }

    /// Some other voicing of `voicings` subsumes this one.
    pub fn is_redundant_in(&self, voicings: &[Voicing]) -> bool {
        voicings.iter().any(|v| v != self && self.is_subsumed_by(v))
    }
}

/// Drop exact duplicates and every voicing subsumed by another one of the
/// list. Order of the survivors is preserved.
pub fn prune_redundant(voicings: Vec<Voicing>) -> Vec<Voicing> {
    let mut unique: Vec<Voicing> = Vec::with_capacity(voicings.len());
    for voicing in voicings {
        if !unique.contains(&voicing) {
            unique.push(voicing);
        }
    }

    let keep: Vec<bool> = unique.iter().map(|v| !v.is_redundant_in(&unique)).collect();
    unique
        .into_iter()
        .zip(keep)
        .filter_map(|(v, keep)| keep.then_some(v))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub key: PitchClass,
    pub chord_type: String,
    pub voicings: Vec<Voicing>,
}

impl Chord {
    pub fn new(key: PitchClass, chord_type: impl Into<String>) -> Self {
        Self {
            key,
            chord_type: chord_type.into(),
            voicings: Vec::new(),
        }
    }
}

/// Chords keyed by type, in the order of the formula table they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChordBook {
    chords: Vec<Chord>,
}

impl ChordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chord, replacing any chord of the same type in place.
    pub fn insert(&mut self, chord: Chord) {
        match self.chords.iter_mut().find(|c| c.chord_type == chord.chord_type) {
            Some(existing) => *existing = chord,
            None => self.chords.push(chord),
        }
    }

    pub fn get(&self, chord_type: &str) -> Option<&Chord> {
        self.chords.iter().find(|c| c.chord_type == chord_type)
    }

    pub fn contains(&self, chord_type: &str) -> bool {
        self.get(chord_type).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chord> {
        self.chords.iter()
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn into_chords(self) -> Vec<Chord> {
        self.chords
    }
}

impl<'a> IntoIterator for &'a ChordBook {
    type Item = &'a Chord;
    type IntoIter = std::slice::Iter<'a, Chord>;

    fn into_iter(self) -> Self::IntoIter {
        self.chords.iter()
    }
}

impl FromIterator<Chord> for ChordBook {
    fn from_iter<I: IntoIterator<Item = Chord>>(iter: I) -> Self {
        let mut book = ChordBook::new();
        for chord in iter {
            book.insert(chord);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voicing(pedals: &[&str], notes: &[Option<u8>]) -> Voicing {
        Voicing::new(PedalCombination::from_names(pedals), notes.to_vec())
    }

    const X: Option<u8> = None;

    #[test]
    fn test_played_strings_and_fret() {
        let v = voicing(&["A"], &[Some(3), X, Some(3), X]);
        assert_eq!(v.played_strings().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(v.fret(), Some(3));
        assert!(v.is_played(0));
        assert!(!v.is_played(1));
        assert!(!v.is_played(10));
        assert_eq!(voicing(&[], &[X, X]).fret(), None);
    }

    #[test]
    fn test_intervals_follow_pedal_shifts() {
        let fretboard = Fretboard::pedal_steel_e9();
        let e = PitchClass::from_name("E").unwrap();
        let x = None;
        let v = voicing(
            &["A", "F"],
            &[Some(3), x, Some(3), x, Some(3), Some(3), Some(3), Some(3), x, x],
        );
        let names: Vec<&str> = v
            .intervals(&fretboard, e)
            .unwrap()
            .iter()
            .map(|i| i.map_or("x", |i| i.name()))
            .collect();
        assert_eq!(names, vec!["1", "x", "3", "x", "5", "1", "3", "5", "x", "x"]);
    }

    #[test]
    fn test_intervals_reject_wrong_string_count() {
        let fretboard = Fretboard::pedal_steel_e9();
        let e = PitchClass::from_name("E").unwrap();
        let v = voicing(&[], &[Some(0); 6]);
        assert_eq!(
            v.intervals(&fretboard, e),
            Err(CopedantError::VoicingTuningMismatch { expected: 10, found: 6 })
        );
    }

    #[test]
    fn test_subsumption() {
        let small = voicing(&["A"], &[Some(3), X, X]);
        let big = voicing(&["A", "F"], &[Some(3), Some(3), X]);
        assert!(small.is_subsumed_by(&big));
        assert!(!big.is_subsumed_by(&small));

        // different fret on a shared string
        let other_fret = voicing(&["A", "F"], &[Some(5), Some(5), X]);
        assert!(!small.is_subsumed_by(&other_fret));

        // missing pedal
        let no_pedal = voicing(&[], &[Some(3), Some(3), Some(3)]);
        assert!(!small.is_subsumed_by(&no_pedal));
        assert!(small.is_subsumed_by(&small));
    }

    #[test]
    fn test_redundancy_ignores_the_voicing_itself() {
        let small = voicing(&["A"], &[Some(3), X, X]);
        let big = voicing(&["A", "F"], &[Some(3), Some(3), X]);
        assert!(!small.is_redundant_in(&[small.clone()]));
        assert!(small.is_redundant_in(&[small.clone(), big.clone()]));
        assert!(!big.is_redundant_in(&[small, big.clone()]));
    }

    #[test]
    fn test_prune_redundant() {
        let small = voicing(&["A"], &[Some(3), X, X]);
        let big = voicing(&["A", "F"], &[Some(3), Some(3), X]);
        let unrelated = voicing(&[], &[X, X, Some(7)]);
        let pruned = prune_redundant(vec![
            small.clone(),
            unrelated.clone(),
            big.clone(),
            unrelated.clone(),
        ]);
        assert_eq!(pruned, vec![unrelated, big]);
    }

    #[test]
    fn test_chord_book_keeps_insertion_order() {
        let e = PitchClass::from_name("E").unwrap();
        let mut book: ChordBook = ["M", "m", "7"].iter().map(|t| Chord::new(e, *t)).collect();
        assert_eq!(book.len(), 3);

        let mut replacement = Chord::new(e, "m");
        replacement.voicings.push(voicing(&[], &[Some(0)]));
        book.insert(replacement);

        let types: Vec<&str> = book.iter().map(|c| c.chord_type.as_str()).collect();
        assert_eq!(types, vec!["M", "m", "7"]);
        assert_eq!(book.get("m").map(|c| c.voicings.len()), Some(1));
        assert!(!book.contains("dim"));
    }

    #[test]
    fn test_prune_keeps_one_of_reordered_pedals() {
        let notes = [Some(3), X, Some(3), X, Some(3), Some(3), Some(3), Some(3), X, X];
        let af = voicing(&["A", "F"], &notes);
        let fa = voicing(&["F", "A"], &notes);
        assert_eq!(af, fa);
        assert!(!af.is_redundant_in(&[af.clone(), fa.clone()]));

        let pruned = prune_redundant(vec![af.clone(), fa]);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].pedals.names(), ["A", "F"]);
    }
}
