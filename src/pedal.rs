//! # Pedals, Levers and their Combinations
//!
//! A pedal (or knee lever) raises or lowers a fixed set of strings by a fixed
//! number of semitones while it is engaged. A [`PedalCatalog`] holds every
//! control available on an instrument plus the pairs of controls that must
//! never be engaged together (two variants of the same lever, or levers that
//! pull the same string against each other).
//!
//! ## Combinations
//! [`PedalCatalog::combinations`] enumerates every subset of the catalog with
//! at most [`MAX_ENGAGED`] controls, skipping subsets that contain an
//! exclusion pair. The empty combination ("open", nothing pressed) is always
//! first.
//!
//! ```rust
//! use copedant::{PedalCatalog, PedalCombination};
//!
//! let catalog = PedalCatalog::e9();
//! let combinations = catalog.combinations();
//! assert!(combinations.contains(&PedalCombination::open()));
//! assert!(combinations.contains(&PedalCombination::from_names(&["A", "F"])));
//! assert!(!combinations.contains(&PedalCombination::from_names(&["E", "F"])));
//! ```

use std::hash::{Hash, Hasher};

use crate::error::{CopedantError, Result};

/// Players engage at most this many pedals and levers at once.
pub const MAX_ENGAGED: usize = 3;

/// One string moved by a pedal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedalChange {
    /// String index, 0 being the first entry of the tuning.
    pub string: usize,
    pub semitones: i8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pedal {
    pub name: String,
    pub changes: Vec<PedalChange>,
}

impl Pedal {
    pub fn new(name: impl Into<String>, changes: &[(usize, i8)]) -> Self {
        Self {
            name: name.into(),
            changes: changes
                .iter()
                .map(|&(string, semitones)| PedalChange { string, semitones })
                .collect(),
        }
    }

    /// Total shift this pedal applies to `string` (0 if it leaves it alone).
    pub fn shift_for(&self, string: usize) -> i32 {
        self.changes
            .iter()
            .filter(|c| c.string == string)
            .map(|c| c.semitones as i32)
            .sum()
    }

    pub fn affects(&self, string: usize) -> bool {
        self.changes.iter().any(|c| c.string == string)
    }
}

/// A set of engaged pedal names.
///
/// Equality and hashing ignore the order of the names. Combinations coming
/// from [`PedalCatalog::combinations`] or [`PedalCatalog::normalize`] list
/// their names in catalog order.
#[derive(Debug, Clone, Default)]
pub struct PedalCombination(Vec<String>);

impl PedalCombination {
    /// Nothing engaged.
    pub fn open() -> Self {
        Self(Vec::new())
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self(names.iter().map(|n| n.as_ref().to_string()).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Every pedal engaged here is also engaged in `other`.
    pub fn is_subset_of(&self, other: &PedalCombination) -> bool {
        self.0.iter().all(|n| other.contains(n))
    }

    /// First name listed more than once.
    pub fn duplicate(&self) -> Option<&str> {
        self.0
            .iter()
            .enumerate()
            .find(|(i, n)| self.0[..*i].contains(*n))
            .map(|(_, n)| n.as_str())
    }

    fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PartialEq for PedalCombination {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted() == other.sorted()
    }
}

impl Eq for PedalCombination {}

impl Hash for PedalCombination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

/// All pedals and levers of one instrument, with their exclusion pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PedalCatalog {
    pedals: Vec<Pedal>,
    exclusions: Vec<(String, String)>,
}

impl PedalCatalog {
    pub fn new(pedals: Vec<Pedal>, exclusions: Vec<(String, String)>) -> Result<Self> {
        for (i, pedal) in pedals.iter().enumerate() {
            if pedals[..i].iter().any(|p| p.name == pedal.name) {
                return Err(CopedantError::ConfigError(format!(
                    "Pedal '{}' is defined twice",
                    pedal.name
                )));
            }
        }
        for (a, b) in &exclusions {
            for name in [a, b] {
                if !pedals.iter().any(|p| &p.name == name) {
                    return Err(CopedantError::UnknownPedal(name.clone()));
                }
            }
        }
        Ok(Self { pedals, exclusions })
    }

    /// Catalog for instruments without pedals or levers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard E9 pedal steel copedant: three floor pedals (A, B, C) and
    /// knee levers (E, F, G, D and the half-stops A/2 and D/2).
    pub fn e9() -> Self {
        let pedals = vec![
            Pedal::new("A", &[(0, 2), (5, 2)]),
            Pedal::new("A/2", &[(0, 1), (5, 1)]),
            Pedal::new("B", &[(4, 1), (7, 1)]),
            Pedal::new("C", &[(5, 2), (6, 2)]),
            Pedal::new("E", &[(2, -1), (6, -1)]),
            Pedal::new("F", &[(2, 1), (6, 1)]),
            Pedal::new("G", &[(3, 1), (9, 1)]),
            Pedal::new("D", &[(1, -1), (8, -2)]),
            Pedal::new("D/2", &[(8, -1)]),
        ];
        let exclusions = [
            ("A", "A/2"),
            ("D", "D/2"),
            ("A", "C"),
            ("A/2", "C"),
            ("E", "F"),
            ("D", "G"),
            ("D/2", "G"),
        ]
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();

        Self { pedals, exclusions }
    }

    pub fn pedals(&self) -> &[Pedal] {
        &self.pedals
    }

    pub fn exclusions(&self) -> &[(String, String)] {
        &self.exclusions
    }

    pub fn is_empty(&self) -> bool {
        self.pedals.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&Pedal> {
        self.pedals
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CopedantError::UnknownPedal(name.to_string()))
    }

    /// Resolve every name of a combination against this catalog.
    ///
    /// Fails on unknown names, on a name engaged twice and on combinations
    /// holding an exclusion pair.
    pub fn resolve(&self, combination: &PedalCombination) -> Result<Vec<&Pedal>> {
        let pedals = combination
            .names()
            .iter()
            .map(|n| self.get(n))
            .collect::<Result<Vec<_>>>()?;

        if let Some(name) = combination.duplicate() {
            return Err(CopedantError::InvalidPedalCombination(format!(
                "'{}' is engaged twice",
                name
            )));
        }
        if let Some((a, b)) = self.excluded_pair(combination) {
            return Err(CopedantError::InvalidPedalCombination(format!(
                "'{}' and '{}' cannot be engaged together",
                a, b
            )));
        }

        Ok(pedals)
    }

    /// Validate `combination` and list its names in catalog order.
    pub fn normalize(&self, combination: &PedalCombination) -> Result<PedalCombination> {
        self.resolve(combination)?;
        Ok(PedalCombination(
            self.pedals
                .iter()
                .filter(|p| combination.contains(&p.name))
                .map(|p| p.name.clone())
                .collect(),
        ))
    }

    /// Sum of the shifts every engaged pedal applies to `string`.
    pub fn shift_for_string(&self, combination: &PedalCombination, string: usize) -> Result<i32> {
        let pedals = self.resolve(combination)?;
        Ok(pedals.iter().map(|p| p.shift_for(string)).sum())
    }

    /// Neither member of any exclusion pair co-occurs in `combination`.
    pub fn is_allowed(&self, combination: &PedalCombination) -> bool {
        self.excluded_pair(combination).is_none()
    }

    fn excluded_pair(&self, combination: &PedalCombination) -> Option<&(String, String)> {
        self.exclusions
            .iter()
            .find(|(a, b)| combination.contains(a) && combination.contains(b))
    }

    /// Every legal combination of up to [`MAX_ENGAGED`] pedals, smallest first.
    pub fn combinations(&self) -> Vec<PedalCombination> {
        let names: Vec<&str> = self.pedals.iter().map(|p| p.name.as_str()).collect();
        let mut combinations = vec![PedalCombination::open()];

        for size in 1..=MAX_ENGAGED.min(names.len()) {
            let mut chosen = Vec::with_capacity(size);
            collect_subsets(&names, size, 0, &mut chosen, &mut combinations);
        }

        combinations.retain(|c| self.is_allowed(c));
        combinations
    }
}

/// Push every `size`-element subset of `names[start..]` extending `chosen`,
/// preserving the order of `names`.
fn collect_subsets<'a>(
    names: &[&'a str],
    size: usize,
    start: usize,
    chosen: &mut Vec<&'a str>,
    out: &mut Vec<PedalCombination>,
) {
    if chosen.len() == size {
        out.push(PedalCombination::from_names(chosen.as_slice()));
        return;
    }
    for i in start..names.len() {
        chosen.push(names[i]);
        collect_subsets(names, size, i + 1, chosen, out);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn combo(names: &[&str]) -> PedalCombination {
        PedalCombination::from_names(names)
    }

    #[test]
    fn test_e9_combinations_membership() {
        let all = PedalCatalog::e9().combinations();
        assert!(all.contains(&PedalCombination::open()));
        assert!(all.contains(&combo(&["A"])));
        assert!(all.contains(&combo(&["B"])));
        assert!(all.contains(&combo(&["A", "B"])));
        assert!(all.contains(&combo(&["B", "C"])));
        assert!(all.contains(&combo(&["E"])));
        assert!(all.contains(&combo(&["F"])));
        assert!(all.contains(&combo(&["A", "F"])));
        assert!(!all.contains(&combo(&["A", "B", "C"])));
        assert!(!all.contains(&combo(&["D", "G"])));
        assert!(!all.contains(&combo(&["E", "F"])));
        assert!(!all.contains(&combo(&["A", "A/2"])));
        assert!(!all.contains(&combo(&["D", "D/2"])));
    }

    #[test]
    fn test_open_combination_comes_first() {
        let all = PedalCatalog::e9().combinations();
        assert_eq!(all[0], PedalCombination::open());
        assert_eq!(PedalCatalog::empty().combinations(), vec![PedalCombination::open()]);
    }

    #[test]
    fn test_no_combination_holds_an_exclusion_pair() {
        let catalog = PedalCatalog::e9();
        for c in catalog.combinations() {
            assert!(c.len() <= MAX_ENGAGED);
            for (a, b) in catalog.exclusions() {
                assert!(!(c.contains(a) && c.contains(b)), "{:?} holds {} and {}", c, a, b);
            }
        }
    }

    #[test]
    fn test_combination_count_and_uniqueness() {
        let all = PedalCatalog::e9().combinations();
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), all.len());

        // Pairs: 7 of 36 excluded. Triples: 7 per exclusion pair, but
        // {A, A/2, C} and {D, D/2, G} each hold three pairs, so 49 - 4 = 45
        // of 84 are excluded.
        assert_eq!(all.len(), 1 + 9 + (36 - 7) + (84 - 45));
    }

    #[test]
    fn test_combinations_are_deterministic() {
        let catalog = PedalCatalog::e9();
        assert_eq!(catalog.combinations(), catalog.combinations());
    }

    #[test]
    fn test_shift_for_string_sums_pedals() {
        let catalog = PedalCatalog::e9();
        // C raises string 6 a whole step, the E lever lowers it a half
        let both = combo(&["B", "C", "E"]);
        assert_eq!(catalog.shift_for_string(&both, 6).unwrap(), 1);
        assert_eq!(catalog.shift_for_string(&both, 5).unwrap(), 2);
        assert_eq!(catalog.shift_for_string(&combo(&["D"]), 8).unwrap(), -2);
        assert_eq!(catalog.shift_for_string(&combo(&["D"]), 0).unwrap(), 0);
        assert_eq!(catalog.shift_for_string(&PedalCombination::open(), 2).unwrap(), 0);
    }

    #[test]
    fn test_unknown_pedal() {
        let catalog = PedalCatalog::e9();
        assert_eq!(
            catalog.get("Z").unwrap_err(),
            CopedantError::UnknownPedal("Z".to_string())
        );
        assert!(catalog.shift_for_string(&combo(&["A", "Z"]), 0).is_err());
    }

    #[test]
    fn test_catalog_rejects_bad_definitions() {
        let pedals = vec![Pedal::new("A", &[(0, 2)]), Pedal::new("A", &[(1, 2)])];
        assert!(matches!(
            PedalCatalog::new(pedals, vec![]),
            Err(CopedantError::ConfigError(_))
        ));

        let pedals = vec![Pedal::new("A", &[(0, 2)])];
        assert_eq!(
            PedalCatalog::new(pedals, vec![("A".to_string(), "Q".to_string())]),
            Err(CopedantError::UnknownPedal("Q".to_string()))
        );
    }

    #[test]
    fn test_combination_equality_ignores_order() {
        assert_eq!(combo(&["A", "F"]), combo(&["F", "A"]));
        assert_ne!(combo(&["A", "F"]), combo(&["A"]));
        assert_ne!(combo(&["A", "A"]), combo(&["A"]));

        let set: HashSet<_> = [combo(&["A", "F"]), combo(&["F", "A"])].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(PedalCatalog::e9().combinations().contains(&combo(&["G", "B", "A"])));
    }

    #[test]
    fn test_resolve_rejects_repeated_and_excluded_pedals() {
        let catalog = PedalCatalog::e9();
        assert!(matches!(
            catalog.resolve(&combo(&["A", "A"])),
            Err(CopedantError::InvalidPedalCombination(_))
        ));
        assert!(matches!(
            catalog.resolve(&combo(&["E", "F"])),
            Err(CopedantError::InvalidPedalCombination(_))
        ));
        assert!(matches!(
            catalog.shift_for_string(&combo(&["A", "A"]), 0),
            Err(CopedantError::InvalidPedalCombination(_))
        ));
        assert_eq!(catalog.resolve(&combo(&["F", "A"])).unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_uses_catalog_order() {
        let catalog = PedalCatalog::e9();
        let normalized = catalog.normalize(&combo(&["D/2", "F", "A"])).unwrap();
        assert_eq!(normalized.names(), ["A", "F", "D/2"]);
        assert_eq!(
            catalog.normalize(&combo(&["F", "Q"])),
            Err(CopedantError::UnknownPedal("Q".to_string()))
        );
        assert!(catalog.normalize(&combo(&["D", "G"])).is_err());
    }
}
