use crate::nuclide::Nuclide;
use std::collections::HashMap;
use std::fmt;

/// Immutable table of fusion acceptance probabilities, keyed by an unordered
/// pair of reactants.
///
/// The table is built once from directed entries; every off-diagonal entry is
/// mirrored at construction so lookup order never matters. A pair with no
/// entry has no modeled fusion channel and yields probability 0.
#[derive(Clone, Debug)]
pub struct CrossSections {
    table: HashMap<(Nuclide, Nuclide), f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrossSectionError {
    InvalidProbability {
        n1: Nuclide,
        n2: Nuclide,
        p: f64,
    },
}

impl fmt::Display for CrossSectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossSectionError::InvalidProbability { n1, n2, p } => write!(
                f,
                "cross-section for {n1} + {n2} must be a probability in [0,1], got {p}"
            ),
        }
    }
}

impl std::error::Error for CrossSectionError {}

impl CrossSections {
    /// Build a table from directed entries, mirroring off-diagonal pairs.
    pub fn from_entries(
        entries: &[(Nuclide, Nuclide, f64)],
    ) -> Result<Self, CrossSectionError> {
        let mut table = HashMap::with_capacity(entries.len() * 2);
        for &(n1, n2, p) in entries {
            if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
                return Err(CrossSectionError::InvalidProbability { n1, n2, p });
            }
            table.insert((n1, n2), p);
            if n1 != n2 {
                table.insert((n2, n1), p);
            }
        }
        Ok(Self { table })
    }

    /// Acceptance probability for the unordered pair, 0 for unmodeled pairs.
    pub fn get(&self, n1: Nuclide, n2: Nuclide) -> f64 {
        self.table.get(&(n1, n2)).copied().unwrap_or(0.0)
    }

    /// Number of directed entries, mirrors included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The default channel table: carbon and oxygen burning chains among the
    /// canonical species. Heavier channels are progressively suppressed, and
    /// several feasible heavy pairs (e.g. 24-Mg + 32-S) carry no entry at
    /// all, so those fusions are always rejected.
    pub fn standard() -> Self {
        const C12: Nuclide = Nuclide { a: 12, z: 6 };
        const O16: Nuclide = Nuclide { a: 16, z: 8 };
        const MG24: Nuclide = Nuclide { a: 24, z: 12 };
        const SI28: Nuclide = Nuclide { a: 28, z: 14 };
        const S32: Nuclide = Nuclide { a: 32, z: 16 };
        const AR36: Nuclide = Nuclide { a: 36, z: 18 };
        const CA40: Nuclide = Nuclide { a: 40, z: 20 };
        const TI44: Nuclide = Nuclide { a: 44, z: 22 };

        let entries = [
            // primary burning
            (C12, C12, 1.0),
            (C12, O16, 1.0),
            (O16, O16, 1.0),
            // alpha-chain captures on carbon
            (C12, MG24, 0.8),
            (C12, SI28, 0.8),
            (C12, S32, 0.8),
            (C12, AR36, 0.8),
            (C12, CA40, 0.8),
            (C12, TI44, 0.8),
            // captures on oxygen
            (O16, MG24, 0.6),
            (O16, SI28, 0.6),
            (O16, S32, 0.6),
            (O16, AR36, 0.6),
            (O16, CA40, 0.6),
            // heavy-ion channels
            (MG24, MG24, 0.4),
            (MG24, SI28, 0.4),
        ];
        Self::from_entries(&entries).expect("standard table probabilities are in [0,1]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuclide(a: u32, z: u32) -> Nuclide {
        Nuclide { a, z }
    }

    #[test]
    fn lookup_is_symmetric_for_every_entry() {
        let xs = CrossSections::from_entries(&[
            (nuclide(12, 6), nuclide(16, 8), 0.7),
            (nuclide(12, 6), nuclide(24, 12), 0.3),
        ])
        .unwrap();
        assert_eq!(xs.get(nuclide(12, 6), nuclide(16, 8)), 0.7);
        assert_eq!(xs.get(nuclide(16, 8), nuclide(12, 6)), 0.7);
        assert_eq!(xs.get(nuclide(24, 12), nuclide(12, 6)), 0.3);
    }

    #[test]
    fn standard_table_is_symmetric() {
        let xs = CrossSections::standard();
        let species = crate::nuclide::CANONICAL_SPECIES;
        for &n1 in &species {
            for &n2 in &species {
                assert_eq!(
                    xs.get(n1, n2),
                    xs.get(n2, n1),
                    "asymmetric entry for {n1} + {n2}"
                );
            }
        }
    }

    #[test]
    fn unmodeled_pair_has_zero_probability() {
        let xs = CrossSections::standard();
        // Feasible (24 + 32 = 56) but carrying no channel entry.
        assert_eq!(xs.get(nuclide(24, 12), nuclide(32, 16)), 0.0);
        assert_eq!(xs.get(nuclide(32, 16), nuclide(24, 12)), 0.0);
        // Heavy diagonal, also unmodeled.
        assert_eq!(xs.get(nuclide(28, 14), nuclide(28, 14)), 0.0);
    }

    #[test]
    fn diagonal_entries_are_not_duplicated() {
        let xs = CrossSections::from_entries(&[(nuclide(12, 6), nuclide(12, 6), 1.0)]).unwrap();
        assert_eq!(xs.len(), 1);
    }

    #[test]
    fn from_entries_rejects_probabilities_outside_unit_interval() {
        let err = CrossSections::from_entries(&[(nuclide(12, 6), nuclide(16, 8), 1.5)]);
        assert!(matches!(
            err,
            Err(CrossSectionError::InvalidProbability { .. })
        ));
        let err = CrossSections::from_entries(&[(nuclide(12, 6), nuclide(16, 8), f64::NAN)]);
        assert!(err.is_err());
    }
}
