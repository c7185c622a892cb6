use crate::nuclide::Nuclide;
use crate::population::Population;
use std::collections::BTreeMap;
use std::fmt;

/// Per-species histogram of a population at one instant.
///
/// Keys are ordered by mass number, so iteration (and the `Display` dump)
/// lists species from light to heavy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    total: usize,
    histo: BTreeMap<Nuclide, usize>,
}

impl Composition {
    pub fn of(population: &Population) -> Self {
        let mut histo = BTreeMap::new();
        for &n in population.iter() {
            *histo.entry(n).or_insert(0) += 1;
        }
        Self {
            total: population.len(),
            histo,
        }
    }

    /// Count of nuclei equal to `species`, 0 if absent.
    pub fn count(&self, species: Nuclide) -> usize {
        self.histo.get(&species).copied().unwrap_or(0)
    }

    /// Number of nuclei in the underlying population.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Mass-weighted abundance per tracked species, in tracked order: each
    /// column is `count(species) * species.a`, 0 for absent species.
    pub fn abundances(&self, species: &[Nuclide]) -> Vec<u64> {
        species
            .iter()
            .map(|&n| self.count(n) as u64 * n.a as u64)
            .collect()
    }

    /// Sum of mass numbers over every species present, tracked or not.
    pub fn total_mass(&self) -> u64 {
        self.histo
            .iter()
            .map(|(n, &count)| n.a as u64 * count as u64)
            .sum()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "composition of {} nuclei:", self.total)?;
        for (n, count) in &self.histo {
            write!(f, "\n{n}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Sampler;

    fn carbon_pool(size: usize) -> Population {
        let mut sampler = Sampler::from_seed(1);
        Population::seed(size, 100, &mut sampler)
    }

    #[test]
    fn counts_distinct_species() {
        let mut pop = carbon_pool(10);
        pop.set(0, Nuclide { a: 24, z: 12 });
        pop.set(1, Nuclide { a: 24, z: 12 });
        let comp = Composition::of(&pop);
        assert_eq!(comp.count(Nuclide { a: 12, z: 6 }), 8);
        assert_eq!(comp.count(Nuclide { a: 24, z: 12 }), 2);
        assert_eq!(comp.count(Nuclide { a: 16, z: 8 }), 0);
        assert_eq!(comp.total(), 10);
    }

    #[test]
    fn abundances_follow_tracked_order_with_zeros_for_absent() {
        let pop = carbon_pool(10);
        let comp = Composition::of(&pop);
        let species = [
            Nuclide { a: 12, z: 6 },
            Nuclide { a: 16, z: 8 },
            Nuclide { a: 56, z: 28 },
        ];
        assert_eq!(comp.abundances(&species), vec![120, 0, 0]);
    }

    #[test]
    fn total_mass_covers_untracked_species() {
        let mut pop = carbon_pool(3);
        // 20-Z10 is not in the canonical list but still carries mass.
        pop.set(0, Nuclide { a: 20, z: 10 });
        let comp = Composition::of(&pop);
        assert_eq!(comp.total_mass(), 20 + 12 + 12);
    }

    #[test]
    fn display_lists_species_light_to_heavy() {
        let mut pop = carbon_pool(3);
        pop.set(0, Nuclide { a: 56, z: 28 });
        let comp = Composition::of(&pop);
        let dump = comp.to_string();
        assert!(dump.starts_with("composition of 3 nuclei:"));
        let c_at = dump.find("12-C").unwrap();
        let ni_at = dump.find("56-Ni").unwrap();
        assert!(c_at < ni_at);
    }
}
