use crate::nuclide::Nuclide;
use crate::rng::Sampler;

/// The mutable multiset of nuclei evolved by one run.
///
/// Created once at engine initialization and shrinking monotonically: an
/// accepted fusion overwrites one slot with the product and removes the other
/// reactant. Order carries no meaning, so removal swaps the last element into
/// the vacated slot instead of shifting.
#[derive(Clone, Debug)]
pub struct Population {
    nuclei: Vec<Nuclide>,
}

const C12: Nuclide = Nuclide { a: 12, z: 6 };
const O16: Nuclide = Nuclide { a: 16, z: 8 };

impl Population {
    /// Seed `pool_size` nuclei from a carbon/oxygen split.
    ///
    /// Each slot draws `v` in 0..100 and becomes carbon when `v <= ratio`.
    /// The inclusive comparison matches the historical generator: ratio 100
    /// is all-carbon, while ratio 0 still turns the occasional draw of 0 into
    /// a carbon nucleus rather than producing a pure-oxygen pool.
    pub fn seed(pool_size: usize, carbon_ratio: u32, sampler: &mut Sampler) -> Self {
        let mut nuclei = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let v = sampler.next_index(100) as u32;
            nuclei.push(if v <= carbon_ratio { C12 } else { O16 });
        }
        Self { nuclei }
    }

    pub fn len(&self) -> usize {
        self.nuclei.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuclei.is_empty()
    }

    pub fn get(&self, i: usize) -> Nuclide {
        self.nuclei[i]
    }

    /// Overwrite slot `i` with a fusion product.
    pub fn set(&mut self, i: usize, n: Nuclide) {
        self.nuclei[i] = n;
    }

    /// Remove slot `i` by moving the last element into it.
    pub fn swap_remove(&mut self, i: usize) -> Nuclide {
        self.nuclei.swap_remove(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nuclide> {
        self.nuclei.iter()
    }

    pub fn as_slice(&self) -> &[Nuclide] {
        &self.nuclei
    }

    /// Sum of mass numbers over the whole pool. Constant for the lifetime of
    /// a run: fusion conserves total mass by construction.
    pub fn total_mass(&self) -> u64 {
        self.nuclei.iter().map(|n| n.a as u64).sum()
    }
}
