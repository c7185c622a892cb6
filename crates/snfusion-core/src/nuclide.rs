use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest mass number a fusion product may have. Heavier candidates are
/// treated as physically infeasible and the reactants are left untouched.
pub const MAX_FUSION_MASS: u32 = 56;

/// A nucleus identified by its mass number `a` and atomic number `z`.
///
/// Nuclides are plain values: compared, hashed, and ordered by their two
/// numbers. Ordering is by mass number first so sorted listings read from
/// light to heavy species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Nuclide {
    /// Mass number (nucleon count).
    pub a: u32,
    /// Atomic number (proton count).
    pub z: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNuclide {
    pub a: u32,
    pub z: u32,
}

impl fmt::Display for InvalidNuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid nuclide: atomic number ({}) exceeds mass number ({})",
            self.z, self.a
        )
    }
}

impl std::error::Error for InvalidNuclide {}

impl Nuclide {
    /// Build a nuclide, rejecting values with more protons than nucleons.
    pub fn new(a: u32, z: u32) -> Result<Self, InvalidNuclide> {
        if z > a {
            return Err(InvalidNuclide { a, z });
        }
        Ok(Self { a, z })
    }

    /// Number of neutrons.
    pub fn neutrons(&self) -> u32 {
        self.a - self.z
    }

    /// Conventional isotope label ("12-C"), or a generated `A-Z<n>` label for
    /// species outside the canonical list.
    pub fn label(&self) -> String {
        for &(nuclide, label) in LABELS {
            if *self == nuclide {
                return label.to_string();
            }
        }
        format!("{}-Z{}", self.a, self.z)
    }
}

impl fmt::Display for Nuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fusion product of two nuclides, or `None` if the product would be heavier
/// than [`MAX_FUSION_MASS`].
pub fn fuse(n1: Nuclide, n2: Nuclide) -> Option<Nuclide> {
    let o = Nuclide {
        a: n1.a + n2.a,
        z: n1.z + n2.z,
    };
    if o.a <= MAX_FUSION_MASS { Some(o) } else { None }
}

/// The default list of species reported in the output stream, from the two
/// initial reactants up to the heaviest reachable product.
pub const CANONICAL_SPECIES: [Nuclide; 11] = [
    Nuclide { a: 12, z: 6 },  // 12-C
    Nuclide { a: 16, z: 8 },  // 16-O
    Nuclide { a: 24, z: 12 }, // 24-Mg
    Nuclide { a: 28, z: 14 }, // 28-Si
    Nuclide { a: 32, z: 16 }, // 32-S
    Nuclide { a: 36, z: 18 }, // 36-Ar
    Nuclide { a: 40, z: 20 }, // 40-Ca
    Nuclide { a: 44, z: 22 }, // 44-Ti
    Nuclide { a: 48, z: 24 }, // 48-Cr
    Nuclide { a: 52, z: 26 }, // 52-Fe
    Nuclide { a: 56, z: 28 }, // 56-Ni
];

const LABELS: &[(Nuclide, &str)] = &[
    (Nuclide { a: 12, z: 6 }, "12-C"),
    (Nuclide { a: 16, z: 8 }, "16-O"),
    (Nuclide { a: 24, z: 12 }, "24-Mg"),
    (Nuclide { a: 28, z: 14 }, "28-Si"),
    (Nuclide { a: 32, z: 16 }, "32-S"),
    (Nuclide { a: 36, z: 18 }, "36-Ar"),
    (Nuclide { a: 40, z: 20 }, "40-Ca"),
    (Nuclide { a: 44, z: 22 }, "44-Ti"),
    (Nuclide { a: 48, z: 24 }, "48-Cr"),
    (Nuclide { a: 52, z: 26 }, "52-Fe"),
    (Nuclide { a: 56, z: 28 }, "56-Ni"),
];
