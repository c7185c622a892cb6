use crate::nuclide::{CANONICAL_SPECIES, Nuclide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full configuration of one simulation run.
///
/// The configuration is serialized verbatim into the metadata record at the
/// head of the output stream; together with the sampler algorithm it is
/// sufficient to reproduce a run bit for bit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of fusion iterations to simulate.
    pub num_iters: usize,
    /// Initial carbon ratio (0-100) of the carbon/oxygen population.
    pub num_carbons: u32,
    /// Seed for the Monte Carlo sampler.
    pub seed: u64,
    /// Number of nuclei seeded into the initial population.
    pub pool_size: usize,
    /// Species reported as output columns, in column order. Does not
    /// constrain which nuclides can exist in the population.
    pub species: Vec<Nuclide>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_iters: 100_000,
            num_carbons: 60,
            seed: 1234,
            pool_size: 10_000,
            species: CANONICAL_SPECIES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyPool,
    EmptySpecies,
    CarbonRatioOutOfRange { actual: u32 },
    InvalidSpecies { nuclide: Nuclide },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPool => write!(f, "pool_size must be greater than 0"),
            ConfigError::EmptySpecies => write!(f, "species list must not be empty"),
            ConfigError::CarbonRatioOutOfRange { actual } => {
                write!(f, "num_carbons ({actual}) must be within 0-100")
            }
            ConfigError::InvalidSpecies { nuclide } => write!(
                f,
                "species {}-Z{} has more protons than nucleons",
                nuclide.a, nuclide.z
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.species.is_empty() {
            return Err(ConfigError::EmptySpecies);
        }
        if self.num_carbons > 100 {
            return Err(ConfigError::CarbonRatioOutOfRange {
                actual: self.num_carbons,
            });
        }
        if let Some(&nuclide) = self.species.iter().find(|n| n.z > n.a) {
            return Err(ConfigError::InvalidSpecies { nuclide });
        }
        Ok(())
    }
}
