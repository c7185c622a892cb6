use crate::config::{ConfigError, EngineConfig};
use crate::nuclide::{MAX_FUSION_MASS, fuse};
use crate::population::Population;
use crate::record::RecordWriter;
use crate::rng::Sampler;
use crate::stats::Composition;
use crate::xsection::CrossSections;
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Orchestrates one simulation: population seeding, the iteration loop, and
/// the output stream.
///
/// A run is strictly sequential; each iteration's draws and mutation observe
/// the previous iteration's final state. Concurrent runs need independent
/// engines, but one immutable [`CrossSections`] table can back them all.
pub struct Engine {
    config: EngineConfig,
    xsections: CrossSections,
}

/// Final tally of one completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Iterations performed (always `num_iters` for an uncancelled run).
    pub iterations: usize,
    /// Fusions accepted; the population shrank by exactly this much.
    pub accepted: usize,
    /// Population size after the last iteration.
    pub final_len: usize,
}

#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Io(io::Error),
    /// The cancellation flag was raised; rows already written remain valid.
    Cancelled { completed: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "invalid configuration: {err}"),
            EngineError::Io(err) => write!(f, "error writing run stream: {err}"),
            EngineError::Cancelled { completed } => {
                write!(f, "run cancelled after {completed} iterations")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Io(err) => Some(err),
            EngineError::Cancelled { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        EngineError::Io(err)
    }
}

enum StepOutcome {
    /// Same slot drawn twice, infeasible product, or rejected by the
    /// acceptance draw. The population is untouched.
    NoOp,
    Accepted,
}

impl Engine {
    pub fn new(config: EngineConfig, xsections: CrossSections) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, xsections })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the whole simulation, streaming metadata and abundance rows into
    /// `w`. Two calls with the same configuration produce byte-identical
    /// streams.
    pub fn run<W: Write>(&self, w: W) -> Result<RunSummary, EngineError> {
        self.run_with_cancel(w, &AtomicBool::new(false))
    }

    /// Like [`Engine::run`], but checks `cancel` once per iteration and stops
    /// with [`EngineError::Cancelled`] when it is raised. The stream written
    /// so far stays intact.
    pub fn run_with_cancel<W: Write>(
        &self,
        w: W,
        cancel: &AtomicBool,
    ) -> Result<RunSummary, EngineError> {
        let mut sampler = Sampler::from_seed(self.config.seed);
        let mut population =
            Population::seed(self.config.pool_size, self.config.num_carbons, &mut sampler);
        let mut writer = RecordWriter::new(w);

        writer.write_metadata(&self.config)?;
        info!("{}", Composition::of(&population));
        self.write_row(&mut writer, &population)?;

        let num_iters = self.config.num_iters;
        let progress_every = (num_iters / 10).max(1);
        let mut accepted = 0usize;
        for i in 0..num_iters {
            if cancel.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled { completed: i });
            }
            if let StepOutcome::Accepted = self.step(&mut population, &mut sampler) {
                accepted += 1;
            }
            self.write_row(&mut writer, &population)?;
            if (i + 1) % progress_every == 0 {
                info!("iter #{}/{}...", i + 1, num_iters);
            }
        }

        info!("{}", Composition::of(&population));
        writer.flush()?;
        Ok(RunSummary {
            iterations: num_iters,
            accepted,
            final_len: population.len(),
        })
    }

    /// One iteration: draw two slots, attempt the fusion, and on acceptance
    /// absorb both reactants into the product.
    fn step(&self, population: &mut Population, sampler: &mut Sampler) -> StepOutcome {
        let i = sampler.next_index(population.len());
        let j = sampler.next_index(population.len());
        if i == j {
            return StepOutcome::NoOp;
        }
        let ni = population.get(i);
        let nj = population.get(j);
        let Some(o) = fuse(ni, nj) else {
            return StepOutcome::NoOp;
        };
        let p = self.xsections.get(ni, nj);
        if sampler.next_unit() >= p {
            return StepOutcome::NoOp;
        }
        debug_assert!(o.a <= MAX_FUSION_MASS, "infeasible product reached mutation");
        population.set(i, o);
        population.swap_remove(j);
        StepOutcome::Accepted
    }

    fn write_row<W: Write>(
        &self,
        writer: &mut RecordWriter<W>,
        population: &Population,
    ) -> io::Result<()> {
        let comp = Composition::of(population);
        writer.write_row(&comp.abundances(&self.config.species))
    }
}
