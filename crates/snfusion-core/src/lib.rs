//! Monte Carlo simulation of pairwise nuclear fusion inside a supernova.
//!
//! A run seeds a fixed pool of carbon and oxygen nuclei, repeatedly draws
//! pairs, fuses them according to a fixed cross-section table, and streams a
//! metadata record plus one abundance row per iteration:
//!
//! ```no_run
//! use snfusion_core::{CrossSections, Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default(), CrossSections::standard())?;
//! let mut out = Vec::new();
//! let _summary = engine.run(&mut out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
pub mod nuclide;
pub mod population;
pub mod record;
pub mod rng;
pub mod stats;
pub mod xsection;

pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError, RunSummary};
pub use nuclide::{CANONICAL_SPECIES, MAX_FUSION_MASS, Nuclide, fuse};
pub use record::{METADATA_MARKER, ReadError, RecordWriter, RunRecord};
pub use rng::Sampler;
pub use stats::Composition;
pub use xsection::{CrossSectionError, CrossSections};
