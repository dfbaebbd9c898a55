use crate::core::models::population::Population;
use crate::engine::config::GrowthConfig;
use crate::engine::error::EngineError;
use crate::engine::growth::SurfaceGrower;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use std::fmt;
use tracing::{info, instrument};

/// Sequential identifier of a grown cell, in placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct GrowthResult {
    pub population: Population<CellId>,
    /// The RNG seed actually used, so an entropy-seeded run can be replayed.
    pub seed: u64,
}

#[instrument(skip_all, name = "growth_workflow")]
pub fn run(config: &GrowthConfig, reporter: &ProgressReporter) -> Result<GrowthResult, EngineError> {
    // === Phase 1: Lattice construction ===
    reporter.report(Progress::PhaseStart {
        name: "Building Lattice",
    });
    let lattice = config.lattice.build()?;
    info!(
        family = %lattice.unit_cell().family(),
        side = lattice.unit_cell().side(),
        period = %lattice.period().lengths(),
        sites = lattice.count_sites(),
        "Lattice constructed."
    );
    let mut population = Population::new(lattice);
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Growth ===
    reporter.report(Progress::PhaseStart {
        name: "Growing Aggregate",
    });
    let seed = config.seed.unwrap_or_else(|| thread_rng().r#gen());
    info!(seed, target = config.target_size, "Seeding growth RNG.");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut next_id = 0u64;
    let factory = || {
        let id = CellId(next_id);
        next_id += 1;
        id
    };
    SurfaceGrower::new(config.target_size).grow(&mut population, factory, &mut rng, reporter)?;

    reporter.report(Progress::Message(format!(
        "Grew {} cells.",
        population.count_occupants()
    )));
    reporter.report(Progress::PhaseFinish);

    Ok(GrowthResult { population, seed })
}
