use super::error::EngineError;
use super::open_sites::OpenSites;
use super::progress::{Progress, ProgressReporter};
use crate::core::lattice::UnitIndex;
use crate::core::models::population::Population;
use rand::Rng;
use std::hash::Hash;
use tracing::{debug, info, instrument, trace};

/// Surface-limited (Eden-type) growth of a connected aggregate.
///
/// Starting from a single occupant at the origin, each step picks an empty
/// site adjacent to the aggregate with probability proportional to the number
/// of occupied nearest neighbors it has, and places a fresh occupant there.
/// Growth stops once the population holds `target_size` occupants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceGrower {
    target_size: usize,
}

impl SurfaceGrower {
    pub fn new(target_size: usize) -> Self {
        Self { target_size }
    }

    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Grows an aggregate into `population`, which must be empty.
    ///
    /// `factory` is called once per placed occupant, in placement order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidTargetSize`] unless `1 <= target_size <= count_sites()`.
    /// - [`EngineError::PopulationNotEmpty`] if `population` already holds occupants.
    /// - [`EngineError::Internal`] if the factory repeats an occupant or the
    ///   open-site bookkeeping disagrees with the population.
    ///
    /// The population is left untouched when validation fails.
    #[instrument(skip_all, name = "surface_growth", fields(target = self.target_size))]
    pub fn grow<T, F, R>(
        &self,
        population: &mut Population<T>,
        mut factory: F,
        rng: &mut R,
        reporter: &ProgressReporter,
    ) -> Result<(), EngineError>
    where
        T: Clone + Eq + Hash,
        F: FnMut() -> T,
        R: Rng + ?Sized,
    {
        let capacity = population.lattice().count_sites();
        if self.target_size == 0 || self.target_size > capacity {
            return Err(EngineError::InvalidTargetSize {
                target: self.target_size,
                capacity,
            });
        }
        if !population.is_empty() {
            return Err(EngineError::PopulationNotEmpty {
                occupants: population.count_occupants(),
            });
        }

        info!(capacity, "Growing aggregate from the origin.");
        reporter.report(Progress::TaskStart {
            total_steps: self.target_size as u64,
        });

        let translations = population.lattice().unit_cell().neighbor_translations().len();
        let mut open =
            OpenSites::with_capacity(self.target_size.saturating_mul(translations).min(capacity));
        let origin = population.lattice().origin();
        attach(population, &mut open, factory(), origin)?;
        reporter.report(Progress::TaskIncrement);

        while population.count_occupants() < self.target_size {
            let index = open.sample(rng).cloned().ok_or_else(|| {
                EngineError::Internal("open-site pool exhausted before reaching target".into())
            })?;

            attach(population, &mut open, factory(), index)?;
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        debug!(open_sites = open.count_open(), "Open sites remaining at the surface.");
        info!(
            occupants = population.count_occupants(),
            "Surface growth complete."
        );
        debug_assert!(population.is_consistent());
        Ok(())
    }
}

/// Places `occupant` at the empty absolute index `index` and moves the site
/// from the open pool into the aggregate, raising the weight of each empty
/// neighbor. Neighbors keep their absolute indices, so the aggregate stays
/// contiguous around the origin instead of wrapping into the primary box.
fn attach<T>(
    population: &mut Population<T>,
    open: &mut OpenSites,
    occupant: T,
    index: UnitIndex,
) -> Result<(), EngineError>
where
    T: Clone + Eq + Hash,
{
    if population.contains(&occupant) {
        return Err(EngineError::Internal(
            "occupant factory produced a duplicate occupant".into(),
        ));
    }
    if population.is_occupied(&index)? {
        return Err(EngineError::Internal(format!(
            "attempted to grow onto occupied site {index}"
        )));
    }

    let image = population.lattice().image_of(&index)?;
    trace!(%index, weight = open.weight(&image), "Attaching occupant.");
    population.place(occupant, index.clone())?;
    open.close(&image);

    let lattice = population.lattice();
    for neighbor in population.unoccupied_neighbors(&index)? {
        let neighbor_image = lattice.image_of(&neighbor)?;
        if !open.increment(neighbor_image, neighbor) {
            return Err(EngineError::Internal(
                "open-site pool ran out of room".into(),
            ));
        }
    }
    Ok(())
}
