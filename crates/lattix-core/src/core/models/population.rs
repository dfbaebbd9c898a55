use super::ids::OccupantId;
use crate::core::lattice::{Lattice, LatticeError, Point, UnitIndex};
use slotmap::SlotMap;
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PopulationError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("Occupant is not present in the population")]
    OccupantNotFound,

    #[error("Occupant is already present in the population")]
    AlreadyPlaced,

    #[error("Filling the lattice requires exactly {expected} occupants, found {found}")]
    FillSizeMismatch { expected: usize, found: usize },
}

/// One occupied site: the occupant, where it was placed, and the periodic
/// image of that position.
#[derive(Debug, Clone)]
struct Site<T> {
    occupant: T,
    index: UnitIndex,
    image: UnitIndex,
}

/// Tracks which sites of a periodic [`Lattice`] are occupied, and by whom.
///
/// Every occupant is stored once, in an arena of [`Site`] records keyed by a
/// stable [`OccupantId`]. Two secondary maps resolve an occupant or a periodic
/// image back to its record, so the occupant-to-index and image-to-occupant
/// views always have the same size and agree with each other. A periodic
/// image holds at most one occupant.
#[derive(Debug, Clone)]
pub struct Population<T> {
    lattice: Lattice,
    /// Primary storage for occupied sites.
    sites: SlotMap<OccupantId, Site<T>>,
    /// Lookup from occupant to its record.
    by_occupant: HashMap<T, OccupantId>,
    /// Lookup from periodic image to the record occupying it.
    by_image: HashMap<UnitIndex, OccupantId>,
}

impl<T> Population<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates an empty population over `lattice`.
    pub fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            sites: SlotMap::with_key(),
            by_occupant: HashMap::new(),
            by_image: HashMap::new(),
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn count_occupants(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Whether every site of the primary box is occupied.
    pub fn is_full(&self) -> bool {
        self.sites.len() == self.lattice.count_sites()
    }

    pub fn contains(&self, occupant: &T) -> bool {
        self.by_occupant.contains_key(occupant)
    }

    /// Returns the absolute index at which `occupant` was placed.
    pub fn index_of(&self, occupant: &T) -> Option<&UnitIndex> {
        self.site(occupant).map(|site| &site.index)
    }

    /// Returns the periodic image of the position of `occupant`.
    pub fn image_of(&self, occupant: &T) -> Option<&UnitIndex> {
        self.site(occupant).map(|site| &site.image)
    }

    /// Iterates over every occupant together with its absolute index.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &UnitIndex)> {
        self.sites.values().map(|site| (&site.occupant, &site.index))
    }

    pub fn occupants(&self) -> impl Iterator<Item = &T> {
        self.sites.values().map(|site| &site.occupant)
    }

    /// Places `occupant` at `index`, stored under the periodic image of
    /// `index`.
    ///
    /// If the image was already held by another occupant, that occupant is
    /// removed and returned.
    ///
    /// # Errors
    ///
    /// Fails with [`PopulationError::AlreadyPlaced`] if `occupant` is already
    /// tracked, or with a [`LatticeError`] if `index` has the wrong
    /// dimensionality. The population is unchanged on error.
    pub fn place(&mut self, occupant: T, index: UnitIndex) -> Result<Option<T>, PopulationError> {
        if self.contains(&occupant) {
            return Err(PopulationError::AlreadyPlaced);
        }
        let image = self.lattice.image_of(&index)?;

        let evicted = self
            .by_image
            .remove(&image)
            .and_then(|id| self.sites.remove(id))
            .map(|site| {
                self.by_occupant.remove(&site.occupant);
                site.occupant
            });

        let id = self.sites.insert(Site {
            occupant: occupant.clone(),
            index,
            image: image.clone(),
        });
        self.by_occupant.insert(occupant, id);
        self.by_image.insert(image, id);

        debug_assert_eq!(self.sites.len(), self.by_occupant.len());
        debug_assert_eq!(self.sites.len(), self.by_image.len());
        Ok(evicted)
    }

    /// Places `occupant` at the site nearest to `point`.
    pub fn place_at_point(
        &mut self,
        occupant: T,
        point: &Point,
    ) -> Result<Option<T>, PopulationError> {
        let index = self.lattice.index_of(point)?;
        self.place(occupant, index)
    }

    /// Removes `occupant`, returning the absolute index it occupied.
    /// Does nothing if the occupant is not present.
    pub fn remove(&mut self, occupant: &T) -> Option<UnitIndex> {
        let id = self.by_occupant.remove(occupant)?;
        let site = self.sites.remove(id)?;
        self.by_image.remove(&site.image);
        Some(site.index)
    }

    /// Puts `new` at the position currently held by `old` and returns `old`.
    ///
    /// # Errors
    ///
    /// Fails with [`PopulationError::OccupantNotFound`] if `old` is absent and
    /// with [`PopulationError::AlreadyPlaced`] if `new` is a different occupant
    /// that is already tracked.
    pub fn replace(&mut self, old: &T, new: T) -> Result<T, PopulationError> {
        let id = *self
            .by_occupant
            .get(old)
            .ok_or(PopulationError::OccupantNotFound)?;
        if new != *old && self.contains(&new) {
            return Err(PopulationError::AlreadyPlaced);
        }

        self.by_occupant.remove(old);
        let site = &mut self.sites[id];
        let previous = std::mem::replace(&mut site.occupant, new.clone());
        self.by_occupant.insert(new, id);
        Ok(previous)
    }

    /// Exchanges the positions of `a` and `b`.
    ///
    /// # Errors
    ///
    /// Fails with [`PopulationError::OccupantNotFound`] if either occupant is
    /// absent; the population is unchanged in that case.
    pub fn swap(&mut self, a: &T, b: &T) -> Result<(), PopulationError> {
        let id_a = *self
            .by_occupant
            .get(a)
            .ok_or(PopulationError::OccupantNotFound)?;
        let id_b = *self
            .by_occupant
            .get(b)
            .ok_or(PopulationError::OccupantNotFound)?;

        if let Some([site_a, site_b]) = self.sites.get_disjoint_mut([id_a, id_b]) {
            std::mem::swap(&mut site_a.index, &mut site_b.index);
            std::mem::swap(&mut site_a.image, &mut site_b.image);
            self.by_image.insert(site_a.image.clone(), id_a);
            self.by_image.insert(site_b.image.clone(), id_b);
        }
        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Whether the periodic image of `index` is occupied.
    pub fn is_occupied(&self, index: &UnitIndex) -> Result<bool, LatticeError> {
        let image = self.lattice.image_of(index)?;
        Ok(self.by_image.contains_key(&image))
    }

    /// The occupant at the periodic image of `index`, if any.
    pub fn occupant_at(&self, index: &UnitIndex) -> Result<Option<&T>, LatticeError> {
        let image = self.lattice.image_of(index)?;
        Ok(self
            .by_image
            .get(&image)
            .map(|&id| &self.sites[id].occupant))
    }

    pub fn occupant_at_point(&self, point: &Point) -> Result<Option<&T>, LatticeError> {
        self.occupant_at(&self.lattice.index_of(point)?)
    }

    /// The occupants found at the nearest-neighbor positions of `occupant`,
    /// one entry per occupied neighbor translation.
    pub fn neighbors_of(&self, occupant: &T) -> Result<Vec<&T>, PopulationError> {
        let index = self
            .index_of(occupant)
            .ok_or(PopulationError::OccupantNotFound)?;

        let mut neighbors = Vec::new();
        for neighbor in self.lattice.neighbors(index)? {
            if let Some(found) = self.occupant_at(&neighbor)? {
                neighbors.push(found);
            }
        }
        Ok(neighbors)
    }

    /// The nearest-neighbor indices of `index` whose periodic image is empty.
    /// Indices are absolute, not reduced into the primary box.
    pub fn unoccupied_neighbors(
        &self,
        index: &UnitIndex,
    ) -> Result<Vec<UnitIndex>, LatticeError> {
        let mut vacant = Vec::new();
        for neighbor in self.lattice.neighbors(index)? {
            if !self.is_occupied(&neighbor)? {
                vacant.push(neighbor);
            }
        }
        Ok(vacant)
    }

    pub fn clear(&mut self) {
        self.sites.clear();
        self.by_occupant.clear();
        self.by_image.clear();
    }

    /// Replaces the contents with one freshly made occupant per primary-box
    /// site.
    pub fn fill_with(&mut self, mut factory: impl FnMut() -> T) -> Result<(), PopulationError> {
        let occupants: Vec<T> = (0..self.lattice.count_sites()).map(|_| factory()).collect();
        self.fill(occupants)
    }

    /// Replaces the contents with `occupants`, assigned to the primary-box
    /// sites in [`Period::enumerate`](crate::core::lattice::Period::enumerate)
    /// order.
    ///
    /// # Errors
    ///
    /// Fails with [`PopulationError::FillSizeMismatch`] unless exactly one
    /// occupant per site is supplied, and with
    /// [`PopulationError::AlreadyPlaced`] if an occupant repeats. The
    /// population is unchanged on error.
    pub fn fill(&mut self, occupants: impl IntoIterator<Item = T>) -> Result<(), PopulationError> {
        let occupants: Vec<T> = occupants.into_iter().collect();
        let expected = self.lattice.count_sites();
        if occupants.len() != expected {
            return Err(PopulationError::FillSizeMismatch {
                expected,
                found: occupants.len(),
            });
        }

        let previous = (
            std::mem::take(&mut self.sites),
            std::mem::take(&mut self.by_occupant),
            std::mem::take(&mut self.by_image),
        );

        let sites = self.lattice.period().enumerate();
        for (occupant, index) in occupants.into_iter().zip(sites) {
            if let Err(e) = self.place(occupant, index) {
                (self.sites, self.by_occupant, self.by_image) = previous;
                return Err(e);
            }
        }
        debug_assert!(self.is_consistent());
        Ok(())
    }

    fn site(&self, occupant: &T) -> Option<&Site<T>> {
        self.by_occupant.get(occupant).map(|&id| &self.sites[id])
    }

    /// Verifies that both lookup maps agree with the site arena.
    pub(crate) fn is_consistent(&self) -> bool {
        if self.by_occupant.len() != self.sites.len() || self.by_image.len() != self.sites.len() {
            return false;
        }
        self.sites.iter().all(|(id, site)| {
            self.by_occupant.get(&site.occupant) == Some(&id)
                && self.by_image.get(&site.image) == Some(&id)
                && self.lattice.image_of(&site.index).as_ref() == Ok(&site.image)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::{Period, UnitCell};

    fn square_population(nx: i64, ny: i64) -> Population<&'static str> {
        let lattice =
            Lattice::new(UnitCell::square(1.0).unwrap(), Period::new(&[nx, ny]).unwrap()).unwrap();
        Population::new(lattice)
    }

    mod placement {
        use super::*;

        #[test]
        fn place_tracks_absolute_index_and_image() {
            let mut pop = square_population(3, 3);
            let evicted = pop.place("a", UnitIndex::new2(4, -1)).unwrap();

            assert!(evicted.is_none());
            assert_eq!(pop.count_occupants(), 1);
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(4, -1)));
            assert_eq!(pop.image_of(&"a"), Some(&UnitIndex::new2(1, 2)));
            assert_eq!(pop.occupant_at(&UnitIndex::new2(1, 2)).unwrap(), Some(&"a"));
            assert!(pop.is_consistent());
        }

        #[test]
        fn placing_on_an_occupied_image_evicts_the_previous_occupant() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(0, 0)).unwrap();
            let evicted = pop.place("b", UnitIndex::new2(3, -3)).unwrap();

            assert_eq!(evicted, Some("a"));
            assert!(!pop.contains(&"a"));
            assert_eq!(pop.count_occupants(), 1);
            assert_eq!(pop.occupant_at(&UnitIndex::new2(0, 0)).unwrap(), Some(&"b"));
            assert!(pop.is_consistent());
        }

        #[test]
        fn placing_a_tracked_occupant_fails_without_mutation() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(0, 0)).unwrap();
            let result = pop.place("a", UnitIndex::new2(1, 1));

            assert_eq!(result, Err(PopulationError::AlreadyPlaced));
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(0, 0)));
            assert!(!pop.is_occupied(&UnitIndex::new2(1, 1)).unwrap());
        }

        #[test]
        fn place_rejects_wrong_dimensionality() {
            let mut pop = square_population(3, 3);
            let result = pop.place("a", UnitIndex::new3(0, 0, 0));
            assert!(matches!(result, Err(PopulationError::Lattice(_))));
            assert!(pop.is_empty());
        }

        #[test]
        fn place_at_point_uses_the_nearest_site() {
            let mut pop = square_population(4, 4);
            pop.place_at_point("a", &Point::from_column_slice(&[2.2, 4.9]))
                .unwrap();
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(2, 5)));
            assert_eq!(
                pop.occupant_at_point(&Point::from_column_slice(&[2.0, 1.0]))
                    .unwrap(),
                Some(&"a")
            );
        }

        #[test]
        fn remove_clears_both_lookups_and_is_idempotent() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(5, 5)).unwrap();

            assert_eq!(pop.remove(&"a"), Some(UnitIndex::new2(5, 5)));
            assert_eq!(pop.remove(&"a"), None);
            assert!(pop.is_empty());
            assert!(!pop.is_occupied(&UnitIndex::new2(2, 2)).unwrap());
            assert!(pop.is_consistent());
        }
    }

    mod replace_and_swap {
        use super::*;

        #[test]
        fn replace_substitutes_at_the_same_index() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(-1, 0)).unwrap();

            assert_eq!(pop.replace(&"a", "b"), Ok("a"));
            assert!(!pop.contains(&"a"));
            assert_eq!(pop.index_of(&"b"), Some(&UnitIndex::new2(-1, 0)));
            assert_eq!(pop.occupant_at(&UnitIndex::new2(2, 0)).unwrap(), Some(&"b"));
            assert!(pop.is_consistent());
        }

        #[test]
        fn replace_fails_for_absent_or_tracked_occupants() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(0, 0)).unwrap();
            pop.place("b", UnitIndex::new2(1, 0)).unwrap();

            assert_eq!(pop.replace(&"z", "c"), Err(PopulationError::OccupantNotFound));
            assert_eq!(pop.replace(&"a", "b"), Err(PopulationError::AlreadyPlaced));
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(0, 0)));
            assert_eq!(pop.index_of(&"b"), Some(&UnitIndex::new2(1, 0)));
        }

        #[test]
        fn swap_exchanges_indices() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(0, 0)).unwrap();
            pop.place("b", UnitIndex::new2(4, 2)).unwrap();

            pop.swap(&"a", &"b").unwrap();

            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(4, 2)));
            assert_eq!(pop.index_of(&"b"), Some(&UnitIndex::new2(0, 0)));
            assert_eq!(pop.occupant_at(&UnitIndex::new2(1, 2)).unwrap(), Some(&"a"));
            assert!(pop.is_consistent());
        }

        #[test]
        fn swap_fails_if_either_occupant_is_absent() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(0, 0)).unwrap();

            assert_eq!(pop.swap(&"a", &"z"), Err(PopulationError::OccupantNotFound));
            assert_eq!(pop.swap(&"z", &"a"), Err(PopulationError::OccupantNotFound));
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(0, 0)));
        }

        #[test]
        fn swapping_an_occupant_with_itself_is_a_no_op() {
            let mut pop = square_population(3, 3);
            pop.place("a", UnitIndex::new2(1, 1)).unwrap();
            pop.swap(&"a", &"a").unwrap();
            assert_eq!(pop.index_of(&"a"), Some(&UnitIndex::new2(1, 1)));
            assert!(pop.is_consistent());
        }
    }

    mod neighbor_queries {
        use super::*;

        #[test]
        fn neighbors_of_reports_occupied_neighbors_across_the_boundary() {
            let mut pop = square_population(4, 4);
            pop.place("center", UnitIndex::new2(0, 0)).unwrap();
            pop.place("left", UnitIndex::new2(3, 0)).unwrap();
            pop.place("up", UnitIndex::new2(0, 1)).unwrap();
            pop.place("far", UnitIndex::new2(2, 2)).unwrap();

            let mut neighbors = pop.neighbors_of(&"center").unwrap();
            neighbors.sort();
            assert_eq!(neighbors, vec![&"left", &"up"]);
            assert_eq!(
                pop.neighbors_of(&"missing"),
                Err(PopulationError::OccupantNotFound)
            );
        }

        #[test]
        fn unoccupied_neighbors_returns_absolute_indices() {
            let mut pop = square_population(4, 4);
            pop.place("a", UnitIndex::new2(1, 0)).unwrap();

            let vacant = pop.unoccupied_neighbors(&UnitIndex::new2(0, 0)).unwrap();
            assert_eq!(
                vacant,
                vec![
                    UnitIndex::new2(-1, 0),
                    UnitIndex::new2(0, 1),
                    UnitIndex::new2(0, -1),
                ]
            );
        }
    }

    mod filling {
        use super::*;

        #[test]
        fn fill_with_exact_count_fills_every_site() {
            let mut pop = square_population(2, 2);
            pop.fill(["a", "b", "c", "d"]).unwrap();

            assert!(pop.is_full());
            assert_eq!(pop.count_occupants(), 4);
            assert_eq!(pop.index_of(&"b"), Some(&UnitIndex::new2(0, 1)));
            assert!(pop.is_consistent());
        }

        #[test]
        fn fill_with_wrong_count_fails_and_keeps_contents() {
            let mut pop = square_population(2, 2);
            pop.place("z", UnitIndex::new2(1, 1)).unwrap();

            assert_eq!(
                pop.fill(["a", "b", "c"]),
                Err(PopulationError::FillSizeMismatch {
                    expected: 4,
                    found: 3
                })
            );
            assert_eq!(pop.count_occupants(), 1);
            assert!(pop.contains(&"z"));
        }

        #[test]
        fn fill_with_duplicates_restores_previous_contents() {
            let mut pop = square_population(2, 2);
            pop.place("z", UnitIndex::new2(1, 1)).unwrap();

            assert_eq!(
                pop.fill(["a", "b", "a", "d"]),
                Err(PopulationError::AlreadyPlaced)
            );
            assert_eq!(pop.count_occupants(), 1);
            assert_eq!(pop.index_of(&"z"), Some(&UnitIndex::new2(1, 1)));
            assert!(pop.is_consistent());
        }

        #[test]
        fn fill_with_factory_replaces_existing_occupants() {
            let lattice =
                Lattice::new(UnitCell::bcc(1.0).unwrap(), Period::cubic(2, 3).unwrap()).unwrap();
            let mut pop: Population<u32> = Population::new(lattice);
            pop.place(100, UnitIndex::new3(0, 0, 0)).unwrap();

            let mut next = 0;
            pop.fill_with(|| {
                next += 1;
                next
            })
            .unwrap();

            assert!(pop.is_full());
            assert!(!pop.contains(&100));
            assert_eq!(pop.occupants().count(), 8);
            assert!(pop.is_consistent());
        }
    }

    mod invariants {
        use super::*;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        #[test]
        fn random_operation_sequences_keep_lookups_consistent() {
            let lattice =
                Lattice::new(UnitCell::fcc(1.0).unwrap(), Period::new(&[3, 2, 2]).unwrap())
                    .unwrap();
            let mut pop: Population<u32> = Population::new(lattice);
            let mut rng = StdRng::seed_from_u64(17);

            for _ in 0..2_000 {
                let a = rng.gen_range(0..20u32);
                let b = rng.gen_range(0..20u32);
                match rng.gen_range(0..4) {
                    0 => {
                        let index = UnitIndex::new3(
                            rng.gen_range(-5..5),
                            rng.gen_range(-5..5),
                            rng.gen_range(-5..5),
                        );
                        let _ = pop.place(a, index);
                    }
                    1 => {
                        pop.remove(&a);
                    }
                    2 => {
                        let _ = pop.replace(&a, b);
                    }
                    _ => {
                        let _ = pop.swap(&a, &b);
                    }
                }

                assert!(pop.is_consistent());
                for (occupant, index) in pop.iter() {
                    let image = pop.lattice().image_of(index).unwrap();
                    assert_eq!(pop.occupant_at(&image).unwrap(), Some(occupant));
                }
            }
        }
    }
}
