use crate::core::lattice::UnitIndex;
use rand::Rng;
use std::collections::HashMap;

/// Growth weights of the empty sites next to an aggregate.
///
/// The weight of an open site is its number of occupied nearest neighbors.
/// Sites are keyed by periodic image and handed a compact slot the first time
/// they open, so memory follows the size of the aggregate surface rather than
/// the size of the box. Each slot remembers the absolute index it was first
/// reached through, which is where a grown occupant is placed.
///
/// Slot weights are kept in a Fenwick tree so that updating a weight and
/// drawing a site with probability proportional to its weight are both
/// logarithmic in the number of slots.
#[derive(Debug, Clone)]
pub(crate) struct OpenSites {
    slots: HashMap<UnitIndex, usize>,
    /// Absolute index per slot.
    sites: Vec<UnitIndex>,
    weights: Vec<u64>,
    /// One-based Fenwick tree over `weights`.
    tree: Vec<u64>,
    total: u64,
}

impl OpenSites {
    /// Creates an empty pool able to track up to `capacity` distinct sites.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            sites: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
            tree: vec![0; capacity + 1],
            total: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.tree.len() - 1
    }

    /// Weight of the site with periodic image `image`, zero if never opened.
    pub fn weight(&self, image: &UnitIndex) -> u64 {
        self.slots.get(image).map_or(0, |&slot| self.weights[slot])
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of sites with a non-zero weight.
    pub fn count_open(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0).count()
    }

    /// Raises the weight of the site at `image` by one. A site seen for the
    /// first time is recorded under `index`.
    ///
    /// Returns `false`, leaving the pool unchanged, when a new site would
    /// exceed the capacity.
    pub fn increment(&mut self, image: UnitIndex, index: UnitIndex) -> bool {
        let slot = match self.slots.get(&image) {
            Some(&slot) => slot,
            None => {
                if self.sites.len() == self.capacity() {
                    return false;
                }
                let slot = self.sites.len();
                self.slots.insert(image, slot);
                self.sites.push(index);
                self.weights.push(0);
                slot
            }
        };

        self.weights[slot] += 1;
        self.total += 1;
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
        true
    }

    /// Sets the weight of the site at `image` to zero.
    pub fn close(&mut self, image: &UnitIndex) {
        let Some(&slot) = self.slots.get(image) else {
            return;
        };
        let weight = std::mem::take(&mut self.weights[slot]);
        if weight == 0 {
            return;
        }
        self.total -= weight;
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] -= weight;
            i += i & i.wrapping_neg();
        }
    }

    /// Returns the slot whose cumulative weight range contains `target`,
    /// i.e. the smallest `k` with `w_0 + ... + w_k > target`.
    ///
    /// `target` must be below [`OpenSites::total`].
    fn find(&self, target: u64) -> usize {
        debug_assert!(target < self.total);
        let n = self.capacity();
        let mut position = 0;
        let mut remaining = target;
        let mut step = if n == 0 { 0 } else { 1 << n.ilog2() };
        while step > 0 {
            let next = position + step;
            if next <= n && self.tree[next] <= remaining {
                position = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        position
    }

    /// Draws an open site with probability proportional to its weight and
    /// returns its absolute index, or `None` if every weight is zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&UnitIndex> {
        if self.total == 0 {
            return None;
        }
        self.sites.get(self.find(rng.gen_range(0..self.total)))
    }
}
