//! `Population<H>` — the set of live handles of one agent kind.
//!
//! A population of size N owns exactly the handles `1..=N`.  Handles are
//! minted monotonically by [`Population::push_back`] and never reused; only
//! state-component membership is ever deleted, never identity.

use std::marker::PhantomData;

use abm_core::{Handle, SimRng};

/// Dense, randomly indexable range of handles of kind `H`.
///
/// Holds no per-agent data — just the count — so cloning and iterating are
/// O(1) to set up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Population<H: Handle> {
    len:   u32,
    _kind: PhantomData<H>,
}

impl<H: Handle> Population<H> {
    /// A population owning handles `1..=size`.  `size == 0` is valid.
    pub fn new(size: u32) -> Self {
        Self { len: size, _kind: PhantomData }
    }

    /// An empty population; grow it with [`push_back`](Self::push_back).
    pub fn empty() -> Self {
        Self::new(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mint the next unused handle and grow the population by one.
    ///
    /// # Panics
    /// Panics if the `u32` handle space is exhausted.
    pub fn push_back(&mut self) -> H {
        self.len = self
            .len
            .checked_add(1)
            .expect("population handle space exhausted (u32)");
        H::from_raw(self.len)
    }

    /// Handle at position `index` (0-based), or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<H> {
        (index < self.len()).then(|| H::from_slot(index))
    }

    /// `true` if `handle` was minted by this population.
    #[inline]
    pub fn contains(&self, handle: H) -> bool {
        handle.is_valid() && handle.raw() <= self.len
    }

    /// Uniformly chosen member, or `None` for an empty population.  O(1).
    pub fn select_random(&self, rng: &mut SimRng) -> Option<H> {
        if self.is_empty() {
            return None;
        }
        Some(H::from_raw(rng.gen_range(1..=self.len)))
    }

    /// All handles in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = H> + ExactSizeIterator + use<H> {
        (0..self.len).map(|i| H::from_raw(i + 1))
    }
}

impl<H: Handle> Default for Population<H> {
    fn default() -> Self {
        Self::empty()
    }
}
