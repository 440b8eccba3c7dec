//! Sparse-set component storage keyed by typed handles.
//!
//! # Design
//!
//! Each disease state (Susceptible, Infected, Recovered, …) gets its own
//! `ComponentStore<H, T>` holding, for every agent currently in that state, a
//! payload `T` and the owning handle.  Three arrays back the store:
//!
//! ```text
//! sparse : handle slot  → dense index   (VACANT when absent)
//! values : dense index  → T
//! owners : dense index  → H
//! ```
//!
//! Membership test, insertion, lookup and removal are all O(1).  Removal is
//! swap-and-pop: the last entry moves into the vacated dense index and the
//! arrays shrink by one, so no compaction ever happens.
//!
//! # Iterating while erasing
//!
//! Because of swap-and-pop, an erase changes what lives at the erased
//! position.  Traversals that may erase use an explicit [`Cursor`]:
//!
//! ```rust
//! use abm_agent::{ComponentStore, Cursor, Population};
//! use abm_core::PersonId;
//!
//! let mut people = Population::<PersonId>::empty();
//! let mut store = ComponentStore::new();
//! for timer in [0_u32, 3, 0, 1] {
//!     store.create(people.push_back(), timer);
//! }
//!
//! // Remove every entry whose timer is zero.
//! let mut at = Cursor::START;
//! while let Some((&timer, _agent)) = store.get(at) {
//!     at = if timer == 0 { store.erase(at) } else { at.next() };
//! }
//! assert_eq!(store.len(), 2);
//! ```
//!
//! `erase` returns the cursor of the next entry to visit; never advance
//! independently after an erase, and never assume any other entry kept its
//! dense index.
//!
//! # Marker payloads
//!
//! For states that carry no per-agent data use a zero-sized payload
//! ([`MarkerStore`]).  `Vec` of a zero-sized type never allocates, so only
//! the `owners` and `sparse` arrays occupy memory.

use abm_core::Handle;

/// Sparse-array sentinel for "agent not in this store".
const VACANT: u32 = u32::MAX;

// ── Cursor ────────────────────────────────────────────────────────────────────

/// A traversal position (dense index) inside a [`ComponentStore`].
///
/// Only meaningful for the store it was obtained from, and only until the
/// next mutation other than the `erase` that returned it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Cursor(usize);

impl Cursor {
    /// The first position of every store.
    pub const START: Cursor = Cursor(0);

    /// The position after `self`.
    #[inline]
    pub fn next(self) -> Cursor {
        Cursor(self.0 + 1)
    }

    /// Raw dense index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ── ComponentStore ────────────────────────────────────────────────────────────

/// Sparse set mapping handles of kind `H` to payloads of type `T`.
///
/// An agent holds at most one `T` at a time; inserting a second one is a
/// broken invariant and panics.
#[derive(Clone, Debug)]
pub struct ComponentStore<H: Handle, T> {
    values: Vec<T>,
    owners: Vec<H>,
    sparse: Vec<u32>,
}

/// A store for presence-only states.  `M` is normally a unit struct.
pub type MarkerStore<H, M = ()> = ComponentStore<H, M>;

impl<H: Handle, T> ComponentStore<H, T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            owners: Vec::new(),
            sparse: Vec::new(),
        }
    }

    /// Pre-allocate room for `capacity` entries and handles up to `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            owners: Vec::with_capacity(capacity),
            sparse: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Dense index of `agent`, if present.
    #[inline]
    fn dense_index(&self, agent: H) -> Option<usize> {
        if !agent.is_valid() {
            return None;
        }
        match self.sparse.get(agent.slot()) {
            Some(&i) if i != VACANT => Some(i as usize),
            _ => None,
        }
    }

    /// `true` if `agent` currently holds a component in this store.  O(1).
    #[inline]
    pub fn contains(&self, agent: H) -> bool {
        self.dense_index(agent).is_some()
    }

    /// Insert `value` for `agent` and return a mutable reference to it.
    ///
    /// # Panics
    /// Panics if `agent` is invalid or already present — only one component
    /// per agent is allowed.
    pub fn create(&mut self, agent: H, value: T) -> &mut T {
        assert!(agent.is_valid(), "cannot store a component for an invalid handle");
        assert!(
            !self.contains(agent),
            "only one component per agent is allowed: {agent} is already present"
        );

        let slot = agent.slot();
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, VACANT);
        }
        let index = self.values.len();
        self.sparse[slot] = u32::try_from(index).expect("component store exceeds u32 entries");
        self.values.push(value);
        self.owners.push(agent);
        &mut self.values[index]
    }

    /// Shared reference to `agent`'s payload.
    #[inline]
    pub fn find(&self, agent: H) -> Option<&T> {
        self.dense_index(agent).map(|i| &self.values[i])
    }

    /// Mutable reference to `agent`'s payload.
    #[inline]
    pub fn find_mut(&mut self, agent: H) -> Option<&mut T> {
        self.dense_index(agent).map(|i| &mut self.values[i])
    }

    // ── Cursor traversal ──────────────────────────────────────────────────

    /// Entry at `at`, or `None` once the cursor has reached the end.
    #[inline]
    pub fn get(&self, at: Cursor) -> Option<(&T, H)> {
        let agent = *self.owners.get(at.0)?;
        Some((&self.values[at.0], agent))
    }

    /// Mutable entry at `at`, or `None` once the cursor has reached the end.
    #[inline]
    pub fn get_mut(&mut self, at: Cursor) -> Option<(&mut T, H)> {
        let agent = *self.owners.get(at.0)?;
        Some((&mut self.values[at.0], agent))
    }

    /// Owning agent of the entry at `at`.
    #[inline]
    pub fn agent_at(&self, at: Cursor) -> Option<H> {
        self.owners.get(at.0).copied()
    }

    /// Remove the entry at `at` and return the cursor of the next entry to
    /// visit — which is `at` itself, now holding the former last entry.
    ///
    /// # Panics
    /// Panics if `at` is past the end.
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        self.swap_remove(at);
        at
    }

    /// Remove the entry at `at` by swap-and-pop, returning its owner and payload.
    ///
    /// # Panics
    /// Panics if `at` is past the end.
    pub fn swap_remove(&mut self, at: Cursor) -> (H, T) {
        let index = at.0;
        assert!(index < self.len(), "erase position {index} out of range (len {})", self.len());

        let agent = self.owners.swap_remove(index);
        let value = self.values.swap_remove(index);
        self.sparse[agent.slot()] = VACANT;

        // The former last entry now lives at `index`.
        if let Some(&moved) = self.owners.get(index) {
            self.sparse[moved.slot()] = index as u32;
        }
        (agent, value)
    }

    /// Remove `agent`'s entry wherever it is.  O(1).
    pub fn remove(&mut self, agent: H) -> Option<T> {
        let index = self.dense_index(agent)?;
        Some(self.swap_remove(Cursor(index)).1)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.values.clear();
        self.owners.clear();
        self.sparse.clear();
    }

    // ── Whole-store views ─────────────────────────────────────────────────

    /// Owning agents in traversal order.
    #[inline]
    pub fn agents(&self) -> &[H] {
        &self.owners
    }

    /// Payloads in traversal order (aligned with [`agents`](Self::agents)).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Every `(payload, owner)` pair.  Order is unspecified and changes after
    /// removals.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&T, H)> {
        self.values.iter().zip(self.owners.iter().copied())
    }

    /// Every `(payload, owner)` pair with mutable payloads.
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (&mut T, H)> {
        self.values.iter_mut().zip(self.owners.iter().copied())
    }
}

impl<H: Handle, T: Default> ComponentStore<H, T> {
    /// Insert `T::default()` for `agent` — the natural call for marker stores.
    ///
    /// # Panics
    /// Panics if `agent` is invalid or already present.
    pub fn mark(&mut self, agent: H) {
        self.create(agent, T::default());
    }
}

impl<H: Handle, T> Default for ComponentStore<H, T> {
    fn default() -> Self {
        Self::new()
    }
}
