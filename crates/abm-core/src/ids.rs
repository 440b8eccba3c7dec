//! Strongly typed, zero-cost agent handles.
//!
//! Every kind of agent (people, social groups, …) gets its own newtype, so a
//! `PersonId` can never be compared with, hashed alongside, or passed where a
//! `GroupId` is expected.  All handles are `Copy + Ord + Hash`.
//!
//! # Numbering
//!
//! Handles are 1-based.  Raw value `0` is the `INVALID` sentinel (and the
//! `Default`), so a zero-initialised handle is visibly invalid.  A population
//! of size N owns exactly the raw values `1..=N`; the dense storage slot of a
//! handle is `raw - 1`.

use std::fmt;
use std::hash::Hash;

/// Common interface over every typed handle.
///
/// Generic containers (`Population<H>`, `ComponentStore<H, T>`) are written
/// against this trait so one implementation serves every agent kind.
pub trait Handle: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Sentinel meaning "no valid handle" — raw value 0.
    const INVALID: Self;

    /// Wrap a raw 1-based id.
    ///
    /// Prefer minting handles through `abm_agent::Population`, which
    /// guarantees they are unique within their kind.
    fn from_raw(raw: u32) -> Self;

    /// The raw 1-based id.
    fn raw(self) -> u32;

    /// `true` unless this is the `INVALID` sentinel.
    #[inline]
    fn is_valid(self) -> bool {
        self.raw() != 0
    }

    /// Dense 0-based storage slot (`raw - 1`).
    ///
    /// # Panics
    /// Panics in debug mode when called on `INVALID`.
    #[inline]
    fn slot(self) -> usize {
        debug_assert!(self.is_valid(), "slot() called on an invalid handle");
        (self.raw() - 1) as usize
    }

    /// Inverse of [`slot`](Self::slot).
    #[inline]
    fn from_slot(slot: usize) -> Self {
        let raw = u32::try_from(slot + 1).expect("handle space exhausted (u32)");
        Self::from_raw(raw)
    }
}

/// Generate a typed handle wrapper around a `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(u32);

        impl $name {
            /// Sentinel meaning "no valid handle".
            pub const INVALID: $name = $name(0);
        }

        impl Handle for $name {
            const INVALID: $name = $name(0);

            #[inline(always)]
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline(always)]
            fn raw(self) -> u32 {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized handles are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Handle of one simulated person.  Max ~4.3 billion people.
    pub struct PersonId;
}

typed_id! {
    /// Handle of a social group (cohort).
    pub struct GroupId;
}
