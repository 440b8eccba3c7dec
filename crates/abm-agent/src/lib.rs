//! `abm-agent` — agent identity and per-state component storage.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`population`]  | `Population<H>` — dense, enumerable range of handles      |
//! | [`component`]   | `ComponentStore<H, T>` sparse set, `Cursor`, `MarkerStore`|
//!
//! Both types are generic over [`abm_core::Handle`], so the same code stores
//! people, social groups, or any other agent kind without the kinds ever
//! mixing.

pub mod component;
pub mod population;


pub use component::{ComponentStore, Cursor, MarkerStore};
pub use population::Population;
