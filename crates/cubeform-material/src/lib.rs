//! Material rules for Cubeform lattices.
//!
//! A [`MaterialRule`] encodes one physical-plausibility constraint as a
//! `check` that finds offending coordinates and a `repair` that either
//! corrects the grid or condemns it. [`MaterialManager`] applies a fixed,
//! ordered rule list to a lattice in a
//! [`LatticeGraph`](cubeform_lattice::LatticeGraph), recording repairs and
//! condemnations as delta edges and memoizing passed rules on the lattice.
//!
//! Two rules ship with the crate:
//!
//! - [`Solid`]: rigid material. The grid may not fold on any axis;
//!   violations are never repaired.
//! - [`Flowable`]: granular material. Same-plane slopes in the upper
//!   slices are limited, and steep pairs are relaxed toward each other
//!   over a bounded number of passes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod flowable;
pub mod manager;
pub mod rule;
pub mod solid;

pub use flowable::{Flowable, FlowableConfig};
pub use manager::MaterialManager;
pub use rule::{MaterialRule, Repair, Verdict};
pub use solid::Solid;
