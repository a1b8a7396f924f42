//! Grid persistence for Cubeform.
//!
//! Lattice grids can be paged out of memory and back in through a
//! [`GridStore`]. Two stores are provided:
//!
//! - [`MemoryStore`] keeps encoded grids in a map, for tests and short runs
//! - [`FileStore`] writes one `<id>.grid` file per lattice into a directory
//!
//! Both use the binary codec in [`codec`]; saving an id that is already
//! stored is a no-op.
//!
//! # Format
//!
//! ```text
//! [MAGIC "CUBE"] [VERSION u8] [COUNT u32 = 27]
//! [x i32] [y i32] [z i32] [px f32] [py f32] [pz f32]   × COUNT
//! ```
//!
//! Little-endian throughout; records appear in canonical traversal order
//! (all `y` for a fixed `x`, all `z` for a fixed `x, y`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use codec::{decode_grid, encode_grid, grid_from_bytes, grid_to_bytes};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::GridStore;

/// Magic bytes at the start of every encoded grid.
pub const MAGIC: [u8; 4] = *b"CUBE";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
