//! Content hashing for grids.
//!
//! Uses FNV-1a over quantized point components. Not cryptographically
//! secure; used to key lattices under [`DedupPolicy::Content`](crate::DedupPolicy).

use crate::grid::Grid;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_i32(mut hash: u64, v: i32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Hash every point of `grid` in canonical order.
///
/// Points are quantized to 0.0001 first, so grids that differ only by
/// float drift below that resolution hash equal.
pub fn grid_hash(grid: &Grid) -> u64 {
    grid.content_key()
        .iter()
        .flatten()
        .fold(FNV_OFFSET, |hash, &q| fnv1a_i32(hash, q))
}
