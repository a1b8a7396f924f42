//! Binary encode/decode for lattice grids.
//!
//! All values are little-endian. The format is intentionally simple: no
//! compression, no alignment padding, no self-describing schema.

use std::io::{Read, Write};

use cubeform_core::{Coordinate, Point, GRID_CELLS};
use cubeform_lattice::Grid;

use crate::error::StoreError;
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), StoreError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f32.
pub fn write_f32_le(w: &mut dyn Write, v: f32) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, StoreError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, StoreError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, StoreError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian f32.
pub fn read_f32_le(r: &mut dyn Read) -> Result<f32, StoreError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

// ── Grid ────────────────────────────────────────────────────────

/// Encode a grid: header, record count, then every (coordinate, point)
/// record in canonical order.
pub fn encode_grid(w: &mut dyn Write, grid: &Grid) -> Result<(), StoreError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u32_le(w, GRID_CELLS as u32)?;
    for (c, p) in grid.iter() {
        for v in c.components() {
            write_i32_le(w, v)?;
        }
        for v in p.to_array() {
            write_f32_le(w, v)?;
        }
    }
    Ok(())
}

/// Decode a grid written by [`encode_grid`].
///
/// Records may appear in any order, but every position must appear
/// exactly once and every component must be finite.
pub fn decode_grid(r: &mut dyn Read) -> Result<Grid, StoreError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(StoreError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion { found: version });
    }
    let count = read_u32_le(r)? as usize;
    if count != GRID_CELLS {
        return Err(StoreError::Malformed {
            detail: format!("expected {GRID_CELLS} records, found {count}"),
        });
    }

    let mut points: [Option<Point>; GRID_CELLS] = [None; GRID_CELLS];
    for _ in 0..count {
        let c = Coordinate::new(read_i32_le(r)?, read_i32_le(r)?, read_i32_le(r)?);
        let p = Point::new(read_f32_le(r)?, read_f32_le(r)?, read_f32_le(r)?);
        let rank = c.canonical_rank().ok_or_else(|| StoreError::Malformed {
            detail: format!("coordinate {c} out of range"),
        })?;
        if !p.to_array().iter().all(|v| v.is_finite()) {
            return Err(StoreError::Malformed {
                detail: format!("non-finite point at {c}"),
            });
        }
        if points[rank].replace(p).is_some() {
            return Err(StoreError::Malformed {
                detail: format!("duplicate record for {c}"),
            });
        }
    }

    let mut missing = None;
    let grid = Grid::from_fn(|c| match c.canonical_rank().and_then(|i| points[i]) {
        Some(p) => p,
        None => {
            if missing.is_none() {
                missing = Some(c);
            }
            Point::default()
        }
    });
    match missing {
        Some(c) => Err(StoreError::Malformed {
            detail: format!("missing record for {c}"),
        }),
        None => Ok(grid),
    }
}

/// Encode a grid into a fresh byte buffer.
pub fn grid_to_bytes(grid: &Grid) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::with_capacity(9 + GRID_CELLS * 24);
    encode_grid(&mut buf, grid)?;
    Ok(buf)
}

/// Decode a grid from a byte slice, rejecting trailing data.
pub fn grid_from_bytes(bytes: &[u8]) -> Result<Grid, StoreError> {
    let mut cursor = bytes;
    let grid = decode_grid(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(StoreError::Malformed {
            detail: format!("{} trailing bytes", cursor.len()),
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(c: Coordinate, p: Point) -> Vec<u8> {
        let mut buf = Vec::new();
        for v in c.components() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        for v in p.to_array() {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    fn header(count: u32) -> Vec<u8> {
        let mut buf = MAGIC.to_vec();
        buf.push(FORMAT_VERSION);
        buf.extend_from_slice(&count.to_le_bytes());
        buf
    }

    #[test]
    fn encoded_size_and_header() {
        let bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        assert_eq!(bytes.len(), 4 + 1 + 4 + 27 * 24);
        assert_eq!(&bytes[..4], b"CUBE");
        assert_eq!(bytes[4], FORMAT_VERSION);
        assert_eq!(u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]), 27);
    }

    #[test]
    fn first_record_is_origin_corner() {
        let bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        let expected = record(Coordinate::new(0, 0, 0), Point::new(-1.0, -1.0, -1.0));
        assert_eq!(&bytes[9..33], expected.as_slice());
    }

    #[test]
    fn round_trip_preserves_points() {
        let mut g = Grid::unit_cube();
        g[Coordinate::new(2, 1, 0)] = Point::new(-0.96, 0.04, 0.92);
        let back = grid_from_bytes(&grid_to_bytes(&g).unwrap()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn records_may_be_reordered() {
        let g = Grid::unit_cube();
        let mut bytes = header(27);
        for (c, p) in g.iter().collect::<Vec<_>>().into_iter().rev() {
            bytes.extend(record(c, p));
        }
        assert_eq!(grid_from_bytes(&bytes).unwrap(), g);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(grid_from_bytes(&bytes), Err(StoreError::InvalidMagic)));
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        bytes[4] = 99;
        assert!(matches!(
            grid_from_bytes(&bytes),
            Err(StoreError::UnsupportedVersion { found: 99 })
        ));
    }

    #[test]
    fn rejects_wrong_count() {
        let bytes = header(26);
        assert!(matches!(grid_from_bytes(&bytes), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn rejects_duplicate_and_missing_records() {
        let g = Grid::unit_cube();
        let mut bytes = header(27);
        let corner = Coordinate::new(0, 0, 0);
        for (c, p) in g.iter() {
            let c = if c == Coordinate::new(2, 2, 2) { corner } else { c };
            bytes.extend(record(c, p));
        }
        let err = grid_from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn rejects_out_of_range_coordinate() {
        let mut bytes = header(27);
        bytes.extend(record(Coordinate::new(0, 3, 0), Point::default()));
        let err = grid_from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn rejects_truncated_data() {
        let bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        assert!(matches!(
            grid_from_bytes(&bytes[..bytes.len() - 4]),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = grid_to_bytes(&Grid::unit_cube()).unwrap();
        bytes.push(0);
        assert!(matches!(grid_from_bytes(&bytes), Err(StoreError::Malformed { .. })));
    }

    /// Accepts a fixed number of bytes, then fails.
    struct ShortWriter(usize);

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.0 == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::WriteZero, "full"));
            }
            let n = buf.len().min(self.0);
            self.0 -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_reaches_the_caller() {
        let err = encode_grid(&mut ShortWriter(40), &Grid::unit_cube()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn grid_to_bytes_matches_streamed_encoding() {
        let mut g = Grid::unit_cube();
        g[Coordinate::new(0, 2, 1)] = Point::new(0.1, 0.96, -0.04);
        let mut streamed = Vec::new();
        encode_grid(&mut streamed, &g).unwrap();
        assert_eq!(grid_to_bytes(&g).unwrap(), streamed);
    }
}
