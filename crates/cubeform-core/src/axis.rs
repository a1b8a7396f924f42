//! Spatial axes, step directions, and the [`MutationAxis`] tag.

use std::fmt;

/// One of the three spatial axes of a [`Point`](crate::Point).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// West (-1) to east (+1).
    X,
    /// South (-1) to north (+1).
    Y,
    /// Down (-1) to up (+1).
    Z,
}

impl Axis {
    /// All three axes in `X, Y, Z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the grid dimension that tracks this spatial axis.
    ///
    /// The grid is stored up-first: moving along spatial Z steps the
    /// first grid index, spatial Y the second, spatial X the third.
    /// Every grid/space conversion in the workspace goes through here.
    pub const fn grid_dimension(self) -> usize {
        match self {
            Axis::X => 2,
            Axis::Y => 1,
            Axis::Z => 0,
        }
    }

    /// Component index of this axis inside a [`Point`](crate::Point).
    pub const fn component(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Sign of a step along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards -1 in space, towards index 0 on the grid.
    Prior,
    /// Towards +1 in space, towards index 2 on the grid.
    Next,
}

impl Direction {
    /// Both directions, increase first.
    pub const BOTH: [Direction; 2] = [Direction::Next, Direction::Prior];

    /// `+1.0` for [`Next`](Direction::Next), `-1.0` for [`Prior`](Direction::Prior).
    pub const fn sign(self) -> f32 {
        match self {
            Direction::Prior => -1.0,
            Direction::Next => 1.0,
        }
    }

    /// Grid offset matching [`sign`](Self::sign).
    pub const fn offset(self) -> i32 {
        match self {
            Direction::Prior => -1,
            Direction::Next => 1,
        }
    }

    /// Direction implied by the sign of a delta component.
    ///
    /// Returns `None` for a zero component.
    pub fn of(value: f32) -> Option<Direction> {
        if value > 0.0 {
            Some(Direction::Next)
        } else if value < 0.0 {
            Some(Direction::Prior)
        } else {
            None
        }
    }
}

/// Which axis, or pair of axes, a candidate movement used.
///
/// Produced by the candidate enumerator and consumed immediately to pick
/// the propagation coordinate. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationAxis {
    /// Single-axis move along X.
    X,
    /// Single-axis move along Y.
    Y,
    /// Single-axis move along Z.
    Z,
    /// Diagonal move in the XY plane.
    XY,
    /// Diagonal move in the XZ plane.
    XZ,
    /// Diagonal move in the YZ plane.
    YZ,
}

impl MutationAxis {
    /// Spatial axes this tag moves along, in `X, Y, Z` order.
    pub const fn axes(self) -> &'static [Axis] {
        match self {
            MutationAxis::X => &[Axis::X],
            MutationAxis::Y => &[Axis::Y],
            MutationAxis::Z => &[Axis::Z],
            MutationAxis::XY => &[Axis::X, Axis::Y],
            MutationAxis::XZ => &[Axis::X, Axis::Z],
            MutationAxis::YZ => &[Axis::Y, Axis::Z],
        }
    }

    /// Whether this is a two-axis move.
    pub const fn is_diagonal(self) -> bool {
        matches!(self, MutationAxis::XY | MutationAxis::XZ | MutationAxis::YZ)
    }

    /// The single-axis tag for `axis`.
    pub const fn single(axis: Axis) -> MutationAxis {
        match axis {
            Axis::X => MutationAxis::X,
            Axis::Y => MutationAxis::Y,
            Axis::Z => MutationAxis::Z,
        }
    }
}

impl fmt::Display for MutationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            write!(f, "{axis}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimensions_are_a_permutation() {
        let mut dims: Vec<usize> = Axis::ALL.iter().map(|a| a.grid_dimension()).collect();
        dims.sort_unstable();
        assert_eq!(dims, vec![0, 1, 2]);
    }

    #[test]
    fn spatial_x_maps_to_last_grid_index() {
        assert_eq!(Axis::X.grid_dimension(), 2);
        assert_eq!(Axis::Z.grid_dimension(), 0);
    }

    #[test]
    fn direction_of_zero_is_none() {
        assert_eq!(Direction::of(0.0), None);
        assert_eq!(Direction::of(0.04), Some(Direction::Next));
        assert_eq!(Direction::of(-0.04), Some(Direction::Prior));
    }

    #[test]
    fn diagonal_tags_cover_two_axes() {
        for tag in [MutationAxis::XY, MutationAxis::XZ, MutationAxis::YZ] {
            assert!(tag.is_diagonal());
            assert_eq!(tag.axes().len(), 2);
        }
        assert_eq!(MutationAxis::single(Axis::Y).axes(), &[Axis::Y]);
        assert_eq!(MutationAxis::XZ.to_string(), "XZ");
    }
}
