//! The [`Lattice`] node type.

use crate::grid::Grid;
use cubeform_core::{DeltaId, LatticeError, LatticeId, MaterialId};
use indexmap::IndexSet;

/// Tag carried by the Invalid sentinel.
pub const INVALID_TAG: &str = "invalid";

/// Tag carried by the OutOfBounds sentinel.
pub const OUT_OF_BOUNDS_TAG: &str = "out_of_bounds";

/// Classification of a lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LatticeKind {
    /// Holds real geometry.
    Regular,
    /// Marker for "this deformation must be discarded".
    Invalid,
    /// Marker for "this deformation needs a neighbouring lattice".
    OutOfBounds,
}

#[derive(Clone, Debug)]
enum GridState {
    Resident(Box<Grid>),
    Paged,
    Empty,
}

/// A node in the lattice graph.
///
/// The grid is fixed once the lattice is published; only the delta set,
/// the passed-material set and the tag set grow afterwards. Sentinels
/// carry no grid at all.
#[derive(Clone, Debug)]
pub struct Lattice {
    id: LatticeId,
    kind: LatticeKind,
    grid: GridState,
    deltas: IndexSet<DeltaId>,
    materials: IndexSet<MaterialId>,
    tags: IndexSet<String>,
}

impl Lattice {
    pub(crate) fn regular(id: LatticeId, grid: Grid) -> Self {
        Self {
            id,
            kind: LatticeKind::Regular,
            grid: GridState::Resident(Box::new(grid)),
            deltas: IndexSet::new(),
            materials: IndexSet::new(),
            tags: IndexSet::new(),
        }
    }

    pub(crate) fn sentinel(id: LatticeId, kind: LatticeKind) -> Self {
        let tag = match kind {
            LatticeKind::OutOfBounds => OUT_OF_BOUNDS_TAG,
            _ => INVALID_TAG,
        };
        Self {
            id,
            kind,
            grid: GridState::Empty,
            deltas: IndexSet::new(),
            materials: IndexSet::new(),
            tags: IndexSet::from([tag.to_string()]),
        }
    }

    /// This lattice's identity.
    pub fn id(&self) -> LatticeId {
        self.id
    }

    /// Classification.
    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    /// Whether this lattice holds real geometry (is not a sentinel).
    pub fn is_valid(&self) -> bool {
        self.kind == LatticeKind::Regular
    }

    /// Whether this lattice is one of the sentinel markers.
    pub fn is_sentinel(&self) -> bool {
        !self.is_valid()
    }

    /// Whether the grid has been paged out to a store.
    pub fn is_paged(&self) -> bool {
        matches!(self.grid, GridState::Paged)
    }

    /// The point grid.
    pub fn grid(&self) -> Result<&Grid, LatticeError> {
        match &self.grid {
            GridState::Resident(grid) => Ok(grid),
            GridState::Paged => Err(LatticeError::GridUnavailable { id: self.id }),
            GridState::Empty => Err(LatticeError::SentinelGrid { id: self.id }),
        }
    }

    /// Ids of every delta this lattice is an endpoint of.
    pub fn deltas(&self) -> &IndexSet<DeltaId> {
        &self.deltas
    }

    /// Materials already proven valid for this lattice.
    pub fn materials(&self) -> &IndexSet<MaterialId> {
        &self.materials
    }

    /// Whether `material` has already passed on this lattice.
    pub fn has_passed(&self, material: MaterialId) -> bool {
        self.materials.contains(&material)
    }

    /// Free-form tags.
    pub fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    /// Whether `tag` is present.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub(crate) fn add_delta(&mut self, delta: DeltaId) {
        self.deltas.insert(delta);
    }

    /// Sentinels never record materials.
    pub(crate) fn add_material(&mut self, material: MaterialId) -> bool {
        self.is_valid() && self.materials.insert(material)
    }

    pub(crate) fn add_tag(&mut self, tag: String) -> bool {
        self.tags.insert(tag)
    }

    pub(crate) fn take_grid(&mut self) -> Result<Grid, LatticeError> {
        match std::mem::replace(&mut self.grid, GridState::Paged) {
            GridState::Resident(grid) => Ok(*grid),
            other => {
                let err = match other {
                    GridState::Empty => LatticeError::SentinelGrid { id: self.id },
                    _ => LatticeError::GridUnavailable { id: self.id },
                };
                self.grid = other;
                Err(err)
            }
        }
    }

    pub(crate) fn restore_grid(&mut self, grid: Grid) -> Result<(), LatticeError> {
        match self.grid {
            GridState::Empty => Err(LatticeError::SentinelGrid { id: self.id }),
            _ => {
                self.grid = GridState::Resident(Box::new(grid));
                Ok(())
            }
        }
    }
}
