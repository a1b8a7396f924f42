//! Spatial points in `[-1, 1]³` and the vectors between them.

use crate::axis::{Axis, Direction};
use crate::POINT_TOLERANCE;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Slack allowed when deciding whether a nudge lands inside `[-1, 1]`.
///
/// Repeated 0.04 steps accumulate rounding error; a step that ends at
/// `1.0000001` is still a step onto the boundary.
const BOUND_SLACK: f32 = 1e-5;

/// Components smaller than this are treated as "no change".
const ZERO_EPSILON: f32 = 1e-6;

/// Quantization factor for hashing vectors (0.0001 resolution).
const QUANTUM: f32 = 10_000.0;

/// The spatial position of one lattice corner.
///
/// Components are kept in `[-1, 1]`. Equality is approximate
/// (within [`POINT_TOLERANCE`]) so that small floating-point drift from
/// repeated steps does not make two identical positions compare unequal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    /// West/east component.
    pub x: f32,
    /// South/north component.
    pub y: f32,
    /// Down/up component.
    pub z: f32,
}

impl Point {
    /// Construct a point. No clamping is performed.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`.
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component along `axis`.
    pub fn get(self, axis: Axis) -> f32 {
        self.to_array()[axis.component()]
    }

    /// Copy with the component along `axis` replaced.
    pub fn with(self, axis: Axis, value: f32) -> Self {
        let mut c = self.to_array();
        c[axis.component()] = value;
        Self::new(c[0], c[1], c[2])
    }

    /// Move one `step` along `axis`.
    ///
    /// A move that would leave `[-1, 1]` returns the point unchanged;
    /// callers filter those out by comparing against the original.
    pub fn nudge(self, axis: Axis, direction: Direction, step: f32) -> Self {
        let moved = self.get(axis) + direction.sign() * step;
        if !(-1.0 - BOUND_SLACK..=1.0 + BOUND_SLACK).contains(&moved) {
            return self;
        }
        self.with(axis, moved.clamp(-1.0, 1.0))
    }

    /// Signed change that takes `self` to `other`.
    pub fn delta_to(self, other: Point) -> Vector3 {
        Vector3::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    /// Apply `delta`, clamping every component into `[-1, 1]`.
    pub fn co_mutate(self, delta: Vector3) -> Self {
        Self::new(
            (self.x + delta.x).clamp(-1.0, 1.0),
            (self.y + delta.y).clamp(-1.0, 1.0),
            (self.z + delta.z).clamp(-1.0, 1.0),
        )
    }

    /// Whether every component lies in `[-1, 1]`.
    pub fn is_within_bounds(self) -> bool {
        self.to_array().iter().all(|c| (-1.0..=1.0).contains(c))
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(self, other: Point, tolerance: f32) -> bool {
        self.delta_to(other)
            .to_array()
            .iter()
            .all(|d| d.abs() < tolerance)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, POINT_TOLERANCE)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// A signed change between two [`Point`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vector3 {
    /// Change along X.
    pub x: f32,
    /// Change along Y.
    pub y: f32,
    /// Change along Z.
    pub z: f32,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    /// Construct a vector.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A vector with `value` on `axis` and zero elsewhere.
    pub fn along(axis: Axis, value: f32) -> Self {
        Self::ZERO.with(axis, value)
    }

    /// Components as `[x, y, z]`.
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component along `axis`.
    pub fn get(self, axis: Axis) -> f32 {
        self.to_array()[axis.component()]
    }

    /// Copy with the component along `axis` replaced.
    pub fn with(self, axis: Axis, value: f32) -> Self {
        let mut c = self.to_array();
        c[axis.component()] = value;
        Self::new(c[0], c[1], c[2])
    }

    /// Whether every component is (numerically) zero.
    pub fn is_zero(self) -> bool {
        self.to_array().iter().all(|c| c.abs() < ZERO_EPSILON)
    }

    /// Components rounded to a fixed 0.0001 grid, for hashing and
    /// structural comparison.
    pub fn quantized(self) -> [i32; 3] {
        self.to_array().map(|c| (c * QUANTUM).round() as i32)
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.quantized() == other.quantized()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:+.3}, {:+.3}, {:+.3}>", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STEP_SIZE;
    use proptest::prelude::*;

    #[test]
    fn nudge_moves_one_step() {
        let p = Point::new(-1.0, -1.0, -1.0).nudge(Axis::X, Direction::Next, STEP_SIZE);
        assert!((p.x - (-0.96)).abs() < 1e-6);
        assert_eq!(p.y, -1.0);
    }

    #[test]
    fn nudge_past_bound_is_a_no_op() {
        let p = Point::new(1.0, 0.0, -1.0);
        assert_eq!(p.nudge(Axis::X, Direction::Next, STEP_SIZE).x, 1.0);
        assert_eq!(p.nudge(Axis::Z, Direction::Prior, STEP_SIZE).z, -1.0);
    }

    #[test]
    fn nudge_onto_bound_with_drift_clamps() {
        let mut p = Point::new(0.0, 0.0, 0.0);
        for _ in 0..25 {
            p = p.nudge(Axis::Y, Direction::Next, STEP_SIZE);
        }
        assert!((p.y - 1.0).abs() < 1e-5);
        assert!(p.is_within_bounds());
        assert_eq!(p.nudge(Axis::Y, Direction::Next, STEP_SIZE).y, p.y);
    }

    #[test]
    fn delta_is_signed_from_self_to_other() {
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(0.04, -0.04, 0.0);
        let d = a.delta_to(b);
        assert!((d.x - 0.04).abs() < 1e-6);
        assert!((d.y + 0.04).abs() < 1e-6);
        assert!(d.z.abs() < 1e-6);
    }

    #[test]
    fn co_mutate_clamps() {
        let p = Point::new(0.99, 0.0, -0.99).co_mutate(Vector3::new(0.04, 0.0, -0.04));
        assert_eq!(p.x, 1.0);
        assert_eq!(p.z, -1.0);
    }

    #[test]
    fn equality_is_approximate() {
        assert_eq!(Point::new(0.5, 0.5, 0.5), Point::new(0.505, 0.495, 0.5));
        assert_ne!(Point::new(0.5, 0.5, 0.5), Point::new(0.52, 0.5, 0.5));
    }

    #[test]
    fn vector_quantization_absorbs_rounding() {
        let a = Vector3::new(0.04, 0.0, 0.0);
        let b = Vector3::new(0.040_000_5, 0.0, 0.0);
        assert_eq!(a, b);
        assert!(Vector3::ZERO.is_zero());
        assert!(!a.is_zero());
    }

    proptest! {
        #[test]
        fn nudge_never_leaves_bounds(
            x in -1.0f32..=1.0, y in -1.0f32..=1.0, z in -1.0f32..=1.0,
            axis in 0usize..3, next in any::<bool>(),
        ) {
            let dir = if next { Direction::Next } else { Direction::Prior };
            let p = Point::new(x, y, z).nudge(Axis::ALL[axis], dir, STEP_SIZE);
            prop_assert!(p.is_within_bounds());
        }
    }
}
