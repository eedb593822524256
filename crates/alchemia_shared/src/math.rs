//! Grid and vector math shared by the economy and transmutation crates.
//!
//! The world is an integer block grid. `+x` is east, `+y` is up and `+z`
//! is south.

use serde::{Deserialize, Serialize};

/// 3D Vector - look direction, feedback position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Straight down
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);

    /// Straight up
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
}

/// A cell in the block grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate (east positive)
    pub x: i32,
    /// Y coordinate (up positive)
    pub y: i32,
    /// Z coordinate (south positive)
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Grid origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Returns this position shifted by the given deltas.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Returns the neighbouring cell in the given direction.
    #[inline]
    #[must_use]
    pub const fn step(self, facing: Facing) -> Self {
        let (dx, dy, dz) = facing.delta();
        self.offset(dx, dy, dz)
    }

    /// Center of the cell in continuous space.
    #[must_use]
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A horizontal grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// East-west
    X,
    /// North-south
    Z,
}

impl Axis {
    /// Horizontal axis a look vector mostly points along.
    ///
    /// Ties go to `Z`, so a player looking straight down still gets a
    /// deterministic answer.
    #[must_use]
    pub fn horizontal_from_look(look: Vec3) -> Self {
        if look.z.abs() >= look.x.abs() {
            Self::Z
        } else {
            Self::X
        }
    }
}

/// One of the six axis-aligned directions, also used for block faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// -y
    Down,
    /// +y
    Up,
    /// -z
    North,
    /// +z
    South,
    /// -x
    West,
    /// +x
    East,
}

impl Facing {
    /// All six directions.
    pub const ALL: [Self; 6] = [
        Self::Down,
        Self::Up,
        Self::North,
        Self::South,
        Self::West,
        Self::East,
    ];

    /// Unit step along this direction as `(dx, dy, dz)`.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_mid_cell() {
        assert_eq!(BlockPos::new(-2, 64, 7).center(), Vec3::new(-1.5, 64.5, 7.5));
        assert_eq!(BlockPos::ORIGIN.center(), Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_step_matches_delta() {
        let origin = BlockPos::new(10, 64, -3);
        for facing in Facing::ALL {
            let (dx, dy, dz) = facing.delta();
            assert_eq!(dx.abs() + dy.abs() + dz.abs(), 1, "{facing:?} is a unit step");
            assert_eq!(origin.step(facing), origin.offset(dx, dy, dz));
        }
        assert_eq!(origin.step(Facing::East), BlockPos::new(11, 64, -3));
        assert_eq!(origin.step(Facing::North), BlockPos::new(10, 64, -4));
    }

    #[test]
    fn test_horizontal_axis_from_look() {
        assert_eq!(Axis::horizontal_from_look(Vec3::new(0.9, 0.0, 0.1)), Axis::X);
        assert_eq!(Axis::horizontal_from_look(Vec3::new(0.1, 0.0, -0.9)), Axis::Z);
        assert_eq!(Axis::horizontal_from_look(Vec3::DOWN), Axis::Z);
    }
}
