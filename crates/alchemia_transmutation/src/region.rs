//! # Region Planner
//!
//! Turns an interaction (clicked cell, clicked face, look direction,
//! mode, charge) into the box of cells a transmutation visits.
//!
//! ## Geometry
//!
//! Lateral faces always produce a vertical square of side `2c + 1` lying
//! in the clicked face's plane. The top and bottom faces produce a flat
//! disc when the player looks steeply at them (or in transmutation mode)
//! and otherwise a vertical wall rising from (or hanging below) the
//! clicked cell, oriented across the player's line of sight.
//!
//! In normal mode the whole box moves one cell out of the clicked face so
//! material is placed into the open space in front of the surface.

use serde::{Deserialize, Serialize};

use alchemia_shared::{Axis, BlockPos, Facing, Vec3, LOOK_VERTICAL_THRESHOLD};

/// Operating mode of the transmutation tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Fill empty cells, paying for each one.
    #[default]
    Normal,
    /// Swap existing material for the target, balancing the value difference.
    Transmutation,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Transmutation,
            Self::Transmutation => Self::Normal,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Transmutation => "Transmutation",
        }
    }
}

/// Steepness of a look vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookPitch {
    /// Vertical component at or below -sin(45°).
    Down,
    /// Vertical component at or above sin(45°).
    Up,
    /// Anything in between.
    Level,
}

impl LookPitch {
    /// Classifies a look vector.
    #[must_use]
    pub fn classify(look: Vec3) -> Self {
        if look.y <= -LOOK_VERTICAL_THRESHOLD {
            Self::Down
        } else if look.y >= LOOK_VERTICAL_THRESHOLD {
            Self::Up
        } else {
            Self::Level
        }
    }
}

/// An inclusive axis-aligned box of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Lowest corner.
    pub min: BlockPos,
    /// Highest corner (inclusive).
    pub max: BlockPos,
}

impl Region {
    /// A region containing exactly one cell.
    #[must_use]
    pub const fn single(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    /// Box spanning `[center - lo, center + hi]` on each axis.
    const fn around(center: BlockPos, lo: (i32, i32, i32), hi: (i32, i32, i32)) -> Self {
        Self {
            min: center.offset(-lo.0, -lo.1, -lo.2),
            max: center.offset(hi.0, hi.1, hi.2),
        }
    }

    /// The same box moved by `(dx, dy, dz)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            min: self.min.offset(dx, dy, dz),
            max: self.max.offset(dx, dy, dz),
        }
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> (usize, usize, usize) {
        let span = |lo: i32, hi: i32| {
            usize::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(0)
        };
        (
            span(self.min.x, self.max.x),
            span(self.min.y, self.max.y),
            span(self.min.z, self.max.z),
        )
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        let (x, y, z) = self.size();
        x * y * z
    }

    /// Always false: a region holds at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `pos` lies inside the box.
    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }

    /// Every cell, x fastest, then y, then z.
    pub fn cells(&self) -> impl Iterator<Item = BlockPos> {
        let Self { min, max } = *self;
        (min.z..=max.z).flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| BlockPos::new(x, y, z)))
        })
    }
}

/// Everything the planner needs from an interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanRequest {
    /// Clicked cell.
    pub center: BlockPos,
    /// Clicked face.
    pub face: Facing,
    /// Player look direction.
    pub look: Vec3,
    /// Horizontal axis the player faces along.
    pub horizontal_axis: Axis,
    /// Operating mode.
    pub mode: Mode,
    /// Radius; 0 is a single cell.
    pub charge: u8,
}

/// Stateless region geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegionPlanner;

impl RegionPlanner {
    /// Computes the region for a request.
    #[must_use]
    pub fn plan(request: &PlanRequest) -> Region {
        let c = i32::from(request.charge);
        let wide = 2 * c;
        let pitch = LookPitch::classify(request.look);
        let transmuting = request.mode == Mode::Transmutation;
        let along_z = request.horizontal_axis == Axis::Z;
        let p = request.center;

        let disc = Region::around(p, (c, 0, c), (c, 0, c));

        let (region, shift) = match request.face {
            Facing::Up => {
                if pitch == LookPitch::Down || transmuting {
                    (disc, (0, 1, 0))
                } else if along_z {
                    (Region::around(p, (c, -1, 0), (c, 1 + wide, 0)), (0, 0, 0))
                } else {
                    (Region::around(p, (0, -1, c), (0, 1 + wide, c)), (0, 0, 0))
                }
            }
            Facing::Down => {
                if pitch == LookPitch::Up || transmuting {
                    (disc, (0, -1, 0))
                } else if along_z {
                    (Region::around(p, (c, 1 + wide, 0), (c, -1, 0)), (0, 0, 0))
                } else {
                    (Region::around(p, (0, 1 + wide, c), (0, -1, c)), (0, 0, 0))
                }
            }
            Facing::East | Facing::West => {
                (Region::around(p, (0, c, c), (0, c, c)), request.face.delta())
            }
            Facing::South | Facing::North => {
                (Region::around(p, (c, c, 0), (c, c, 0)), request.face.delta())
            }
        };

        if transmuting {
            region
        } else {
            region.offset(shift.0, shift.1, shift.2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_ALONG_Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    const LEVEL_ALONG_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const STEEP_DOWN: Vec3 = Vec3::new(0.0, -0.8, 0.6);
    const STEEP_UP: Vec3 = Vec3::new(0.0, 0.8, 0.6);

    fn request(face: Facing, look: Vec3, mode: Mode, charge: u8) -> PlanRequest {
        PlanRequest {
            center: BlockPos::new(10, 64, -5),
            face,
            look,
            horizontal_axis: Axis::horizontal_from_look(look),
            mode,
            charge,
        }
    }

    fn bounds(region: Region) -> ((i32, i32, i32), (i32, i32, i32)) {
        (
            (region.min.x, region.min.y, region.min.z),
            (region.max.x, region.max.y, region.max.z),
        )
    }

    #[test]
    fn test_look_pitch() {
        assert_eq!(LookPitch::classify(Vec3::DOWN), LookPitch::Down);
        assert_eq!(LookPitch::classify(Vec3::UP), LookPitch::Up);
        assert_eq!(LookPitch::classify(LEVEL_ALONG_Z), LookPitch::Level);
        assert_eq!(LookPitch::classify(Vec3::new(0.0, -0.70, 0.71)), LookPitch::Level);
        assert_eq!(LookPitch::classify(STEEP_DOWN), LookPitch::Down);
    }

    #[test]
    fn test_charge_zero_is_one_cell() {
        for face in Facing::ALL {
            for mode in [Mode::Normal, Mode::Transmutation] {
                for look in [LEVEL_ALONG_X, LEVEL_ALONG_Z, STEEP_DOWN, STEEP_UP] {
                    let region = RegionPlanner::plan(&request(face, look, mode, 0));
                    assert_eq!(region.len(), 1, "{face:?} {mode:?} {look:?}");
                }
            }
        }
    }

    #[test]
    fn test_disc_size() {
        for charge in 0..=4u8 {
            let side = 2 * usize::from(charge) + 1;
            let region =
                RegionPlanner::plan(&request(Facing::Up, STEEP_DOWN, Mode::Normal, charge));
            assert_eq!(region.len(), side * side);
            assert_eq!(region.size().1, 1);
        }
    }

    #[test]
    fn test_every_region_is_a_square() {
        for face in Facing::ALL {
            for mode in [Mode::Normal, Mode::Transmutation] {
                for look in [LEVEL_ALONG_X, LEVEL_ALONG_Z, STEEP_DOWN, STEEP_UP] {
                    let region = RegionPlanner::plan(&request(face, look, mode, 3));
                    assert_eq!(region.len(), 49, "{face:?} {mode:?} {look:?}");
                }
            }
        }
    }

    #[test]
    fn test_up_disc_normal_mode_sits_above_surface() {
        let region = RegionPlanner::plan(&request(Facing::Up, STEEP_DOWN, Mode::Normal, 1));
        assert_eq!(bounds(region), ((9, 65, -6), (11, 65, -4)));
    }

    #[test]
    fn test_up_transmutation_is_surface_disc() {
        let region =
            RegionPlanner::plan(&request(Facing::Up, LEVEL_ALONG_Z, Mode::Transmutation, 1));
        assert_eq!(bounds(region), ((9, 64, -6), (11, 64, -4)));
    }

    #[test]
    fn test_up_wall_across_line_of_sight() {
        let along_z = RegionPlanner::plan(&request(Facing::Up, LEVEL_ALONG_Z, Mode::Normal, 1));
        assert_eq!(bounds(along_z), ((9, 65, -5), (11, 67, -5)));

        let along_x = RegionPlanner::plan(&request(Facing::Up, LEVEL_ALONG_X, Mode::Normal, 1));
        assert_eq!(bounds(along_x), ((10, 65, -6), (10, 67, -4)));
    }

    #[test]
    fn test_down_disc_and_wall() {
        let disc = RegionPlanner::plan(&request(Facing::Down, STEEP_UP, Mode::Normal, 1));
        assert_eq!(bounds(disc), ((9, 63, -6), (11, 63, -4)));

        let wall = RegionPlanner::plan(&request(Facing::Down, LEVEL_ALONG_Z, Mode::Normal, 1));
        assert_eq!(bounds(wall), ((9, 61, -5), (11, 63, -5)));

        let wall_x = RegionPlanner::plan(&request(Facing::Down, LEVEL_ALONG_X, Mode::Normal, 2));
        assert_eq!(bounds(wall_x), ((10, 59, -7), (10, 63, -3)));
    }

    #[test]
    fn test_lateral_faces() {
        let east = RegionPlanner::plan(&request(Facing::East, LEVEL_ALONG_X, Mode::Normal, 1));
        assert_eq!(bounds(east), ((11, 63, -6), (11, 65, -4)));

        let west =
            RegionPlanner::plan(&request(Facing::West, LEVEL_ALONG_X, Mode::Transmutation, 1));
        assert_eq!(bounds(west), ((10, 63, -6), (10, 65, -4)));

        let north = RegionPlanner::plan(&request(Facing::North, LEVEL_ALONG_Z, Mode::Normal, 1));
        assert_eq!(bounds(north), ((9, 63, -6), (11, 65, -6)));

        let south =
            RegionPlanner::plan(&request(Facing::South, LEVEL_ALONG_Z, Mode::Transmutation, 2));
        assert_eq!(bounds(south), ((8, 62, -5), (12, 66, -5)));
    }

    #[test]
    fn test_cells_order_is_stable() {
        let region = RegionPlanner::plan(&request(Facing::Up, STEEP_DOWN, Mode::Normal, 1));
        let first: Vec<_> = region.cells().collect();
        let second: Vec<_> = region.cells().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), region.len());
        assert_eq!(first[0], region.min);
        assert_eq!(first[1], region.min.offset(1, 0, 0));
        assert_eq!(*first.last().unwrap(), region.max);
        assert!(first.iter().all(|pos| region.contains(*pos)));
    }

    #[test]
    fn test_mode_cycles() {
        assert_eq!(Mode::Normal.next(), Mode::Transmutation);
        assert_eq!(Mode::Transmutation.next(), Mode::Normal);
        assert_eq!(Mode::default().name(), "Normal");
    }
}
