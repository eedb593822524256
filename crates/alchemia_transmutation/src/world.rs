//! In-memory voxel world.
//!
//! A sparse map of non-air cells, plus the cells that carry attached state
//! and the cells no actor may modify. Used by tools, tests and benchmarks
//! that need an [`Environment`] without a full game server.

use std::collections::{HashMap, HashSet};

use alchemia_shared::{BlockPos, Material};
use tracing::trace;

use crate::environment::{ActorId, Environment};

/// Which copy of the world this is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// The copy whose changes are real.
    #[default]
    Authoritative,
    /// A passive mirror that only displays.
    Mirror,
}

/// Sparse voxel world.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    cells: HashMap<BlockPos, Material>,
    attached: HashSet<BlockPos>,
    protected: HashSet<BlockPos>,
    side: Side,
}

impl VoxelWorld {
    /// Creates an empty authoritative world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world on the given side.
    #[must_use]
    pub fn with_side(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    /// Sets a cell directly, bypassing protection.
    pub fn set(&mut self, pos: BlockPos, material: Material) {
        if material.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, material);
        }
    }

    /// Fills every cell of `cells` with `material`.
    pub fn fill(&mut self, cells: impl IntoIterator<Item = BlockPos>, material: Material) {
        for pos in cells {
            self.set(pos, material);
        }
    }

    /// Marks a cell as hosting attached state.
    pub fn attach_state(&mut self, pos: BlockPos) {
        self.attached.insert(pos);
    }

    /// Forbids every actor from modifying a cell.
    pub fn protect(&mut self, pos: BlockPos) {
        self.protected.insert(pos);
    }

    /// Number of non-air cells.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells holding exactly `material`.
    #[must_use]
    pub fn count(&self, material: Material) -> usize {
        self.cells.values().filter(|&&m| m == material).count()
    }

    fn try_write(&mut self, pos: BlockPos, material: Material, actor: ActorId) -> bool {
        if self.side == Side::Mirror || self.protected.contains(&pos) {
            trace!("Actor {} refused at {}", actor, pos);
            return false;
        }
        self.set(pos, material);
        true
    }
}

impl Environment for VoxelWorld {
    fn material_at(&self, pos: BlockPos) -> Material {
        self.cells.get(&pos).copied().unwrap_or(Material::AIR)
    }

    fn place_material(&mut self, pos: BlockPos, material: Material, actor: ActorId) -> bool {
        if !self.material_at(pos).is_air() {
            return false;
        }
        self.try_write(pos, material, actor)
    }

    fn replace_material(&mut self, pos: BlockPos, material: Material, actor: ActorId) -> bool {
        self.try_write(pos, material, actor)
    }

    fn has_attached_state(&self, pos: BlockPos) -> bool {
        self.attached.contains(&pos)
    }

    fn is_authoritative(&self) -> bool {
        self.side == Side::Authoritative
    }
}
