//! The world as the executor sees it.
//!
//! Placement and replacement may be refused (permissions, protected
//! areas, a cell changed since planning). A refusal is never fatal: the
//! executor skips the cell and leaves the ledger alone.

use alchemia_shared::{BlockPos, Material};

/// Entity identifier of whoever is acting.
pub type ActorId = u64;

/// Block-grid access required by the transmutation executor.
pub trait Environment {
    /// Material currently in a cell.
    fn material_at(&self, pos: BlockPos) -> Material;

    /// Places `material` into a cell on behalf of `actor`. Returns false
    /// if the placement was refused.
    fn place_material(&mut self, pos: BlockPos, material: Material, actor: ActorId) -> bool;

    /// Replaces whatever is in a cell with `material` on behalf of `actor`.
    /// Returns false if the replacement was refused.
    fn replace_material(&mut self, pos: BlockPos, material: Material, actor: ActorId) -> bool;

    /// True if the cell hosts state (a machine, a chest) that must not be
    /// destroyed by replacement.
    fn has_attached_state(&self, pos: BlockPos) -> bool;

    /// False on a passive mirror of the world, where nothing may change.
    fn is_authoritative(&self) -> bool {
        true
    }
}
