//! # Inventory System
//!
//! Fixed-capacity slot inventories. Slots are allocated at creation and
//! never grow; scans always run in slot order.

use crate::error::{EconomyError, EconomyResult};
use crate::item::{ItemId, ItemStack};

/// Slots in a player inventory.
pub const PLAYER_INVENTORY_SLOTS: usize = 36;

/// A fixed-capacity inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<ItemStack>,
}

impl Inventory {
    /// Creates an empty player-sized inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(PLAYER_INVENTORY_SLOTS)
    }

    /// Creates an empty inventory with `capacity` slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![ItemStack::empty(); capacity],
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Gets an item stack at a specific slot.
    #[inline]
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)
    }

    /// Gets a mutable reference to an item stack.
    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot)
    }

    /// Iterates `(slot, stack)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots.iter().enumerate()
    }

    /// Replaces a slot, returning what was there.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::SlotOutOfRange` for a slot past capacity.
    pub fn set(&mut self, slot: usize, stack: ItemStack) -> EconomyResult<ItemStack> {
        let capacity = self.capacity();
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(EconomyError::SlotOutOfRange { slot, capacity })?;
        Ok(std::mem::replace(target, stack))
    }

    /// Counts the total number of a specific item across all slots.
    #[must_use]
    pub fn count_item(&self, item: ItemId) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }

    /// Removes `count` units from one slot and returns them.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::SlotOutOfRange` for a bad slot, or
    /// `EconomyError::ExtractionFailed` if the slot holds fewer units.
    pub fn extract(&mut self, slot: usize, count: u32) -> EconomyResult<ItemStack> {
        let capacity = self.capacity();
        let stack = self
            .slots
            .get_mut(slot)
            .ok_or(EconomyError::SlotOutOfRange { slot, capacity })?;

        let available = if stack.is_empty() { 0 } else { stack.count };
        if available < count {
            return Err(EconomyError::ExtractionFailed {
                slot,
                requested: count,
                available,
            });
        }

        let taken = ItemStack {
            count,
            ..stack.clone()
        };
        stack.count -= count;
        if stack.count == 0 {
            stack.clear();
        }
        Ok(taken)
    }

    /// Creates a snapshot of the inventory for rollback.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
        }
    }

    /// Restores inventory from a snapshot (rollback).
    pub fn restore(&mut self, snapshot: &InventorySnapshot) {
        self.slots.clone_from(&snapshot.slots);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of inventory state for transactional rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventorySnapshot {
    slots: Vec<ItemStack>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_count() {
        let mut inv = Inventory::with_capacity(3);
        assert!(inv.set(0, ItemStack::new(1, 10)).unwrap().is_empty());
        inv.set(2, ItemStack::new(1, 5).with_damage(3)).unwrap();
        assert_eq!(inv.count_item(1), 15);

        let previous = inv.set(0, ItemStack::new(2, 1)).unwrap();
        assert_eq!(previous, ItemStack::new(1, 10));
        assert!(matches!(
            inv.set(3, ItemStack::new(1, 1)),
            Err(EconomyError::SlotOutOfRange { slot: 3, capacity: 3 })
        ));
    }

    #[test]
    fn test_extract() {
        let mut inv = Inventory::with_capacity(4);
        inv.set(2, ItemStack::new(9, 5)).unwrap();

        let taken = inv.extract(2, 3).unwrap();
        assert_eq!(taken, ItemStack::new(9, 3));
        assert_eq!(inv.count_item(9), 2);

        inv.extract(2, 2).unwrap();
        assert!(inv.get(2).unwrap().is_empty());
    }

    #[test]
    fn test_extract_insufficient() {
        let mut inv = Inventory::with_capacity(4);
        inv.set(0, ItemStack::new(9, 5)).unwrap();
        let result = inv.extract(0, 6);
        assert!(matches!(result, Err(EconomyError::ExtractionFailed { available: 5, .. })));
        assert!(matches!(inv.extract(8, 1), Err(EconomyError::SlotOutOfRange { .. })));
        assert_eq!(inv.count_item(9), 5);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut inv = Inventory::new();
        inv.set(0, ItemStack::new(1, 50)).unwrap();

        let snapshot = inv.snapshot();

        inv.extract(0, 20).unwrap();
        inv.set(1, ItemStack::new(2, 30)).unwrap();
        assert_eq!(inv.count_item(2), 30);

        inv.restore(&snapshot);
        assert_eq!(inv.count_item(2), 0);
        assert_eq!(inv.count_item(1), 50);
    }
}
