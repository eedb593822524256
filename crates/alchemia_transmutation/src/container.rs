//! # Attached Container
//!
//! The two-slot inventory carried inside the transmutation tool. Slot 0
//! holds the EMC source, slot 1 the target-material reference.
//!
//! Persistence is an opaque string: only [`AttachedInventory::restore`]
//! is expected to read what [`AttachedInventory::persist`] writes.

use serde::{Deserialize, Serialize};

use alchemia_economy::{EconomyError, EconomyResult, Inventory, ItemStack};

/// Slot holding the EMC source.
pub const SOURCE_SLOT: usize = 0;

/// Slot holding the target-material reference.
pub const TARGET_SLOT: usize = 1;

/// Number of slots in the container.
pub const CONTAINER_SLOTS: usize = 2;

#[derive(Serialize, Deserialize)]
struct PersistedSlot {
    slot: usize,
    stack: ItemStack,
}

#[derive(Serialize, Deserialize)]
struct PersistedContainer {
    #[serde(default)]
    items: Vec<PersistedSlot>,
}

/// Fixed two-slot inventory owned by the item it is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachedInventory {
    slots: Inventory,
}

impl AttachedInventory {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Inventory::with_capacity(CONTAINER_SLOTS),
        }
    }

    /// Creates a container holding a source and a target.
    #[must_use]
    pub fn with_pair(source: ItemStack, target: ItemStack) -> Self {
        let mut container = Self::new();
        if let Some(slot) = container.slots.get_mut(SOURCE_SLOT) {
            *slot = source;
        }
        if let Some(slot) = container.slots.get_mut(TARGET_SLOT) {
            *slot = target;
        }
        container
    }

    /// Stack in a slot; out-of-range slots read as empty.
    #[must_use]
    pub fn slot(&self, slot: usize) -> ItemStack {
        self.slots.get(slot).cloned().unwrap_or_default()
    }

    /// Mutable access to a slot.
    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(slot)
    }

    /// Replaces a slot, returning what was there.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::SlotOutOfRange` for a slot past the second.
    pub fn set_slot(&mut self, slot: usize, stack: ItemStack) -> EconomyResult<ItemStack> {
        self.slots.set(slot, stack)
    }

    /// The EMC source stack.
    #[must_use]
    pub fn source(&self) -> ItemStack {
        self.slot(SOURCE_SLOT)
    }

    /// The target-material stack.
    #[must_use]
    pub fn target(&self) -> ItemStack {
        self.slot(TARGET_SLOT)
    }

    /// Serializes the non-empty slots.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Persistence` if a stack cannot be encoded.
    pub fn persist(&self) -> EconomyResult<String> {
        let items = self
            .slots
            .iter()
            .filter(|(_, stack)| !stack.is_empty())
            .map(|(slot, stack)| PersistedSlot {
                slot,
                stack: stack.clone(),
            })
            .collect();
        toml::to_string(&PersistedContainer { items })
            .map_err(|e| EconomyError::Persistence(e.to_string()))
    }

    /// Rebuilds a container from [`persist`](Self::persist) output. Slots
    /// not mentioned come back empty.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Persistence` for undecodable input or a slot
    /// index past the second.
    pub fn restore(data: &str) -> EconomyResult<Self> {
        let persisted: PersistedContainer =
            toml::from_str(data).map_err(|e| EconomyError::Persistence(e.to_string()))?;

        let mut container = Self::new();
        for entry in persisted.items {
            container
                .slots
                .set(entry.slot, entry.stack)
                .map_err(|e| EconomyError::Persistence(e.to_string()))?;
        }
        Ok(container)
    }
}

impl Default for AttachedInventory {
    fn default() -> Self {
        Self::new()
    }
}
