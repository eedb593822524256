//! # Item Registry
//!
//! Static facts about item types: whether they take damage, burn as fuel,
//! store EMC, or place a material into the world. Built once from
//! configuration and read-only afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use alchemia_shared::{Material, MaterialId};

use crate::error::{EconomyError, EconomyResult};
use crate::item::{ItemId, ItemStack, EMPTY_ITEM};
use crate::storage::ValueCell;

/// An item type definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKind {
    /// Unique identifier.
    pub id: ItemId,
    /// Human-readable name.
    pub name: String,
    /// Material this item places, if any.
    #[serde(default)]
    pub block: Option<MaterialId>,
    /// Uses before breaking. 0 means the item cannot be damaged.
    #[serde(default)]
    pub max_damage: u32,
    /// Whether the item can be repaired.
    #[serde(default)]
    pub repairable: bool,
    /// Whether the item may be burned by the fuel ledger.
    #[serde(default)]
    pub fuel: bool,
    /// EMC capacity. Present means the item is a value store.
    #[serde(default)]
    pub value_capacity: Option<u64>,
}

impl ItemKind {
    /// Creates a plain item type with no capabilities.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            block: None,
            max_damage: 0,
            repairable: false,
            fuel: false,
            value_capacity: None,
        }
    }

    /// Marks the item as placing `material`.
    #[must_use]
    pub const fn placing(mut self, material: MaterialId) -> Self {
        self.block = Some(material);
        self
    }

    /// Makes the item damageable.
    #[must_use]
    pub const fn with_durability(mut self, max_damage: u32, repairable: bool) -> Self {
        self.max_damage = max_damage;
        self.repairable = repairable;
        self
    }

    /// Marks the item as fuel.
    #[must_use]
    pub const fn as_fuel(mut self) -> Self {
        self.fuel = true;
        self
    }

    /// Makes the item a value store of the given capacity.
    #[must_use]
    pub const fn storing(mut self, capacity: u64) -> Self {
        self.value_capacity = Some(capacity);
        self
    }

    /// True if the item can take damage.
    #[inline]
    #[must_use]
    pub const fn is_damageable(&self) -> bool {
        self.max_damage > 0
    }
}

/// Registry of every known item type.
#[derive(Clone, Debug, Default)]
pub struct ItemRegistry {
    kinds: HashMap<ItemId, ItemKind>,
    by_material: HashMap<MaterialId, ItemId>,
}

impl ItemRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item type.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the id is reserved or taken,
    /// or if another item already places the same material.
    pub fn register(&mut self, kind: ItemKind) -> EconomyResult<()> {
        if kind.id == EMPTY_ITEM {
            return Err(EconomyError::InvalidConfig(format!(
                "item '{}' uses the reserved id 0",
                kind.name
            )));
        }
        if self.kinds.contains_key(&kind.id) {
            return Err(EconomyError::InvalidConfig(format!(
                "item ID {} already exists",
                kind.id
            )));
        }
        if let Some(material) = kind.block {
            if material == Material::AIR.id {
                return Err(EconomyError::InvalidConfig(format!(
                    "item '{}' cannot place air",
                    kind.name
                )));
            }
            if let Some(existing) = self.by_material.insert(material, kind.id) {
                return Err(EconomyError::InvalidConfig(format!(
                    "material {material} is placed by both item {existing} and item {}",
                    kind.id
                )));
            }
        }

        self.kinds.insert(kind.id, kind);
        Ok(())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Looks up an item type.
    #[inline]
    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&ItemKind> {
        self.kinds.get(&item)
    }

    /// True if the stack's type can take damage.
    #[must_use]
    pub fn is_damageable(&self, stack: &ItemStack) -> bool {
        self.get(stack.item).is_some_and(ItemKind::is_damageable)
    }

    /// True if the stack's type can be repaired.
    #[must_use]
    pub fn is_repairable(&self, stack: &ItemStack) -> bool {
        self.get(stack.item)
            .is_some_and(|kind| kind.repairable && kind.is_damageable())
    }

    /// Maximum damage of the stack's type (0 when not damageable or unknown).
    #[must_use]
    pub fn max_damage(&self, stack: &ItemStack) -> u32 {
        self.get(stack.item).map_or(0, |kind| kind.max_damage)
    }

    /// True if the stack may be burned as fuel.
    #[must_use]
    pub fn is_fuel(&self, stack: &ItemStack) -> bool {
        !stack.is_empty() && self.get(stack.item).is_some_and(|kind| kind.fuel)
    }

    /// Value-storage capability of the stack, if its type has one.
    #[must_use]
    pub fn value_storage(&self, stack: &ItemStack) -> Option<ValueCell> {
        if stack.is_empty() {
            return None;
        }
        self.get(stack.item)
            .and_then(|kind| kind.value_capacity)
            .map(ValueCell::new)
    }

    /// Material a stack places, or `None` if it places nothing.
    #[must_use]
    pub fn stack_to_material(&self, stack: &ItemStack) -> Option<Material> {
        if stack.is_empty() {
            return None;
        }
        let block = self.get(stack.item)?.block?;
        let meta = u16::try_from(stack.damage).ok()?;
        Some(Material::with_meta(block, meta))
    }

    /// Single-item stack standing for a material, or `None` if no item
    /// places it.
    #[must_use]
    pub fn material_to_stack(&self, material: Material) -> Option<ItemStack> {
        if material.is_air() {
            return None;
        }
        self.by_material
            .get(&material.id)
            .map(|&item| ItemStack::new(item, 1).with_damage(u32::from(material.meta)))
    }
}
