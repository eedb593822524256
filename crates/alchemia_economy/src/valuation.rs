//! # Valuation Engine
//!
//! Maps any item stack to its EMC value.
//!
//! ## Lookup Order
//!
//! 1. Exact `(type, damage)` entry: base value plus bonuses.
//! 2. Damageable item with only a `(type, 0)` entry: the base value scaled
//!    by remaining durability, plus bonuses, never less than 1.
//! 3. Anything else is worth 0.
//!
//! ## Overflow
//!
//! All arithmetic is checked `u64`. An overflowing step is discarded and the
//! undamaged base value is returned instead. Overflow is never an error.

use std::collections::HashMap;

use alchemia_shared::{Material, ENCHANTMENT_EMC_BONUS};

use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::LossFactor;
use crate::item::{ItemStack, ValuationKey};
use crate::registry::ItemRegistry;
use crate::storage::ValueStorage;

/// Base values keyed by normalized `(type, damage)`.
#[derive(Clone, Debug, Default)]
pub struct ValuationTable {
    entries: HashMap<ValuationKey, u64>,
}

impl ValuationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the key already has a value.
    pub fn insert(&mut self, key: ValuationKey, value: u64) -> EconomyResult<()> {
        if self.entries.insert(key, value).is_some() {
            return Err(EconomyError::InvalidConfig(format!(
                "duplicate value for item {} damage {}",
                key.item, key.damage
            )));
        }
        Ok(())
    }

    /// Base value of an exact key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: ValuationKey) -> Option<u64> {
        self.entries.get(&key).copied()
    }

    /// True if the exact key has a value.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: ValuationKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stateless valuation over a read-only registry and table.
#[derive(Clone, Debug)]
pub struct ValuationEngine {
    registry: ItemRegistry,
    table: ValuationTable,
    loss_factor: LossFactor,
    enchantment_bonus: u64,
}

impl ValuationEngine {
    /// Creates an engine with no sell loss and the stock enchantment bonus.
    #[must_use]
    pub fn new(registry: ItemRegistry, table: ValuationTable) -> Self {
        Self {
            registry,
            table,
            loss_factor: LossFactor::LOSSLESS,
            enchantment_bonus: ENCHANTMENT_EMC_BONUS,
        }
    }

    /// Sets the fraction of value kept when selling.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` unless `0 < loss_factor <= 1`.
    pub fn with_loss_factor(mut self, loss_factor: f64) -> EconomyResult<Self> {
        self.loss_factor = LossFactor::from_decimal(loss_factor)?;
        Ok(self)
    }

    /// Sets the enchantment bonus numerator.
    #[must_use]
    pub const fn with_enchantment_bonus(mut self, bonus: u64) -> Self {
        self.enchantment_bonus = bonus;
        self
    }

    /// Item registry the engine values against.
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Base value table.
    #[inline]
    #[must_use]
    pub const fn table(&self) -> &ValuationTable {
        &self.table
    }

    /// Fraction of value kept when selling.
    #[inline]
    #[must_use]
    pub const fn loss_factor(&self) -> LossFactor {
        self.loss_factor
    }

    /// EMC value of one unit of `stack`. Stack size is ignored.
    #[must_use]
    pub fn value_of(&self, stack: &ItemStack) -> u64 {
        if stack.is_empty() {
            return 0;
        }

        let key = stack.valuation_key();
        if let Some(base) = self.table.get(key) {
            return self.with_bonuses(base, stack).unwrap_or(base);
        }

        if !self.registry.is_damageable(stack) {
            return 0;
        }

        match self.table.get(key.undamaged()) {
            Some(base) => self.interpolate(base, stack),
            None => 0,
        }
    }

    /// Valuation of one unit of a world material.
    #[must_use]
    pub fn value_of_material(&self, material: Material) -> u64 {
        self.registry
            .material_to_stack(material)
            .map_or(0, |stack| self.value_of(&stack))
    }

    /// True if `stack` has a value entry, directly or through its undamaged
    /// bucket.
    #[must_use]
    pub fn has_value(&self, stack: &ItemStack) -> bool {
        if stack.is_empty() {
            return false;
        }
        let key = stack.valuation_key();
        self.table.contains(key)
            || (self.registry.is_damageable(stack) && self.table.contains(key.undamaged()))
    }

    /// True if the material stands for an item with a value entry.
    #[must_use]
    pub fn material_has_value(&self, material: Material) -> bool {
        self.registry
            .material_to_stack(material)
            .is_some_and(|stack| self.has_value(&stack))
    }

    /// Value received when selling one unit: the loss factor applied, but
    /// never below 1 for an item that is worth anything.
    #[must_use]
    pub fn sell_value(&self, stack: &ItemStack) -> u64 {
        let value = self.value_of(stack);
        if value == 0 {
            return 0;
        }
        self.loss_factor.apply(value).max(1)
    }

    /// Tooltip suffix with the sell value of `stack_size` units.
    ///
    /// Returns a single space when selling is lossless.
    #[must_use]
    pub fn sell_value_label(&self, stack: &ItemStack, stack_size: u32) -> String {
        if self.loss_factor.is_lossless() {
            return " ".to_string();
        }
        let total = self
            .sell_value(stack)
            .saturating_mul(u64::from(stack_size));
        format!(" ({})", format_emc(total))
    }

    /// EMC one point of durability is worth when repairing.
    #[must_use]
    pub fn value_per_durability(&self, stack: &ItemStack) -> u64 {
        if stack.is_empty() {
            return 0;
        }
        if !self.registry.is_repairable(stack) {
            return 1;
        }
        let undamaged = stack.clone().with_damage(0);
        let max_damage = u64::from(self.registry.max_damage(stack));
        self.value_of(&undamaged).div_ceil(max_damage).max(1)
    }

    /// Sum of `bonus / rarity_weight * level` over all enchantments.
    /// `None` on overflow.
    fn enchantment_bonus(&self, stack: &ItemStack) -> Option<u64> {
        stack
            .data
            .enchantments
            .iter()
            .filter(|ench| ench.rarity_weight != 0)
            .try_fold(0u64, |total, ench| {
                let per_level = self.enchantment_bonus / u64::from(ench.rarity_weight);
                total.checked_add(per_level.checked_mul(u64::from(ench.level))?)
            })
    }

    /// Explicit stored EMC, or the balance of a value store.
    fn stored_value_bonus(&self, stack: &ItemStack) -> u64 {
        if let Some(stored) = stack.data.stored_emc {
            return stored;
        }
        self.registry
            .value_storage(stack)
            .map_or(0, |cell| cell.stored_value(stack))
    }

    /// `base + enchantment bonus + stored bonus`, `None` on overflow.
    fn with_bonuses(&self, base: u64, stack: &ItemStack) -> Option<u64> {
        base.checked_add(self.enchantment_bonus(stack)?)?
            .checked_add(self.stored_value_bonus(stack))
    }

    /// Durability-scaled value of a damaged item with only an undamaged entry.
    fn interpolate(&self, base: u64, stack: &ItemStack) -> u64 {
        let max_damage = u64::from(self.registry.max_damage(stack));

        // An item at max damage still has one use left, hence the +1.
        let relative = (max_damage + 1).saturating_sub(u64::from(stack.damage));
        if relative == 0 {
            return base;
        }

        let scaled = match base.checked_mul(relative) {
            Some(0) | None => return base,
            Some(product) => product / max_damage,
        };

        let Some(with_enchants) = self
            .enchantment_bonus(stack)
            .and_then(|bonus| scaled.checked_add(bonus))
        else {
            return base;
        };
        let Some(result) = with_enchants.checked_add(self.stored_value_bonus(stack)) else {
            return base;
        };

        result.max(1)
    }
}

/// Formats an EMC amount with thousands separators.
#[must_use]
pub fn format_emc(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
