//! # Value Storage
//!
//! EMC held inside an item. The balance lives in the stack's attached
//! data, so it travels with the item through inventories and persistence.

use alchemia_shared::KLEIN_STAR_CAPACITIES;

use crate::item::ItemStack;

/// Capability of an item to hold EMC.
pub trait ValueStorage {
    /// Current balance.
    fn stored_value(&self, stack: &ItemStack) -> u64;

    /// Largest balance the item can hold.
    fn max_stored_value(&self, stack: &ItemStack) -> u64;

    /// Adds up to `amount`, never exceeding capacity. Returns what was accepted.
    fn deposit(&self, stack: &mut ItemStack, amount: u64) -> u64;

    /// Removes exactly `amount`. Returns false and changes nothing if the
    /// balance is smaller; callers are expected to check first.
    fn withdraw(&self, stack: &mut ItemStack, amount: u64) -> bool;
}

/// Fixed-capacity value store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueCell {
    capacity: u64,
}

impl ValueCell {
    /// Creates a store of the given capacity.
    #[inline]
    #[must_use]
    pub const fn new(capacity: u64) -> Self {
        Self { capacity }
    }

    /// Capacity of this store.
    #[inline]
    #[must_use]
    pub const fn capacity(self) -> u64 {
        self.capacity
    }

    /// Room left before the store is full.
    #[must_use]
    pub fn headroom(&self, stack: &ItemStack) -> u64 {
        self.max_stored_value(stack)
            .saturating_sub(self.stored_value(stack))
    }
}

impl ValueStorage for ValueCell {
    fn stored_value(&self, stack: &ItemStack) -> u64 {
        stack.data.stored_emc.unwrap_or(0)
    }

    fn max_stored_value(&self, _stack: &ItemStack) -> u64 {
        self.capacity
    }

    fn deposit(&self, stack: &mut ItemStack, amount: u64) -> u64 {
        let accepted = amount.min(self.headroom(stack));
        if accepted > 0 {
            stack.data.stored_emc = Some(self.stored_value(stack) + accepted);
        }
        accepted
    }

    fn withdraw(&self, stack: &mut ItemStack, amount: u64) -> bool {
        let stored = self.stored_value(stack);
        if amount > stored {
            return false;
        }
        stack.data.stored_emc = Some(stored - amount);
        true
    }
}

/// Capacity of a stock value store (Klein star) tier.
///
/// Tiers past the largest one clamp to the largest capacity.
#[must_use]
pub fn klein_star_capacity(tier: usize) -> u64 {
    let last = KLEIN_STAR_CAPACITIES.len() - 1;
    KLEIN_STAR_CAPACITIES[tier.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_clamps_to_capacity() {
        let cell = ValueCell::new(100);
        let mut star = ItemStack::new(5, 1).with_stored_emc(90);

        assert_eq!(cell.deposit(&mut star, 25), 10);
        assert_eq!(cell.stored_value(&star), 100);
        assert_eq!(cell.deposit(&mut star, 5), 0);
        assert_eq!(cell.headroom(&star), 0);
    }

    #[test]
    fn test_withdraw_is_all_or_nothing() {
        let cell = ValueCell::new(100);
        let mut star = ItemStack::new(5, 1).with_stored_emc(30);

        assert!(!cell.withdraw(&mut star, 31));
        assert_eq!(cell.stored_value(&star), 30);
        assert!(cell.withdraw(&mut star, 30));
        assert_eq!(cell.stored_value(&star), 0);
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let cell = ValueCell::new(klein_star_capacity(0));
        let star = ItemStack::new(5, 1);
        assert_eq!(cell.stored_value(&star), 0);
        assert_eq!(cell.max_stored_value(&star), 50_000);
        assert_eq!(klein_star_capacity(99), 51_200_000);
    }
}
