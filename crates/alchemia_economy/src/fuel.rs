//! # Fuel Ledger
//!
//! Raises a required amount of EMC from an agent's inventory.
//!
//! ## Selection
//!
//! ```text
//! scan slots in order
//!   value store holding >= requirement?  -> withdraw from it alone, done
//!   fuel item while still short?         -> plan ceil(gap / unit value) units
//! plan covers requirement?               -> extract every planned unit
//! otherwise                              -> InsufficientFuel, nothing touched
//! ```
//!
//! The first value store that can pay alone always wins over a liquidation
//! plan, even one built from earlier slots. Excess EMC from the last
//! liquidated stack is not refunded.

use tracing::{debug, warn};

use crate::error::{EconomyError, EconomyResult};
use crate::inventory::Inventory;
use crate::storage::ValueStorage;
use crate::valuation::ValuationEngine;

/// Who is paying: an inventory, plus whether they pay at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Agent {
    /// Items the agent carries.
    pub inventory: Inventory,
    /// Unlimited-resource mode: every requirement is met for free.
    pub unlimited: bool,
}

impl Agent {
    /// Creates a paying agent.
    #[must_use]
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            unlimited: false,
        }
    }

    /// Creates an agent exempt from paying.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            inventory: Inventory::new(),
            unlimited: true,
        }
    }
}

/// One stack that may be burned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuelCandidate {
    /// Inventory slot.
    pub slot: usize,
    /// EMC per unit.
    pub unit_value: u64,
    /// Units in the slot.
    pub available: u32,
}

/// What the ledger decided to take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FuelSelection {
    /// A single value store pays the whole requirement.
    Store {
        /// Slot of the value store.
        slot: usize,
    },
    /// Burn these units. `raised` may exceed the requirement.
    Burn {
        /// `(candidate, units)` in slot order.
        entries: Vec<(FuelCandidate, u32)>,
        /// EMC the plan raises.
        raised: u64,
    },
    /// Everything together falls short.
    Insufficient {
        /// EMC the whole inventory could raise.
        available: u64,
    },
}

/// Liquidates inventories against a valuation engine.
#[derive(Clone, Copy, Debug)]
pub struct FuelLedger<'a> {
    engine: &'a ValuationEngine,
}

impl<'a> FuelLedger<'a> {
    /// Creates a ledger.
    #[must_use]
    pub const fn new(engine: &'a ValuationEngine) -> Self {
        Self { engine }
    }

    /// Decides how `minimum` EMC would be raised, without touching anything.
    #[must_use]
    pub fn select(&self, inventory: &Inventory, minimum: u64) -> FuelSelection {
        let registry = self.engine.registry();
        let mut entries = Vec::new();
        let mut raised = 0u64;

        for (slot, stack) in inventory.iter() {
            if stack.is_empty() {
                continue;
            }

            if let Some(cell) = registry.value_storage(stack) {
                if cell.stored_value(stack) >= minimum {
                    return FuelSelection::Store { slot };
                }
                continue;
            }

            if raised >= minimum || !registry.is_fuel(stack) {
                continue;
            }

            let unit_value = self.engine.value_of(stack);
            if unit_value == 0 {
                continue;
            }

            let candidate = FuelCandidate {
                slot,
                unit_value,
                available: stack.count,
            };
            let needed = (minimum - raised).div_ceil(unit_value);
            let units = u32::try_from(needed)
                .map_or(candidate.available, |n| n.min(candidate.available));
            raised = raised.saturating_add(unit_value.saturating_mul(u64::from(units)));
            entries.push((candidate, units));
        }

        if raised >= minimum {
            FuelSelection::Burn { entries, raised }
        } else {
            FuelSelection::Insufficient { available: raised }
        }
    }

    /// Consumes at least `minimum` EMC from the agent and returns the amount
    /// actually consumed.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InsufficientFuel` if the inventory cannot cover
    /// the requirement, or if a planned extraction fails. The inventory is
    /// unchanged in both cases.
    pub fn consume(&self, agent: &mut Agent, minimum: u64) -> EconomyResult<u64> {
        if agent.unlimited || minimum == 0 {
            return Ok(minimum);
        }

        match self.select(&agent.inventory, minimum) {
            FuelSelection::Store { slot } => self.withdraw_from_store(agent, slot, minimum),
            FuelSelection::Burn { entries, raised } => {
                Self::burn(&mut agent.inventory, &entries, minimum)?;
                debug!(
                    "Burned {} fuel stacks for {} EMC (required {})",
                    entries.len(),
                    raised,
                    minimum
                );
                Ok(raised)
            }
            FuelSelection::Insufficient { available } => {
                debug!("Fuel short: need {}, inventory holds {}", minimum, available);
                Err(EconomyError::InsufficientFuel {
                    required: minimum,
                    available,
                })
            }
        }
    }

    fn withdraw_from_store(
        &self,
        agent: &mut Agent,
        slot: usize,
        minimum: u64,
    ) -> EconomyResult<u64> {
        let capacity = agent.inventory.capacity();
        let stack = agent
            .inventory
            .get_mut(slot)
            .ok_or(EconomyError::SlotOutOfRange { slot, capacity })?;
        let cell = self
            .engine
            .registry()
            .value_storage(stack)
            .ok_or(EconomyError::NotAValueStore(stack.item))?;

        if !cell.withdraw(stack, minimum) {
            return Err(EconomyError::InsufficientFuel {
                required: minimum,
                available: cell.stored_value(stack),
            });
        }
        debug!("Withdrew {} EMC from value store in slot {}", minimum, slot);
        Ok(minimum)
    }

    /// Extracts every planned unit, or nothing at all.
    fn burn(
        inventory: &mut Inventory,
        entries: &[(FuelCandidate, u32)],
        minimum: u64,
    ) -> EconomyResult<()> {
        let snapshot = inventory.snapshot();
        for (candidate, units) in entries {
            if let Err(err) = inventory.extract(candidate.slot, *units) {
                warn!("Fuel extraction failed, rolling back: {}", err);
                inventory.restore(&snapshot);
                return Err(EconomyError::InsufficientFuel {
                    required: minimum,
                    available: 0,
                });
            }
        }
        Ok(())
    }
}
