//! # Economy Error Types
//!
//! All errors that can occur in the economy system.

use thiserror::Error;

use crate::item::ItemId;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    ConfigRead(String),

    /// Slot index past the end of an inventory.
    #[error("slot {slot} out of range: capacity {capacity}")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots in the inventory.
        capacity: usize,
    },

    /// A slot held fewer items than a withdrawal asked for.
    #[error("cannot extract {requested} from slot {slot}: only {available} present")]
    ExtractionFailed {
        /// Slot that was drained.
        slot: usize,
        /// Units requested.
        requested: u32,
        /// Units present.
        available: u32,
    },

    /// Not enough fuel to cover a requirement. Nothing was consumed.
    #[error("insufficient fuel: need {required} EMC, could raise {available}")]
    InsufficientFuel {
        /// EMC required.
        required: u64,
        /// EMC the inventory could have raised.
        available: u64,
    },

    /// Item has no value-storage capability.
    #[error("item {0} cannot store EMC")]
    NotAValueStore(ItemId),

    /// Persisted state could not be written or read back.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
