//! # Transmutation Error Types

use thiserror::Error;

use alchemia_economy::EconomyError;

/// Reasons a transmutation cannot start. None of them mutate anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransmutationError {
    /// A container slot is empty.
    #[error("container slot {slot} is empty")]
    MissingItem {
        /// The empty slot.
        slot: usize,
    },

    /// The source slot holds an item that cannot store EMC.
    #[error("source item cannot store EMC")]
    NotAValueStore,

    /// The target slot does not place a material (or places air).
    #[error("target item does not place a material")]
    NoTargetMaterial,

    /// Underlying economy failure.
    #[error(transparent)]
    Economy(#[from] EconomyError),
}

/// Result type for transmutation operations.
pub type TransmutationResult<T> = Result<T, TransmutationError>;
