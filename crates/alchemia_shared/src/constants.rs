//! # Engine Constants
//!
//! Tuning values baked into the engine.
//!
//! **CRITICAL:** Valuation results depend on these numbers. Changing one
//! changes the value of every enchanted item in the world.

// =============================================================================
// VALUATION
// =============================================================================

/// Numerator of the per-enchantment bonus: `bonus / rarity_weight * level`.
pub const ENCHANTMENT_EMC_BONUS: u64 = 5000;

/// Rarity weight of a common enchantment.
pub const RARITY_WEIGHT_COMMON: u32 = 10;

/// Rarity weight of an uncommon enchantment.
pub const RARITY_WEIGHT_UNCOMMON: u32 = 5;

/// Rarity weight of a rare enchantment.
pub const RARITY_WEIGHT_RARE: u32 = 2;

/// Rarity weight of a very rare enchantment.
pub const RARITY_WEIGHT_VERY_RARE: u32 = 1;

/// Capacity of each stock value store (Klein star) tier, smallest first.
pub const KLEIN_STAR_CAPACITIES: [u64; 6] = [
    50_000,
    200_000,
    800_000,
    3_200_000,
    12_800_000,
    51_200_000,
];

// =============================================================================
// TRANSMUTATION
// =============================================================================

/// Vertical look component beyond which a player counts as looking straight
/// up or down: sin(45°).
pub const LOOK_VERTICAL_THRESHOLD: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Number of charge tiers on the stock transmutation tool.
pub const DEFAULT_MAX_CHARGE: u8 = 4;

/// Pitch of the power feedback at charge zero.
pub const FEEDBACK_BASE_PITCH: f32 = 0.80;

/// Pitch added across the full charge range.
pub const FEEDBACK_PITCH_RANGE: f32 = 0.20;

/// Volume of the power feedback.
pub const FEEDBACK_VOLUME: f32 = 1.0;
