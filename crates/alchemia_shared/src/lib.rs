//! # ALCHEMIA Shared
//!
//! Common types used by the economy and the transmutation crates.
//!
//! - [`math`]: block grid positions, axes, facings and look vectors
//! - [`material`]: what occupies a grid cell
//! - [`constants`]: tuning constants baked into the engine
//! - [`events`]: fire-and-forget presentation feedback

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod events;
pub mod material;
pub mod math;

pub use constants::{ENCHANTMENT_EMC_BONUS, KLEIN_STAR_CAPACITIES, LOOK_VERTICAL_THRESHOLD};
pub use events::{EffectId, FeedbackEvent, FeedbackLog, FeedbackSink};
pub use material::{Material, MaterialId};
pub use math::{Axis, BlockPos, Facing, Vec3};
