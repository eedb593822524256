//! # ALCHEMIA Transmutation
//!
//! Area placement and material exchange paid for in EMC.
//!
//! ## Flow
//!
//! 1. [`TransmutationTool`] holds a charged value store and a target item
//! 2. [`RegionPlanner`] turns the clicked face and look into a box of cells
//! 3. [`TransmutationExecutor`] walks the box, asking the [`Environment`]
//!    for each change and settling EMC only after it succeeded
//!
//! ## Example
//!
//! ```rust,ignore
//! use alchemia_transmutation::{Interaction, TransmutationExecutor, VoxelWorld};
//!
//! let interaction = Interaction::new(player, clicked, Facing::Up, look);
//! let result = TransmutationExecutor::new(&engine)
//!     .use_on_block(&mut tool, &interaction, &mut world, &mut feedback);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod container;
pub mod environment;
pub mod error;
pub mod executor;
pub mod region;
pub mod tool;
pub mod world;

pub use container::{AttachedInventory, CONTAINER_SLOTS, SOURCE_SLOT, TARGET_SLOT};
pub use environment::{ActorId, Environment};
pub use error::{TransmutationError, TransmutationResult};
pub use executor::{TransmutationExecutor, TransmutationReport};
pub use region::{LookPitch, Mode, PlanRequest, Region, RegionPlanner};
pub use tool::{ActionResult, Interaction, TransmutationConfig, TransmutationTool};
pub use world::{Side, VoxelWorld};
