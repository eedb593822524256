//! # ALCHEMIA Economy System
//!
//! Pure Rust EMC logic for the ALCHEMIA engine.
//!
//! ## Design Principles
//!
//! 1. **Integer EMC** - All values are `u64`; every sum and product is checked,
//!    and the sell loss is fixed-point
//! 2. **Read-only valuation** - Tables are built once from TOML and never change
//! 3. **All-or-nothing fuel** - An inventory is liquidated completely or not at all
//! 4. **Value travels with items** - Stored EMC lives in the item's own data
//!
//! ## Example
//!
//! ```rust,ignore
//! use alchemia_economy::{Agent, EconomyConfig, FuelLedger, ItemStack};
//!
//! let engine = EconomyConfig::from_toml_file("data/economy.toml")?.into_engine()?;
//! let value = engine.value_of(&ItemStack::new(DIAMOND, 1));
//!
//! let consumed = FuelLedger::new(&engine).consume(&mut agent, 64)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod fixed_point;
pub mod fuel;
pub mod inventory;
pub mod item;
pub mod registry;
pub mod storage;
pub mod valuation;

pub use config::{EconomyConfig, ValueEntry};
pub use error::{EconomyError, EconomyResult};
pub use fixed_point::{LossFactor, LOSS_SCALE};
pub use fuel::{Agent, FuelCandidate, FuelLedger, FuelSelection};
pub use inventory::{Inventory, InventorySnapshot, PLAYER_INVENTORY_SLOTS};
pub use item::{Enchantment, ItemData, ItemId, ItemStack, ValuationKey, EMPTY_ITEM};
pub use registry::{ItemKind, ItemRegistry};
pub use storage::{klein_star_capacity, ValueCell, ValueStorage};
pub use valuation::{format_emc, ValuationEngine, ValuationTable};
