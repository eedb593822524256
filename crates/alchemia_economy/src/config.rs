//! # Economy Configuration
//!
//! All balance data lives in external TOML and is loaded once at startup.
//!
//! ```toml
//! covalence_loss = 1.0
//! enchantment_bonus = 5000
//!
//! [[items]]
//! id = 1
//! name = "stone"
//! block = 1
//!
//! [[values]]
//! item = 1
//! value = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use alchemia_shared::ENCHANTMENT_EMC_BONUS;

use crate::error::{EconomyError, EconomyResult};
use crate::item::{ItemId, ValuationKey};
use crate::registry::{ItemKind, ItemRegistry};
use crate::valuation::{ValuationEngine, ValuationTable};

/// A configured `(item, damage) -> value` mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueEntry {
    /// Item type.
    pub item: ItemId,
    /// Damage / variant.
    #[serde(default)]
    pub damage: u32,
    /// Base EMC value.
    pub value: u64,
}

/// Top-level economy configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Fraction of value kept when selling, in `(0, 1]`.
    #[serde(default = "default_covalence_loss")]
    pub covalence_loss: f64,
    /// Numerator of the per-enchantment bonus.
    #[serde(default = "default_enchantment_bonus")]
    pub enchantment_bonus: u64,
    /// Item type definitions.
    #[serde(default)]
    pub items: Vec<ItemKind>,
    /// Base values.
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

const fn default_covalence_loss() -> f64 {
    1.0
}

const fn default_enchantment_bonus() -> u64 {
    ENCHANTMENT_EMC_BONUS
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            covalence_loss: default_covalence_loss(),
            enchantment_bonus: default_enchantment_bonus(),
            items: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl EconomyConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` on malformed TOML.
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        toml::from_str(text).map_err(|e| EconomyError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::ConfigRead` if the file cannot be read, or
    /// `EconomyError::InvalidConfig` on malformed TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EconomyError::ConfigRead(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Validates the configuration and builds the read-only valuation engine.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` for duplicate items or values,
    /// values for unknown items, or an out-of-range loss factor.
    pub fn into_engine(self) -> EconomyResult<ValuationEngine> {
        let mut registry = ItemRegistry::new();
        for kind in self.items {
            registry.register(kind)?;
        }

        let mut table = ValuationTable::new();
        for entry in &self.values {
            if registry.get(entry.item).is_none() {
                return Err(EconomyError::InvalidConfig(format!(
                    "value given for unknown item {}",
                    entry.item
                )));
            }
            table.insert(ValuationKey::new(entry.item, entry.damage), entry.value)?;
        }

        let items = registry.len();
        let values = table.len();
        let engine = ValuationEngine::new(registry, table)
            .with_enchantment_bonus(self.enchantment_bonus)
            .with_loss_factor(self.covalence_loss)?;

        info!(
            "Loaded economy config: {} items, {} values, covalence loss {}",
            items,
            values,
            engine.loss_factor()
        );
        Ok(engine)
    }
}
