//! # Item Model
//!
//! Item stacks as they sit in inventories and containers, plus the
//! normalized key the valuation table is indexed by.

use serde::{Deserialize, Serialize};

use alchemia_shared::constants::{
    RARITY_WEIGHT_COMMON, RARITY_WEIGHT_RARE, RARITY_WEIGHT_UNCOMMON, RARITY_WEIGHT_VERY_RARE,
};

/// Unique identifier for an item type. `0` is reserved for "nothing".
pub type ItemId = u32;

/// The reserved empty item id.
pub const EMPTY_ITEM: ItemId = 0;

/// An enchantment attached to an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// Enchantment type.
    pub id: u16,
    /// How common the enchantment is. Higher is more common; 0 is unweighted.
    pub rarity_weight: u32,
    /// Enchantment level, 1-based.
    pub level: u32,
}

impl Enchantment {
    /// Creates an enchantment with an explicit rarity weight.
    #[must_use]
    pub const fn new(id: u16, rarity_weight: u32, level: u32) -> Self {
        Self {
            id,
            rarity_weight,
            level,
        }
    }

    /// Common enchantment.
    #[must_use]
    pub const fn common(id: u16, level: u32) -> Self {
        Self::new(id, RARITY_WEIGHT_COMMON, level)
    }

    /// Uncommon enchantment.
    #[must_use]
    pub const fn uncommon(id: u16, level: u32) -> Self {
        Self::new(id, RARITY_WEIGHT_UNCOMMON, level)
    }

    /// Rare enchantment.
    #[must_use]
    pub const fn rare(id: u16, level: u32) -> Self {
        Self::new(id, RARITY_WEIGHT_RARE, level)
    }

    /// Very rare enchantment.
    #[must_use]
    pub const fn very_rare(id: u16, level: u32) -> Self {
        Self::new(id, RARITY_WEIGHT_VERY_RARE, level)
    }
}

/// Persistent data attached to a stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemData {
    /// Explicit EMC held by the item. Value stores keep their balance here.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "emc_text")]
    pub stored_emc: Option<u64>,
    /// Enchantments, in application order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enchantments: Vec<Enchantment>,
}

/// Stored EMC travels as decimal text: TOML integers stop at `i64::MAX`,
/// stored values do not. Plain integers are still accepted on input.
mod emc_text {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(emc) => serializer.serialize_str(&emc.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Number(emc)) => Ok(Some(emc)),
            Some(Repr::Text(text)) => text.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

impl ItemData {
    /// True when nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enchantments.is_empty() && self.stored_emc.is_none()
    }
}

/// A stack of items in an inventory slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// The item type ID, or 0 for empty slot.
    pub item: ItemId,
    /// Number of items in this stack.
    pub count: u32,
    /// Damage taken (tools) or variant (blocks).
    #[serde(default)]
    pub damage: u32,
    /// Attached persistent data.
    #[serde(default, skip_serializing_if = "ItemData::is_empty")]
    pub data: ItemData,
}

impl ItemStack {
    /// Creates an empty item stack.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new undamaged item stack.
    #[inline]
    #[must_use]
    pub fn new(item: ItemId, count: u32) -> Self {
        Self {
            item,
            count,
            damage: 0,
            data: ItemData::default(),
        }
    }

    /// Sets the damage / variant.
    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Adds an enchantment.
    #[must_use]
    pub fn with_enchantment(mut self, enchantment: Enchantment) -> Self {
        self.data.enchantments.push(enchantment);
        self
    }

    /// Sets the explicit stored EMC.
    #[must_use]
    pub fn with_stored_emc(mut self, emc: u64) -> Self {
        self.data.stored_emc = Some(emc);
        self
    }

    /// Returns true if this slot is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0 || self.item == EMPTY_ITEM
    }

    /// Copy of this stack with a count of one.
    #[must_use]
    pub fn single(&self) -> Self {
        Self {
            count: 1,
            ..self.clone()
        }
    }

    /// Clears this slot.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Key of the exact `(type, damage)` valuation bucket.
    #[inline]
    #[must_use]
    pub const fn valuation_key(&self) -> ValuationKey {
        ValuationKey::new(self.item, self.damage)
    }
}

/// Normalized `(type, damage)` lookup key. Count and attached data never
/// take part in valuation lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValuationKey {
    /// Item type.
    pub item: ItemId,
    /// Damage / variant.
    pub damage: u32,
}

impl ValuationKey {
    /// Creates a key.
    #[inline]
    #[must_use]
    pub const fn new(item: ItemId, damage: u32) -> Self {
        Self { item, damage }
    }

    /// The undamaged bucket of the same type.
    #[inline]
    #[must_use]
    pub const fn undamaged(self) -> Self {
        Self::new(self.item, 0)
    }
}
