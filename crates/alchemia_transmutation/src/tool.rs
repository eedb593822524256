//! # Transmutation Tool
//!
//! The item the player holds: an operating mode, a charge level and the
//! attached two-slot container.

use serde::{Deserialize, Serialize};

use alchemia_economy::{EconomyError, EconomyResult};
use alchemia_shared::constants::DEFAULT_MAX_CHARGE;
use alchemia_shared::{Axis, BlockPos, Facing, Vec3};

use crate::container::AttachedInventory;
use crate::environment::ActorId;
use crate::error::TransmutationResult;
use crate::region::{Mode, PlanRequest};

/// Tool tuning, loaded from TOML at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmutationConfig {
    /// Highest charge level (region radius).
    #[serde(default = "default_max_charge")]
    pub max_charge: u8,
}

const fn default_max_charge() -> u8 {
    DEFAULT_MAX_CHARGE
}

impl Default for TransmutationConfig {
    fn default() -> Self {
        Self {
            max_charge: DEFAULT_MAX_CHARGE,
        }
    }
}

impl TransmutationConfig {
    /// Parses the tool configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` on malformed TOML.
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        toml::from_str(text).map_err(|e| EconomyError::InvalidConfig(e.to_string()))
    }
}

/// Outcome reported to whoever triggered the interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionResult {
    /// The interaction was handled.
    Success,
    /// The interaction could not start.
    Fail,
}

/// A player using the tool on a block face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    /// Who is acting.
    pub actor: ActorId,
    /// Clicked cell.
    pub target: BlockPos,
    /// Clicked face.
    pub face: Facing,
    /// Look direction.
    pub look: Vec3,
    /// Horizontal axis the player faces along.
    pub horizontal_axis: Axis,
    /// Where the player stands, for feedback.
    pub origin: Vec3,
}

impl Interaction {
    /// Creates an interaction, deriving the horizontal axis from `look` and
    /// placing the player just outside the clicked face.
    #[must_use]
    pub fn new(actor: ActorId, target: BlockPos, face: Facing, look: Vec3) -> Self {
        Self {
            actor,
            target,
            face,
            look,
            horizontal_axis: Axis::horizontal_from_look(look),
            origin: target.step(face).center(),
        }
    }

    /// Overrides the player's horizontal axis.
    #[must_use]
    pub const fn with_horizontal_axis(mut self, axis: Axis) -> Self {
        self.horizontal_axis = axis;
        self
    }

    /// Overrides the player's position.
    #[must_use]
    pub const fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }
}

#[derive(Serialize, Deserialize)]
struct PersistedTool {
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    charge: u8,
    #[serde(default)]
    container: String,
}

/// The held transmutation tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransmutationTool {
    mode: Mode,
    charge: u8,
    max_charge: u8,
    container: AttachedInventory,
}

impl TransmutationTool {
    /// Creates an empty tool in normal mode at charge 0.
    #[must_use]
    pub fn new(config: TransmutationConfig) -> Self {
        Self {
            mode: Mode::Normal,
            charge: 0,
            max_charge: config.max_charge,
            container: AttachedInventory::new(),
        }
    }

    /// Replaces the attached container.
    #[must_use]
    pub fn with_container(mut self, container: AttachedInventory) -> Self {
        self.container = container;
        self
    }

    /// Sets the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the charge, clamped to the maximum.
    #[must_use]
    pub fn with_charge(mut self, charge: u8) -> Self {
        self.charge = charge.min(self.max_charge);
        self
    }

    /// Current mode.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches to the other mode and returns it.
    pub fn cycle_mode(&mut self) -> Mode {
        self.mode = self.mode.next();
        self.mode
    }

    /// Current charge.
    #[inline]
    #[must_use]
    pub const fn charge(&self) -> u8 {
        self.charge
    }

    /// Highest charge.
    #[inline]
    #[must_use]
    pub const fn max_charge(&self) -> u8 {
        self.max_charge
    }

    /// Raises the charge by one. Returns false at the maximum.
    pub fn increase_charge(&mut self) -> bool {
        if self.charge >= self.max_charge {
            return false;
        }
        self.charge += 1;
        true
    }

    /// Lowers the charge by one. Returns false at zero.
    pub fn decrease_charge(&mut self) -> bool {
        if self.charge == 0 {
            return false;
        }
        self.charge -= 1;
        true
    }

    /// The attached container.
    #[inline]
    #[must_use]
    pub const fn container(&self) -> &AttachedInventory {
        &self.container
    }

    /// Mutable access to the attached container.
    #[inline]
    pub fn container_mut(&mut self) -> &mut AttachedInventory {
        &mut self.container
    }

    /// Saves mode, charge and container as an opaque string.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Persistence` (wrapped) if serialization fails.
    pub fn persist(&self) -> TransmutationResult<String> {
        let state = PersistedTool {
            mode: self.mode,
            charge: self.charge,
            container: self.container.persist()?,
        };
        let text = toml::to_string(&state).map_err(|e| EconomyError::Persistence(e.to_string()))?;
        Ok(text)
    }

    /// Rebuilds a tool from [`persist`](Self::persist) output. The charge is
    /// clamped to the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Persistence` (wrapped) on malformed data.
    pub fn restore(config: TransmutationConfig, data: &str) -> TransmutationResult<Self> {
        let state: PersistedTool =
            toml::from_str(data).map_err(|e| EconomyError::Persistence(e.to_string()))?;
        let container = AttachedInventory::restore(&state.container)?;
        Ok(Self::new(config)
            .with_container(container)
            .with_mode(state.mode)
            .with_charge(state.charge))
    }

    /// Planner input for an interaction with this tool.
    #[must_use]
    pub const fn plan_request(&self, interaction: &Interaction) -> PlanRequest {
        PlanRequest {
            center: interaction.target,
            face: interaction.face,
            look: interaction.look,
            horizontal_axis: interaction.horizontal_axis,
            mode: self.mode,
            charge: self.charge,
        }
    }
}

impl Default for TransmutationTool {
    fn default() -> Self {
        Self::new(TransmutationConfig::default())
    }
}
