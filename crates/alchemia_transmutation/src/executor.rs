//! # Transmutation Executor
//!
//! Walks a planned region and pays for every change out of the tool's
//! EMC source.
//!
//! ## Normal Mode
//!
//! Empty cells are filled with the target material at full price. The
//! first empty cell that cannot be paid for ends the whole traversal.
//!
//! ## Transmutation Mode
//!
//! Occupied cells are swapped for the target material:
//!
//! | cell value vs target | ledger                                  |
//! |----------------------|-----------------------------------------|
//! | higher               | difference deposited, capped at capacity |
//! | lower                | difference withdrawn, cell skipped if unaffordable |
//! | equal                | untouched                               |
//!
//! Cells that already hold the target, are empty, host attached state or
//! have no value are skipped.
//!
//! ## Ledger Safety
//!
//! EMC moves only after the environment accepted the change, so a refused
//! cell never costs anything.

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use alchemia_economy::{ItemStack, ValuationEngine, ValueCell, ValueStorage};
use alchemia_shared::constants::{FEEDBACK_BASE_PITCH, FEEDBACK_PITCH_RANGE, FEEDBACK_VOLUME};
use alchemia_shared::{BlockPos, EffectId, FeedbackEvent, FeedbackSink, Material};

use crate::container::{SOURCE_SLOT, TARGET_SLOT};
use crate::environment::{ActorId, Environment};
use crate::error::{TransmutationError, TransmutationResult};
use crate::region::{Mode, Region, RegionPlanner};
use crate::tool::{ActionResult, Interaction, TransmutationTool};

/// What one invocation did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransmutationReport {
    /// The region that was planned.
    pub region: Option<Region>,
    /// Cells examined before the traversal ended.
    pub visited: usize,
    /// Cells filled in normal mode.
    pub placed: usize,
    /// Cells swapped in transmutation mode.
    pub replaced: usize,
    /// Cells passed over without an attempt.
    pub skipped: usize,
    /// Cells the environment refused.
    pub refused: usize,
    /// Transmutation cells skipped for lack of EMC.
    pub unaffordable: usize,
    /// EMC taken from the source.
    pub withdrawn: u64,
    /// EMC added to the source.
    pub deposited: u64,
    /// Normal mode ran out of EMC before the region was finished.
    pub halted: bool,
}

/// Everything fixed for the duration of one traversal.
struct Ledger<'s> {
    source: &'s mut ItemStack,
    cell: ValueCell,
    available: u64,
    required: u64,
    target: Material,
    actor: ActorId,
}

impl Ledger<'_> {
    /// Callers check `available` before changing the world, and `available`
    /// mirrors the source balance, so the source can always pay.
    fn withdraw(&mut self, amount: u64, report: &mut TransmutationReport) {
        let paid = self.cell.withdraw(self.source, amount);
        debug_assert!(
            paid,
            "source balance {} out of sync with tracked {}",
            self.cell.stored_value(self.source),
            self.available
        );
        if paid {
            self.available -= amount;
            report.withdrawn += amount;
        } else {
            warn!(
                "Source refused withdrawal of {} EMC with {} tracked",
                amount, self.available
            );
        }
    }

    /// Balance according to the source itself.
    fn source_balance(&self) -> u64 {
        self.cell.stored_value(self.source)
    }

    fn deposit(&mut self, amount: u64, report: &mut TransmutationReport) {
        let accepted = self.cell.deposit(self.source, amount);
        self.available += accepted;
        report.deposited += accepted;
        if accepted < amount {
            trace!("Source full, discarded {} EMC", amount - accepted);
        }
    }
}

/// Drives region traversal against an environment.
#[derive(Clone, Copy, Debug)]
pub struct TransmutationExecutor<'a> {
    engine: &'a ValuationEngine,
}

impl<'a> TransmutationExecutor<'a> {
    /// Creates an executor valuing materials with `engine`.
    #[must_use]
    pub const fn new(engine: &'a ValuationEngine) -> Self {
        Self { engine }
    }

    /// Handles a player using the tool on a block face.
    ///
    /// On a mirror side nothing happens and the result is still
    /// [`ActionResult::Success`]. Precondition failures report
    /// [`ActionResult::Fail`] with no side effects.
    pub fn use_on_block<E, F>(
        &self,
        tool: &mut TransmutationTool,
        interaction: &Interaction,
        env: &mut E,
        feedback: &mut F,
    ) -> ActionResult
    where
        E: Environment + ?Sized,
        F: FeedbackSink + ?Sized,
    {
        if !env.is_authoritative() {
            return ActionResult::Success;
        }

        match self.execute(tool, interaction, env) {
            Ok(report) => {
                feedback.emit(Self::power_feedback(tool, interaction));
                debug!(
                    "Transmutation by {} at {}: visited {}, placed {}, replaced {}, -{} +{} EMC",
                    interaction.actor,
                    interaction.target,
                    report.visited,
                    report.placed,
                    report.replaced,
                    report.withdrawn,
                    report.deposited
                );
                ActionResult::Success
            }
            Err(err) => {
                debug!("Transmutation by {} refused: {}", interaction.actor, err);
                ActionResult::Fail
            }
        }
    }

    /// Runs one traversal.
    ///
    /// # Errors
    ///
    /// Returns a [`TransmutationError`] if either container slot is empty,
    /// the source cannot store EMC, or the target places no material. The
    /// world and the container are untouched in that case.
    pub fn execute<E>(
        &self,
        tool: &mut TransmutationTool,
        interaction: &Interaction,
        env: &mut E,
    ) -> TransmutationResult<TransmutationReport>
    where
        E: Environment + ?Sized,
    {
        let registry = self.engine.registry();
        let container = tool.container();

        let source = container.source();
        if source.is_empty() {
            return Err(TransmutationError::MissingItem { slot: SOURCE_SLOT });
        }
        let recipe = container.target();
        if recipe.is_empty() {
            return Err(TransmutationError::MissingItem { slot: TARGET_SLOT });
        }
        let cell = registry
            .value_storage(&source)
            .ok_or(TransmutationError::NotAValueStore)?;
        let target = registry
            .stack_to_material(&recipe)
            .filter(|material| !material.is_air())
            .ok_or(TransmutationError::NoTargetMaterial)?;

        let required = self.engine.value_of(&recipe.single());
        let region = RegionPlanner::plan(&tool.plan_request(interaction));
        let mode = tool.mode();

        let source = tool
            .container_mut()
            .slot_mut(SOURCE_SLOT)
            .ok_or(TransmutationError::MissingItem { slot: SOURCE_SLOT })?;
        let mut ledger = Ledger {
            available: cell.stored_value(source),
            source,
            cell,
            required,
            target,
            actor: interaction.actor,
        };

        let mut report = TransmutationReport {
            region: Some(region),
            ..TransmutationReport::default()
        };

        for pos in region.cells() {
            report.visited += 1;
            match mode {
                Mode::Normal => {
                    if !self.fill(env, pos, &mut ledger, &mut report) {
                        report.halted = true;
                        break;
                    }
                }
                Mode::Transmutation => self.swap(env, pos, &mut ledger, &mut report),
            }
        }

        debug_assert_eq!(ledger.source_balance(), ledger.available);
        Ok(report)
    }

    /// Normal-mode step. Returns false when traversal must stop.
    #[allow(clippy::unused_self)]
    fn fill<E>(
        &self,
        env: &mut E,
        pos: BlockPos,
        ledger: &mut Ledger<'_>,
        report: &mut TransmutationReport,
    ) -> bool
    where
        E: Environment + ?Sized,
    {
        if !env.material_at(pos).is_air() {
            report.skipped += 1;
            return true;
        }
        if ledger.available < ledger.required {
            trace!("Out of EMC at {}: {} < {}", pos, ledger.available, ledger.required);
            return false;
        }
        if env.place_material(pos, ledger.target, ledger.actor) {
            ledger.withdraw(ledger.required, report);
            report.placed += 1;
        } else {
            report.refused += 1;
        }
        true
    }

    /// Transmutation-mode step. Never stops the traversal.
    fn swap<E>(
        &self,
        env: &mut E,
        pos: BlockPos,
        ledger: &mut Ledger<'_>,
        report: &mut TransmutationReport,
    ) where
        E: Environment + ?Sized,
    {
        let current = env.material_at(pos);
        if current == ledger.target
            || current.is_air()
            || env.has_attached_state(pos)
            || !self.engine.material_has_value(current)
        {
            report.skipped += 1;
            return;
        }

        let current_value = self.engine.value_of_material(current);
        match current_value.cmp(&ledger.required) {
            Ordering::Greater => {
                if env.replace_material(pos, ledger.target, ledger.actor) {
                    ledger.deposit(current_value - ledger.required, report);
                    report.replaced += 1;
                } else {
                    report.refused += 1;
                }
            }
            Ordering::Less => {
                let shortfall = ledger.required - current_value;
                if ledger.available < shortfall {
                    trace!("Cannot afford {} EMC at {}", shortfall, pos);
                    report.unaffordable += 1;
                    return;
                }
                if env.replace_material(pos, ledger.target, ledger.actor) {
                    ledger.withdraw(shortfall, report);
                    report.replaced += 1;
                } else {
                    report.refused += 1;
                }
            }
            Ordering::Equal => {
                if env.replace_material(pos, ledger.target, ledger.actor) {
                    report.replaced += 1;
                } else {
                    report.refused += 1;
                }
            }
        }
    }

    /// Power cue pitched by how far the tool is charged.
    fn power_feedback(tool: &TransmutationTool, interaction: &Interaction) -> FeedbackEvent {
        let pitch = if tool.max_charge() == 0 {
            FEEDBACK_BASE_PITCH
        } else {
            FEEDBACK_BASE_PITCH
                + (FEEDBACK_PITCH_RANGE / f32::from(tool.max_charge())) * f32::from(tool.charge())
        };
        FeedbackEvent {
            effect: EffectId::Power,
            position: interaction.origin,
            volume: FEEDBACK_VOLUME,
            pitch,
        }
    }
}
