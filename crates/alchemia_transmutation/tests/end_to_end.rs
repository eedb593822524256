//! # Transmutation End-to-End Tests
//!
//! Drives the tool against a voxel world with an economy loaded from TOML:
//!
//! 1. **Normal mode**: placement paid per cell, halting when broke
//! 2. **Transmutation mode**: deposits, shortfalls and equal-value swaps
//! 3. **Sides**: mirror worlds never change
//! 4. **Persistence**: the charged container survives a save/load cycle
//!
//! Run with: cargo test --package alchemia_transmutation --test end_to_end

use alchemia_economy::{EconomyConfig, ItemStack, ValuationEngine, ValueStorage};
use alchemia_shared::{BlockPos, EffectId, Facing, FeedbackLog, Material, Vec3};
use alchemia_transmutation::{
    ActionResult, AttachedInventory, Environment, Interaction, Mode, RegionPlanner, Side,
    TransmutationConfig, TransmutationExecutor, TransmutationTool, VoxelWorld,
};

const ECONOMY: &str = r#"
[[items]]
id = 1
name = "klein star ein"
value_capacity = 50000

[[items]]
id = 2
name = "cobblestone"
block = 4

[[items]]
id = 3
name = "gold block"
block = 41

[[items]]
id = 4
name = "dirt"
block = 3

[[items]]
id = 5
name = "glass"
block = 20

[[items]]
id = 6
name = "wool"
block = 35

[[values]]
item = 2
value = 10

[[values]]
item = 3
value = 25

[[values]]
item = 4
value = 2

[[values]]
item = 5
value = 10

[[values]]
item = 6
value = 48

[[values]]
item = 6
damage = 14
value = 48
"#;

const STAR: u32 = 1;
const COBBLE: u32 = 2;
const WOOL: u32 = 6;

const COBBLE_BLOCK: Material = Material::new(4);
const GOLD_BLOCK: Material = Material::new(41);
const DIRT_BLOCK: Material = Material::new(3);
const GLASS_BLOCK: Material = Material::new(20);

fn engine() -> ValuationEngine {
    EconomyConfig::from_toml_str(ECONOMY)
        .unwrap()
        .into_engine()
        .unwrap()
}

fn tool(stored: u64, target: ItemStack, mode: Mode, charge: u8) -> TransmutationTool {
    TransmutationTool::new(TransmutationConfig::from_toml_str("max_charge = 4").unwrap())
        .with_container(AttachedInventory::with_pair(
            ItemStack::new(STAR, 1).with_stored_emc(stored),
            target,
        ))
        .with_mode(mode)
        .with_charge(charge)
}

fn stored(engine: &ValuationEngine, tool: &TransmutationTool) -> u64 {
    let source = tool.container().source();
    engine
        .registry()
        .value_storage(&source)
        .map_or(0, |cell| cell.stored_value(&source))
}

fn floor_click() -> Interaction {
    Interaction::new(7, BlockPos::new(0, 63, 0), Facing::Up, Vec3::DOWN)
}

#[test]
fn test_single_placement_costs_target_value() {
    let engine = engine();
    let mut tool = tool(100, ItemStack::new(COBBLE, 1), Mode::Normal, 0);
    let mut world = VoxelWorld::new();
    let mut feedback = FeedbackLog::new();

    let result = TransmutationExecutor::new(&engine).use_on_block(
        &mut tool,
        &floor_click(),
        &mut world,
        &mut feedback,
    );

    assert_eq!(result, ActionResult::Success);
    assert_eq!(stored(&engine, &tool), 90);
    assert_eq!(world.solid_count(), 1);
    assert_eq!(world.material_at(BlockPos::new(0, 64, 0)), COBBLE_BLOCK);

    let events = feedback.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].effect, EffectId::Power);
    assert_eq!(events[0].position, Vec3::new(0.5, 64.5, 0.5));
}

#[test]
fn test_wall_placement_follows_face() {
    let engine = engine();
    let mut tool = tool(1_000, ItemStack::new(COBBLE, 1), Mode::Normal, 1);
    let mut world = VoxelWorld::new();
    let clicked = BlockPos::new(0, 64, 0);
    world.set(clicked, DIRT_BLOCK);
    let interaction = Interaction::new(7, clicked, Facing::North, Vec3::new(0.0, 0.0, 1.0));

    let report = TransmutationExecutor::new(&engine)
        .execute(&mut tool, &interaction, &mut world)
        .unwrap();

    assert_eq!(report.placed, 9);
    assert_eq!(stored(&engine, &tool), 910);
    for x in -1..=1 {
        for y in 63..=65 {
            assert_eq!(world.material_at(BlockPos::new(x, y, -1)), COBBLE_BLOCK);
        }
    }
    assert_eq!(world.material_at(clicked), DIRT_BLOCK);
}

#[test]
fn test_normal_mode_stops_at_first_unaffordable_cell() {
    let engine = engine();
    let mut tool = tool(25, ItemStack::new(COBBLE, 1), Mode::Normal, 1);
    let mut world = VoxelWorld::new();

    let report = TransmutationExecutor::new(&engine)
        .execute(&mut tool, &floor_click(), &mut world)
        .unwrap();

    assert!(report.halted);
    assert_eq!(report.placed, 2);
    assert_eq!(stored(&engine, &tool), 5);
    assert_eq!(world.solid_count(), 2);
}

#[test]
fn test_richer_cell_refunds_difference() {
    let engine = engine();
    let mut tool = tool(100, ItemStack::new(COBBLE, 1), Mode::Transmutation, 0);
    let mut world = VoxelWorld::new();
    world.set(BlockPos::new(0, 63, 0), GOLD_BLOCK);

    let report = TransmutationExecutor::new(&engine)
        .execute(&mut tool, &floor_click(), &mut world)
        .unwrap();

    assert_eq!(report.deposited, 15);
    assert_eq!(stored(&engine, &tool), 115);
    assert_eq!(world.material_at(BlockPos::new(0, 63, 0)), COBBLE_BLOCK);
}

#[test]
fn test_refund_is_clamped_to_capacity() {
    let engine = engine();
    let mut tool = tool(49_990, ItemStack::new(COBBLE, 1), Mode::Transmutation, 0);
    let mut world = VoxelWorld::new();
    world.set(BlockPos::new(0, 63, 0), GOLD_BLOCK);

    let report = TransmutationExecutor::new(&engine)
        .execute(&mut tool, &floor_click(), &mut world)
        .unwrap();

    assert_eq!(report.deposited, 10);
    assert_eq!(stored(&engine, &tool), 50_000);
}

#[test]
fn test_unaffordable_swap_is_skipped_not_fatal() {
    let engine = engine();
    let mut tool = tool(3, ItemStack::new(COBBLE, 1), Mode::Transmutation, 1);
    let mut world = VoxelWorld::new();
    let interaction = floor_click();
    let surface = RegionPlanner::plan(&tool.plan_request(&interaction));
    let cells: Vec<_> = surface.cells().collect();
    world.set(cells[0], DIRT_BLOCK);
    world.set(cells[1], GOLD_BLOCK);
    world.set(cells[2], DIRT_BLOCK);

    let report = TransmutationExecutor::new(&engine)
        .execute(&mut tool, &interaction, &mut world)
        .unwrap();

    // 3 < 8, skipped; gold refunds 15; 18 >= 8 pays for the second dirt
    assert_eq!(report.unaffordable, 1);
    assert_eq!(report.replaced, 2);
    assert!(!report.halted);
    assert_eq!(world.material_at(cells[0]), DIRT_BLOCK);
    assert_eq!(world.material_at(cells[1]), COBBLE_BLOCK);
    assert_eq!(world.material_at(cells[2]), COBBLE_BLOCK);
    assert_eq!(stored(&engine, &tool), 10);
}

#[test]
fn test_equal_value_swap_is_free() {
    let engine = engine();
    let mut tool = tool(0, ItemStack::new(COBBLE, 1), Mode::Transmutation, 0);
    let mut world = VoxelWorld::new();
    world.set(BlockPos::new(0, 63, 0), GLASS_BLOCK);

    let result = TransmutationExecutor::new(&engine).use_on_block(
        &mut tool,
        &floor_click(),
        &mut world,
        &mut FeedbackLog::new(),
    );

    assert_eq!(result, ActionResult::Success);
    assert_eq!(world.material_at(BlockPos::new(0, 63, 0)), COBBLE_BLOCK);
    assert_eq!(stored(&engine, &tool), 0);
}

#[test]
fn test_target_variant_is_placed() {
    let engine = engine();
    let red_wool = ItemStack::new(WOOL, 1).with_damage(14);
    let mut tool = tool(100, red_wool, Mode::Normal, 0);
    let mut world = VoxelWorld::new();

    TransmutationExecutor::new(&engine)
        .execute(&mut tool, &floor_click(), &mut world)
        .unwrap();

    assert_eq!(world.material_at(BlockPos::new(0, 64, 0)), Material::with_meta(35, 14));
    assert_eq!(stored(&engine, &tool), 52);
}

#[test]
fn test_mirror_world_is_untouched() {
    let engine = engine();
    let mut tool = tool(100, ItemStack::new(COBBLE, 1), Mode::Normal, 2);
    let mut world = VoxelWorld::with_side(Side::Mirror);
    let mut feedback = FeedbackLog::new();

    let result = TransmutationExecutor::new(&engine).use_on_block(
        &mut tool,
        &floor_click(),
        &mut world,
        &mut feedback,
    );

    assert_eq!(result, ActionResult::Success);
    assert_eq!(world.solid_count(), 0);
    assert_eq!(stored(&engine, &tool), 100);
    assert!(feedback.events().is_empty());
}

#[test]
fn test_precondition_failures_report_fail() {
    let engine = engine();
    let executor = TransmutationExecutor::new(&engine);
    let mut world = VoxelWorld::new();
    let mut feedback = FeedbackLog::new();

    // source cannot hold EMC
    let mut wrong_source = TransmutationTool::default().with_container(AttachedInventory::with_pair(
        ItemStack::new(COBBLE, 1),
        ItemStack::new(COBBLE, 1),
    ));
    assert_eq!(
        executor.use_on_block(&mut wrong_source, &floor_click(), &mut world, &mut feedback),
        ActionResult::Fail
    );

    // no target
    let mut no_target = TransmutationTool::default().with_container(AttachedInventory::with_pair(
        ItemStack::new(STAR, 1).with_stored_emc(100),
        ItemStack::empty(),
    ));
    assert_eq!(
        executor.use_on_block(&mut no_target, &floor_click(), &mut world, &mut feedback),
        ActionResult::Fail
    );

    assert_eq!(world.solid_count(), 0);
    assert!(feedback.events().is_empty());
}

#[test]
fn test_charged_container_survives_persistence() {
    let engine = engine();
    let mut tool = tool(100, ItemStack::new(COBBLE, 1), Mode::Normal, 0);
    TransmutationExecutor::new(&engine)
        .execute(&mut tool, &floor_click(), &mut VoxelWorld::new())
        .unwrap();

    let saved = tool.container().persist().unwrap();
    let restored = AttachedInventory::restore(&saved).unwrap();

    assert_eq!(&restored, tool.container());
    assert_eq!(restored.source().data.stored_emc, Some(90));
}
