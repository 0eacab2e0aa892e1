//! Shared fixtures for world unit tests

use std::collections::VecDeque;

use glam::IVec2;

use super::{ChunkGrid, GridDims, WorldRng};
use crate::simulation::{
    BehaviorDef, ElementDefinition, ElementDefinitions, ElementId, ElementRegistry, ReactionStep,
    Role,
};

pub const AIR: ElementId = 0;
pub const WALL: ElementId = 1;
pub const SAND: ElementId = 2;
pub const WATER: ElementId = 3;
pub const STONE: ElementId = 4;
pub const STEAM: ElementId = 5;
pub const DUST: ElementId = 6;
pub const ASH: ElementId = 7;

/// Base element set; callers append their own reactive elements
pub fn base_definitions() -> Vec<ElementDefinition> {
    vec![
        ElementDefinition::new("air")
            .with_role(Role::Air)
            .with_behavior(BehaviorDef::Air),
        ElementDefinition::new("wall").with_role(Role::Wall),
        ElementDefinition::new("sand")
            .with_density(2.0)
            .with_behavior(BehaviorDef::MovableSolid),
        ElementDefinition::new("water")
            .with_density(1.0)
            .with_behavior(BehaviorDef::Liquid),
        ElementDefinition::new("stone")
            .with_density(3.0)
            .with_behavior(BehaviorDef::ImmovableSolid),
        ElementDefinition::new("steam")
            .with_density(0.1)
            .with_behavior(BehaviorDef::Gas { weight: 0.5 }),
        ElementDefinition::new("dust")
            .with_density(0.8)
            .with_behavior(BehaviorDef::Dust { weight: 0.5 }),
        // No behavior tag: Default kind
        ElementDefinition::new("ash").with_density(0.5),
    ]
}

pub fn registry_with(extra: Vec<ElementDefinition>) -> ElementRegistry {
    let mut elements = base_definitions();
    elements.extend(extra);
    ElementRegistry::from_definitions(&ElementDefinitions { elements })
        .expect("test definitions are valid")
}

pub fn test_registry() -> ElementRegistry {
    registry_with(Vec::new())
}

/// A reactive element appended after the base set
pub fn reactive(name: &str, steps: Vec<ReactionStep>) -> ElementDefinition {
    ElementDefinition::new(name).with_reaction(steps)
}

/// Single-chunk 8x8 grid
pub fn small_grid(registry: &ElementRegistry) -> ChunkGrid {
    ChunkGrid::new(GridDims::new(1, 1, 8, 8), registry.air(), registry.wall())
}

pub fn place(grid: &mut ChunkGrid, x: i32, y: i32, element: ElementId) {
    grid.get_cell_mut(x, y)
        .expect("placement inside grid")
        .set_element(element);
}

pub fn element_at(grid: &ChunkGrid, x: i32, y: i32) -> ElementId {
    grid.get_cell(x, y).expect("lookup inside grid").element()
}

/// Mark the material at a position as already advanced this tick
pub fn mark_advanced(grid: &mut ChunkGrid, pos: IVec2) {
    let epoch = grid.epoch();
    grid.get_cell_mut(pos.x, pos.y)
        .expect("mark inside grid")
        .set_epoch(epoch);
}

/// Scripted RNG: replays queued values, then falls back to fixed defaults
#[derive(Default)]
pub struct TestRng {
    pub bools: VecDeque<bool>,
    pub floats: VecDeque<f32>,
    pub indices: VecDeque<usize>,
}

impl TestRng {
    pub fn with_bools(bools: &[bool]) -> Self {
        Self {
            bools: bools.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn with_floats(floats: &[f32]) -> Self {
        Self {
            floats: floats.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices = indices.iter().copied().collect();
        self
    }
}

impl WorldRng for TestRng {
    fn gen_bool(&mut self) -> bool {
        self.bools.pop_front().unwrap_or(false)
    }

    fn gen_f32(&mut self) -> f32 {
        self.floats.pop_front().unwrap_or(0.0)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % len
    }
}
