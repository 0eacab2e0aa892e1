//! Cellular automata update logic - material movement physics

use glam::IVec2;

use super::ChunkGrid;
use super::neighbor_queries::MOORE_OFFSETS;
use super::reaction_system::ReactionSystem;
use crate::simulation::{Cell, ElementId, ElementKind, ElementRegistry};
use crate::world::{SimStats, WorldRng};

const DOWN: IVec2 = IVec2::new(0, 1);
const UP: IVec2 = IVec2::new(0, -1);

/// Which displacement check a move uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Guard {
    /// Buoyancy only
    Fall,
    /// Buoyancy, and the target must not have advanced this tick
    Move,
}

/// Outcome of one attempted move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attempt {
    Blocked,
    /// Moved; carries the slot to continue with, if any
    Moved(Option<IVec2>),
}

/// Cellular automata updater - handles material movement physics
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Advance the material at `pos` once, then keep advancing whatever each
    /// switch hands back until nothing is left to continue with.
    ///
    /// Boundary cells and material that already advanced this tick are
    /// skipped.
    pub fn update_cell<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        let mut next = Some(pos);
        while let Some(pos) = next {
            next = Self::dispatch(grid, registry, pos, stats, rng);
        }
    }

    /// Mark, run reactions, then run the primary kind
    fn dispatch<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        if grid.is_boundary(pos.x, pos.y) {
            return None;
        }

        let epoch = grid.epoch();
        let cell = grid.get_cell_mut(pos.x, pos.y).ok()?;
        if cell.epoch() == epoch {
            return None;
        }
        // Mark before dispatch so a chain can never come back to this material
        cell.set_epoch(epoch);
        let element = cell.element();
        stats.record_dispatch();

        if !registry.get(element).reactions.is_empty() {
            ReactionSystem::run_reactions(grid, registry, pos, element, stats, rng);
        }

        // A reaction may have turned the cell into something else
        let current = grid.get_cell(pos.x, pos.y).ok()?.element();
        match registry.get(current).kind {
            ElementKind::Default | ElementKind::Air | ElementKind::ImmovableSolid => None,
            ElementKind::MovableSolid => {
                Self::update_movable_solid(grid, registry, pos, stats, rng)
            }
            ElementKind::Liquid => Self::update_liquid(grid, registry, pos, stats, rng),
            ElementKind::Gas { weight } => {
                Self::update_gas(grid, registry, pos, weight, stats, rng)
            }
            ElementKind::Dust { weight } => {
                Self::update_dust(grid, registry, pos, weight, stats, rng)
            }
        }
    }

    /// Update movable solid (falls down, slides diagonally, never into solids)
    pub fn update_movable_solid<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        if let Attempt::Moved(next) =
            Self::try_move(grid, registry, pos, DOWN, Guard::Fall, true, stats)
        {
            return next;
        }

        // Try diagonal dispersal (random direction)
        let dx = if rng.gen_bool() { -1 } else { 1 };
        for offset in [IVec2::new(dx, 1), IVec2::new(-dx, 1)] {
            if let Attempt::Moved(next) =
                Self::try_move(grid, registry, pos, offset, Guard::Move, true, stats)
            {
                return next;
            }
        }

        None
    }

    /// Update liquid (falls down, then flows horizontally)
    pub fn update_liquid<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        if let Attempt::Moved(next) =
            Self::try_move(grid, registry, pos, DOWN, Guard::Fall, false, stats)
        {
            return next;
        }

        let dx = if rng.gen_bool() { -1 } else { 1 };
        for offset in [IVec2::new(dx, 0), IVec2::new(-dx, 0)] {
            if let Attempt::Moved(next) =
                Self::try_move(grid, registry, pos, offset, Guard::Move, false, stats)
            {
                return next;
            }
        }

        None
    }

    /// Update gas: one random step. Draws above `weight` pick any of the 8
    /// neighbors, the rest pick one of the 3 below.
    pub fn update_gas<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        weight: f32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        let offset = if rng.gen_f32() > weight {
            MOORE_OFFSETS[rng.gen_index(MOORE_OFFSETS.len())]
        } else {
            IVec2::new(rng.gen_index(3) as i32 - 1, 1)
        };

        match Self::try_move(grid, registry, pos, offset, Guard::Move, false, stats) {
            Attempt::Moved(next) => next,
            Attempt::Blocked => None,
        }
    }

    /// Update dust: a movable solid while something above or below holds it,
    /// a gas of the same weight otherwise
    pub fn update_dust<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        weight: f32,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> Option<IVec2> {
        if Self::is_supported(grid, registry, pos) {
            Self::update_movable_solid(grid, registry, pos, stats, rng)
        } else {
            Self::update_gas(grid, registry, pos, weight, stats, rng)
        }
    }

    /// Whether `mover` is heavier than `target` and may displace it.
    /// Fixed elements never take part.
    pub fn can_fall_into(registry: &ElementRegistry, mover: ElementId, target: ElementId) -> bool {
        let mover = registry.get(mover);
        let target = registry.get(target);
        !mover.is_fixed() && mover.effective_buoyancy() > target.effective_buoyancy()
    }

    /// [`Self::can_fall_into`], and `target` has not advanced this tick
    pub fn can_move_into(
        grid: &ChunkGrid,
        registry: &ElementRegistry,
        mover: ElementId,
        target: &Cell,
    ) -> bool {
        Self::can_fall_into(registry, mover, target.element()) && !grid.is_advanced(target)
    }

    /// A neighbor above or below that the material could not fall into
    fn is_supported(grid: &ChunkGrid, registry: &ElementRegistry, pos: IVec2) -> bool {
        let Ok(cell) = grid.get_cell(pos.x, pos.y) else {
            return false;
        };
        let mover = cell.element();

        [DOWN, UP].into_iter().any(|offset| {
            let target = pos + offset;
            grid.get_cell(target.x, target.y).is_ok_and(|other| {
                let other = other.element();
                !(Self::can_fall_into(registry, mover, other) && !registry.get(other).is_solid())
            })
        })
    }

    /// Attempt to switch the material at `pos` with its neighbor at `offset`.
    /// A missing neighbor blocks the attempt.
    fn try_move(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        offset: IVec2,
        guard: Guard,
        solid_blocks: bool,
        stats: &mut dyn SimStats,
    ) -> Attempt {
        let target = pos + offset;
        let (Ok(cell), Ok(other)) = (grid.get_cell(pos.x, pos.y), grid.get_cell(target.x, target.y))
        else {
            return Attempt::Blocked;
        };
        let mover = cell.element();

        let allowed = match guard {
            Guard::Fall => Self::can_fall_into(registry, mover, other.element()),
            Guard::Move => Self::can_move_into(grid, registry, mover, other),
        };
        if !allowed || (solid_blocks && registry.get(other.element()).is_solid()) {
            return Attempt::Blocked;
        }

        match grid.switch(pos, target) {
            Ok(next) => {
                stats.record_cell_moved();
                Attempt::Moved(next)
            }
            Err(e) => {
                log::error!("switch {pos} -> {target} rejected: {e}");
                Attempt::Blocked
            }
        }
    }
}
