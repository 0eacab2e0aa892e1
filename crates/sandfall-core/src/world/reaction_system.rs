//! Reaction system - data-defined secondary behaviors
//!
//! Every element may carry reaction chains. A chain runs its actions only
//! when all of its conditions hold; an `End` action stops the rest of that
//! chain, and later chains still run.

use std::ops::ControlFlow;

use glam::IVec2;

use super::ChunkGrid;
use super::neighbor_queries::{MOORE_OFFSETS, NeighborQueries, ORTHOGONAL_OFFSETS};
use crate::simulation::{Action, Condition, ElementId, ElementRegistry, Role};
use crate::world::{SimStats, WorldRng};

/// Reaction system - stateless methods for evaluating reaction chains
pub struct ReactionSystem;

impl ReactionSystem {
    /// Evaluate every chain of `element` at `pos`, in definition order.
    ///
    /// The chain list is fixed by `element` even if an earlier chain turns
    /// the cell into something else.
    pub fn run_reactions<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        element: ElementId,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) {
        for reaction in &registry.get(element).reactions {
            // Short-circuits, so later chance draws only happen when earlier
            // conditions pass
            if !reaction
                .conditions
                .iter()
                .all(|condition| Self::condition_holds(grid, pos, condition, rng))
            {
                continue;
            }

            stats.record_reaction();
            for action in &reaction.actions {
                if Self::apply_action(grid, registry, pos, action, stats, rng).is_break() {
                    break;
                }
            }
        }
    }

    /// Check a single condition for the cell at `pos`. Neighbors outside the
    /// world are skipped.
    pub fn condition_holds<R: WorldRng>(
        grid: &ChunkGrid,
        pos: IVec2,
        condition: &Condition,
        rng: &mut R,
    ) -> bool {
        match *condition {
            Condition::Chance(probability) => rng.check_probability(probability),
            Condition::Touching(element) => {
                NeighborQueries::any_neighbor_is(grid, pos, &MOORE_OFFSETS, element)
            }
            Condition::DirectlyTouching(element) => {
                NeighborQueries::any_neighbor_is(grid, pos, &ORTHOGONAL_OFFSETS, element)
            }
        }
    }

    /// Apply a single action. `Break` ends the current chain.
    pub fn apply_action<R: WorldRng>(
        grid: &mut ChunkGrid,
        registry: &ElementRegistry,
        pos: IVec2,
        action: &Action,
        stats: &mut dyn SimStats,
        rng: &mut R,
    ) -> ControlFlow<()> {
        match *action {
            Action::TurnInto(element) => {
                if let Ok(cell) = grid.get_cell_mut(pos.x, pos.y) {
                    cell.set_element(element);
                }
                ControlFlow::Continue(())
            }
            Action::Emit(element) => {
                let target = pos + MOORE_OFFSETS[rng.gen_index(MOORE_OFFSETS.len())];
                if let Ok(cell) = grid.get_cell_mut(target.x, target.y)
                    && registry.get(cell.element()).role == Role::Air
                {
                    cell.set_element(element);
                    stats.record_emission();
                }
                ControlFlow::Continue(())
            }
            Action::End => ControlFlow::Break(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::ReactionStep;
    use crate::world::TickStats;
    use crate::world::test_support::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_chance_gating() {
        let registry = test_registry();
        let grid = small_grid(&registry);
        let mut rng = Xoshiro256StarStar::seed_from_u64(1234);
        let center = IVec2::new(3, 3);

        let never = (0..10_000)
            .filter(|_| {
                ReactionSystem::condition_holds(&grid, center, &Condition::Chance(0.0), &mut rng)
            })
            .count();
        let always = (0..10_000)
            .filter(|_| {
                ReactionSystem::condition_holds(&grid, center, &Condition::Chance(1.0), &mut rng)
            })
            .count();

        assert_eq!(never, 0);
        assert_eq!(always, 10_000);
    }

    #[test]
    fn test_touching_vs_directly_touching() {
        let registry = test_registry();
        let mut grid = small_grid(&registry);
        let center = IVec2::new(3, 3);
        let mut rng = TestRng::default();

        // Own position never counts
        place(&mut grid, 3, 3, WATER);
        assert!(!ReactionSystem::condition_holds(
            &grid,
            center,
            &Condition::DirectlyTouching(WATER),
            &mut rng
        ));
        assert!(!ReactionSystem::condition_holds(
            &grid,
            center,
            &Condition::Touching(WATER),
            &mut rng
        ));

        place(&mut grid, 4, 4, WATER);
        assert!(ReactionSystem::condition_holds(
            &grid,
            center,
            &Condition::Touching(WATER),
            &mut rng
        ));
        assert!(!ReactionSystem::condition_holds(
            &grid,
            center,
            &Condition::DirectlyTouching(WATER),
            &mut rng
        ));

        place(&mut grid, 3, 4, WATER);
        assert!(ReactionSystem::condition_holds(
            &grid,
            center,
            &Condition::DirectlyTouching(WATER),
            &mut rng
        ));
    }

    #[test]
    fn test_touching_at_world_edge() {
        let registry = test_registry();
        let grid = small_grid(&registry);

        assert!(ReactionSystem::condition_holds(
            &grid,
            IVec2::ZERO,
            &Condition::Touching(WALL),
            &mut TestRng::default()
        ));
        assert!(!ReactionSystem::condition_holds(
            &grid,
            IVec2::ZERO,
            &Condition::Touching(SAND),
            &mut TestRng::default()
        ));
    }

    #[test]
    fn test_turn_into_continues_and_end_breaks() {
        let registry = test_registry();
        let mut grid = small_grid(&registry);
        let mut stats = TickStats::default();
        let mut rng = TestRng::default();
        let center = IVec2::new(3, 3);
        place(&mut grid, 3, 3, SAND);
        grid.get_cell_mut(3, 3).unwrap().set_data(Some(vec![4]));

        let flow = ReactionSystem::apply_action(
            &mut grid,
            &registry,
            center,
            &Action::TurnInto(ASH),
            &mut stats,
            &mut rng,
        );
        assert!(flow.is_continue());
        assert_eq!(element_at(&grid, 3, 3), ASH);
        assert_eq!(grid.get_cell(3, 3).unwrap().data(), None);

        let flow = ReactionSystem::apply_action(
            &mut grid,
            &registry,
            center,
            &Action::End,
            &mut stats,
            &mut rng,
        );
        assert!(flow.is_break());
    }

    #[test]
    fn test_emit_only_into_air() {
        let registry = test_registry();
        let mut grid = small_grid(&registry);
        let mut stats = TickStats::default();
        let center = IVec2::new(3, 3);
        place(&mut grid, 3, 3, SAND);

        // Index 1 is straight up
        let mut rng = TestRng::default().with_indices(&[1, 1]);
        ReactionSystem::apply_action(
            &mut grid,
            &registry,
            center,
            &Action::Emit(STEAM),
            &mut stats,
            &mut rng,
        );
        assert_eq!(element_at(&grid, 3, 2), STEAM);
        assert_eq!(element_at(&grid, 3, 3), SAND);
        assert_eq!(stats.emissions, 1);

        // Steam is not air, so the second emit is dropped
        ReactionSystem::apply_action(
            &mut grid,
            &registry,
            center,
            &Action::Emit(WATER),
            &mut stats,
            &mut rng,
        );
        assert_eq!(element_at(&grid, 3, 2), STEAM);
        assert_eq!(stats.emissions, 1);
    }

    #[test]
    fn test_end_stops_only_its_own_chain() {
        let registry = registry_with(vec![
            reactive(
                "burner",
                vec![
                    ReactionStep::TurnInto("ash".to_string()),
                    ReactionStep::End,
                    ReactionStep::TurnInto("sand".to_string()),
                ],
            )
            .with_reaction(vec![ReactionStep::Emit("steam".to_string())]),
        ]);
        let burner = registry.id_of("burner").unwrap();
        let mut grid = small_grid(&registry);
        let mut stats = TickStats::default();
        let mut rng = TestRng::default().with_indices(&[1]);
        place(&mut grid, 3, 3, burner);

        ReactionSystem::run_reactions(
            &mut grid,
            &registry,
            IVec2::new(3, 3),
            burner,
            &mut stats,
            &mut rng,
        );

        assert_eq!(element_at(&grid, 3, 3), ASH);
        assert_eq!(element_at(&grid, 3, 2), STEAM);
        assert_eq!(stats.reactions, 2);
    }

    #[test]
    fn test_failed_condition_skips_chain() {
        let registry = registry_with(vec![reactive(
            "sponge",
            vec![
                ReactionStep::Touching("water".to_string()),
                ReactionStep::TurnInto("sand".to_string()),
            ],
        )]);
        let sponge = registry.id_of("sponge").unwrap();
        let mut grid = small_grid(&registry);
        let mut stats = TickStats::default();
        place(&mut grid, 3, 3, sponge);

        ReactionSystem::run_reactions(
            &mut grid,
            &registry,
            IVec2::new(3, 3),
            sponge,
            &mut stats,
            &mut TestRng::default(),
        );
        assert_eq!(element_at(&grid, 3, 3), sponge);
        assert_eq!(stats.reactions, 0);

        place(&mut grid, 2, 3, WATER);
        ReactionSystem::run_reactions(
            &mut grid,
            &registry,
            IVec2::new(3, 3),
            sponge,
            &mut stats,
            &mut TestRng::default(),
        );
        assert_eq!(element_at(&grid, 3, 3), SAND);
        assert_eq!(stats.reactions, 1);
    }
}
