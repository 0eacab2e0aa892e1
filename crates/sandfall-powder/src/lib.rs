//! # Sandfall Powder - headless runner
//!
//! Builds a world from element definitions, replays a scripted scenario of
//! brush strokes and reports what the simulation did.

pub mod config;
pub mod report;
pub mod scenario;
pub mod tools;

use sandfall_core::simulation::{ConfigError, ElementDefinitions};
use sandfall_core::world::{TickStats, World};

use crate::config::RunConfig;
use crate::scenario::Scenario;

/// Element set compiled into the binary
pub const BUNDLED_ELEMENTS: &str = include_str!("../assets/elements.ron");

pub fn bundled_definitions() -> Result<ElementDefinitions, ConfigError> {
    ElementDefinitions::from_ron_str(BUNDLED_ELEMENTS)
}

/// Run the scenario for the configured number of ticks, logging a stats line
/// every `report_every` ticks. Returns the totals.
pub fn run(world: &mut World, scenario: &Scenario, run: &RunConfig) -> TickStats {
    let mut total = TickStats::default();
    let mut window = TickStats::default();

    for tick in 0..run.ticks {
        scenario.apply(world, tick);
        world.tick_with_stats(&mut window);

        let done = tick + 1;
        if run.report_every > 0 && done % run.report_every == 0 {
            log::info!("{}", report::stats_line(done, run.ticks, &window));
            accumulate(&mut total, &window);
            window.reset();
        }
    }
    accumulate(&mut total, &window);
    total
}

fn accumulate(total: &mut TickStats, window: &TickStats) {
    total.dispatches += window.dispatches;
    total.cells_moved += window.cells_moved;
    total.reactions += window.reactions;
    total.emissions += window.emissions;
}
