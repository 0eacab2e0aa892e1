//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// The world reports what happened during a tick without knowing how the
/// host aggregates it.
pub trait SimStats {
    /// Record that a cell was dispatched to its behavior
    fn record_dispatch(&mut self);

    /// Record that material moved through a switch
    fn record_cell_moved(&mut self);

    /// Record that a reaction chain passed its conditions
    fn record_reaction(&mut self);

    /// Record that an emit action placed an element
    fn record_emission(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_dispatch(&mut self) {}
    fn record_cell_moved(&mut self) {}
    fn record_reaction(&mut self) {}
    fn record_emission(&mut self) {}
}

/// Plain counters, reset by the caller between reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub dispatches: u64,
    pub cells_moved: u64,
    pub reactions: u64,
    pub emissions: u64,
}

impl TickStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for TickStats {
    fn record_dispatch(&mut self) {
        self.dispatches += 1;
    }

    fn record_cell_moved(&mut self) {
        self.cells_moved += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_emission(&mut self) {
        self.emissions += 1;
    }
}
