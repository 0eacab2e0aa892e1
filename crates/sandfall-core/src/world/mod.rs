//! World management - chunks, scheduling and behaviors

mod ca_update;
mod chunk;
mod chunk_grid;
mod neighbor_queries;
mod reaction_system;
pub mod rng_trait;
pub mod stats;
#[cfg(test)]
mod test_support;
#[allow(clippy::module_inception)]
mod world;

pub use ca_update::CellularAutomataUpdater;
pub use chunk::Chunk;
pub use chunk_grid::{CellAddr, ChunkGrid, GridDims};
pub use neighbor_queries::{MOORE_OFFSETS, NeighborQueries, ORTHOGONAL_OFFSETS};
pub use reaction_system::ReactionSystem;
pub use rng_trait::WorldRng;
pub use stats::{NoopStats, SimStats, TickStats};
pub use world::World;
