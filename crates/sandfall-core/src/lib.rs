//! Sandfall simulation core
//!
//! Chunked grid, per-tick scheduler, movement behaviors and the reaction
//! engine. Element data lives in `sandfall-simulation` and is re-exported
//! as [`simulation`].

mod error;
pub mod world;

pub use error::GridError;

pub mod simulation {
    pub use sandfall_simulation::*;
}
