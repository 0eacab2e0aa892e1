//! Grid access errors

use thiserror::Error;

use crate::simulation::ElementId;

/// Recoverable error from a grid lookup or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinate outside the world, or a write aimed at the boundary ring
    #[error("no writable cell at ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    /// Switch asked to exchange a cell with itself
    #[error("cannot switch cell ({x}, {y}) with itself")]
    SamePosition { x: i32, y: i32 },

    #[error("element id {0} is not registered")]
    UnknownElement(ElementId),
}
