//! Brush tools applied to the world

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use sandfall_core::world::World;

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply tool at position with given brush radius. Returns the number of
    /// cells written.
    fn apply(&self, world: &mut World, x: i32, y: i32, brush_size: u32) -> usize;
}
