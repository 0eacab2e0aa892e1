//! Eraser tool

use super::Tool;
use sandfall_core::world::World;

/// Eraser tool that paints the background element
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush_size: u32) -> usize {
        let air = world.registry().air();
        world.paint_element(x, y, brush_size, air)
    }
}
