//! Pen tool for drawing elements

use super::Tool;
use sandfall_core::simulation::ElementId;
use sandfall_core::world::World;

/// Pen tool that draws a specific element
pub struct PenTool {
    element: ElementId,
    name: String,
}

impl PenTool {
    /// Create a new pen tool for the given element
    pub fn new(world: &World, element: ElementId) -> Self {
        Self {
            element,
            name: format!("Pen ({})", world.registry().get(element).name),
        }
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, world: &mut World, x: i32, y: i32, brush_size: u32) -> usize {
        world.paint_element(x, y, brush_size, self.element)
    }
}
