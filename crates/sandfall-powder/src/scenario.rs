//! Scripted strokes replayed against the world tick by tick

use anyhow::{Result, bail};
use glam::IVec2;
use sandfall_core::world::World;

use crate::config::{ScenarioConfig, StrokeConfig};
use crate::tools::{EraseTool, PenTool, Tool};

/// Element name that selects the eraser instead of a pen
pub const ERASE: &str = "erase";

/// A resolved stroke
pub struct Stroke {
    tool: Box<dyn Tool>,
    pos: IVec2,
    radius: u32,
    start: u64,
    every: u64,
}

impl Stroke {
    fn resolve(config: &StrokeConfig, world: &World) -> Result<Self> {
        let tool: Box<dyn Tool> = if config.element == ERASE {
            Box::new(EraseTool)
        } else {
            let Some(element) = world.registry().id_of(&config.element) else {
                bail!("scenario stroke uses unknown element '{}'", config.element);
            };
            Box::new(PenTool::new(world, element))
        };

        Ok(Self {
            tool,
            pos: IVec2::new(config.x, config.y),
            radius: config.radius,
            start: config.start,
            every: config.every,
        })
    }

    /// Whether the stroke fires before tick `tick`
    pub fn is_due(&self, tick: u64) -> bool {
        let Some(elapsed) = tick.checked_sub(self.start) else {
            return false;
        };
        elapsed == 0 || (self.every > 0 && elapsed % self.every == 0)
    }

    pub fn tool_name(&self) -> &str {
        self.tool.name()
    }
}

/// Ordered list of strokes
pub struct Scenario {
    strokes: Vec<Stroke>,
}

impl Scenario {
    /// Resolve element names against the world's registry
    pub fn from_config(config: &ScenarioConfig, world: &World) -> Result<Self> {
        let strokes = config
            .strokes
            .iter()
            .map(|stroke| Stroke::resolve(stroke, world))
            .collect::<Result<Vec<_>>>()?;
        log::debug!("Scenario with {} strokes", strokes.len());
        Ok(Self { strokes })
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Apply every stroke due at `tick`. Returns the number of cells written.
    pub fn apply(&self, world: &mut World, tick: u64) -> usize {
        self.strokes
            .iter()
            .filter(|stroke| stroke.is_due(tick))
            .map(|stroke| {
                let written = stroke
                    .tool
                    .apply(world, stroke.pos.x, stroke.pos.y, stroke.radius);
                log::trace!(
                    "tick {tick}: {} at {} wrote {written} cells",
                    stroke.tool.name(),
                    stroke.pos
                );
                written
            })
            .sum()
    }
}
