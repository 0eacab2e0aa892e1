//! Declarative element definitions
//!
//! Serde mirror of the element definition document. Values that reference
//! other elements stay as strings here; the registry resolves them once every
//! element has an id.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::Role;

/// Ordered list of element definitions. Order determines element ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElementDefinitions {
    pub elements: Vec<ElementDefinition>,
}

impl ElementDefinitions {
    /// Parse a RON definition document
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let definitions: Self = ron::from_str(source)?;
        log::debug!(
            "Parsed {} element definitions",
            definitions.elements.len()
        );
        Ok(definitions)
    }
}

/// One element entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Unique key, also used by reaction steps to refer to this element
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub display: Option<DisplayDef>,
    #[serde(default)]
    pub material: Option<MaterialDef>,
    #[serde(default)]
    pub behavior: Option<BehaviorDef>,
    /// Each inner list is one reaction chain of conditions and actions
    #[serde(default)]
    pub reactions: Vec<Vec<ReactionStep>>,
}

impl ElementDefinition {
    /// Minimal definition with no display, material, behavior or reactions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::None,
            display: None,
            material: None,
            behavior: None,
            reactions: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        let display = self.display.get_or_insert_with(DisplayDef::default);
        display.color = Some(color.into());
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.material = Some(MaterialDef { density });
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorDef) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_reaction(mut self, steps: Vec<ReactionStep>) -> Self {
        self.reactions.push(steps);
        self
    }
}

/// Presentation data. Only the color reaches the simulation core.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DisplayDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Whether the element picker offers this element
    #[serde(default)]
    pub selectable: bool,
}

/// Physical properties
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Used as buoyancy: higher sinks below lower
    pub density: f32,
}

/// Primary behavior tag
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum BehaviorDef {
    Air,
    ImmovableSolid,
    MovableSolid,
    Liquid,
    Gas { weight: f32 },
    Dust { weight: f32 },
}

/// A single reaction step. Conditions and actions may be interleaved; the
/// registry splits them while keeping their relative order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReactionStep {
    TurnInto(String),
    Emit(String),
    Chance(String),
    Touching(String),
    DirectlyTouching(String),
    End,
}
