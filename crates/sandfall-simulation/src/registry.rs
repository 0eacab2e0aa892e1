//! Element registry
//!
//! Immutable table from element id to everything the simulation needs to
//! know about that element. Built once from definitions in two passes: ids,
//! colors, roles and kinds first, then reaction chains against the complete
//! name table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cell::ElementId;
use crate::color::{DEFAULT_COLOR, Rgba, parse_color};
use crate::definition::{BehaviorDef, ElementDefinition, ElementDefinitions, ReactionStep};
use crate::error::ConfigError;
use crate::reactions::{Action, Condition, Reaction};

/// Coarse classification driving background and boundary semantics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Background element every cell starts as
    Air,
    /// Element of the immutable outer ring
    Wall,
    #[default]
    None,
}

/// Primary behavior bound to an element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// No-op
    Default,
    /// No-op, background
    Air,
    /// Never moves and is never displaced
    ImmovableSolid,
    /// Falls straight down, then slides diagonally (sand)
    MovableSolid,
    /// Falls, then spreads sideways (water)
    Liquid,
    /// Random walk; higher weight biases toward sinking
    Gas { weight: f32 },
    /// Solid while supported, gas-like otherwise
    Dust { weight: f32 },
}

impl From<BehaviorDef> for ElementKind {
    fn from(behavior: BehaviorDef) -> Self {
        match behavior {
            BehaviorDef::Air => ElementKind::Air,
            BehaviorDef::ImmovableSolid => ElementKind::ImmovableSolid,
            BehaviorDef::MovableSolid => ElementKind::MovableSolid,
            BehaviorDef::Liquid => ElementKind::Liquid,
            BehaviorDef::Gas { weight } => ElementKind::Gas { weight },
            BehaviorDef::Dust { weight } => ElementKind::Dust { weight },
        }
    }
}

/// Resolved definition of one element
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementData {
    pub id: ElementId,
    /// Definition key, referenced by reaction steps
    pub key: String,
    /// Display name
    pub name: String,
    pub color: Rgba,
    pub role: Role,
    /// Higher values sink below lower ones
    pub buoyancy: f32,
    pub kind: ElementKind,
    /// Secondary chains, evaluated in order every tick
    pub reactions: Vec<Reaction>,
    pub selectable: bool,
}

impl ElementData {
    /// Solid for the purpose of movement rules (sand does not slide into sand)
    pub fn is_solid(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::ImmovableSolid | ElementKind::MovableSolid
        )
    }

    /// Never takes part in a swap, in either direction
    pub fn is_fixed(&self) -> bool {
        self.kind == ElementKind::ImmovableSolid || self.role == Role::Wall
    }

    /// Buoyancy used by displacement checks. Fixed elements are unbounded.
    pub fn effective_buoyancy(&self) -> f32 {
        if self.is_fixed() {
            f32::INFINITY
        } else {
            self.buoyancy
        }
    }
}

/// Registry of all elements, indexed by dense id
#[derive(Clone, Debug)]
pub struct ElementRegistry {
    elements: Vec<ElementData>,
    ids: HashMap<String, ElementId>,
    air: ElementId,
    wall: ElementId,
}

impl ElementRegistry {
    /// Build the registry. Any error aborts construction entirely.
    pub fn from_definitions(definitions: &ElementDefinitions) -> Result<Self, ConfigError> {
        let defs = &definitions.elements;
        if defs.len() > ElementId::MAX as usize + 1 {
            return Err(ConfigError::TooManyElements(defs.len()));
        }

        // Pass 1: ids, colors, roles, kinds
        let mut elements = Vec::with_capacity(defs.len());
        let mut ids = HashMap::with_capacity(defs.len());
        let mut air = None;
        let mut wall = None;

        for (index, def) in defs.iter().enumerate() {
            let id = index as ElementId;
            if ids.insert(def.name.clone(), id).is_some() {
                return Err(ConfigError::DuplicateElement(def.name.clone()));
            }

            match def.role {
                Role::Air if air.is_none() => air = Some(id),
                Role::Wall if wall.is_none() => wall = Some(id),
                Role::Air | Role::Wall => log::warn!(
                    "Element '{}' also has the {:?} role, keeping the first one",
                    def.name,
                    def.role
                ),
                Role::None => {}
            }

            elements.push(Self::resolve_element(id, def)?);
        }

        let air = air.ok_or(ConfigError::MissingRole(Role::Air))?;
        let wall = wall.ok_or(ConfigError::MissingRole(Role::Wall))?;

        // Pass 2: reaction chains, now that every name has an id
        for (element, def) in elements.iter_mut().zip(defs) {
            element.reactions = def
                .reactions
                .iter()
                .map(|steps| Self::resolve_reaction(&def.name, steps, &ids))
                .collect::<Result<_, _>>()?;
        }

        let registry = Self {
            elements,
            ids,
            air,
            wall,
        };

        log::info!(
            "Built element registry: {} elements (background '{}', boundary '{}')",
            registry.len(),
            registry.get(air).key,
            registry.get(wall).key
        );

        Ok(registry)
    }

    fn resolve_element(id: ElementId, def: &ElementDefinition) -> Result<ElementData, ConfigError> {
        let display = def.display.clone().unwrap_or_default();
        let color = parse_color(display.color.as_deref().unwrap_or(DEFAULT_COLOR))?;

        let kind = match (def.role, def.behavior) {
            (Role::Air, behavior) => {
                if let Some(b) = behavior.filter(|b| *b != BehaviorDef::Air) {
                    log::warn!(
                        "Air-role element '{}' ignores its {:?} behavior",
                        def.name,
                        b
                    );
                }
                ElementKind::Air
            }
            (_, Some(behavior)) => behavior.into(),
            (_, None) => ElementKind::Default,
        };

        Ok(ElementData {
            id,
            key: def.name.clone(),
            name: display.name.unwrap_or_else(|| def.name.clone()),
            color,
            role: def.role,
            buoyancy: def.material.map(|m| m.density).unwrap_or(0.0),
            kind,
            reactions: Vec::new(),
            selectable: display.selectable,
        })
    }

    fn resolve_reaction(
        element: &str,
        steps: &[ReactionStep],
        ids: &HashMap<String, ElementId>,
    ) -> Result<Reaction, ConfigError> {
        let lookup = |target: &str| {
            ids.get(target)
                .copied()
                .ok_or_else(|| ConfigError::UnknownElement {
                    element: element.to_string(),
                    target: target.to_string(),
                })
        };

        let mut reaction = Reaction::default();
        for step in steps {
            match step {
                ReactionStep::TurnInto(target) => {
                    reaction.actions.push(Action::TurnInto(lookup(target)?))
                }
                ReactionStep::Emit(target) => reaction.actions.push(Action::Emit(lookup(target)?)),
                ReactionStep::End => reaction.actions.push(Action::End),
                ReactionStep::Touching(target) => reaction
                    .conditions
                    .push(Condition::Touching(lookup(target)?)),
                ReactionStep::DirectlyTouching(target) => reaction
                    .conditions
                    .push(Condition::DirectlyTouching(lookup(target)?)),
                ReactionStep::Chance(value) => {
                    let probability = value
                        .trim()
                        .parse::<f32>()
                        .ok()
                        .filter(|p| p.is_finite())
                        .ok_or_else(|| ConfigError::InvalidProbability {
                            element: element.to_string(),
                            value: value.clone(),
                        })?;
                    reaction.conditions.push(Condition::Chance(probability));
                }
            }
        }

        Ok(reaction)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get element data by id. Ids not issued by this registry fall back to
    /// the background element.
    pub fn get(&self, id: ElementId) -> &ElementData {
        self.elements
            .get(id as usize)
            .unwrap_or(&self.elements[self.air as usize])
    }

    /// Whether the id was issued by this registry
    pub fn contains(&self, id: ElementId) -> bool {
        (id as usize) < self.elements.len()
    }

    /// Resolve a definition key to its id
    pub fn id_of(&self, key: &str) -> Option<ElementId> {
        self.ids.get(key).copied()
    }

    /// Get display color for an element
    pub fn color(&self, id: ElementId) -> Rgba {
        self.get(id).color
    }

    /// Background element (first Air-role definition)
    pub fn air(&self) -> ElementId {
        self.air
    }

    /// Boundary ring element (first Wall-role definition)
    pub fn wall(&self) -> ElementId {
        self.wall
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementData> {
        self.elements.iter()
    }

    /// Elements offered to the paint picker, in definition order
    pub fn selectable(&self) -> impl Iterator<Item = &ElementData> {
        self.elements.iter().filter(|e| e.selectable)
    }
}
