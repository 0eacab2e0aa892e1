//! Element data for Sandfall
//!
//! This crate provides the foundational data types for the simulation:
//! - Cells and element ids (Cell, ElementId)
//! - Element definitions as loaded from RON (ElementDefinitions)
//! - The immutable element registry (ElementRegistry, ElementData, ElementKind, Role)
//! - Reaction chains (Reaction, Condition, Action)
//! - Display colors and load-time errors

mod cell;
mod color;
mod definition;
mod error;
mod reactions;
mod registry;

pub use cell::{Cell, ElementId};
pub use color::{DEFAULT_COLOR, Rgba, named_color, parse_color};
pub use definition::{
    BehaviorDef, DisplayDef, ElementDefinition, ElementDefinitions, MaterialDef, ReactionStep,
};
pub use error::ConfigError;
pub use reactions::{Action, Condition, Reaction};
pub use registry::{ElementData, ElementKind, ElementRegistry, Role};
