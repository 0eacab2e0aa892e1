//! Data-defined reaction chains
//!
//! A reaction is an AND-chain of conditions followed by a sequence of
//! actions. Chains carry no state between ticks; every random draw happens
//! at evaluation time.

use serde::{Deserialize, Serialize};

use crate::cell::ElementId;

/// Gate evaluated before a chain's actions run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Independent Bernoulli draw with this probability
    Chance(f32),
    /// Any of the 8 surrounding cells holds the element
    Touching(ElementId),
    /// Any of the 4 orthogonal neighbors holds the element
    DirectlyTouching(ElementId),
}

/// Step executed once all conditions of a chain pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Replace the acting cell's element
    TurnInto(ElementId),
    /// Place the element into one random air neighbor
    Emit(ElementId),
    /// Stop the remaining actions of this chain
    End,
}

/// One resolved reaction chain
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl Reaction {
    pub fn new(conditions: Vec<Condition>, actions: Vec<Action>) -> Self {
        Self {
            conditions,
            actions,
        }
    }
}
