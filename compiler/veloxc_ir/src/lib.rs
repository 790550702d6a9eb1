//! Contains all the definitions related to the intermediate representation
//! of the function body.

use std::collections::HashMap;

use veloxc_symbol::CallableRef;

use crate::instruction::Instruction;

pub mod instruction;
pub mod value;

/// An intermediate representation of a function body.
///
/// The body is already bound and type-checked; only the information relevant
/// to the constness analysis is retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    /// The instructions of the body in evaluation order.
    pub instructions: Vec<Instruction>,
}

impl Body {
    /// Creates a new body out of the given instructions.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self { Self { instructions } }
}

/// Contains the bodies of all the callables in the program, produced by the
/// binding stage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bodies {
    bodies_by_callable: HashMap<CallableRef, Body>,
}

impl Bodies {
    /// Creates a new empty [`Bodies`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers the body of the given callable, replacing and returning the
    /// previous one if any.
    pub fn insert(
        &mut self,
        callable_ref: CallableRef,
        body: Body,
    ) -> Option<Body> {
        self.bodies_by_callable.insert(callable_ref, body)
    }

    /// Gets the body of the given callable.
    #[must_use]
    pub fn get(&self, callable_ref: CallableRef) -> Option<&Body> {
        self.bodies_by_callable.get(&callable_ref)
    }

    /// Returns an iterator over the `(CallableRef, &Body)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CallableRef, &Body)> {
        self.bodies_by_callable.iter().map(|(key, value)| (*key, value))
    }
}
