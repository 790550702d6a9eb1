//! Contains the definition of [`Value`], the fully reduced result of the
//! constant evaluation.

use enum_as_inner::EnumAsInner;
use getset::Getters;
use serde::{Deserialize, Serialize};
use veloxc_arena::{Arena, ID};

/// Represents a literal value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    Serialize,
    Deserialize,
    derive_more::From,
)]
#[allow(missing_docs)]
pub enum Literal {
    Boolean(bool),
    Integer(i128),
}

/// Represents a value composed out of other values, e.g. a struct or a tuple
/// value.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Aggregate {
    /// The element values of the aggregate in declaration order.
    pub elements: Vec<Value>,
}

/// Represents a fully reduced compile-time value.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumAsInner,
    Serialize,
    Deserialize,
    derive_more::From,
)]
#[allow(missing_docs)]
pub enum Value {
    Literal(Literal),
    Aggregate(Aggregate),
    Reference(ID<Allocation>),
}

/// Describes in which region of the program an allocation was created.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Region {
    /// The allocation backs a `static` item; its content can be observed to
    /// change at runtime.
    Static,

    /// The allocation was created while evaluating a constant; its content
    /// is frozen after the evaluation.
    Const,
}

/// Represents a single allocation created by the constant evaluation.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Allocation {
    /// The region the allocation was created in.
    pub region: Region,

    /// The value stored in the allocation.
    pub value: Value,
}

/// Contains all the allocations referenced by the evaluated constants,
/// together with the region each allocation was created in.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Getters,
)]
pub struct Memory {
    /// The allocations indexed by their identity.
    #[get = "pub"]
    allocations: Arena<Allocation>,
}

impl Memory {
    /// Creates a new empty [`Memory`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a new allocation in the given region and returns its
    /// identity.
    pub fn allocate(
        &mut self,
        region: Region,
        value: Value,
    ) -> ID<Allocation> {
        self.allocations.insert(Allocation { region, value })
    }

    /// Gets the allocation with the given identity.
    #[must_use]
    pub fn get(&self, id: ID<Allocation>) -> Option<&Allocation> {
        self.allocations.get(id)
    }

    /// Gets a mutable reference to the allocation with the given identity.
    ///
    /// Used by the constant evaluation to patch up self-referential
    /// constants.
    #[must_use]
    pub fn get_mut(&mut self, id: ID<Allocation>) -> Option<&mut Allocation> {
        self.allocations.get_mut(id)
    }
}
