//! Contains the const-pattern safety checker.
//!
//! Exhaustiveness checking assumes that the value of a constant used as a
//! match pattern is fixed at compile time. A constant whose value reaches
//! memory originating from a `static` item breaks that assumption: the
//! pointee can be observed to change at runtime, so treating the constant as
//! a concrete literal could make an actually-non-exhaustive match appear
//! exhaustive. This checker proves, per constant, that every reachable
//! allocation is immutable, and demotes the constant to an opaque
//! equality-only pattern otherwise. The demotion is a conservative recovery,
//! not an error; nothing is reported to the user.

use std::collections::{HashMap, HashSet};

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use veloxc_arena::ID;
use veloxc_ir::value::{Allocation, Literal, Memory, Region, Value};

/// The traversal state of an allocation reachable from the checked constant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumAsInner,
)]
pub enum ProvenanceState {
    /// The allocation hasn't been reached yet.
    #[default]
    Unvisited,

    /// The allocation is currently being descended into; reaching it again
    /// means the constant is self-referential, which is fine as long as
    /// every allocation in the cycle lives in the const region.
    Visiting,

    /// Every allocation reachable from this one lives in the const region.
    ProvenImmutable,

    /// The allocation is (or reaches) memory originating from a `static`
    /// item.
    Rejected,
}

/// Describes how a constant may be used as a match pattern.
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
)]
pub enum Eligibility {
    /// The constant's value is proven immutable; the pattern is decomposed
    /// structurally and contributes to the exhaustiveness proof.
    Decompose,

    /// The constant may alias mutable storage; the pattern is lowered to an
    /// opaque equality test only.
    OpaqueEquality,
}

impl Eligibility {
    /// Whether a pattern with this eligibility may contribute to the
    /// exhaustiveness proof of the surrounding match.
    #[must_use]
    pub const fn contributes_to_exhaustiveness(self) -> bool {
        matches!(self, Self::Decompose)
    }
}

/// The lowered form of a constant used as a match pattern.
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
)]
pub enum Pattern {
    /// Matches the exact literal value.
    Literal(Literal),

    /// Matches every element pattern field-by-field.
    Aggregate(Vec<Pattern>),

    /// Matches the pointee of the reference.
    Reference(Box<Pattern>),

    /// Compared with the structural-equality test only; contributes nothing
    /// to the exhaustiveness proof.
    Opaque,
}

/// Proves the immutability of the allocations reachable from the checked
/// constants.
///
/// The checker is created per constant-evaluation [`Memory`] and can check
/// any number of constants against it; the per-allocation verdicts are
/// shared between the checks.
#[derive(Debug)]
pub struct Checker<'a> {
    memory: &'a Memory,
    states: HashMap<ID<Allocation>, ProvenanceState>,
}

impl<'a> Checker<'a> {
    /// Creates a new [`Checker`] over the given memory.
    #[must_use]
    pub fn new(memory: &'a Memory) -> Self {
        Self { memory, states: HashMap::new() }
    }

    /// Decides how the constant with the given value may be used as a match
    /// pattern.
    pub fn eligibility(&mut self, value: &Value) -> Eligibility {
        if self.proven_immutable(value) {
            Eligibility::Decompose
        } else {
            Eligibility::OpaqueEquality
        }
    }

    fn proven_immutable(&mut self, value: &Value) -> bool {
        match value {
            Value::Literal(_) => true,

            Value::Aggregate(aggregate) => aggregate
                .elements
                .iter()
                .all(|element| self.proven_immutable(element)),

            Value::Reference(id) => self.allocation_proven_immutable(*id),
        }
    }

    fn allocation_proven_immutable(&mut self, id: ID<Allocation>) -> bool {
        match self.states.get(&id).copied().unwrap_or_default() {
            ProvenanceState::ProvenImmutable | ProvenanceState::Visiting => {
                true
            }

            ProvenanceState::Rejected => false,

            ProvenanceState::Unvisited => {
                let memory = self.memory;

                // an allocation the memory doesn't know about can't be
                // proven anything
                let Some(allocation) = memory.get(id) else {
                    self.states.insert(id, ProvenanceState::Rejected);
                    return false;
                };

                if allocation.region == Region::Static {
                    self.states.insert(id, ProvenanceState::Rejected);
                    return false;
                }

                self.states.insert(id, ProvenanceState::Visiting);

                let immutable = self.proven_immutable(&allocation.value);

                self.states.insert(id, if immutable {
                    ProvenanceState::ProvenImmutable
                } else {
                    ProvenanceState::Rejected
                });

                immutable
            }
        }
    }
}

/// Lowers the constant with the given value into the pattern form consumed
/// by the exhaustiveness checking.
///
/// A constant that fails the immutability proof is lowered to
/// [`Pattern::Opaque`] as a whole. A proven constant is decomposed
/// structurally; a self-referential constant closes its cycles with
/// [`Pattern::Opaque`] sub-patterns, since a finite pattern tree can't spell
/// out an infinite value.
#[must_use]
pub fn lower(value: &Value, memory: &Memory) -> (Pattern, Eligibility) {
    let mut checker = Checker::new(memory);
    let eligibility = checker.eligibility(value);

    let pattern = match eligibility {
        Eligibility::OpaqueEquality => Pattern::Opaque,
        Eligibility::Decompose => {
            lower_value(value, memory, &mut HashSet::new())
        }
    };

    (pattern, eligibility)
}

fn lower_value(
    value: &Value,
    memory: &Memory,
    visiting: &mut HashSet<ID<Allocation>>,
) -> Pattern {
    match value {
        Value::Literal(literal) => Pattern::Literal(*literal),

        Value::Aggregate(aggregate) => Pattern::Aggregate(
            aggregate
                .elements
                .iter()
                .map(|element| lower_value(element, memory, visiting))
                .collect(),
        ),

        Value::Reference(id) => {
            if !visiting.insert(*id) {
                return Pattern::Opaque;
            }

            let pattern = memory.get(*id).map_or(Pattern::Opaque, |x| {
                Pattern::Reference(Box::new(lower_value(
                    &x.value, memory, visiting,
                )))
            });

            visiting.remove(id);

            pattern
        }
    }
}
