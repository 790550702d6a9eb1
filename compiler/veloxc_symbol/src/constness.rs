//! Contains the definition of [`ConstnessClass`], the lattice that the
//! constness checks operate over.

use std::{collections::BTreeSet, fmt};

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use veloxc_arena::ID;

use crate::{
    generic_parameter::TypeParameterRef, ty::Type, DisplayObject, Table, Trait,
};

/// The constness requirement attached to a trait bound.
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
pub enum ConstnessRequirement {
    /// The bound's functions must be callable in const contexts; the
    /// obligation is forwarded to the callers.
    Required,

    /// The bound carries no constness obligation; its functions can't be
    /// called from const-evaluating code.
    Optional,
}

/// A single constness obligation deferred to the callers: the concrete type
/// argument substituted for the parameter must have a const implementation of
/// the trait.
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
    derive_new::new,
)]
pub struct Obligation {
    /// The type parameter the obligation is attached to.
    pub parameter: TypeParameterRef,

    /// The trait that must be const-implemented by the substituted type
    /// argument.
    pub trait_id: ID<Trait>,
}

impl crate::Display for Obligation {
    fn fmt(&self, table: &Table, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameter = Type::Parameter(self.parameter);
        let trait_name =
            &table.traits().get(self.trait_id).ok_or(fmt::Error)?.name;

        write!(
            f,
            "{}: const {trait_name}",
            DisplayObject { table, display: &parameter }
        )
    }
}

/// Describes whether an item (function, implemented function, or a whole
/// `implements` block) can be evaluated in a const context.
///
/// The three variants form a lattice: [`ConstnessClass::AlwaysConst`] is the
/// top, [`ConstnessClass::NeverConst`] is the bottom, and the conditional
/// classes in between are ordered by the inclusion of their obligation sets.
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
pub enum ConstnessClass {
    /// The item is const-evaluable with any type arguments.
    AlwaysConst,

    /// The item is const-evaluable only when every obligation in the set is
    /// satisfied by the supplied type arguments.
    ///
    /// The set is never empty; an empty set is represented by
    /// [`ConstnessClass::AlwaysConst`] instead.
    ConditionallyConst(BTreeSet<Obligation>),

    /// The item can never be evaluated in a const context.
    NeverConst,
}

impl ConstnessClass {
    /// Creates a [`ConstnessClass::ConditionallyConst`] over a single
    /// obligation.
    #[must_use]
    pub fn conditional(obligation: Obligation) -> Self {
        Self::ConditionallyConst(std::iter::once(obligation).collect())
    }

    /// Creates a class over the given obligations:
    /// [`ConstnessClass::AlwaysConst`] when the set is empty,
    /// [`ConstnessClass::ConditionallyConst`] otherwise.
    #[must_use]
    pub fn conditional_over(obligations: BTreeSet<Obligation>) -> Self {
        if obligations.is_empty() {
            Self::AlwaysConst
        } else {
            Self::ConditionallyConst(obligations)
        }
    }

    /// Combines two constness facts into the strongest class implied by
    /// both.
    ///
    /// [`ConstnessClass::AlwaysConst`] is the identity,
    /// [`ConstnessClass::NeverConst`] is absorbing, and two conditional
    /// classes combine into the union of their obligation sets.
    #[must_use]
    pub fn meet(self, other: Self) -> Self {
        match (self, other) {
            (Self::NeverConst, _) | (_, Self::NeverConst) => Self::NeverConst,

            (Self::AlwaysConst, x) | (x, Self::AlwaysConst) => x,

            (
                Self::ConditionallyConst(mut lhs),
                Self::ConditionallyConst(rhs),
            ) => {
                lhs.extend(rhs);
                Self::ConditionallyConst(lhs)
            }
        }
    }
}
