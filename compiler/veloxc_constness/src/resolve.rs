//! Contains the recursive resolution deciding whether a type has a const
//! implementation of a trait.

use enum_as_inner::EnumAsInner;
use veloxc_arena::ID;
use veloxc_symbol::{
    constness::{ConstnessClass, ConstnessRequirement, Obligation},
    generic_parameter::TypeParameterRef,
    instantiation,
    ty::Type,
    ImplementsRef, Table, Trait,
};

use crate::{annotate::Assumptions, registry::Registry};

/// The maximum recursion depth of the resolution.
///
/// The resolution descends through the structure of the receiver type and
/// the bounds of the matched implementations; the limit bounds pathological
/// inputs.
pub const DEPTH_LIMIT: usize = 256;

/// Describes why a type couldn't be proven to const-implement a trait.
#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
pub enum Unsatisfied {
    /// The type is a parameter whose bound on the trait carries the `?const`
    /// opt-out.
    OptOutBound {
        /// The parameter in question.
        parameter: TypeParameterRef,

        /// The trait of the opted-out bound.
        trait_id: ID<Trait>,
    },

    /// The type is a parameter with no bound on the trait at all.
    NoBound {
        /// The parameter in question.
        parameter: TypeParameterRef,

        /// The trait the parameter isn't bounded by.
        trait_id: ID<Trait>,
    },

    /// The type's implementation of the trait isn't declared `const`, or no
    /// implementation matches the type.
    NonConstImplementation {
        /// The type in question.
        ty: Type,

        /// The trait in question.
        trait_id: ID<Trait>,
    },

    /// The recursion limit was exhausted.
    Overflow,
}

/// Derives the [`ConstnessClass`] of an implementation from its signature
/// alone, memoizing the result in the registry.
///
/// A non-const implementation is [`ConstnessClass::NeverConst`]. A const
/// implementation with no generic parameters is
/// [`ConstnessClass::AlwaysConst`]; otherwise it is conditional over its own
/// bounds, which is what keeps the implementation usable at runtime with
/// type arguments that don't satisfy them.
#[must_use]
pub fn implements_header_class(
    implements_ref: ImplementsRef,
    table: &Table,
    registry: &Registry,
) -> ConstnessClass {
    if let Some(class) = registry.implements_class(implements_ref) {
        return class;
    }

    let implements = table.get_implements(implements_ref).unwrap();

    let class = if implements.is_const {
        ConstnessClass::conditional_over(
            implements
                .where_clause
                .trait_bounds
                .iter()
                .filter(|bound| !bound.const_opt_out)
                .map(|bound| Obligation::new(bound.parameter, bound.trait_id))
                .collect(),
        )
    } else {
        ConstnessClass::NeverConst
    };

    registry.register_implements(implements_ref, class.clone());

    class
}

/// Decides whether the given type can be used where a const implementation
/// of the given trait is demanded.
///
/// A parameter type resolves against the assumption set; a concrete type
/// resolves against the actual implementations in the table, recursively
/// establishing the constness of the bounds of the matched implementation.
///
/// # Errors
///
/// Returns [`Unsatisfied`] describing the first failure encountered.
pub fn const_satisfiable(
    ty: &Type,
    trait_id: ID<Trait>,
    assumptions: &Assumptions,
    table: &Table,
    registry: &Registry,
) -> Result<ConstnessClass, Unsatisfied> {
    const_satisfiable_with_depth(ty, trait_id, assumptions, table, registry, 0)
}

fn const_satisfiable_with_depth(
    ty: &Type,
    trait_id: ID<Trait>,
    assumptions: &Assumptions,
    table: &Table,
    registry: &Registry,
    depth: usize,
) -> Result<ConstnessClass, Unsatisfied> {
    if depth > DEPTH_LIMIT {
        return Err(Unsatisfied::Overflow);
    }

    // a parameter type resolves against the caller's annotated bounds
    if let Type::Parameter(parameter) = ty {
        return match assumptions.requirement_for(*parameter, trait_id) {
            Some(ConstnessRequirement::Required) => {
                Ok(ConstnessClass::conditional(Obligation::new(
                    *parameter, trait_id,
                )))
            }
            Some(ConstnessRequirement::Optional) => {
                Err(Unsatisfied::OptOutBound { parameter: *parameter, trait_id })
            }
            None => {
                Err(Unsatisfied::NoBound { parameter: *parameter, trait_id })
            }
        };
    }

    let Some((implements_ref, deduced)) = table.implementation_of(trait_id, ty)
    else {
        return Err(Unsatisfied::NonConstImplementation {
            ty: ty.clone(),
            trait_id,
        });
    };

    if implements_header_class(implements_ref, table, registry)
        .is_never_const()
    {
        return Err(Unsatisfied::NonConstImplementation {
            ty: ty.clone(),
            trait_id,
        });
    }

    // the bounds of the matched implementation become demands on the deduced
    // type arguments
    let implements = table.get_implements(implements_ref).unwrap();
    let mut class = ConstnessClass::AlwaysConst;

    for bound in &implements.where_clause.trait_bounds {
        if bound.const_opt_out {
            continue;
        }

        let mut bounded = Type::Parameter(bound.parameter);
        instantiation::instantiate(&mut bounded, &deduced);

        class = class.meet(const_satisfiable_with_depth(
            &bounded,
            bound.trait_id,
            assumptions,
            table,
            registry,
            depth + 1,
        )?);
    }

    Ok(class)
}
