//! Contains the definition of [`Instantiation`].

use std::collections::HashMap;

use crate::{
    generic_parameter::{GenericParameters, TypeParameterRef},
    ty::Type,
    GenericItemRef,
};

/// Represents a substitution of the generic parameters of a particular item
/// with concrete-or-parameter type terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instantiation {
    /// The substitution of each type parameter.
    pub types_by_parameter: HashMap<TypeParameterRef, Type>,
}

impl Instantiation {
    /// Creates an [`Instantiation`] mapping the type parameters of the given
    /// item to the given type arguments, in declaration order.
    ///
    /// Returns [`None`] if the number of the supplied arguments mismatches
    /// the number of the declared parameters.
    #[must_use]
    pub fn from_type_arguments(
        generic_parameters: &GenericParameters,
        generic_item_ref: GenericItemRef,
        type_arguments: &[Type],
    ) -> Option<Self> {
        if generic_parameters.types.len() != type_arguments.len() {
            return None;
        }

        Some(Self {
            types_by_parameter: generic_parameters
                .types
                .ids()
                .zip(type_arguments.iter().cloned())
                .map(|(id, argument)| {
                    (TypeParameterRef::new(id, generic_item_ref), argument)
                })
                .collect(),
        })
    }

    /// Gets the substituted type of the given parameter, if any.
    #[must_use]
    pub fn get(&self, parameter: TypeParameterRef) -> Option<&Type> {
        self.types_by_parameter.get(&parameter)
    }
}

/// Applies the instantiation to the given type in place.
///
/// Parameters that aren't present in the instantiation are left as is.
pub fn instantiate(ty: &mut Type, instantiation: &Instantiation) {
    match ty {
        Type::Primitive(_) => {}

        Type::Parameter(parameter) => {
            if let Some(substitution) = instantiation.get(*parameter) {
                *ty = substitution.clone();
            }
        }

        Type::Symbol(symbol) => {
            for argument in &mut symbol.type_arguments {
                instantiate(argument, instantiation);
            }
        }

        Type::Reference(inner) => instantiate(inner, instantiation),
    }
}

/// Creates the type arguments that map every type parameter of the given item
/// to itself, e.g. `Wrap[T]` for a struct declared as `struct Wrap[T]`.
#[must_use]
pub fn create_identity_type_arguments(
    generic_parameters: &GenericParameters,
    generic_item_ref: GenericItemRef,
) -> Vec<Type> {
    generic_parameters
        .types
        .ids()
        .map(|id| Type::Parameter(TypeParameterRef::new(id, generic_item_ref)))
        .collect()
}
