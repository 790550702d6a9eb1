//! Contains the logic for searching the implementation of a trait for a
//! particular type.

use std::collections::HashMap;

use veloxc_arena::ID;

use crate::{
    generic_parameter::TypeParameterRef,
    instantiation::Instantiation,
    ty::Type,
    ImplementsRef, Table, Trait,
};

impl Table {
    /// Searches for the implementation of the given trait that matches the
    /// given type.
    ///
    /// Returns the reference to the matching implementation together with
    /// the deduced substitution of the implementation's generic parameters.
    /// The implementations are assumed to be coherent; the first match wins.
    #[must_use]
    pub fn implementation_of(
        &self,
        trait_id: ID<Trait>,
        ty: &Type,
    ) -> Option<(ImplementsRef, Instantiation)> {
        let r#trait = self.traits().get(trait_id)?;

        for (implements_id, implements) in r#trait.implements.iter() {
            if let Some(instantiation) = deduce(&implements.self_type, ty) {
                return Some((
                    ImplementsRef { trait_id, implements_id },
                    instantiation,
                ));
            }
        }

        None
    }
}

/// Matches the `target` type against the `pattern` type, binding the type
/// parameters appearing in the pattern.
///
/// Returns [`None`] if the target doesn't structurally match the pattern or
/// if a parameter would have to be bound to two different types at once.
#[must_use]
pub fn deduce(pattern: &Type, target: &Type) -> Option<Instantiation> {
    let mut types_by_parameter = HashMap::new();

    deduce_in_place(pattern, target, &mut types_by_parameter)
        .then_some(Instantiation { types_by_parameter })
}

fn deduce_in_place(
    pattern: &Type,
    target: &Type,
    bindings: &mut HashMap<TypeParameterRef, Type>,
) -> bool {
    match (pattern, target) {
        (Type::Parameter(parameter), _) => {
            match bindings.get(parameter) {
                Some(existing) => existing == target,
                None => {
                    bindings.insert(*parameter, target.clone());
                    true
                }
            }
        }

        (Type::Primitive(lhs), Type::Primitive(rhs)) => lhs == rhs,

        (Type::Symbol(lhs), Type::Symbol(rhs)) => {
            lhs.struct_id == rhs.struct_id
                && lhs.type_arguments.len() == rhs.type_arguments.len()
                && lhs
                    .type_arguments
                    .iter()
                    .zip(rhs.type_arguments.iter())
                    .all(|(pattern, target)| {
                        deduce_in_place(pattern, target, bindings)
                    })
        }

        (Type::Reference(lhs), Type::Reference(rhs)) => {
            deduce_in_place(lhs, rhs, bindings)
        }

        _ => false,
    }
}
