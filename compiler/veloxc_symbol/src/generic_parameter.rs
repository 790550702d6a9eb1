//! Contains the definition of [`GenericParameters`].

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use veloxc_arena::{Map, ID};
use veloxc_source_file::Span;

use crate::GenericItemRef;

/// Represents a declaration of a generic type parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeParameter {
    /// The name of the type parameter.
    pub name: String,

    /// The span of the type parameter declaration.
    pub span: Option<Span>,
}

/// Represents a reference to a generic parameter declared in a particular
/// item.
#[derive(Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct GenericParameterRef<Kind> {
    /// The ID of the generic parameter in the declared list of the item.
    pub id: ID<Kind>,

    /// The reference to the generic item that declares this generic
    /// parameter.
    pub generic_item_ref: GenericItemRef,
}

impl<Kind> std::fmt::Debug for GenericParameterRef<Kind> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericParameterRef")
            .field("id", &self.id)
            .field("generic_item_ref", &self.generic_item_ref)
            .finish()
    }
}

impl<Kind> GenericParameterRef<Kind> {
    /// Creates a new [`GenericParameterRef`] with the given ID and generic
    /// item reference.
    #[must_use]
    pub const fn new(
        id: ID<Kind>,
        generic_item_ref: GenericItemRef,
    ) -> Self {
        Self { id, generic_item_ref }
    }
}

impl<Kind> Clone for GenericParameterRef<Kind> {
    fn clone(&self) -> Self { *self }
}

impl<Kind> Copy for GenericParameterRef<Kind> {}

impl<Kind> PartialEq for GenericParameterRef<Kind> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.generic_item_ref == other.generic_item_ref
    }
}

impl<Kind> Eq for GenericParameterRef<Kind> {}

impl<Kind> PartialOrd for GenericParameterRef<Kind> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Kind> Ord for GenericParameterRef<Kind> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.generic_item_ref.cmp(&other.generic_item_ref))
    }
}

impl<Kind> Hash for GenericParameterRef<Kind> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.generic_item_ref.hash(state);
    }
}

/// Represents an identifier/reference to a type parameter declared in an
/// item.
pub type TypeParameterRef = GenericParameterRef<TypeParameter>;

/// Represents the generic parameter declarations in various item signatures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenericParameters {
    /// The type parameters declared in the item, accessible by their name.
    pub types: Map<TypeParameter>,
}

impl GenericParameters {
    /// Adds a new type parameter to the declaration list.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the ID of the existing type parameter if a type
    /// parameter with the same name was declared before.
    pub fn add_type_parameter(
        &mut self,
        parameter: TypeParameter,
    ) -> Result<ID<TypeParameter>, ID<TypeParameter>> {
        self.types
            .insert(parameter.name.clone(), parameter)
            .map_err(|(existing, _)| existing)
    }

    /// Returns `true` if the item declares no generic parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}
