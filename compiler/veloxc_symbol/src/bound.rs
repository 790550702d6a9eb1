//! Contains the definition of [`WhereClause`] and [`TraitBound`].

use veloxc_arena::ID;
use veloxc_source_file::Span;

use crate::{generic_parameter::TypeParameterRef, Trait};

/// Represents a trait bound entry in the [`WhereClause`], e.g. `T: Add` or
/// `T: ?const Add`.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct TraitBound {
    /// The type parameter being bounded.
    pub parameter: TypeParameterRef,

    /// The ID of the trait that bounds the parameter.
    pub trait_id: ID<Trait>,

    /// Whether the bound was written with the `?const` opt-out marker.
    pub const_opt_out: bool,

    /// The span where the bound was declared.
    pub span: Span,
}

/// Represents a where clause declaration in various items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WhereClause {
    /// The list of trait bounds declared in the where clause.
    pub trait_bounds: Vec<TraitBound>,
}
