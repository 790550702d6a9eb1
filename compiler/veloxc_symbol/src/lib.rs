//! Contains the definition of [`Table`], the semantic representation of the
//! program that the analyses run over.
//!
//! The table is produced by the lowering stage of the compiler: every symbol
//! in it is already name-resolved and type-checked. The analyses in the
//! sibling crates only read from it.

use std::fmt;

use enum_as_inner::EnumAsInner;
use getset::Getters;
use serde::{Deserialize, Serialize};
use veloxc_arena::{Arena, Map, ID};
use veloxc_source_file::Span;

use crate::{
    bound::WhereClause,
    generic_parameter::GenericParameters,
    ty::Type,
};

pub mod bound;
pub mod constness;
pub mod diagnostic;
pub mod generic_parameter;
pub mod instantiation;
pub mod resolution;
pub mod ty;

/// Represents a function declared in a trait, e.g. `function add(..)` inside
/// a `trait` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitFunction {
    /// The name of the trait function.
    pub name: String,

    /// The span of the trait function declaration.
    pub span: Option<Span>,
}

/// Represents a trait declaration entry in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trait {
    /// The name of the trait.
    pub name: String,

    /// The functions declared in the trait.
    pub functions: Map<TraitFunction>,

    /// The implementations of the trait.
    pub implements: Arena<Implements>,
}

impl Trait {
    /// Creates a new trait with the given name and no functions nor
    /// implementations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Map::new(),
            implements: Arena::new(),
        }
    }
}

/// Represents a function declared in an `implements` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementsFunction {
    /// The name of the implemented function.
    pub name: String,

    /// The span of the implemented function declaration.
    pub span: Option<Span>,
}

/// Represents an `implements` block entry for a particular trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implements {
    /// Whether the implementation was declared with the `const` keyword.
    pub is_const: bool,

    /// The generic parameters declared in the implementation.
    pub generic_parameters: GenericParameters,

    /// The where clause declared in the implementation.
    pub where_clause: WhereClause,

    /// The type that the trait is implemented for.
    pub self_type: Type,

    /// The functions declared in the implementation.
    pub functions: Map<ImplementsFunction>,

    /// The span of the implementation signature.
    pub span: Option<Span>,
}

/// Represents a reference to an [`Implements`] stored in a particular
/// [`Trait`].
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
pub struct ImplementsRef {
    /// The ID of the trait that the implementation is for.
    pub trait_id: ID<Trait>,

    /// The ID of the implementation within the trait.
    pub implements_id: ID<Implements>,
}

/// Represents a reference to an [`ImplementsFunction`] stored in a particular
/// [`Implements`].
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
pub struct ImplementsFunctionRef {
    /// The reference to the implementation that the function is declared in.
    pub implements_ref: ImplementsRef,

    /// The ID of the function within the implementation.
    pub function_id: ID<ImplementsFunction>,
}

/// Represents a field declaration entry in the [`Struct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The name of the field.
    pub name: String,

    /// The type of the field.
    pub ty: Type,
}

/// Represents a struct declaration entry in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    /// The name of the struct.
    pub name: String,

    /// The generic parameters declared in the struct.
    pub generic_parameters: GenericParameters,

    /// The fields declared in the struct.
    pub fields: Arena<Field>,
}

impl Struct {
    /// Creates a new struct with the given name and no generic parameters
    /// nor fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_parameters: GenericParameters::default(),
            fields: Arena::new(),
        }
    }
}

/// Represents a function declaration entry in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// The name of the function.
    pub name: String,

    /// Whether the function was declared with the `const` keyword.
    pub is_const: bool,

    /// The generic parameters declared in the function.
    pub generic_parameters: GenericParameters,

    /// The where clause declared in the function.
    pub where_clause: WhereClause,

    /// The span of the function signature.
    pub span: Option<Span>,
}

/// Represents a reference to an item in the [`Table`] that can declare
/// generic parameters.
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
pub enum GenericItemRef {
    Struct(ID<Struct>),
    Function(ID<Function>),
    Implements(ImplementsRef),
}

/// Represents a reference to an item in the [`Table`] that owns a function
/// body.
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
pub enum CallableRef {
    Function(ID<Function>),
    ImplementsFunction(ImplementsFunctionRef),
}

/// Represents the semantic representation of the program.
#[derive(Debug, Clone, Default, Getters)]
pub struct Table {
    /// The traits declared in the program.
    #[get = "pub"]
    traits: Map<Trait>,

    /// The structs declared in the program.
    #[get = "pub"]
    structs: Map<Struct>,

    /// The functions declared in the program.
    #[get = "pub"]
    functions: Map<Function>,

    /// The trait that is invoked when a value goes out of scope, if the
    /// program declares one.
    destructor_trait: Option<ID<Trait>>,
}

impl Table {
    /// Creates a new empty [`Table`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Inserts a new trait into the table.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the ID of the existing trait and the rejected new
    /// trait if a trait with the same name already exists.
    pub fn insert_trait(
        &mut self,
        item: Trait,
    ) -> Result<ID<Trait>, (ID<Trait>, Trait)> {
        self.traits.insert(item.name.clone(), item)
    }

    /// Inserts a new struct into the table.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the ID of the existing struct and the rejected
    /// new struct if a struct with the same name already exists.
    pub fn insert_struct(
        &mut self,
        item: Struct,
    ) -> Result<ID<Struct>, (ID<Struct>, Struct)> {
        self.structs.insert(item.name.clone(), item)
    }

    /// Inserts a new function into the table.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] with the ID of the existing function and the rejected
    /// new function if a function with the same name already exists.
    pub fn insert_function(
        &mut self,
        item: Function,
    ) -> Result<ID<Function>, (ID<Function>, Function)> {
        self.functions.insert(item.name.clone(), item)
    }

    /// Inserts a new implementation into the trait with the given ID.
    ///
    /// Returns [`None`] if the trait ID is not valid.
    pub fn insert_implements(
        &mut self,
        trait_id: ID<Trait>,
        implements: Implements,
    ) -> Option<ImplementsRef> {
        let implements_id =
            self.traits.get_mut(trait_id)?.implements.insert(implements);

        Some(ImplementsRef { trait_id, implements_id })
    }

    /// Gets the implementation with the given reference.
    #[must_use]
    pub fn get_implements(
        &self,
        implements_ref: ImplementsRef,
    ) -> Option<&Implements> {
        self.traits
            .get(implements_ref.trait_id)?
            .implements
            .get(implements_ref.implements_id)
    }

    /// Gets the implemented function with the given reference.
    #[must_use]
    pub fn get_implements_function(
        &self,
        function_ref: ImplementsFunctionRef,
    ) -> Option<&ImplementsFunction> {
        self.get_implements(function_ref.implements_ref)?
            .functions
            .get(function_ref.function_id)
    }

    /// Gets a mutable reference to the trait with the given ID.
    #[must_use]
    pub fn get_trait_mut(&mut self, id: ID<Trait>) -> Option<&mut Trait> {
        self.traits.get_mut(id)
    }

    /// Gets a mutable reference to the struct with the given ID.
    #[must_use]
    pub fn get_struct_mut(&mut self, id: ID<Struct>) -> Option<&mut Struct> {
        self.structs.get_mut(id)
    }

    /// Gets a mutable reference to the function with the given ID.
    #[must_use]
    pub fn get_function_mut(
        &mut self,
        id: ID<Function>,
    ) -> Option<&mut Function> {
        self.functions.get_mut(id)
    }

    /// Marks the trait with the given ID as the trait that is invoked when a
    /// value goes out of scope.
    pub fn set_destructor_trait(&mut self, trait_id: ID<Trait>) {
        self.destructor_trait = Some(trait_id);
    }

    /// Gets the trait that is invoked when a value goes out of scope, if the
    /// program declares one.
    #[must_use]
    pub const fn destructor_trait(&self) -> Option<ID<Trait>> {
        self.destructor_trait
    }

    /// Gets the generic parameters declared in the item with the given
    /// reference.
    #[must_use]
    pub fn generic_parameters_of(
        &self,
        generic_item_ref: GenericItemRef,
    ) -> Option<&GenericParameters> {
        match generic_item_ref {
            GenericItemRef::Struct(id) => {
                self.structs.get(id).map(|x| &x.generic_parameters)
            }
            GenericItemRef::Function(id) => {
                self.functions.get(id).map(|x| &x.generic_parameters)
            }
            GenericItemRef::Implements(implements_ref) => self
                .get_implements(implements_ref)
                .map(|x| &x.generic_parameters),
        }
    }
}

/// Contains the display object that requires the table.
///
/// Primarily used for implementing the [`std::fmt::Display`] trait.
#[derive(Debug, Clone, Copy)]
pub struct DisplayObject<'a, D: ?Sized> {
    /// The table in which the display object will refer to.
    pub table: &'a Table,

    /// The display object that requires the table.
    pub display: &'a D,
}

impl<Error: Display + ?Sized> std::fmt::Display for DisplayObject<'_, Error> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.display.fmt(self.table, f)
    }
}

/// Similar to [`std::fmt::Display`] but with the table in which the displayed
/// value is defined.
pub trait Display {
    #[allow(missing_docs, clippy::missing_errors_doc)]
    fn fmt(&self, table: &Table, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}
