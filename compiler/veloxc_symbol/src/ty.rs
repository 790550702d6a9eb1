//! Contains the definition of [`Type`].

use std::fmt;

use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use veloxc_arena::ID;

use crate::{
    generic_parameter::TypeParameterRef, DisplayObject, Struct, Table,
};

/// Represents a primitive type of the language.
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
#[allow(missing_docs)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Usize,
    Isize,
    Float32,
    Float64,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Uint8 => write!(f, "uint8"),
            Self::Uint16 => write!(f, "uint16"),
            Self::Uint32 => write!(f, "uint32"),
            Self::Uint64 => write!(f, "uint64"),
            Self::Usize => write!(f, "usize"),
            Self::Isize => write!(f, "isize"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
        }
    }
}

/// Represents a type whose value is a particular struct declaration with the
/// given type arguments, e.g. `Wrap[int32]`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Symbol {
    /// The ID of the struct declaration.
    pub struct_id: ID<Struct>,

    /// The type arguments supplied to the struct.
    pub type_arguments: Vec<Type>,
}

/// Represents a type term of the language.
///
/// The type is already fully inferred; no inference placeholders can appear
/// here.
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
pub enum Type {
    Primitive(Primitive),
    Parameter(TypeParameterRef),
    Symbol(Symbol),
    Reference(Box<Type>),
}

impl Type {
    /// Returns `true` if no type parameter appears anywhere in the type.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        match self {
            Self::Primitive(_) => true,
            Self::Parameter(_) => false,
            Self::Symbol(symbol) => {
                symbol.type_arguments.iter().all(Self::is_concrete)
            }
            Self::Reference(inner) => inner.is_concrete(),
        }
    }
}

impl crate::Display for Type {
    fn fmt(&self, table: &Table, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Parameter(parameter) => {
                let name = table
                    .generic_parameters_of(parameter.generic_item_ref)
                    .and_then(|x| x.types.get(parameter.id))
                    .map(|x| x.name.clone())
                    .ok_or(fmt::Error)?;

                write!(f, "{name}")
            }
            Self::Symbol(symbol) => {
                let declaration =
                    table.structs().get(symbol.struct_id).ok_or(fmt::Error)?;

                write!(f, "{}", declaration.name)?;

                if !symbol.type_arguments.is_empty() {
                    write!(f, "[")?;

                    let mut peekable =
                        symbol.type_arguments.iter().peekable();

                    while let Some(argument) = peekable.next() {
                        write!(f, "{}", DisplayObject {
                            table,
                            display: argument
                        })?;

                        if peekable.peek().is_some() {
                            write!(f, ", ")?;
                        }
                    }

                    write!(f, "]")?;
                }

                Ok(())
            }
            Self::Reference(inner) => {
                write!(f, "&{}", DisplayObject { table, display: &**inner })
            }
        }
    }
}
