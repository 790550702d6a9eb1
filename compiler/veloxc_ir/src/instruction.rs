//! Contains the definition of [`Instruction`] and its variants.

use enum_as_inner::EnumAsInner;
use veloxc_arena::ID;
use veloxc_source_file::{SourceElement, Span};
use veloxc_symbol::{ty::Type, Function, Trait, TraitFunction};

/// Represents a call to a trait function, dispatched through the trait
/// implementation of the receiver's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitCall {
    /// The type whose trait implementation the call dispatches through.
    pub receiver_type: Type,

    /// The ID of the trait that declares the called function.
    pub trait_id: ID<Trait>,

    /// The ID of the called function within the trait.
    pub function_id: ID<TraitFunction>,

    /// The span of the call expression.
    pub span: Span,
}

/// Represents a direct call to a function symbol with the given type
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// The ID of the called function.
    pub function_id: ID<Function>,

    /// The type arguments supplied to the function, in declaration order of
    /// its type parameters.
    pub type_arguments: Vec<Type>,

    /// The span of the call expression.
    pub span: Span,
}

/// Represents a call through a function pointer or a closure value.
///
/// No constness requirement can be attached to a plain function pointer
/// type, so such calls can never appear in a const-evaluable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndirectCall {
    /// The span of the call expression.
    pub span: Span,
}

/// Represents an operation with no constness obligation: arithmetic, moves,
/// and loads/stores of local memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pure {
    /// The span of the operation.
    pub span: Span,
}

/// Represents an instruction in the function body.
#[derive(
    Debug, Clone, PartialEq, Eq, EnumAsInner, derive_more::From,
)]
#[allow(missing_docs)]
pub enum Instruction {
    TraitCall(TraitCall),
    FunctionCall(FunctionCall),
    IndirectCall(IndirectCall),
    Pure(Pure),
}

impl SourceElement for Instruction {
    fn span(&self) -> Span {
        match self {
            Self::TraitCall(call) => call.span.clone(),
            Self::FunctionCall(call) => call.span.clone(),
            Self::IndirectCall(call) => call.span.clone(),
            Self::Pure(operation) => operation.span.clone(),
        }
    }
}
