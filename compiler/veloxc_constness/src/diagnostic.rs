//! Contains the diagnostic information related to the constness analysis.

use derive_new::new;
use itertools::Itertools;
use veloxc_arena::ID;
use veloxc_diagnostic::{Diagnostic, Related, Report};
use veloxc_log::Severity;
use veloxc_source_file::Span;
use veloxc_symbol::{
    generic_parameter::TypeParameterRef, ty::Type, DisplayObject, Function,
    Table, Trait, TraitFunction,
};

fn parameter_name(table: &Table, parameter: TypeParameterRef) -> String {
    table
        .generic_parameters_of(parameter.generic_item_ref)
        .and_then(|x| x.types.get(parameter.id))
        .map_or_else(|| "?".to_string(), |x| x.name.clone())
}

fn trait_name(table: &Table, trait_id: ID<Trait>) -> String {
    table
        .traits()
        .get(trait_id)
        .map_or_else(|| "?".to_string(), |x| x.name.clone())
}

/// The `?const` bound opt-out was used in a `const implements` signature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct OptOutBoundInConstImplements {
    /// The span of the offending bound.
    pub bound_span: Span,

    /// The type parameter the bound is attached to.
    pub parameter: TypeParameterRef,

    /// The trait of the offending bound.
    pub trait_id: ID<Trait>,
}

impl Report<&Table> for OptOutBoundInConstImplements {
    fn report(&self, table: &Table) -> Diagnostic {
        Diagnostic {
            span: self.bound_span.clone(),
            message: format!(
                "the bound `{}: {}` can't opt out of constness inside a \
                 `const implements` signature",
                parameter_name(table, self.parameter),
                trait_name(table, self.trait_id),
            ),
            severity: Severity::Error,
            help_message: Some(
                "remove the `?const` marker; every bound of a `const \
                 implements` is implicitly const"
                    .to_string(),
            ),
            related: Vec::new(),
        }
    }
}

/// A const-evaluable body calls a trait function whose implementation for
/// the receiver's type is not const.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct NonConstTraitCall {
    /// The span of the call expression.
    pub call_span: Span,

    /// The type whose trait implementation the call dispatches through.
    pub receiver_type: Type,

    /// The trait that declares the called function.
    pub trait_id: ID<Trait>,

    /// The called function within the trait.
    pub function_id: ID<TraitFunction>,
}

impl Report<&Table> for NonConstTraitCall {
    fn report(&self, table: &Table) -> Diagnostic {
        let trait_name = trait_name(table, self.trait_id);
        let function_name = table
            .traits()
            .get(self.trait_id)
            .and_then(|x| x.functions.get(self.function_id))
            .map_or_else(|| "?".to_string(), |x| x.name.clone());

        Diagnostic {
            span: self.call_span.clone(),
            message: format!(
                "the function `{trait_name}::{function_name}` can't be \
                 called in a const context because `{}` doesn't have a \
                 `const implements {trait_name}`",
                DisplayObject { table, display: &self.receiver_type },
            ),
            severity: Severity::Error,
            help_message: Some(format!(
                "add a `const implements {trait_name}` for `{}`",
                DisplayObject { table, display: &self.receiver_type },
            )),
            related: Vec::new(),
        }
    }
}

/// A const-evaluable body calls a trait function through a bound that opted
/// out of constness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct OptOutBoundCall {
    /// The span of the call expression.
    pub call_span: Span,

    /// The type parameter whose bound opted out of constness.
    pub parameter: TypeParameterRef,

    /// The trait of the opted-out bound.
    pub trait_id: ID<Trait>,
}

impl Report<&Table> for OptOutBoundCall {
    fn report(&self, table: &Table) -> Diagnostic {
        let parameter_name = parameter_name(table, self.parameter);
        let trait_name = trait_name(table, self.trait_id);

        Diagnostic {
            span: self.call_span.clone(),
            message: format!(
                "can't call a function of the `?const` bound \
                 `{parameter_name}: ?const {trait_name}` inside a const \
                 context"
            ),
            severity: Severity::Error,
            help_message: Some(format!(
                "remove the `?const` opt-out from the bound \
                 `{parameter_name}: {trait_name}`"
            )),
            related: Vec::new(),
        }
    }
}

/// A const-evaluable body directly calls a function that is not declared
/// `const`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct NonConstFunctionCall {
    /// The span of the call expression.
    pub call_span: Span,

    /// The called function.
    pub function_id: ID<Function>,
}

impl Report<&Table> for NonConstFunctionCall {
    fn report(&self, table: &Table) -> Diagnostic {
        let function = table.functions().get(self.function_id);

        Diagnostic {
            span: self.call_span.clone(),
            message: format!(
                "the function `{}` is not `const` and can't be called in a \
                 const context",
                function.map_or("?", |x| x.name.as_str()),
            ),
            severity: Severity::Error,
            help_message: None,
            related: function
                .and_then(|x| x.span.clone())
                .map(|span| Related {
                    span,
                    message: "the function is declared here".to_string(),
                })
                .into_iter()
                .collect(),
        }
    }
}

/// A const-evaluable body calls through a function pointer or a closure
/// value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct IndirectCallInConstContext {
    /// The span of the call expression.
    pub call_span: Span,
}

impl Report<&Table> for IndirectCallInConstContext {
    fn report(&self, _: &Table) -> Diagnostic {
        Diagnostic {
            span: self.call_span.clone(),
            message: "function pointers and closures can't be called in a \
                      const context"
                .to_string(),
            severity: Severity::Error,
            help_message: Some(
                "no constness requirement can be attached to a function \
                 pointer type; call the function directly instead"
                    .to_string(),
            ),
            related: Vec::new(),
        }
    }
}

/// A field of a type with a const destructor implementation is not
/// const-droppable itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct NonConstDropField {
    /// The span of the destructor implementation signature.
    pub implements_span: Option<Span>,

    /// The name of the offending field.
    pub field_name: String,

    /// The type of the offending field.
    pub field_type: Type,
}

impl Report<&Table> for NonConstDropField {
    fn report(&self, table: &Table) -> Diagnostic {
        let destructor_name = table
            .destructor_trait()
            .map_or_else(|| "?".to_string(), |id| trait_name(table, id));

        Diagnostic {
            span: self.implements_span.clone().unwrap(),
            message: format!(
                "the field `{}` of type `{}` doesn't have a `const \
                 implements {destructor_name}`",
                self.field_name,
                DisplayObject { table, display: &self.field_type },
            ),
            severity: Severity::Error,
            help_message: Some(
                "every field of a type with a const destructor must be \
                 const-droppable itself"
                    .to_string(),
            ),
            related: Vec::new(),
        }
    }
}

/// A single constness obligation that the supplied type argument failed to
/// satisfy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct UnsatisfiedBound {
    /// The type argument substituted for the obligated parameter.
    pub argument: Type,

    /// The trait that must be const-implemented by the argument.
    pub trait_id: ID<Trait>,
}

/// The supplied type arguments don't satisfy the constness obligations of
/// the callee at a const call site.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct UnsatisfiedConstObligation {
    /// The span of the call expression.
    pub call_span: Span,

    /// The called function, if the call names one directly.
    pub function_id: Option<ID<Function>>,

    /// The obligations that the type arguments failed to satisfy.
    pub unsatisfied: Vec<UnsatisfiedBound>,
}

impl Report<&Table> for UnsatisfiedConstObligation {
    fn report(&self, table: &Table) -> Diagnostic {
        let obligations = self
            .unsatisfied
            .iter()
            .map(|x| {
                format!(
                    "`{}: const {}`",
                    DisplayObject { table, display: &x.argument },
                    trait_name(table, x.trait_id),
                )
            })
            .join(", ");

        let callee = self
            .function_id
            .and_then(|id| table.functions().get(id))
            .map_or_else(
                || "the call".to_string(),
                |x| format!("calling `{}`", x.name),
            );

        Diagnostic {
            span: self.call_span.clone(),
            message: format!(
                "{callee} in a const context requires {obligations}"
            ),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
        }
    }
}

/// The callee can never be evaluated in a const context, no matter the type
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct NeverConstCallee {
    /// The span of the call expression.
    pub call_span: Span,
}

impl Report<&Table> for NeverConstCallee {
    fn report(&self, _: &Table) -> Diagnostic {
        Diagnostic {
            span: self.call_span.clone(),
            message: "the callee can never be evaluated in a const context"
                .to_string(),
            severity: Severity::Error,
            help_message: None,
            related: Vec::new(),
        }
    }
}

/// The recursion limit was exhausted while resolving the constness of a
/// call.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct ConstResolutionOverflow {
    /// The span where the overflow occurred.
    pub overflow_span: Span,
}

impl Report<&Table> for ConstResolutionOverflow {
    fn report(&self, _: &Table) -> Diagnostic {
        Diagnostic {
            span: self.overflow_span.clone(),
            message: "overflow resolving the constness of the call"
                .to_string(),
            severity: Severity::Error,
            help_message: Some(
                "try reduce the complexity of the code; this error is the \
                 limitation of the type-system/compiler"
                    .to_string(),
            ),
            related: Vec::new(),
        }
    }
}
