//! Contains the const-function checker.

use veloxc_abort::Abort;
use veloxc_arena::ID;
use veloxc_handler::Handler;
use veloxc_ir::Bodies;
use veloxc_symbol::{
    constness::{ConstnessClass, Obligation},
    diagnostic::Diagnostic,
    CallableRef, Function, Table,
};

use crate::{
    annotate::{annotate, Context},
    qualify::qualify_body,
    registry::Registry,
};

/// Checks a function declaration and registers its derived
/// [`ConstnessClass`].
///
/// A function that isn't declared `const` is
/// [`ConstnessClass::NeverConst`] and its body is left unchecked: the bounds
/// of ordinary generic code carry no constness requirement. A `const`
/// function's body is qualified under its annotated bounds; a `const`
/// function without a body in the compilation unit falls back to the
/// conservative class implied by its signature bounds alone. A rejected
/// function registers no class at all.
///
/// # Errors
///
/// Returns [`Abort`] if the function was declared `const` but its body
/// doesn't qualify. The failures are reported through the handler before
/// returning.
pub fn check_function(
    function_id: ID<Function>,
    table: &Table,
    bodies: &Bodies,
    registry: &Registry,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<ConstnessClass, Abort> {
    let function = &table.functions()[function_id];

    if !function.is_const {
        registry.register_function(function_id, ConstnessClass::NeverConst);
        return Ok(ConstnessClass::NeverConst);
    }

    let assumptions =
        annotate(&function.where_clause, Context::ConstFunction, handler)?;

    let class = match bodies.get(CallableRef::Function(function_id)) {
        Some(body) => {
            qualify_body(body, &assumptions, table, registry, handler)?
        }

        None => signature_class(function),
    };

    registry.register_function(function_id, class.clone());

    Ok(class)
}

/// Derives the conservative class of a `const` function from its signature
/// bounds alone: conditional over every bound that didn't opt out of
/// constness.
#[must_use]
pub fn signature_class(function: &Function) -> ConstnessClass {
    ConstnessClass::conditional_over(
        function
            .where_clause
            .trait_bounds
            .iter()
            .filter(|bound| !bound.const_opt_out)
            .map(|bound| Obligation::new(bound.parameter, bound.trait_id))
            .collect(),
    )
}
