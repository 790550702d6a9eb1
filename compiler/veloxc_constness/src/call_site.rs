//! Contains the obligation checking performed at every call site against
//! the actual type arguments supplied.

use veloxc_abort::Abort;
use veloxc_handler::Handler;
use veloxc_source_file::Span;
use veloxc_symbol::{
    constness::ConstnessClass,
    diagnostic::Diagnostic,
    instantiation::{self, Instantiation},
    ty::Type,
    Table,
};

use crate::{
    annotate::Assumptions,
    diagnostic::{
        ConstResolutionOverflow, NeverConstCallee, UnsatisfiedBound,
        UnsatisfiedConstObligation,
    },
    registry::Registry,
    resolve::{const_satisfiable, Unsatisfied},
};

/// Describes whether the call site demands const evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Evaluation {
    /// The call is evaluated at compile time; the callee's obligations must
    /// be satisfied by the supplied type arguments.
    Const,

    /// The call is evaluated at runtime; any type arguments are accepted.
    Runtime,
}

/// Checks the callee's [`ConstnessClass`] against the type arguments
/// actually supplied at a call site.
///
/// At a [`Evaluation::Runtime`] site the check trivially succeeds whatever
/// the arguments are: a conditional class always keeps its runtime facet
/// usable. At a [`Evaluation::Const`] site every obligation recorded in the
/// class is instantiated with the supplied arguments and resolved; the
/// caller's own assumption set satisfies obligations that land on the
/// caller's parameters.
///
/// # Errors
///
/// Returns [`Abort`] if the call is illegal; a diagnostic listing every
/// unsatisfied obligation is reported through the handler first.
#[allow(clippy::too_many_arguments)]
pub fn check_instantiation(
    class: &ConstnessClass,
    supplied: &Instantiation,
    evaluation: Evaluation,
    assumptions: &Assumptions,
    table: &Table,
    registry: &Registry,
    call_span: &Span,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<(), Abort> {
    if evaluation == Evaluation::Runtime {
        return Ok(());
    }

    let obligations = match class {
        ConstnessClass::AlwaysConst => return Ok(()),

        ConstnessClass::NeverConst => {
            handler
                .receive(Box::new(NeverConstCallee::new(call_span.clone())));
            return Err(Abort);
        }

        ConstnessClass::ConditionallyConst(obligations) => obligations,
    };

    let mut unsatisfied = Vec::new();
    let mut aborted = false;

    for obligation in obligations {
        let mut argument = Type::Parameter(obligation.parameter);
        instantiation::instantiate(&mut argument, supplied);

        match const_satisfiable(
            &argument,
            obligation.trait_id,
            assumptions,
            table,
            registry,
        ) {
            Ok(_) => {}

            Err(Unsatisfied::Overflow) => {
                handler.receive(Box::new(ConstResolutionOverflow::new(
                    call_span.clone(),
                )));
                aborted = true;
            }

            Err(_) => unsatisfied
                .push(UnsatisfiedBound::new(argument, obligation.trait_id)),
        }
    }

    if !unsatisfied.is_empty() {
        handler.receive(Box::new(UnsatisfiedConstObligation::new(
            call_span.clone(),
            None,
            unsatisfied,
        )));
        aborted = true;
    }

    if aborted {
        Err(Abort)
    } else {
        Ok(())
    }
}
