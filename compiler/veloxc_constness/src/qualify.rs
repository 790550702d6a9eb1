//! Contains the const-function body qualifier.

use veloxc_abort::Abort;
use veloxc_handler::Handler;
use veloxc_ir::{instruction::Instruction, Body};
use veloxc_symbol::{
    constness::ConstnessClass,
    diagnostic::Diagnostic,
    instantiation::{self, Instantiation},
    ty::Type,
    GenericItemRef, Table,
};

use crate::{
    annotate::Assumptions,
    diagnostic::{
        ConstResolutionOverflow, IndirectCallInConstContext,
        NonConstFunctionCall, NonConstTraitCall, OptOutBoundCall,
        UnsatisfiedBound, UnsatisfiedConstObligation,
    },
    registry::Registry,
    resolve::{const_satisfiable, Unsatisfied},
};

/// Walks every operation in the body and decides whether the body qualifies
/// for const evaluation under the given assumption set.
///
/// The resulting class accumulates, through the lattice meet, the
/// obligations of every call that resolved against a `Required` generic
/// bound; a body whose calls all resolve against concrete const
/// implementations is [`ConstnessClass::AlwaysConst`].
///
/// # Errors
///
/// Returns [`Abort`] if any operation in the body is incompatible with const
/// evaluation. One diagnostic is reported through the handler per failing
/// call site before returning.
pub fn qualify_body(
    body: &Body,
    assumptions: &Assumptions,
    table: &Table,
    registry: &Registry,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<ConstnessClass, Abort> {
    let mut class = ConstnessClass::AlwaysConst;
    let mut aborted = false;

    for instruction in &body.instructions {
        match instruction {
            Instruction::Pure(_) => {}

            Instruction::IndirectCall(call) => {
                handler.receive(Box::new(IndirectCallInConstContext::new(
                    call.span.clone(),
                )));
                aborted = true;
            }

            Instruction::TraitCall(call) => {
                match const_satisfiable(
                    &call.receiver_type,
                    call.trait_id,
                    assumptions,
                    table,
                    registry,
                ) {
                    Ok(resolved) => class = class.meet(resolved),

                    Err(Unsatisfied::OptOutBound { parameter, trait_id }) => {
                        handler.receive(Box::new(OptOutBoundCall::new(
                            call.span.clone(),
                            parameter,
                            trait_id,
                        )));
                        aborted = true;
                    }

                    Err(Unsatisfied::Overflow) => {
                        handler.receive(Box::new(
                            ConstResolutionOverflow::new(call.span.clone()),
                        ));
                        aborted = true;
                    }

                    Err(
                        Unsatisfied::NoBound { .. }
                        | Unsatisfied::NonConstImplementation { .. },
                    ) => {
                        handler.receive(Box::new(NonConstTraitCall::new(
                            call.span.clone(),
                            call.receiver_type.clone(),
                            call.trait_id,
                            call.function_id,
                        )));
                        aborted = true;
                    }
                }
            }

            Instruction::FunctionCall(call) => {
                let callee = &table.functions()[call.function_id];

                if !callee.is_const {
                    handler.receive(Box::new(NonConstFunctionCall::new(
                        call.span.clone(),
                        call.function_id,
                    )));
                    aborted = true;
                    continue;
                }

                let supplied = Instantiation::from_type_arguments(
                    &callee.generic_parameters,
                    GenericItemRef::Function(call.function_id),
                    &call.type_arguments,
                )
                .expect(
                    "the type checker guarantees the supplied type arguments \
                     match the callee's parameters",
                );

                // the callee's signature obligations become demands on the
                // supplied type arguments
                let mut unsatisfied = Vec::new();

                for bound in &callee.where_clause.trait_bounds {
                    if bound.const_opt_out {
                        continue;
                    }

                    let mut argument = Type::Parameter(bound.parameter);
                    instantiation::instantiate(&mut argument, &supplied);

                    match const_satisfiable(
                        &argument,
                        bound.trait_id,
                        assumptions,
                        table,
                        registry,
                    ) {
                        Ok(resolved) => class = class.meet(resolved),

                        Err(Unsatisfied::Overflow) => {
                            handler.receive(Box::new(
                                ConstResolutionOverflow::new(
                                    call.span.clone(),
                                ),
                            ));
                            aborted = true;
                        }

                        Err(_) => unsatisfied.push(UnsatisfiedBound::new(
                            argument,
                            bound.trait_id,
                        )),
                    }
                }

                if !unsatisfied.is_empty() {
                    handler.receive(Box::new(UnsatisfiedConstObligation::new(
                        call.span.clone(),
                        Some(call.function_id),
                        unsatisfied,
                    )));
                    aborted = true;
                }
            }
        }
    }

    if aborted {
        Err(Abort)
    } else {
        Ok(class)
    }
}
