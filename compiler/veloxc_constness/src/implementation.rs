//! Contains the implementation constness checker.

use veloxc_abort::Abort;
use veloxc_handler::Handler;
use veloxc_ir::Bodies;
use veloxc_symbol::{
    constness::{ConstnessClass, Obligation},
    diagnostic::Diagnostic,
    instantiation::{self, Instantiation},
    ty::Type,
    CallableRef, GenericItemRef, Implements, ImplementsFunctionRef,
    ImplementsRef, Table,
};

use crate::{
    annotate::{annotate, Assumptions, Context},
    diagnostic::{ConstResolutionOverflow, NonConstDropField},
    qualify::qualify_body,
    registry::Registry,
    resolve::{const_satisfiable, Unsatisfied},
};

/// Checks that a `const implements` block lives up to its claim: every
/// function body must qualify for const evaluation under the
/// implementation's own (all-required) bounds, and a destructor
/// implementation must additionally prove every field of the implementing
/// type const-droppable.
///
/// The derived [`ConstnessClass`] is registered against the implementation's
/// identity for later lookup by call sites. The class is derived from the
/// signature alone, so a rejected implementation still registers it; the
/// rejection is reported on the implementation itself rather than cascading
/// into every caller.
///
/// # Errors
///
/// Returns [`Abort`] if the implementation is rejected. Every independent
/// failure is reported through the handler before returning.
pub fn check_implements(
    implements_ref: ImplementsRef,
    table: &Table,
    bodies: &Bodies,
    registry: &Registry,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<ConstnessClass, Abort> {
    let implements = table.get_implements(implements_ref).unwrap();

    if !implements.is_const {
        registry
            .register_implements(implements_ref, ConstnessClass::NeverConst);
        return Ok(ConstnessClass::NeverConst);
    }

    let assumptions =
        annotate(&implements.where_clause, Context::ConstImplements, handler)?;

    let mut aborted = false;

    for (function_id, _) in implements.functions.iter() {
        let callable = CallableRef::ImplementsFunction(
            ImplementsFunctionRef::new(implements_ref, function_id),
        );

        let Some(body) = bodies.get(callable) else {
            continue;
        };

        if qualify_body(body, &assumptions, table, registry, handler).is_err()
        {
            aborted = true;
        }
    }

    if table.destructor_trait() == Some(implements_ref.trait_id)
        && check_destructor_fields(
            implements,
            &assumptions,
            table,
            registry,
            handler,
        )
        .is_err()
    {
        aborted = true;
    }

    let class = if implements.generic_parameters.is_empty() {
        ConstnessClass::AlwaysConst
    } else {
        ConstnessClass::conditional_over(
            implements
                .where_clause
                .trait_bounds
                .iter()
                .map(|bound| Obligation::new(bound.parameter, bound.trait_id))
                .collect(),
        )
    };

    registry.register_implements(implements_ref, class.clone());

    if aborted {
        Err(Abort)
    } else {
        Ok(class)
    }
}

/// The compiler generates a destructor call for every field when a value
/// goes out of scope, so a const destructor implementation demands that
/// every field be const-droppable: either the field's type has no
/// destructor implementation at all (it drops trivially), or its destructor
/// implementation is const.
///
/// Unlike ordinary function constness, a failure here is never deferred to
/// the caller as a conditional obligation.
fn check_destructor_fields(
    implements: &Implements,
    assumptions: &Assumptions,
    table: &Table,
    registry: &Registry,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<(), Abort> {
    let destructor_trait = table.destructor_trait().unwrap();

    // primitives and references have no fields to destruct
    let Type::Symbol(symbol) = &implements.self_type else {
        return Ok(());
    };

    let declaration = &table.structs()[symbol.struct_id];
    let supplied = Instantiation::from_type_arguments(
        &declaration.generic_parameters,
        GenericItemRef::Struct(symbol.struct_id),
        &symbol.type_arguments,
    )
    .expect(
        "the type checker guarantees the implementing type supplies a type \
         argument for every parameter of the struct",
    );

    let mut aborted = false;

    for field in declaration.fields.items() {
        let mut field_type = field.ty.clone();
        instantiation::instantiate(&mut field_type, &supplied);

        match const_satisfiable(
            &field_type,
            destructor_trait,
            assumptions,
            table,
            registry,
        ) {
            Ok(_) => {}

            Err(Unsatisfied::Overflow) => {
                handler.receive(Box::new(ConstResolutionOverflow::new(
                    implements.span.clone().unwrap(),
                )));
                aborted = true;
            }

            Err(_) => {
                // a concrete field type with no destructor implementation at
                // all drops trivially
                let drops_trivially = field_type.is_concrete()
                    && table
                        .implementation_of(destructor_trait, &field_type)
                        .is_none();

                if !drops_trivially {
                    handler.receive(Box::new(NonConstDropField::new(
                        implements.span.clone(),
                        field.name.clone(),
                        field_type,
                    )));
                    aborted = true;
                }
            }
        }
    }

    if aborted {
        Err(Abort)
    } else {
        Ok(())
    }
}
