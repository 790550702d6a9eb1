//! Contains the entry point running the constness analysis over a whole
//! compilation unit.

use rayon::prelude::*;
use veloxc_handler::Handler;
use veloxc_ir::Bodies;
use veloxc_symbol::{diagnostic::Diagnostic, ImplementsRef, Table};

use crate::{
    function::check_function, implementation::check_implements,
    registry::Registry,
};

/// Runs the constness checks over every function and implementation in the
/// table.
///
/// The items are independent of each other, so they are checked in
/// parallel; the registry memoizes the implementation classes the checks
/// resolve on demand. A rejected item reports its diagnostics and doesn't
/// stop the checking of its siblings.
#[must_use]
pub fn check(
    table: &Table,
    bodies: &Bodies,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Registry {
    let registry = Registry::new();

    let implements_refs = table
        .traits()
        .iter()
        .flat_map(|(trait_id, r#trait)| {
            r#trait
                .implements
                .ids()
                .map(move |implements_id| {
                    ImplementsRef::new(trait_id, implements_id)
                })
        })
        .collect::<Vec<_>>();

    let function_ids = table.functions().ids().collect::<Vec<_>>();

    rayon::join(
        || {
            implements_refs.par_iter().for_each(|implements_ref| {
                let _ = check_implements(
                    *implements_ref,
                    table,
                    bodies,
                    &registry,
                    handler,
                );
            });
        },
        || {
            function_ids.par_iter().for_each(|function_id| {
                let _ = check_function(
                    *function_id,
                    table,
                    bodies,
                    &registry,
                    handler,
                );
            });
        },
    );

    registry
}
