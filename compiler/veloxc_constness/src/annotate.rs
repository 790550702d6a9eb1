//! Contains the bound annotator, attaching a [`ConstnessRequirement`] to
//! every trait bound of an item signature.

use std::collections::BTreeMap;

use veloxc_abort::Abort;
use veloxc_arena::ID;
use veloxc_handler::Handler;
use veloxc_symbol::{
    bound::WhereClause,
    constness::ConstnessRequirement,
    diagnostic::Diagnostic,
    generic_parameter::TypeParameterRef,
    Trait,
};

use crate::diagnostic::OptOutBoundInConstImplements;

/// The kind of the item whose bounds are being annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Context {
    /// A `const function` signature: every bound defaults to
    /// [`ConstnessRequirement::Required`] unless it carries the `?const`
    /// opt-out marker.
    ConstFunction,

    /// A `const implements` signature: every bound is
    /// [`ConstnessRequirement::Required`]; the `?const` opt-out is rejected.
    ConstImplements,

    /// A non-const item: the bounds carry no constness requirement at all,
    /// keeping pre-existing generic code unaffected.
    Runtime,
}

/// The output of the annotation: the constness requirement attached to each
/// `(parameter, trait)` bound pair of the item being checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assumptions {
    requirements: BTreeMap<(TypeParameterRef, ID<Trait>), ConstnessRequirement>,
}

impl Assumptions {
    /// Gets the requirement attached to the bound of the given parameter and
    /// trait, if the bound was declared at all.
    #[must_use]
    pub fn requirement_for(
        &self,
        parameter: TypeParameterRef,
        trait_id: ID<Trait>,
    ) -> Option<ConstnessRequirement> {
        self.requirements.get(&(parameter, trait_id)).copied()
    }

    /// Returns `true` if no requirement is attached to any bound.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.requirements.is_empty() }
}

/// Attaches a [`ConstnessRequirement`] to every trait bound in the where
/// clause, according to the given [`Context`].
///
/// # Errors
///
/// Returns [`Abort`] if a `?const` opt-out appears in a
/// [`Context::ConstImplements`] signature. The offending bounds are reported
/// through the handler before returning.
pub fn annotate(
    where_clause: &WhereClause,
    context: Context,
    handler: &dyn Handler<Box<dyn Diagnostic>>,
) -> Result<Assumptions, Abort> {
    let mut assumptions = Assumptions::default();
    let mut aborted = false;

    for bound in &where_clause.trait_bounds {
        let requirement = match context {
            Context::Runtime => continue,

            Context::ConstFunction => {
                if bound.const_opt_out {
                    ConstnessRequirement::Optional
                } else {
                    ConstnessRequirement::Required
                }
            }

            Context::ConstImplements => {
                if bound.const_opt_out {
                    handler.receive(Box::new(
                        OptOutBoundInConstImplements::new(
                            bound.span.clone(),
                            bound.parameter,
                            bound.trait_id,
                        ),
                    ));
                    aborted = true;
                    continue;
                }

                ConstnessRequirement::Required
            }
        };

        assumptions
            .requirements
            .insert((bound.parameter, bound.trait_id), requirement);
    }

    if aborted {
        Err(Abort)
    } else {
        Ok(assumptions)
    }
}
