//! Contains the definition of the [`Diagnostic`] trait object interface.

use std::{any::Any, fmt::Debug};

use veloxc_diagnostic::Report;

use crate::Table;

/// Implemented by all diagnostic objects.
pub trait Diagnostic:
    for<'a> Report<&'a Table> + Debug + Any + Send + Sync + 'static
{
    #[allow(missing_docs)]
    fn as_any(&self) -> &dyn Any;
}

impl<U: for<'a> Report<&'a Table> + Debug + Any + Send + Sync + 'static>
    Diagnostic for U
{
    fn as_any(&self) -> &dyn Any { self }
}

impl<U: for<'a> Report<&'a Table> + Debug + Any + Send + Sync + 'static>
    From<U> for Box<dyn Diagnostic>
{
    fn from(value: U) -> Self { Box::new(value) }
}
