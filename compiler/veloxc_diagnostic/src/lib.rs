//! Contains the definition of [`Diagnostic`] and [`Report`].

use veloxc_log::Severity;
use veloxc_source_file::Span;

/// A diagnostic message to be presented to the user.
///
/// This subsystem never formats or writes the diagnostic itself; the
/// rendering is the responsibility of the driver owning the shared
/// diagnostic-reporting interface.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Diagnostic {
    /// The location where the diagnostic occurred.
    pub span: Span,

    /// The message to be displayed to the user.
    pub message: String,

    /// The severity of the diagnostic.
    pub severity: Severity,

    /// The optional help message suggesting the remedy.
    pub help_message: Option<String>,

    /// List of related useful locations to the diagnostic.
    pub related: Vec<Related>,
}

/// A related location to the main diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Related {
    /// The location of the related information.
    pub span: Span,

    /// The message to be displayed for the related information.
    pub message: String,
}

/// A trait implemented by the types that can be reported as a [`Diagnostic`].
pub trait Report<Param> {
    /// Creates a [`Diagnostic`] out of this value.
    fn report(&self, parameter: Param) -> Diagnostic;
}
