//! Contains the definition of [`Registry`].

use std::collections::HashMap;

use parking_lot::RwLock;
use veloxc_arena::ID;
use veloxc_symbol::{constness::ConstnessClass, Function, ImplementsRef};

/// The shared store of the derived [`ConstnessClass`] per item.
///
/// The registry is populated lazily while the checks run, possibly from
/// multiple threads at once; the lock guards the memoization. Once the
/// analysis finishes, the registry is handed to the lowering stage, which
/// uses the classes to decide the legality of const call sites and whether
/// an implementation also emits a facet usable at runtime.
#[derive(Debug, Default)]
pub struct Registry {
    classes_by_implements: RwLock<HashMap<ImplementsRef, ConstnessClass>>,
    classes_by_function: RwLock<HashMap<ID<Function>, ConstnessClass>>,
}

impl Registry {
    /// Creates a new empty [`Registry`].
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers the class derived for the given implementation.
    pub fn register_implements(
        &self,
        implements_ref: ImplementsRef,
        class: ConstnessClass,
    ) {
        self.classes_by_implements.write().insert(implements_ref, class);
    }

    /// Gets the class registered for the given implementation.
    #[must_use]
    pub fn implements_class(
        &self,
        implements_ref: ImplementsRef,
    ) -> Option<ConstnessClass> {
        self.classes_by_implements.read().get(&implements_ref).cloned()
    }

    /// Registers the class derived for the given function.
    pub fn register_function(
        &self,
        function_id: ID<Function>,
        class: ConstnessClass,
    ) {
        self.classes_by_function.write().insert(function_id, class);
    }

    /// Gets the class registered for the given function.
    #[must_use]
    pub fn function_class(
        &self,
        function_id: ID<Function>,
    ) -> Option<ConstnessClass> {
        self.classes_by_function.read().get(&function_id).cloned()
    }
}
