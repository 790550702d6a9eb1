//! Contains the definition of [`Handler`] and its common implementations.

use std::fmt::Debug;

use parking_lot::RwLock;

/// Represents a sink where the diagnostics are reported to.
///
/// The handler is shared between the checking of independent items, possibly
/// running in parallel, hence the interior mutability and the thread-safety
/// requirement.
pub trait Handler<T>: Send + Sync {
    /// Receives a diagnostic.
    fn receive(&self, diagnostic: T);
}

/// A [`Handler`] that stores all the received diagnostics.
#[derive(Debug)]
pub struct Storage<T> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: RwLock::new(Vec::new()) } }

    /// Returns a read guard over the stored diagnostics.
    pub fn as_vec(&self) -> parking_lot::RwLockReadGuard<'_, Vec<T>> {
        self.diagnostics.read()
    }

    /// Consumes the [`Storage`] and returns the stored diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Removes all the stored diagnostics.
    pub fn clear(&self) { self.diagnostics.write().clear(); }

    /// Forwards all the stored diagnostics to the given handler, leaving this
    /// [`Storage`] empty.
    pub fn propagate(&self, handler: &dyn Handler<T>) {
        for diagnostic in self.diagnostics.write().drain(..) {
            handler.receive(diagnostic);
        }
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync> Handler<T> for Storage<T> {
    fn receive(&self, diagnostic: T) {
        self.diagnostics.write().push(diagnostic);
    }
}

/// A [`Handler`] that only counts the number of received diagnostics.
#[derive(Debug, Default)]
pub struct Counter {
    counter: RwLock<usize>,
}

impl Counter {
    /// Creates a new [`Counter`] with the count of zero.
    #[must_use]
    pub const fn new() -> Self { Self { counter: RwLock::new(0) } }

    /// Returns the number of diagnostics received so far.
    #[must_use]
    pub fn count(&self) -> usize { *self.counter.read() }

    /// Resets the count to zero.
    pub fn reset(&self) { *self.counter.write() = 0; }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _: T) { *self.counter.write() += 1; }
}

/// A [`Handler`] that panics on the first received diagnostic.
///
/// Primarily used in tests that expect no diagnostics to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Panic;

impl<T: Debug> Handler<T> for Panic {
    fn receive(&self, diagnostic: T) {
        panic!("unexpected diagnostic: {diagnostic:?}");
    }
}
