//! Contains the constness propagation and checking analysis.
//!
//! The analysis decides, for every function and trait implementation in a
//! type-checked program, whether it can be evaluated at compile time: always
//! ([`veloxc_symbol::constness::ConstnessClass::AlwaysConst`]), never, or
//! conditionally on the constness of the trait bounds of its generic
//! parameters. The derived classes are registered in a [`registry::Registry`]
//! consumed by the lowering stage, which uses them to decide the legality of
//! const call sites and to emit the runtime facet of conditional
//! implementations.
//!
//! The [`annotate`] module attaches the constness requirement to every trait
//! bound first; [`qualify`] and [`implementation`] then check bodies and
//! `implements` blocks against those requirements, consulting [`resolve`]
//! for calls on concrete receiver types. [`check`] ties the passes together
//! over a whole compilation unit, and [`call_site`] re-checks the recorded
//! obligations against the actual type arguments supplied at each call.

pub mod annotate;
pub mod call_site;
pub mod check;
pub mod diagnostic;
pub mod function;
pub mod implementation;
pub mod qualify;
pub mod registry;
pub mod resolve;

#[cfg(test)]
mod test;
