//! Element access layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin passthroughs over the browser DOM: lookup, attribute/class/style
//! mutation, visibility, event subscription, and construction from an
//! `ElementSpec`. Every operation that takes a target accepts
//! `Option<&Element>` so a failed lookup flows straight into a logged no-op
//! instead of an error path at each call site.
//!
//! The builder (`spec`) is plain data and compiles everywhere; the DOM
//! bindings (`web`) only exist under the `csr` feature.

pub mod spec;
#[cfg(feature = "csr")]
mod web;

pub use spec::{Binding, ElementSpec, Handler};
#[cfg(feature = "csr")]
pub use web::{Dom, Listener};
