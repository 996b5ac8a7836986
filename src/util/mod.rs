//! Utility helpers shared across the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules hold the pure pieces (color math, diagnostics) so the
//! browser-facing modules stay thin and the logic stays testable natively.

pub mod color;
pub mod logger;
