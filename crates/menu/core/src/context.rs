//! Runtime context consumed by condition evaluation and action dispatch.
//!
//! The context bundles the external collaborators the host game supplies for
//! one acting viewer (player or console): placeholder expansion, permission
//! checks, and the expression engine. The core never implements these; it
//! only calls through this seam.

/// Per-interaction view of the acting player or console.
pub trait MenuContext {
    /// Expands placeholder tokens in `text` for the acting viewer.
    ///
    /// Text without placeholders must come back unchanged.
    fn expand(&self, text: &str) -> String;

    /// Returns true if the acting viewer holds `node`.
    fn has_permission(&self, node: &str) -> bool;

    /// Evaluates an externally-defined boolean expression (the host's
    /// script engine) against the acting viewer.
    fn evaluate_expression(&self, expr: &str) -> bool;
}
