//! Embedded template rendering.
//!
//! Expands ERB-style tags within a text template against an explicit
//! variable context. Literal text passes through verbatim; tag regions
//! are evaluated by a small expression engine.
//!
//! The original helper evaluated tag bodies against the caller's live
//! local bindings. That dynamic-scope capture is deliberately gone:
//! every identifier an expression names must be set on the
//! [`RenderContext`] the caller passes in.

mod context;
mod expr;
mod template;

pub use context::{RenderContext, Value};

use crate::Result;

/// Renders `template`, substituting each tag region.
///
/// Tag syntax follows the ERB convention:
///
/// - `<%= expr %>` — evaluate `expr` and substitute its display form
/// - `<% expr %>` — evaluate `expr` and discard the result
/// - `<%# anything %>` — comment, dropped from the output
/// - `<%%` — escape producing a literal `<%`
///
/// Substitution is a single left-to-right pass; tags do not nest, and a
/// tag region ends at the first `%>`. Whitespace and newlines in literal
/// regions are preserved exactly.
///
/// # Errors
///
/// - [`crate::Error::TemplateSyntax`] for an unterminated tag or
///   malformed expression, with the byte offset of the problem
/// - [`crate::Error::Evaluation`] when a well-formed expression fails
///   (undefined variable, type mismatch, division by zero)
///
/// Neither error is caught or translated here; failures are the
/// caller's responsibility to handle.
pub fn render(template: &str, ctx: &RenderContext) -> Result<String> {
    tracing::trace!(len = template.len(), "rendering template");
    template::expand(template, ctx)
}
