//! # cgi-helper
//!
//! Convenience helpers for legacy CGI-style web scripts.
//!
//! A CGI program writes its HTTP response to standard output: a header
//! block terminated by a blank line, then the body. This crate covers the
//! glue that every such script repeats:
//!
//! - [`header::emit_header`] — write the `Content-type` header block
//! - [`render::render`] — expand ERB-style `<%= ... %>` tags against an
//!   explicit variable context
//! - [`Doctype`] — byte-exact DOCTYPE declarations from a fixed table
//! - [`escape::escape`] — HTML entity escaping under a short name
//!
//! ## Example
//!
//! ```rust
//! use cgi_helper::{Doctype, RenderContext, render};
//!
//! let mut ctx = RenderContext::new();
//! ctx.set("name", "world");
//!
//! let body = render("<p>hello, <%= name %></p>", &ctx)?;
//! assert_eq!(body, "<p>hello, world</p>");
//! assert!(Doctype::Html5.declaration().starts_with("<!doctype html>"));
//! # Ok::<(), cgi_helper::Error>(())
//! ```
//!
//! Unlike its scripting-language ancestors, the renderer never reaches
//! into the caller's scope: every variable an expression names must be
//! placed in the [`RenderContext`] explicitly.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod doctype;
pub mod escape;
pub mod header;
pub mod render;

// Re-exports for convenience
pub use doctype::{Doctype, doctype};
pub use escape::{escape, unescape};
pub use header::{DEFAULT_CONTENT_TYPE, emit_header, write_header};
pub use render::{RenderContext, Value, render};

/// Error type for cgi-helper operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait
/// implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `TemplateSyntax` | Unterminated tag, malformed expression inside a tag |
/// | `Evaluation` | Undefined variable, type mismatch, division by zero |
/// | `UnknownDoctype` | Doctype key not in the fixed table |
/// | `Io` | The header emitter's writer failed |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The template contains malformed tag or expression syntax.
    ///
    /// `offset` is the byte position within the template where the
    /// problem was detected. Surfaced directly to the caller; the
    /// renderer never recovers from a syntax error.
    #[error("template syntax error at byte {offset}: {message}")]
    TemplateSyntax {
        /// Byte offset of the error within the template.
        offset: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// A well-formed embedded expression failed during evaluation.
    ///
    /// Raised when:
    /// - An identifier is not present in the render context
    /// - Operand types do not match the operator (e.g. `"a" * 2`)
    /// - Integer division or modulo by zero
    #[error("expression evaluation failed: {0}")]
    Evaluation(String),

    /// An unknown doctype identifier was passed to the lookup.
    #[error("unknown doctype key: {0}")]
    UnknownDoctype(String),

    /// Writing the header block failed.
    #[error("header write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for cgi-helper operations.
pub type Result<T> = std::result::Result<T, Error>;
