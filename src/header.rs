//! CGI response header emission.
//!
//! A CGI response opens with a header block terminated by a blank line;
//! the web server forwards everything after it as the HTTP body. This
//! module writes the minimal block: a `Content-type` line and the blank
//! terminator.

use std::io::{self, Write};

use crate::Result;
use crate::doctype::Doctype;

/// Content type written when the caller has no preference.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Writes the CGI header block to `out`.
///
/// Emits exactly `Content-type: <content_type>` followed by a blank
/// line. Must run before any body output, and at most once per response;
/// neither is enforced here — duplicate header blocks are the caller's
/// bug to avoid.
///
/// The `doctype` parameter is accepted for forward compatibility but is
/// not currently written; the original helper reserved it for a doctype
/// line it never enabled, and completing that feature would change the
/// byte output of every existing script.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the writer fails.
pub fn write_header<W: Write>(out: &mut W, content_type: &str, doctype: Doctype) -> Result<()> {
    tracing::debug!(content_type, doctype = %doctype, "writing header block");
    writeln!(out, "Content-type: {content_type}")?;
    writeln!(out)?;
    Ok(())
}

/// Writes the CGI header block to standard output.
///
/// Convenience wrapper over [`write_header`]. Stdout is locked for the
/// duration of the write so the two lines cannot interleave with other
/// output from this process.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if stdout is closed.
pub fn emit_header(content_type: &str, doctype: Doctype) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_header(&mut handle, content_type, doctype)?;
    handle.flush()?;
    Ok(())
}
