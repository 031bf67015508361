//! Self-test binary for cgi-helper.
//!
//! Running the crate directly performs the same smoke test the original
//! script did when executed instead of imported: emit a `text/html`
//! header block, render a short literal template, and write the result
//! to standard output. No flags, no arguments.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// The whole point of this binary is writing a CGI response to stdout.
#![allow(clippy::print_stdout)]

use anyhow::Result;
use cgi_helper::{Doctype, RenderContext, emit_header, escape, render};
use tracing_subscriber::EnvFilter;

const TEMPLATE: &str = "\
This is the HTML that the script wants to print. Dynamic values are
embedded with tags like <%= sample %>: 2 + 3 = <%= 2 + 3 %>.
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    emit_header("text/html", Doctype::Html5)?;

    let mut ctx = RenderContext::new();
    ctx.set("sample", escape("<%= ... %>"));

    let body = render(TEMPLATE, &ctx)?;
    print!("{body}");
    Ok(())
}
