//! DOCTYPE declarations keyed by a closed set of identifiers.
//!
//! The table is copied from <http://www.w3.org/QA/2002/04/valid-dtd-list.html>
//! and reproduced byte-for-byte, because documents that carry a DOCTYPE
//! depend on the exact declaration text. Be aware that every entry
//! includes the opening `<html>` tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const HTML5: &str = r#"<!doctype html><html lang="en-us">"#;

const XHTML_STRICT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN"
    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">"#;

const XHTML_TRANSITIONAL: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">"#;

const HTML4_STRICT: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN"
    "http://www.w3.org/TR/html4/strict.dtd">
<html>"#;

// The reference table points `loose` at strict.dtd; kept verbatim for
// compatibility with documents produced against it.
const LOOSE: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN"
    "http://www.w3.org/TR/html4/strict.dtd">
<html>"#;

const HTML4_LOOSE: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN"
    "http://www.w3.org/TR/html4/loose.dtd">
<html>"#;

const TRANSITIONAL: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">
<html>"#;

const FRAMESET: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Frameset//EN"
    "http://www.w3.org/TR/html4/frameset.dtd">
<html>"#;

const HTML_3: &str = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 3.2 Final//EN">
<html>"#;

/// DOCTYPE table keys.
///
/// Several keys are aliases carried over from the reference table
/// (`transitional`/`html4tr`, `frameset`/`html4fr`); they map to the
/// same declaration but remain distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Doctype {
    /// HTML5 shorthand, doctype plus opening root tag.
    #[default]
    Html5,
    /// XHTML 1.0 Strict, with XML declaration.
    XhtmlStrict,
    /// XHTML 1.0 Transitional.
    XhtmlTransitional,
    /// HTML 4.01 Strict.
    #[serde(rename = "html4str")]
    Html4Str,
    /// HTML 4.01 Transitional (legacy key).
    Loose,
    /// HTML 4.01 Transitional with the loose DTD URL.
    #[serde(rename = "html4l")]
    Html4L,
    /// HTML 4.01 Transitional without a DTD URL.
    Transitional,
    /// Alias for [`Doctype::Transitional`].
    #[serde(rename = "html4tr")]
    Html4Tr,
    /// HTML 4.01 Frameset.
    Frameset,
    /// Alias for [`Doctype::Frameset`].
    #[serde(rename = "html4fr")]
    Html4Fr,
    /// HTML 3.2 Final.
    #[serde(rename = "html_3")]
    Html3,
}

impl Doctype {
    /// Returns all doctype keys.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Html5,
            Self::XhtmlStrict,
            Self::XhtmlTransitional,
            Self::Html4Str,
            Self::Loose,
            Self::Html4L,
            Self::Transitional,
            Self::Html4Tr,
            Self::Frameset,
            Self::Html4Fr,
            Self::Html3,
        ]
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Html5 => "html5",
            Self::XhtmlStrict => "xhtml_strict",
            Self::XhtmlTransitional => "xhtml_transitional",
            Self::Html4Str => "html4str",
            Self::Loose => "loose",
            Self::Html4L => "html4l",
            Self::Transitional => "transitional",
            Self::Html4Tr => "html4tr",
            Self::Frameset => "frameset",
            Self::Html4Fr => "html4fr",
            Self::Html3 => "html_3",
        }
    }

    /// Returns the literal DOCTYPE declaration for this key.
    ///
    /// The returned string includes the opening `<html>` tag and is
    /// byte-identical to the reference table entry.
    #[must_use]
    pub const fn declaration(&self) -> &'static str {
        match self {
            Self::Html5 => HTML5,
            Self::XhtmlStrict => XHTML_STRICT,
            Self::XhtmlTransitional => XHTML_TRANSITIONAL,
            Self::Html4Str => HTML4_STRICT,
            Self::Loose => LOOSE,
            Self::Html4L => HTML4_LOOSE,
            Self::Transitional | Self::Html4Tr => TRANSITIONAL,
            Self::Frameset | Self::Html4Fr => FRAMESET,
            Self::Html3 => HTML_3,
        }
    }

    /// Parses a doctype key from a string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDoctype`] when `s` is not one of the
    /// table's keys.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "html5" => Ok(Self::Html5),
            "xhtml_strict" => Ok(Self::XhtmlStrict),
            "xhtml_transitional" => Ok(Self::XhtmlTransitional),
            "html4str" => Ok(Self::Html4Str),
            "loose" => Ok(Self::Loose),
            "html4l" => Ok(Self::Html4L),
            "transitional" => Ok(Self::Transitional),
            "html4tr" => Ok(Self::Html4Tr),
            "frameset" => Ok(Self::Frameset),
            "html4fr" => Ok(Self::Html4Fr),
            "html_3" => Ok(Self::Html3),
            _ => Err(Error::UnknownDoctype(s.to_string())),
        }
    }
}

impl fmt::Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Doctype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Returns the literal DOCTYPE declaration for `key`.
///
/// Convenience wrapper over [`Doctype::declaration`] for callers that
/// prefer a free-function call shape.
#[must_use]
pub const fn doctype(key: Doctype) -> &'static str {
    key.declaration()
}
