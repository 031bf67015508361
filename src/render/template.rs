//! Tag scanner for ERB-style templates.
//!
//! Splits a template into literal text and tag regions in one
//! left-to-right pass and assembles the expanded output. Tags do not
//! nest; a region ends at the first `%>`.

use crate::render::context::RenderContext;
use crate::render::expr;
use crate::{Error, Result};

const OPEN: &str = "<%";
const CLOSE: &str = "%>";

/// Expands every tag in `template` against `ctx`.
pub(crate) fn expand(template: &str, ctx: &RenderContext) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(open_at) = rest.find(OPEN) {
        out.push_str(&rest[..open_at]);
        let tag_offset = consumed + open_at;
        let after_open = &rest[open_at + OPEN.len()..];

        // `<%%` is the escape for a literal `<%`.
        if let Some(after_escape) = after_open.strip_prefix('%') {
            out.push_str(OPEN);
            consumed = tag_offset + 3;
            rest = after_escape;
            continue;
        }

        let Some(close_at) = after_open.find(CLOSE) else {
            return Err(Error::TemplateSyntax {
                offset: tag_offset,
                message: "unterminated tag (missing `%>`)".to_string(),
            });
        };
        let body = &after_open[..close_at];

        match body.as_bytes().first() {
            // `<%= expr %>` substitutes the expression's display form.
            Some(b'=') => {
                let source = &body[1..];
                let value = expr::eval(source, tag_offset + OPEN.len() + 1, ctx)?;
                out.push_str(&value.to_string());
            },
            // `<%# ... %>` is a comment; the body is never evaluated.
            Some(b'#') => {},
            // `<% expr %>` evaluates for errors only, emitting nothing.
            _ => {
                expr::eval(body, tag_offset + OPEN.len(), ctx)?;
            },
        }

        consumed = tag_offset + OPEN.len() + close_at + CLOSE.len();
        rest = &after_open[close_at + CLOSE.len()..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::context::Value;

    fn ctx() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.set("name", "world");
        ctx.set("n", 3);
        ctx
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(expand("plain <html> text", &ctx()).unwrap(), "plain <html> text");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(expand("", &ctx()).unwrap(), "");
    }

    #[test]
    fn test_output_tag() {
        assert_eq!(expand("hi <%= name %>!", &ctx()).unwrap(), "hi world!");
    }

    #[test]
    fn test_multiple_tags_left_to_right() {
        assert_eq!(
            expand("<%= n %>, <%= n * n %>, <%= n * n * n %>", &ctx()).unwrap(),
            "3, 9, 27"
        );
    }

    #[test]
    fn test_comment_tag_dropped() {
        assert_eq!(
            expand("a<%# ignored, even if $%! invalid %>b", &ctx()).unwrap(),
            "ab"
        );
    }

    #[test]
    fn test_effect_tag_emits_nothing() {
        assert_eq!(expand("a<% 1 + 1 %>b", &ctx()).unwrap(), "ab");
    }

    #[test]
    fn test_effect_tag_still_reports_errors() {
        let err = expand("a<% 1 / 0 %>b", &ctx()).unwrap_err();
        assert!(matches!(err, Error::Evaluation(_)));
    }

    #[test]
    fn test_literal_open_escape() {
        assert_eq!(
            expand("tags look like <%%= expr %>", &ctx()).unwrap(),
            "tags look like <%= expr %>"
        );
    }

    #[test]
    fn test_unterminated_tag_offset() {
        let err = expand("abc <%= oops", &ctx()).unwrap_err();
        match err {
            Error::TemplateSyntax { offset, message } => {
                assert_eq!(offset, 4);
                assert!(message.contains("unterminated"));
            },
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_expression_error_offset_is_template_relative() {
        // The bad character sits at byte 9 of the template.
        let err = expand("1234 <%= @ %>", &ctx()).unwrap_err();
        match err {
            Error::TemplateSyntax { offset, .. } => assert_eq!(offset, 9),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_region_ends_at_first_close() {
        // The `%>` inside the string still terminates the region, as in
        // the reference engine; what follows is literal text.
        let err = expand("<%= 'a %> b' %>", &ctx()).unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }

    #[test]
    fn test_newlines_preserved_around_tags() {
        assert_eq!(
            expand("a\n<%= n %>\nb\n", &ctx()).unwrap(),
            "a\n3\nb\n"
        );
    }

    #[test]
    fn test_value_display_used_for_output() {
        let mut c = RenderContext::new();
        c.set("flag", true);
        c.set("ratio", 0.5);
        assert_eq!(
            expand("<%= flag %> <%= ratio %>", &c).unwrap(),
            "true 0.5"
        );
        assert_eq!(c.get("flag"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_adjacent_tags() {
        assert_eq!(expand("<%= 1 %><%= 2 %>", &ctx()).unwrap(), "12");
    }
}
