//! Schema validation with source-span lookup.

use miette::SourceSpan;

use crate::{Error, Result};

/// Validation context carrying the raw TOML source for span lookup.
///
/// Spans are found by locating the offending literal in the source text, so
/// every schema error can point at the declaration that caused it.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// The raw TOML source content
    src: &'a str,
    /// The filename for error reporting
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Get the source content.
    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Find the span of the first occurrence of a literal in the source.
    pub fn find_span(&self, literal: &str) -> Option<SourceSpan> {
        self.src
            .find(literal)
            .map(|offset| (offset, literal.len()).into())
    }

    /// Find the span of the nth (0-based) occurrence of a literal.
    pub fn find_nth_span(&self, literal: &str, n: usize) -> Option<SourceSpan> {
        if literal.is_empty() {
            return None;
        }
        let mut start = 0;
        let mut count = 0;
        while let Some(pos) = self.src[start..].find(literal) {
            let offset = start + pos;
            if count == n {
                return Some((offset, literal.len()).into());
            }
            count += 1;
            start = offset + literal.len();
        }
        None
    }

    /// Find the span of a method declaration, e.g. `methods.GET`.
    pub fn find_method_span(&self, path: &str, verb: &str) -> Option<SourceSpan> {
        // Look for the full table header first, then fall back to the verb key
        let header = format!("\"{path}\".methods.{verb}");
        self.find_span(&header).or_else(|| {
            let key = format!("methods.{verb}");
            self.find_span(&key)
        })
    }

    /// Create a validation error at the given literal.
    pub fn validation_error(&self, message: impl Into<String>, literal: &str) -> Box<Error> {
        Error::validation(message, self.src, self.filename, self.find_span(literal))
    }

    /// Validate a route path: leading slash, non-empty segments, each a
    /// plain name or a `{param}` placeholder.
    pub fn validate_path(&self, path: &str) -> Result<()> {
        let quoted = format!("\"{path}\"");
        let span = self.find_span(&quoted).or_else(|| self.find_span(path));
        let fail = |reason: &str| {
            Err(Error::invalid_path(
                path,
                reason,
                self.src,
                self.filename,
                span,
            ))
        };

        if path.is_empty() {
            return fail("path is empty");
        }
        if !path.starts_with('/') {
            return fail("path must start with '/'");
        }
        if path.len() > 1 && path.ends_with('/') {
            return fail("path must not end with '/'");
        }
        for segment in path.split('/').skip(1) {
            if segment.is_empty() {
                return fail("path has an empty segment");
            }
            if segment.starts_with('{') || segment.ends_with('}') {
                if !is_valid_parameter(segment) {
                    return fail("malformed '{param}' placeholder");
                }
            } else if !is_valid_segment(segment) {
                return fail("segment has characters outside [A-Za-z0-9_-]");
            }
        }
        Ok(())
    }
}

/// A plain segment: letters, digits, '_' or '-', starting with a letter or digit.
fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A placeholder segment: `{` identifier `}`.
fn is_valid_parameter(segment: &str) -> bool {
    let Some(inner) = segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    else {
        return false;
    };
    let mut chars = inner.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(src: &str) -> ParseContext<'_> {
        ParseContext::new(src, "gantry.toml")
    }

    #[test]
    fn test_valid_paths() {
        let c = ctx("");
        assert!(c.validate_path("/item").is_ok());
        assert!(c.validate_path("/item/{id}").is_ok());
        assert!(c.validate_path("/item/{id}/done").is_ok());
        assert!(c.validate_path("/v2/play-list").is_ok());
    }

    #[test]
    fn test_invalid_paths() {
        let c = ctx("");
        assert!(c.validate_path("item").is_err());
        assert!(c.validate_path("/item/").is_err());
        assert!(c.validate_path("//item").is_err());
        assert!(c.validate_path("/item/{id").is_err());
        assert!(c.validate_path("/item/{1d}").is_err());
        assert!(c.validate_path("/item/a b").is_err());
        assert!(c.validate_path("").is_err());
    }

    #[test]
    fn test_find_span_points_at_literal() {
        let src = r#"[routes."/item"]"#;
        let c = ctx(src);
        let span = c.find_span("\"/item\"").expect("span should be found");
        assert_eq!(span.offset(), 8);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_find_nth_span() {
        let src = "alpha beta alpha";
        let c = ctx(src);
        let first = c.find_nth_span("alpha", 0).expect("first occurrence");
        let second = c.find_nth_span("alpha", 1).expect("second occurrence");
        assert_eq!(first.offset(), 0);
        assert_eq!(second.offset(), 11);
    }
}
