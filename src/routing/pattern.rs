//! Path template compilation.
//!
//! # Responsibilities
//! - Turn a path template into an anchored regex
//! - Record parameter names in template order
//! - Extract parameter values from a matching path
//!
//! # Template Syntax
//! - `/about` - literal segments, matched verbatim
//! - `/users/:id` - named parameter, one segment
//! - `/a/*/b` - wildcard in the middle, one segment (`wildcard1`)
//! - `/files/*` - trailing wildcard, rest of the path including `/`
//!
//! # Design Decisions
//! - Compilation never fails; malformed templates degrade to whatever the
//!   generated regex accepts
//! - Trailing slash is tolerated unless the template ends in a wildcard
//! - Wildcards are named `wildcard<segment index>` so several can coexist

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

/// Extracted path parameters, keyed by name.
pub type Params = HashMap<String, String>;

/// Prefix used for synthesized wildcard parameter names.
pub const WILDCARD_PREFIX: &str = "wildcard";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The template this pattern was compiled from.
    source: String,
    /// Anchored regex equivalent of the template.
    regex: Regex,
    /// Parameter names, in the order their groups appear.
    param_names: Vec<String>,
}

/// One classified template segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
    Wildcard { index: usize, terminal: bool },
}

impl Pattern {
    /// Compile a template into a pattern.
    pub fn compile(template: &str) -> Self {
        if template == "/" {
            return Self::build(template, "^/?$".to_string(), Vec::new());
        }

        let raw: Vec<&str> = template.split('/').filter(|s| !s.is_empty()).collect();
        let last = raw.len().saturating_sub(1);
        let segments: Vec<Segment<'_>> = raw
            .iter()
            .enumerate()
            .map(|(index, segment)| classify(segment, index, index == last))
            .collect();

        let mut param_names = Vec::new();
        let mut parts = Vec::with_capacity(segments.len());
        for segment in &segments {
            match segment {
                Segment::Literal(text) => parts.push(regex::escape(text)),
                Segment::Param(name) => {
                    param_names.push((*name).to_string());
                    parts.push("([^/]+)".to_string());
                }
                Segment::Wildcard { index, terminal } => {
                    param_names.push(format!("{WILDCARD_PREFIX}{index}"));
                    parts.push(if *terminal { "(.*)" } else { "([^/]+)" }.to_string());
                }
            }
        }

        let ends_in_wildcard = matches!(
            segments.last(),
            Some(Segment::Wildcard { terminal: true, .. })
        );

        // A bare `*` also has to accept the empty path.
        let head = if ends_in_wildcard && segments.len() == 1 { "^/?" } else { "^/" };
        let tail = if ends_in_wildcard { "$" } else { "/?$" };
        let regex_str = format!("{head}{}{tail}", parts.join("/"));

        Self::build(template, regex_str, param_names)
    }

    fn build(template: &str, regex_str: String, param_names: Vec<String>) -> Self {
        // Literals are escaped and every group is fixed, so the generated
        // expression is always well-formed.
        let regex = Regex::new(&regex_str).expect("generated route regex is valid");
        Self {
            source: template.to_string(),
            regex,
            param_names,
        }
    }

    /// The template this pattern was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The generated regex, for diagnostics.
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter names in template order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns true if the path is accepted by this pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Extract parameters from a path.
    ///
    /// Returns `None` when the path does not match. A template declaring the
    /// same name twice keeps the later value.
    pub fn extract(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let params = self
            .param_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = caps.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
                (name.clone(), value.to_string())
            })
            .collect();
        Some(params)
    }

    /// Build a concrete path by substituting parameter values into the template.
    ///
    /// Returns `None` if a parameter the template needs is missing.
    pub fn fill(&self, params: &Params) -> Option<String> {
        if self.source == "/" {
            return Some("/".to_string());
        }

        let raw: Vec<&str> = self.source.split('/').filter(|s| !s.is_empty()).collect();
        let last = raw.len().saturating_sub(1);
        let mut out = Vec::with_capacity(raw.len());
        for (index, segment) in raw.iter().enumerate() {
            match classify(segment, index, index == last) {
                Segment::Literal(text) => out.push(text.to_string()),
                Segment::Param(name) => out.push(params.get(name)?.clone()),
                Segment::Wildcard { index, .. } => {
                    out.push(params.get(&format!("{WILDCARD_PREFIX}{index}"))?.clone())
                }
            }
        }
        Some(format!("/{}", out.join("/")))
    }
}

fn classify(segment: &str, index: usize, terminal: bool) -> Segment<'_> {
    if segment == "*" {
        Segment::Wildcard { index, terminal }
    } else if let Some(name) = segment.strip_prefix(':') {
        Segment::Param(name)
    } else {
        Segment::Literal(segment)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_static_path_with_trailing_slash() {
        let pattern = Pattern::compile("/about");
        assert!(pattern.is_match("/about"));
        assert!(pattern.is_match("/about/"));
        assert!(!pattern.is_match("/abou")); // Partial
        assert!(!pattern.is_match("/about/us")); // Extra segment
        assert!(!pattern.is_match("/About"));
    }

    #[test]
    fn test_root_path() {
        let pattern = Pattern::compile("/");
        assert!(pattern.is_match("/"));
        assert!(pattern.is_match(""));
        assert!(!pattern.is_match("/home"));
        assert_eq!(pattern.extract("/"), Some(Params::new()));
    }

    #[test]
    fn test_named_parameters() {
        let pattern = Pattern::compile("/posts/:year/:month");
        assert!(pattern.is_match("/posts/2023/10"));
        assert!(pattern.is_match("/posts/2024/02/"));
        assert!(!pattern.is_match("/posts/2023"));
        assert!(!pattern.is_match("/posts/2023/10/extra"));
        assert_eq!(
            pattern.extract("/posts/2023/10"),
            Some(params(&[("year", "2023"), ("month", "10")]))
        );
        assert_eq!(pattern.param_names(), ["year", "month"]);
    }

    #[test]
    fn test_trailing_wildcard_captures_remainder() {
        let pattern = Pattern::compile("/files/*");
        assert!(pattern.is_match("/files/image.jpg"));
        assert!(!pattern.is_match("/files"));
        assert!(!pattern.is_match("/file/image.jpg"));
        assert_eq!(
            pattern.extract("/files/documents/report.pdf"),
            Some(params(&[("wildcard1", "documents/report.pdf")]))
        );
    }

    #[test]
    fn test_middle_wildcard_is_one_segment() {
        let pattern = Pattern::compile("/a/*/b");
        assert!(pattern.is_match("/a/123/b/"));
        assert!(!pattern.is_match("/a/b"));
        assert!(!pattern.is_match("/a/x/y/b"));
        assert_eq!(pattern.extract("/a/x/b"), Some(params(&[("wildcard1", "x")])));
    }

    #[test]
    fn test_bare_wildcard_matches_everything() {
        let pattern = Pattern::compile("*");
        assert!(pattern.is_match(""));
        assert!(pattern.is_match("/"));
        assert_eq!(
            pattern.extract("/deep/nested/path"),
            Some(params(&[("wildcard0", "deep/nested/path")]))
        );

        let rooted = Pattern::compile("/*");
        assert!(rooted.is_match("/any-path"));
        assert!(rooted.is_match("/"));
    }

    #[test]
    fn test_multiple_wildcards_named_by_index() {
        let pattern = Pattern::compile("/*/x/*");
        assert_eq!(pattern.param_names(), ["wildcard0", "wildcard2"]);
        assert_eq!(
            pattern.extract("/a/x/b/c"),
            Some(params(&[("wildcard0", "a"), ("wildcard2", "b/c")]))
        );
    }

    #[test]
    fn test_literals_are_escaped() {
        let pattern = Pattern::compile("/user+name/v1.0");
        assert!(pattern.is_match("/user+name/v1.0"));
        assert!(!pattern.is_match("/username/v1.0"));
        assert!(!pattern.is_match("/user+name/v1x0"));
    }

    #[test]
    fn test_static_extract_is_empty_not_none() {
        let pattern = Pattern::compile("/about");
        assert_eq!(pattern.extract("/about/"), Some(Params::new()));
        assert_eq!(pattern.extract("/other"), None);
    }

    #[test]
    fn test_duplicate_name_keeps_later_value() {
        let pattern = Pattern::compile("/:id/:id");
        assert_eq!(pattern.extract("/first/second"), Some(params(&[("id", "second")])));
    }

    #[test]
    fn test_leading_and_trailing_slashes_ignored() {
        let pattern = Pattern::compile("users/:id/");
        assert_eq!(pattern.as_regex(), "^/users/([^/]+)/?$");
        assert!(pattern.is_match("/users/7"));
    }

    #[test]
    fn test_fill_reproduces_extracted_values() {
        let pattern = Pattern::compile("/api/users/:userId/files/*");
        let values = params(&[("userId", "42"), ("wildcard4", "docs/a.txt")]);
        let path = pattern.fill(&values).unwrap();
        assert_eq!(path, "/api/users/42/files/docs/a.txt");
        assert_eq!(pattern.extract(&path), Some(values));
    }

    #[test]
    fn test_fill_missing_param() {
        let pattern = Pattern::compile("/users/:id");
        assert_eq!(pattern.fill(&Params::new()), None);
        assert_eq!(Pattern::compile("/").fill(&Params::new()).as_deref(), Some("/"));
    }
}
