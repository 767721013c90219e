//! Result rendering decision procedure
//!
//! The analysis backend returns a mapping of named sections whose schema is
//! not known ahead of time. For each entry the renderer decides between two
//! presentations:
//!
//! 1. **Trusted markup**: a string that opens an `<svg` tag is passed through
//!    unescaped. The backend is assumed non-adversarial; this is a documented
//!    trust boundary, not an oversight.
//! 2. **Structured text**: everything else is pretty-printed as indented JSON
//!    and shown verbatim in a preformatted block.
//!
//! Classification happens exactly once, here. Downstream render paths
//! (HTML report, console pages) only look at the [`SectionBody`] variant and
//! never re-sniff the content.

use serde_json::Value;

/// Ordered section mapping as returned by the backend.
///
/// serde_json is built with `preserve_order`, so iteration order is the
/// backend's insertion order, which is also the render order.
pub type ResultSet = serde_json::Map<String, Value>;

/// Literal prefix marking a value as embedded vector markup.
pub const MARKUP_SENTINEL: &str = "<svg";

/// Indent width for pretty-printed structured values.
pub const TEXT_INDENT: &str = "  ";

/// How a single section is to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Raw markup, rendered unescaped. The variant itself is the
    /// trusted-source flag: once classified, no further sniffing occurs.
    Markup(String),
    /// Pretty-printed structured text, rendered escaped and preformatted.
    Text(String),
}

/// One renderable section: the mapping key as heading plus its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

/// True if `s` opens an actual `<svg` tag.
///
/// Prefix alone is not enough: `"<svglike"` must not count. The character
/// after the sentinel has to terminate the tag name (whitespace, `>`, `/`,
/// or end of input).
pub fn is_trusted_markup(s: &str) -> bool {
    match s.strip_prefix(MARKUP_SENTINEL) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(c) => c.is_whitespace() || c == '>' || c == '/',
        },
        None => false,
    }
}

/// Decide how a single value is displayed.
pub fn classify(value: &Value) -> SectionBody {
    match value.as_str() {
        Some(s) if is_trusted_markup(s) => SectionBody::Markup(s.to_string()),
        _ => SectionBody::Text(to_structured_text(value)),
    }
}

/// Produce one section per mapping entry, in mapping order.
///
/// An empty mapping yields an empty vector; that is a valid render (zero
/// sections), not an error.
pub fn sections(results: &ResultSet) -> Vec<Section> {
    results
        .iter()
        .map(|(key, value)| Section {
            title: key.clone(),
            body: classify(value),
        })
        .collect()
}

/// Pretty-print a value with fixed indent and stable key order.
///
/// Key order is the value's own insertion order (preserve_order), so the
/// same payload always prints the same way.
pub fn to_structured_text(value: &Value) -> String {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(TEXT_INDENT.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    match serde::Serialize::serialize(value, &mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        // Value serialization is infallible in practice; fall back to the
        // compact form rather than erroring the whole render.
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==========================================================================
    // MARKUP CLASSIFICATION TESTS
    // ==========================================================================
    //
    // The markup-vs-text decision is the core of the renderer. The sentinel
    // must match an actual opening <svg tag, not just the four characters.
    // ==========================================================================

    #[test]
    fn test_svg_element_is_markup() {
        assert!(is_trusted_markup("<svg></svg>"));
    }

    #[test]
    fn test_svg_with_attributes_is_markup() {
        assert!(is_trusted_markup("<svg width=\"100\" height=\"100\"><rect/></svg>"));
        assert!(is_trusted_markup("<svg\nxmlns=\"http://www.w3.org/2000/svg\">"));
    }

    #[test]
    fn test_self_closing_svg_is_markup() {
        assert!(is_trusted_markup("<svg/>"));
    }

    #[test]
    fn test_bare_sentinel_is_markup() {
        // A truncated payload that is exactly the sentinel still renders as
        // markup; the browser deals with the rest.
        assert!(is_trusted_markup("<svg"));
    }

    #[test]
    fn test_svglike_prefix_is_not_markup() {
        assert!(!is_trusted_markup("<svglike"));
        assert!(!is_trusted_markup("<svgfoo>bar</svgfoo>"));
    }

    #[test]
    fn test_non_svg_strings_are_not_markup() {
        assert!(!is_trusted_markup(""));
        assert!(!is_trusted_markup("svg"));
        assert!(!is_trusted_markup("<div><svg></svg></div>"));
        assert!(!is_trusted_markup("http://x/report.html"));
    }

    #[test]
    fn test_classify_string_branches() {
        assert_eq!(
            classify(&json!("<svg></svg>")),
            SectionBody::Markup("<svg></svg>".to_string())
        );
        assert_eq!(
            classify(&json!("<svglike")),
            SectionBody::Text("\"<svglike\"".to_string())
        );
    }

    #[test]
    fn test_classify_non_strings_are_text() {
        assert!(matches!(classify(&json!(42)), SectionBody::Text(_)));
        assert!(matches!(classify(&json!({})), SectionBody::Text(_)));
        assert!(matches!(classify(&json!([1, 2])), SectionBody::Text(_)));
        assert!(matches!(classify(&json!(null)), SectionBody::Text(_)));
    }

    // ==========================================================================
    // SECTION ORDERING TESTS
    // ==========================================================================
    //
    // One section per key, in mapping insertion order, none omitted or
    // duplicated. The backend's order is meaningful (charts come in the
    // order the analysis produced them).
    // ==========================================================================

    fn result_set(entries: &[(&str, Value)]) -> ResultSet {
        let mut map = ResultSet::new();
        for (k, v) in entries {
            map.insert(k.to_string(), v.clone());
        }
        map
    }

    #[test]
    fn test_sections_preserve_insertion_order() {
        let results = result_set(&[
            ("zeta", json!(1)),
            ("alpha", json!(2)),
            ("mid", json!(3)),
        ]);
        let secs = sections(&results);
        let titles: Vec<&str> = secs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_sections_one_per_key() {
        let results = result_set(&[
            ("histogram", json!("<svg></svg>")),
            ("stats", json!({"rows": 10})),
        ]);
        let secs = sections(&results);
        assert_eq!(secs.len(), 2);
        assert_eq!(secs[0].body, SectionBody::Markup("<svg></svg>".to_string()));
        assert!(matches!(secs[1].body, SectionBody::Text(_)));
    }

    #[test]
    fn test_empty_mapping_renders_zero_sections() {
        let secs = sections(&ResultSet::new());
        assert!(secs.is_empty());
    }

    // ==========================================================================
    // STRUCTURED TEXT TESTS
    // ==========================================================================

    #[test]
    fn test_structured_text_indent_width() {
        let text = to_structured_text(&json!({"rows": 10}));
        assert_eq!(text, "{\n  \"rows\": 10\n}");
    }

    #[test]
    fn test_structured_text_scalars() {
        assert_eq!(to_structured_text(&json!(42)), "42");
        assert_eq!(to_structured_text(&json!("plain")), "\"plain\"");
        assert_eq!(to_structured_text(&json!(null)), "null");
    }

    #[test]
    fn test_structured_text_stable_key_order() {
        let value = serde_json::from_str::<Value>(r#"{"b":1,"a":2}"#).unwrap();
        // preserve_order: keys stay in payload order, not sorted.
        assert_eq!(to_structured_text(&value), "{\n  \"b\": 1,\n  \"a\": 2\n}");
    }
}
