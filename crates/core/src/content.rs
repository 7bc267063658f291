//! HTML to Markdown normalisation for article text.
//!
//! Article bodies come back from the solutions API as HTML. Before they are
//! handed to a text-oriented caller the HTML is converted to Markdown with
//! ATX headings and `-` bullets, `<script>`/`<style>` blocks are dropped with
//! their contents, and whitespace is collapsed.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Record fields that carry HTML and get normalised.
pub const HTML_FIELDS: [&str; 3] = ["description", "title", "summary"];

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| {
        Regex::new(r"<(?:!--|/?[A-Za-z][A-Za-z0-9-]*(?:\s[^>]*)?/?>)").expect("valid regex")
    });
static SETEXT_H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^\n]*\S[^\n]*)\n=+[ \t]*$").expect("valid regex"));
static SETEXT_H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^\n]*\S[^\n]*)\n-{2,}[ \t]*$").expect("valid regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)[*+] ").expect("valid regex"));
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("valid regex"));
static INLINE_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));

/// Remove script and style elements, contents included.
pub fn strip_script_and_style(html: &str) -> String {
    let html = SCRIPT_RE.replace_all(html, "");
    STYLE_RE.replace_all(&html, "").into_owned()
}

/// True when the text contains anything that looks like an HTML tag.
pub fn contains_markup(text: &str) -> bool {
    TAG_RE.is_match(text)
}

/// Rewrite converter output to ATX headings and hyphen bullets.
fn normalize_markdown_style(markdown: &str) -> String {
    let markdown = SETEXT_H1_RE.replace_all(markdown, "# $1");
    let markdown = SETEXT_H2_RE.replace_all(&markdown, "## $1");
    BULLET_RE.replace_all(&markdown, "${1}- ").into_owned()
}

/// Collapse blank-line runs to a single blank line, squeeze spaces and tabs,
/// and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    let text = BLANK_RUN_RE.replace_all(text, "\n\n");
    let text = INLINE_SPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Convert an HTML fragment to normalised Markdown.
///
/// Text without markup skips the converter and only has its whitespace
/// collapsed, so feeding the output back in leaves it unchanged.
pub fn html_to_markdown(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let markdown = if contains_markup(html) {
        let cleaned = strip_script_and_style(html);
        normalize_markdown_style(&html2md::parse_html(&cleaned))
    } else {
        html.to_string()
    };

    collapse_whitespace(&markdown)
}

/// Normalise one record, returning a new map.
///
/// Only the fields in [`HTML_FIELDS`] are touched, and only when they hold a
/// non-empty value. Every other field is copied unchanged.
pub fn clean_record(record: &Map<String, Value>) -> Map<String, Value> {
    record
        .iter()
        .map(|(key, value)| {
            let value = if HTML_FIELDS.contains(&key.as_str()) && !is_blank(value) {
                clean_html_content(value)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

/// Normalise a string or a record. Any other value is returned as-is.
pub fn clean_html_content(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(html_to_markdown(text)),
        Value::Object(record) => Value::Object(clean_record(record)),
        other => other.clone(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_string_maps_to_empty() {
        assert_eq!(html_to_markdown(""), "");
        assert_eq!(clean_html_content(&json!("")), json!(""));
    }

    #[test]
    fn test_strip_script_and_style() {
        let html = r#"<p>Keep</p><script type="text/javascript">alert('x');</script><STYLE>p{color:red}</STYLE>"#;
        let cleaned = strip_script_and_style(html);
        assert_eq!(cleaned, "<p>Keep</p>");
    }

    #[test]
    fn test_script_contents_never_reach_output() {
        let md = html_to_markdown("<p>Reset your password</p><script>track('hit')</script>");
        assert!(md.contains("Reset your password"));
        assert!(!md.contains("track"));
    }

    #[test]
    fn test_headings_are_atx() {
        let md = html_to_markdown("<h1>Printer setup</h1><h2>Drivers</h2><p>Install them.</p>");
        assert!(md.contains("# Printer setup"), "got: {md}");
        assert!(md.contains("## Drivers"), "got: {md}");
        assert!(!md.contains("==="));
        assert!(md.contains("Install them."));
    }

    #[test]
    fn test_bullets_use_hyphens() {
        let md = html_to_markdown("<ul><li>First</li><li>Second</li></ul>");
        let bullets: Vec<&str> = md.lines().filter(|l| l.contains("First") || l.contains("Second")).collect();
        assert_eq!(bullets.len(), 2, "got: {md}");
        assert!(bullets.iter().all(|l| l.trim_start().starts_with("- ")), "got: {md}");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_whitespace("a\n \n\t\n b"), "a\n\n b");
        assert_eq!(collapse_whitespace("a  \t b"), "a b");
        assert_eq!(collapse_whitespace("  \n a\n\nb \n "), "a\n\nb");
    }

    #[test]
    fn test_contains_markup() {
        assert!(contains_markup("<p>x</p>"));
        assert!(contains_markup("line<br/>break"));
        assert!(contains_markup("<!-- note -->"));
        assert!(!contains_markup("see <https://example.com> for details"));
        assert!(!contains_markup("1 < 2 and 3 > 2"));
    }

    #[test]
    fn test_plain_text_only_gets_whitespace_collapsed() {
        assert_eq!(html_to_markdown("  Turn it   off\n\n\n\nand on  "), "Turn it off\n\nand on");
    }

    #[test]
    fn test_record_mode_only_touches_html_fields() {
        let record = json!({
            "id": 7,
            "title": "<b>VPN</b>",
            "description": "<p>Connect   first</p>",
            "summary": null,
            "tags": ["<b>raw</b>"],
            "folder_id": 3,
            "keywords": "<i>left alone</i>"
        });

        let cleaned = clean_html_content(&record);

        assert_eq!(cleaned["id"], record["id"]);
        assert_eq!(cleaned["tags"], record["tags"]);
        assert_eq!(cleaned["folder_id"], record["folder_id"]);
        assert_eq!(cleaned["keywords"], record["keywords"]);
        assert_eq!(cleaned["summary"], Value::Null);
        assert!(!cleaned["title"].as_str().unwrap().contains("<b>"));
        assert!(cleaned["title"].as_str().unwrap().contains("VPN"));
        assert_eq!(cleaned["description"], json!("Connect first"));
    }

    #[test]
    fn test_record_mode_does_not_mutate_input() {
        let record = json!({"description": "<p>Hello</p>"});
        let before = record.clone();
        let _ = clean_html_content(&record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_non_string_values_pass_through() {
        assert_eq!(clean_html_content(&json!(42)), json!(42));
        assert_eq!(clean_html_content(&json!(null)), json!(null));
        assert_eq!(clean_html_content(&json!([1, "<b>x</b>"])), json!([1, "<b>x</b>"]));
    }

    #[test]
    fn test_record_mode_is_idempotent() {
        let record = json!({
            "id": 1,
            "title": "<h2>Email</h2>",
            "description": "<div><p>Open   Outlook.</p>\n\n\n<ul><li>File</li><li>Options</li></ul><style>x{}</style></div>",
            "summary": "<p>Short   one</p>"
        });

        let once = clean_html_content(&record);
        let twice = clean_html_content(&once);

        assert_eq!(once, twice);
    }
}
