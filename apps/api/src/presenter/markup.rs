//! Fragment walking over provider markup: allow-list sanitizing and plain
//! text extraction. Both parse with `scraper` and rebuild from the tree.

use scraper::{ElementRef, Html, Node};

/// Elements kept by the sanitizer.
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "i", "li", "ol", "p", "section", "small", "span", "strong", "table", "tbody", "td",
    "th", "thead", "tr", "u", "ul",
];

/// Elements dropped together with everything inside them.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "svg", "math",
    "form", "input", "button", "textarea", "select", "link", "meta", "base",
];

const VOID_TAGS: &[&str] = &["br", "hr"];

/// Elements followed by a line break in plain text.
const BLOCK_TAGS: &[&str] = &[
    "blockquote", "br", "div", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "p",
    "section", "tr", "ul", "ol", "table",
];

/// Rebuilds `html` keeping only allow-listed elements, `class` attributes and
/// safe `href`s on links. Disallowed elements are unwrapped, except the
/// dropped set which disappears with its content.
pub fn sanitize_fragment(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    sanitize_children(fragment.root_element(), &mut out);
    out
}

fn sanitize_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    sanitize_element(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn sanitize_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROPPED_TAGS.contains(&name) {
        return;
    }
    if !ALLOWED_TAGS.contains(&name) {
        sanitize_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        let keep = match attr {
            "class" => true,
            "href" => name == "a" && is_safe_href(value),
            _ => false,
        };
        if keep {
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
    }
    out.push('>');

    if VOID_TAGS.contains(&name) {
        return;
    }

    sanitize_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_safe_href(href: &str) -> bool {
    let lower = href.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("mailto:")
}

/// Text content of a fragment, one line per block element, blank lines
/// collapsed. Used for the copy-text action.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut raw = String::new();
    collect_text(fragment.root_element(), &mut raw);

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&text.replace('\n', " ")),
            Node::Element(el) => {
                let name = el.name();
                if DROPPED_TAGS.contains(&name) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
                if BLOCK_TAGS.contains(&name) {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_structure_and_classes() {
        let html = r#"<h3 class="text-xl font-bold">Experience</h3><ul><li>Led <strong>5</strong> engineers</li></ul>"#;
        assert_eq!(sanitize_fragment(html), html);
    }

    #[test]
    fn test_sanitize_drops_scripts_and_handlers() {
        let html = r#"<p onclick="steal()">Hi<script>alert(1)</script></p><style>p{}</style>"#;
        assert_eq!(sanitize_fragment(html), "<p>Hi</p>");
    }

    #[test]
    fn test_sanitize_unwraps_unknown_elements() {
        let html = r#"<article><p>Body</p></article><font color="red">x</font>"#;
        assert_eq!(sanitize_fragment(html), "<p>Body</p>x");
    }

    #[test]
    fn test_sanitize_filters_link_targets() {
        let html = r#"<a href="javascript:evil()">a</a><a href="https://example.com" target="_blank">b</a>"#;
        assert_eq!(
            sanitize_fragment(html),
            r#"<a>a</a><a href="https://example.com">b</a>"#
        );
    }

    #[test]
    fn test_sanitize_escapes_text_and_void_tags() {
        assert_eq!(sanitize_fragment("a &lt; b<br>c"), "a &lt; b<br>c");
    }

    #[test]
    fn test_plain_text_breaks_on_blocks() {
        let html = "<h3>Skills</h3><ul><li>Rust</li><li>SQL</li></ul><p>Available   now</p>";
        assert_eq!(plain_text(html), "Skills\nRust\nSQL\nAvailable now");
    }

    #[test]
    fn test_plain_text_ignores_scripts() {
        assert_eq!(plain_text("<p>ok</p><script>var x = 1;</script>"), "ok");
    }
}
