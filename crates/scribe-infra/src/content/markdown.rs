//! Markdown renderer backed by pulldown-cmark and ammonia.

use ammonia::Builder;
use pulldown_cmark::{Options, Parser, html};

use scribe_core::ports::ContentRenderer;

const LINK_REL: &str = "noopener noreferrer nofollow";

/// Tags the HTML writer opens top-level blocks with.
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "ul", "ol", "table", "hr",
    "div",
];

/// Renders CommonMark (plus tables and strikethrough) and sanitizes the result.
///
/// Sanitization keeps structural and formatting tags, drops `<script>` and
/// `<style>` together with their content, strips event-handler attributes and
/// any URL scheme outside ammonia's safe list (so no `javascript:`).
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        Self { options }
    }

    fn sanitizer() -> Builder<'static> {
        let mut builder = Builder::default();
        builder.link_rel(Some(LINK_REL));
        builder
    }

    /// Whether `input` opens with a block-level element, as rendered output does.
    fn starts_with_block(input: &str) -> bool {
        let Some(rest) = input.trim_start().strip_prefix('<') else {
            return false;
        };
        let name: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        BLOCK_TAGS.contains(&name.as_str())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRenderer for MarkdownRenderer {
    /// Already-sanitized block HTML is returned unchanged, so rendered output
    /// is a fixed point. Reparsing it as Markdown would end HTML blocks at
    /// blank lines and mangle code blocks.
    fn render(&self, markdown: &str) -> String {
        if Self::starts_with_block(markdown) && self.sanitize(markdown) == markdown {
            return markdown.to_string();
        }

        let parser = Parser::new_ext(markdown, self.options);
        let mut unsafe_html = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut unsafe_html, parser);

        self.sanitize(&unsafe_html)
    }

    fn sanitize(&self, html: &str) -> String {
        Self::sanitizer().clean(html).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        MarkdownRenderer::new().render(markdown)
    }

    #[test]
    fn heading_keeps_text_and_drops_script() {
        let html = render("# Hi <script>alert(1)</script>");

        assert!(html.contains("<h1>"), "{html}");
        assert!(html.contains("Hi"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn javascript_links_lose_their_href() {
        let html = render("[click](javascript:alert(1))");

        assert!(html.contains("click"));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn event_handlers_are_stripped() {
        let html = render("<img src=\"cat.png\" onerror=\"alert(1)\">");

        assert!(html.contains("<img"));
        assert!(html.contains("cat.png"));
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn links_get_safe_rel() {
        let html = render("[docs](https://example.com)");

        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains(LINK_REL));
    }

    #[test]
    fn formatting_survives() {
        let html = render("*em* **strong** `code` ~~gone~~\n\n- one\n- two\n\n```\nlet x = 1;\n```");

        for tag in ["<em>", "<strong>", "<code>", "<del>", "<ul>", "<li>", "<pre>"] {
            assert!(html.contains(tag), "missing {tag} in {html}");
        }
    }

    #[test]
    fn tables_render() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn malformed_markdown_degrades_gracefully() {
        let html = render("**unclosed *emphasis [link](");
        assert!(html.contains("unclosed"));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let renderer = MarkdownRenderer::new();
        let inputs = [
            "# Title\n\nSome *text* with a [link](https://example.com).",
            "<div onclick=\"x()\">raw <b>html</b></div>",
            "> quote\n\n1. first\n2. second",
        ];

        for input in inputs {
            let once = renderer.render(input);
            assert_eq!(renderer.sanitize(&once), once);
        }
    }

    #[test]
    fn rendering_own_output_is_stable() {
        let sources = [
            "# Hi",
            "> ```\n> a\n>\n> b\n> ```",
            "- item\n\n  ```\n  a\n\n  b\n  ```",
            "1. one\n\n   > quoted\n   >\n   > more",
            "| a | b |\n|---|---|\n| 1 | 2 |\n\ntail *text*",
        ];

        for source in sources {
            let once = render(source);
            assert_eq!(render(&once), once, "unstable for {source:?}");
        }
    }

    #[test]
    fn code_block_with_blank_line_survives_rerender() {
        let once = render("> ```\n> a\n>\n> b\n> ```");
        let twice = render(&once);

        assert!(twice.contains("<pre><code>a\n\nb\n</code></pre>"), "{twice}");
        assert!(!twice.contains("<p><code>"));
    }

    #[test]
    fn leading_inline_html_is_still_markdown() {
        let html = render("<b>hi</b> and *em*");

        assert!(html.contains("<em>em</em>"), "{html}");
    }

    #[test]
    fn unsafe_block_html_is_not_passed_through() {
        let html = render("<div onclick=\"x()\">raw</div>");

        assert!(html.contains("raw"));
        assert!(!html.contains("onclick"));
    }

    #[test]
    fn render_is_deterministic() {
        let source = "## Same\n\ninput *every* time";
        assert_eq!(render(source), render(source));
    }
}
