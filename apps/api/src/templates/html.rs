//! Shared HTML plumbing for the preview templates.

use std::fmt::Write;

use crate::layout::{HtmlTypeScale, SectionId};
use crate::models::resume::Resume;
use crate::templates::content::{ensure_url_scheme, ContentPolicy};
use crate::templates::{identity, modern, ResumeTemplate};

/// Everything a template needs for one HTML render pass.
pub struct HtmlContext<'a> {
    pub resume: &'a Resume,
    pub sections: &'a [SectionId],
    pub scale: HtmlTypeScale,
    pub policy: ContentPolicy,
    pub dial_code: &'a str,
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// External link that opens in a new tab. Returns an empty string for a blank href.
pub fn external_link(href: &str, label: &str, class: &str) -> String {
    let href = ensure_url_scheme(href);
    if href.is_empty() {
        return String::new();
    }
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}">{}</a>"#,
        escape_html(&href),
        class,
        escape_html(label)
    )
}

/// CSS for the size classes referenced by `scale`, plus the layout helpers the
/// templates use.
pub fn stylesheet(scale: &HtmlTypeScale) -> String {
    let mut css = String::new();
    for px in scale.pixel_sizes() {
        let _ = writeln!(css, ".fs-{px} {{ font-size: {px}px; }}");
    }
    let _ = writeln!(
        css,
        ".{} {{ font-size: {}rem; line-height: 1.2; }}",
        scale.name.class_name(),
        scale.name.rem()
    );
    css.push_str(
        r#".resume { background: #fff; color: #000; font-family: Helvetica, Arial, sans-serif; min-height: 842px; box-sizing: border-box; }
.resume h1, .resume h2, .resume p { margin: 0; }
.row { display: flex; justify-content: space-between; align-items: baseline; gap: 8px; }
.muted { color: #334155; }
.bold { font-weight: 700; }
.semibold { font-weight: 600; }
.upper { text-transform: uppercase; }
.justify { text-align: justify; }
.link { color: #2563eb; text-decoration: none; }
.link:hover { text-decoration: underline; }
.indent { margin-left: 12px; }
.grid-3 { display: grid; grid-template-columns: repeat(3, 1fr); column-gap: 16px; row-gap: 2px; }
.section { margin-bottom: 12px; }
.entry { margin-bottom: 8px; }
"#,
    );
    css
}

/// The template's root element, without page chrome or stylesheet.
pub fn render_fragment(template: ResumeTemplate, ctx: &HtmlContext<'_>) -> String {
    match template {
        ResumeTemplate::Identity => identity::render(ctx),
        ResumeTemplate::Modern => modern::render(ctx),
    }
}

/// Wraps a rendered fragment into a standalone page.
pub fn render_document(title: &str, fragment: &str, scale: &HtmlTypeScale) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
{css}</style>
</head>
<body>
{fragment}
</body>
</html>
"#,
        title = escape_html(title),
        css = stylesheet(scale),
        fragment = fragment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontSize;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"R&D" 'x'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;x&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_external_link_adds_scheme_and_rel() {
        let html = external_link("example.com", "View", "link");
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(">View</a>"));
        assert!(external_link("  ", "View", "link").is_empty());
    }

    #[test]
    fn test_stylesheet_declares_scale_classes() {
        let scale = FontSize::try_from(14).unwrap().html_scale();
        let css = stylesheet(&scale);
        assert!(css.contains(".fs-14 { font-size: 14px; }"));
        assert!(css.contains(".fs-13 { font-size: 13px; }"));
        assert!(css.contains(".fs-12 { font-size: 12px; }"));
        assert!(css.contains(".text-2xl"));
    }

    #[test]
    fn test_render_fragment_dispatches_on_template() {
        let resume = Resume::default();
        let sections = crate::layout::DEFAULT_SECTION_ORDER.to_vec();
        for (template, root) in [
            (ResumeTemplate::Modern, r#"<div class="resume modern""#),
            (ResumeTemplate::Identity, r#"<div class="resume identity""#),
        ] {
            let ctx = HtmlContext {
                resume: &resume,
                sections: &sections,
                scale: FontSize::DEFAULT.html_scale(),
                policy: ContentPolicy::for_template(template),
                dial_code: "+91",
            };
            let html = render_fragment(template, &ctx);
            assert!(html.starts_with(root));
            assert!(!html.contains("<!DOCTYPE"));
        }
    }

    #[test]
    fn test_render_document_escapes_title() {
        let scale = FontSize::DEFAULT.html_scale();
        let page = render_document("<script>", "<div></div>", &scale);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>&lt;script&gt;</title>"));
        assert!(page.contains("<div></div>"));
    }
}
