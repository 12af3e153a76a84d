//! "Modern Professional" preview: centered header, ruled title-case headings.

use std::fmt::Write;

use crate::layout::SectionId;
use crate::templates::content::{contact_phone, present, section_has_content};
use crate::templates::html::{escape_html, external_link, HtmlContext};

pub fn render(ctx: &HtmlContext<'_>) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="resume modern" style="padding: 32px;">"#);
    out.push('\n');
    render_header(ctx, &mut out);
    for section in ctx.sections {
        if section_has_content(ctx.resume, *section) {
            render_section(ctx, *section, &mut out);
        }
    }
    out.push_str("</div>\n");
    out
}

/// Plain-text contact items, then link items, in print order.
fn contact_items(ctx: &HtmlContext<'_>) -> Vec<String> {
    let info = &ctx.resume.personal_info;
    let mut items = Vec::new();
    if !info.email.trim().is_empty() {
        items.push(escape_html(info.email.trim()));
    }
    let phone = contact_phone(&info.phone, ctx.dial_code, ctx.policy.prefix_dial_code);
    if !phone.is_empty() {
        items.push(escape_html(&phone));
    }
    if let Some(location) = present(&info.location) {
        items.push(escape_html(location));
    }
    if let Some(linkedin) = present(&info.linkedin) {
        items.push(external_link(linkedin, "LinkedIn", "link"));
    }
    if let Some(github) = present(&info.github) {
        items.push(external_link(github, "GitHub", "link"));
    }
    if let Some(website) = present(&info.website) {
        items.push(external_link(website, "Website", "link"));
    }
    items
}

fn render_header(ctx: &HtmlContext<'_>, out: &mut String) {
    let _ = write!(
        out,
        r#"<header style="text-align: center; margin-bottom: 14px;"><h1 class="{} bold">{}</h1>"#,
        ctx.scale.name.class_name(),
        escape_html(&ctx.resume.personal_info.name)
    );
    let items = contact_items(ctx);
    if !items.is_empty() {
        let _ = write!(
            out,
            r#"<p class="{} muted" style="margin-top: 4px;">{}</p>"#,
            ctx.scale.content_class(),
            items.join(" &#183; ")
        );
    }
    out.push_str("</header>\n");
}

fn heading(ctx: &HtmlContext<'_>, title: &str, out: &mut String) {
    let _ = write!(
        out,
        r#"<h2 class="{} bold" style="color: #1e3a8a; border-bottom: 1px solid #1e3a8a; padding-bottom: 2px; margin-bottom: 6px;">{}</h2>"#,
        ctx.scale.heading_class(),
        title
    );
}

fn render_section(ctx: &HtmlContext<'_>, section: SectionId, out: &mut String) {
    let resume = ctx.resume;
    let content = ctx.scale.content_class();

    let _ = write!(out, r#"<section class="section" data-section="{section}">"#);
    match section {
        SectionId::Summary => {
            heading(ctx, "Professional Summary", out);
            let _ = write!(
                out,
                r#"<p class="{content}" style="line-height: 1.5;">{}</p>"#,
                escape_html(&resume.summary)
            );
        }
        SectionId::Education => {
            heading(ctx, "Education", out);
            for edu in &resume.education {
                let _ = write!(
                    out,
                    r#"<div class="entry" data-id="{}"><div class="row"><p class="{content} bold">{}</p><p class="{content} muted">{}</p></div>"#,
                    escape_html(&edu.id),
                    escape_html(&edu.school),
                    escape_html(&edu.graduation_date)
                );
                let mut line = escape_html(&edu.degree);
                if !edu.location.trim().is_empty() {
                    let _ = write!(line, ", {}", escape_html(&edu.location));
                }
                if let Some(grade) = present(&edu.grade) {
                    let _ = write!(line, " &#183; {}", escape_html(grade));
                }
                let _ = write!(out, r#"<p class="{content}">{line}</p></div>"#);
            }
        }
        SectionId::Experience => {
            heading(ctx, "Experience", out);
            for exp in &resume.experience {
                let _ = write!(
                    out,
                    r#"<div class="entry" data-id="{}"><div class="row"><p class="{content} bold">{} &#183; {}</p><p class="{content} muted">{} - {}</p></div>"#,
                    escape_html(&exp.id),
                    escape_html(&exp.job_title),
                    escape_html(&exp.company),
                    escape_html(&exp.start_date),
                    escape_html(&exp.end_date)
                );
                if !exp.location.trim().is_empty() {
                    let _ = write!(
                        out,
                        r#"<p class="{content} muted">{}</p>"#,
                        escape_html(&exp.location)
                    );
                }
                let lines = ctx.policy.description_lines(&exp.description);
                if !lines.is_empty() {
                    out.push_str(r#"<ul style="margin: 2px 0 0 16px; padding: 0;">"#);
                    for line in lines {
                        let _ = write!(out, r#"<li class="{content}">{}</li>"#, escape_html(line));
                    }
                    out.push_str("</ul>");
                }
                out.push_str("</div>");
            }
        }
        SectionId::Skills => {
            heading(ctx, "Skills", out);
            let skills: Vec<String> = ctx
                .policy
                .skills(resume)
                .iter()
                .map(|s| escape_html(s))
                .collect();
            let _ = write!(out, r#"<p class="{content}">{}</p>"#, skills.join(", "));
        }
        SectionId::Projects => {
            heading(ctx, "Projects", out);
            for proj in &resume.projects {
                let _ = write!(
                    out,
                    r#"<div class="entry" data-id="{}"><p class="{content} bold">{}"#,
                    escape_html(&proj.id),
                    escape_html(&proj.name)
                );
                if let Some(link) = present(&proj.link) {
                    let _ = write!(out, " {}", external_link(link, "View", "link"));
                }
                let _ = write!(
                    out,
                    r#"</p><p class="{content}">{}</p></div>"#,
                    escape_html(&proj.description)
                );
            }
        }
        SectionId::Certifications => {
            heading(ctx, "Certifications", out);
            for cert in &resume.certifications {
                let _ = write!(
                    out,
                    r#"<div class="row" data-id="{}"><p class="{content}"><span class="bold">{}</span>, {}"#,
                    escape_html(&cert.id),
                    escape_html(&cert.name),
                    escape_html(&cert.authority)
                );
                if let Some(link) = present(&cert.link) {
                    let _ = write!(out, " {}", external_link(link, "View", "link"));
                }
                let _ = write!(
                    out,
                    r#"</p><p class="{content} muted">{}</p></div>"#,
                    escape_html(&cert.date)
                );
            }
        }
        SectionId::Awards => {
            heading(ctx, "Awards", out);
            for award in &resume.awards {
                let _ = write!(
                    out,
                    r#"<p class="{content}" data-id="{}">{}"#,
                    escape_html(&award.id),
                    escape_html(&award.name)
                );
                if let Some(link) = present(&award.link) {
                    let _ = write!(out, " {}", external_link(link, "View", "link"));
                }
                out.push_str("</p>");
            }
        }
        SectionId::Volunteer => {
            heading(ctx, "Volunteer Experience", out);
            for vol in &resume.volunteer_experience {
                let _ = write!(
                    out,
                    r#"<div class="entry" data-id="{}"><div class="row"><p class="{content} bold">{} &#183; {}</p><p class="{content} muted">{}</p></div>"#,
                    escape_html(&vol.id),
                    escape_html(&vol.role),
                    escape_html(&vol.organization),
                    escape_html(&vol.dates)
                );
                if !vol.description.trim().is_empty() {
                    let _ = write!(
                        out,
                        r#"<p class="{content}">{}</p>"#,
                        escape_html(&vol.description)
                    );
                }
                out.push_str("</div>");
            }
        }
        SectionId::Languages => {
            heading(ctx, "Languages", out);
            let langs: Vec<String> = resume
                .languages
                .iter()
                .map(|l| {
                    format!(
                        r#"<span data-id="{}"><span class="semibold">{}</span> ({})</span>"#,
                        escape_html(&l.id),
                        escape_html(&l.name),
                        escape_html(&l.proficiency)
                    )
                })
                .collect();
            let _ = write!(out, r#"<p class="{content}">{}</p>"#, langs.join(", "));
        }
        SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore => {}
    }
    out.push_str("</section>\n");
}
