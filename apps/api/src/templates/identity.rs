//! "Identity Training" preview: contact block with a photo frame, then
//! upper-case section headings in the resolved order.

use std::fmt::Write;

use crate::layout::SectionId;
use crate::templates::content::{contact_phone, present, section_has_content};
use crate::templates::html::{escape_html, external_link, HtmlContext};

pub fn render(ctx: &HtmlContext<'_>) -> String {
    let mut out = String::new();
    out.push_str(r#"<div class="resume identity" style="padding: 24px; border: 1px solid #cbd5e1; border-radius: 8px;">"#);
    out.push('\n');
    render_header(ctx, &mut out);
    out.push_str("<div class=\"sections\">\n");
    for section in ctx.sections {
        if section_has_content(ctx.resume, *section) {
            render_section(ctx, *section, &mut out);
        }
    }
    out.push_str("</div>\n</div>\n");
    out
}

fn render_header(ctx: &HtmlContext<'_>, out: &mut String) {
    let info = &ctx.resume.personal_info;
    let content = ctx.scale.content_class();

    out.push_str(r#"<div class="row" style="align-items: flex-start; margin-bottom: 12px;">"#);
    out.push_str("<div style=\"flex: 1;\">");
    let _ = write!(
        out,
        r#"<h1 class="{} bold" style="margin-bottom: 4px;">{}</h1>"#,
        ctx.scale.name.class_name(),
        escape_html(&info.name)
    );
    let _ = write!(out, r#"<div class="{content}">"#);
    let _ = write!(
        out,
        "<div>Ph. No: {}</div>",
        escape_html(&contact_phone(
            &info.phone,
            ctx.dial_code,
            ctx.policy.prefix_dial_code
        ))
    );
    let _ = write!(out, "<div>E-Mail: {}</div>", escape_html(&info.email));

    let mut socials = Vec::new();
    if let Some(linkedin) = present(&info.linkedin) {
        socials.push(external_link(linkedin, "LINKEDIN", "link social"));
    }
    if let Some(github) = present(&info.github) {
        socials.push(external_link(github, "GITHUB", "link social"));
    }
    if !socials.is_empty() {
        let _ = write!(
            out,
            r#"<div class="socials" style="display: flex; gap: 16px; margin-top: 4px; font-size: 7px;">{}</div>"#,
            socials.join("")
        );
    }
    out.push_str("</div></div>");

    out.push_str(r#"<div class="photo" style="width: 80px; height: 96px; border: 1px solid #000; display: flex; align-items: center; justify-content: center; margin-left: 12px; flex-shrink: 0; overflow: hidden;">"#);
    match present(&info.photo) {
        Some(photo) => {
            let _ = write!(
                out,
                r#"<img src="{}" alt="Profile" style="width: 100%; height: 100%; object-fit: cover;">"#,
                escape_html(photo)
            );
        }
        None => out.push_str(r#"<span style="font-size: 10px; color: #94a3b8;">PHOTO</span>"#),
    }
    out.push_str("</div></div>\n");
}

fn heading(ctx: &HtmlContext<'_>, title: &str, out: &mut String) {
    let _ = write!(
        out,
        r#"<h2 class="{} bold upper" style="margin-bottom: 6px;">{}</h2>"#,
        ctx.scale.heading_class(),
        title
    );
}

fn render_section(ctx: &HtmlContext<'_>, section: SectionId, out: &mut String) {
    let resume = ctx.resume;
    let content = ctx.scale.content_class();
    let title = ctx.scale.title_class();

    let _ = write!(out, r#"<section class="section" data-section="{section}">"#);
    match section {
        SectionId::Summary => {
            heading(ctx, "CAREER SUMMARY", out);
            let _ = write!(
                out,
                r#"<p class="{content} justify" style="line-height: 1.6;">{}</p>"#,
                escape_html(&resume.summary)
            );
        }
        SectionId::Education => {
            heading(ctx, "EDUCATION", out);
            for edu in &resume.education {
                let _ = write!(out, r#"<div class="entry" data-id="{}">"#, escape_html(&edu.id));
                let _ = write!(
                    out,
                    r#"<div class="row"><p class="{content} semibold">{}</p><p class="{} bold">{}</p></div>"#,
                    escape_html(&edu.degree),
                    ctx.scale.heading_class(),
                    escape_html(&edu.graduation_date)
                );
                let _ = write!(
                    out,
                    r#"<p class="{content} muted">{} | {}</p>"#,
                    escape_html(&edu.school),
                    escape_html(&edu.location)
                );
                if let Some(grade) = present(&edu.grade) {
                    let _ = write!(out, r#"<p class="{content} muted">{}</p>"#, escape_html(grade));
                }
                out.push_str("</div>");
            }
        }
        SectionId::Experience => {
            heading(ctx, "WORK EXPERIENCE", out);
            for exp in &resume.experience {
                let _ = write!(out, r#"<div class="entry" data-id="{}">"#, escape_html(&exp.id));
                let _ = write!(
                    out,
                    r#"<div class="row"><p class="{content} semibold">{}</p><p class="{content} bold">{} - {}</p></div>"#,
                    escape_html(&exp.job_title),
                    escape_html(&exp.start_date),
                    escape_html(&exp.end_date)
                );
                let _ = write!(
                    out,
                    r#"<p class="{content} muted">{} | {}</p>"#,
                    escape_html(&exp.company),
                    escape_html(&exp.location)
                );
                out.push_str(r#"<div style="margin-top: 2px;">"#);
                for line in ctx.policy.description_lines(&exp.description) {
                    let _ = write!(
                        out,
                        r#"<p class="{content} muted">&#8226; {}</p>"#,
                        escape_html(line)
                    );
                }
                out.push_str("</div></div>");
            }
        }
        SectionId::Skills => {
            heading(ctx, "SKILLS", out);
            out.push_str(r#"<div class="grid-3">"#);
            for skill in ctx.policy.skills(resume) {
                let _ = write!(out, r#"<div class="{content}">&#8226; {}</div>"#, escape_html(skill));
            }
            out.push_str("</div>");
        }
        SectionId::Projects => {
            heading(ctx, "PROJECTS", out);
            for proj in &resume.projects {
                let _ = write!(out, r#"<div class="entry" data-id="{}">"#, escape_html(&proj.id));
                let _ = write!(
                    out,
                    r#"<p class="{content} semibold">{}</p><p class="{content} muted">{}</p>"#,
                    escape_html(&proj.name),
                    escape_html(&proj.description)
                );
                if let Some(link) = present(&proj.link) {
                    out.push_str(&external_link(link, "View", &format!("{title} link")));
                }
                out.push_str("</div>");
            }
        }
        SectionId::Certifications => {
            heading(ctx, "CERTIFICATIONS", out);
            for cert in &resume.certifications {
                let _ = write!(
                    out,
                    r#"<div data-id="{}" style="margin-bottom: 2px;"><p class="{content}">&#8226; {} - {} ({})</p>"#,
                    escape_html(&cert.id),
                    escape_html(&cert.name),
                    escape_html(&cert.authority),
                    escape_html(&cert.date)
                );
                if let Some(link) = present(&cert.link) {
                    out.push_str(&external_link(link, "View", &format!("{title} link indent")));
                }
                out.push_str("</div>");
            }
        }
        SectionId::Awards => {
            heading(ctx, "RANK ACHIEVED", out);
            for award in &resume.awards {
                let _ = write!(
                    out,
                    r#"<div data-id="{}" style="margin-bottom: 2px;"><p class="{content}">&#8226; {}</p>"#,
                    escape_html(&award.id),
                    escape_html(&award.name)
                );
                if let Some(link) = present(&award.link) {
                    out.push_str(&external_link(link, "View", &format!("{title} link indent")));
                }
                out.push_str("</div>");
            }
        }
        SectionId::Volunteer => {
            heading(ctx, "VOLUNTEER EXPERIENCE", out);
            for vol in &resume.volunteer_experience {
                let _ = write!(out, r#"<div class="entry" data-id="{}">"#, escape_html(&vol.id));
                let _ = write!(
                    out,
                    r#"<div class="row"><p class="{content} semibold">{}</p><p class="{content} bold">{}</p></div>"#,
                    escape_html(&vol.role),
                    escape_html(&vol.dates)
                );
                let _ = write!(
                    out,
                    r#"<p class="{content} muted">{}</p><p class="{content} muted" style="margin-top: 2px;">{}</p>"#,
                    escape_html(&vol.organization),
                    escape_html(&vol.description)
                );
                out.push_str("</div>");
            }
        }
        SectionId::Languages => {
            heading(ctx, "LANGUAGES", out);
            for lang in &resume.languages {
                let _ = write!(
                    out,
                    r#"<p class="{content}" data-id="{}"><span class="semibold">{}:</span> {}</p>"#,
                    escape_html(&lang.id),
                    escape_html(&lang.name),
                    escape_html(&lang.proficiency)
                );
            }
        }
        SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore => {}
    }
    out.push_str("</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{parse_hidden, resolve_section_order, FontSize};
    use crate::models::resume::{
        AwardEntry, ExperienceEntry, PersonalInfo, ProjectEntry, Resume,
    };
    use crate::templates::content::ContentPolicy;
    use crate::templates::ResumeTemplate;

    fn make_resume() -> Resume {
        Resume {
            personal_info: PersonalInfo {
                name: "Asha <Rao>".into(),
                email: "asha@example.com".into(),
                phone: "9876543210".into(),
                linkedin: Some("linkedin.com/in/asha".into()),
                ..Default::default()
            },
            summary: "Backend engineer".into(),
            experience: vec![ExperienceEntry {
                id: "e1".into(),
                job_title: "Engineer".into(),
                company: "Acme".into(),
                location: "Pune".into(),
                start_date: "2021".into(),
                end_date: "Present".into(),
                description: "- one\n- two\n- three\n- four".into(),
            }],
            projects: vec![ProjectEntry {
                id: "p1".into(),
                name: "Folio".into(),
                description: "Renderer".into(),
                link: Some("github.com/asha/folio".into()),
            }],
            awards: vec![AwardEntry {
                id: "a1".into(),
                name: "AIR 42".into(),
                link: None,
            }],
            skills: (0..15).map(|i| format!("skill{i}")).collect(),
            ..Default::default()
        }
    }

    fn render_with(resume: &Resume, sections: &[SectionId]) -> String {
        let ctx = HtmlContext {
            resume,
            sections,
            scale: FontSize::DEFAULT.html_scale(),
            policy: ContentPolicy::for_template(ResumeTemplate::Identity),
            dial_code: "+91",
        };
        render(&ctx)
    }

    #[test]
    fn test_header_escapes_name_and_prefixes_phone() {
        let resume = make_resume();
        let html = render_with(&resume, &[]);
        assert!(html.contains("Asha &lt;Rao&gt;"));
        assert!(html.contains("Ph. No: +91 9876543210"));
        assert!(html.contains("LINKEDIN"));
        assert!(!html.contains("GITHUB"));
        assert!(html.contains(">PHOTO<"));
    }

    #[test]
    fn test_photo_replaces_placeholder() {
        let mut resume = make_resume();
        resume.personal_info.photo = Some("https://img.example/p.jpg".into());
        let html = render_with(&resume, &[]);
        assert!(html.contains(r#"<img src="https://img.example/p.jpg""#));
        assert!(!html.contains(">PHOTO<"));
    }

    #[test]
    fn test_sections_follow_plan_order() {
        let resume = make_resume();
        let html = render_with(
            &resume,
            &[SectionId::Awards, SectionId::Summary, SectionId::Experience],
        );
        let awards = html.find("RANK ACHIEVED").unwrap();
        let summary = html.find("CAREER SUMMARY").unwrap();
        let experience = html.find("WORK EXPERIENCE").unwrap();
        assert!(awards < summary && summary < experience);
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let resume = make_resume();
        let html = render_with(&resume, &[SectionId::Education, SectionId::Languages]);
        assert!(!html.contains("EDUCATION"));
        assert!(!html.contains("LANGUAGES"));
    }

    #[test]
    fn test_identity_caps_description_and_skills() {
        let resume = make_resume();
        let html = render_with(&resume, &[SectionId::Experience, SectionId::Skills]);
        assert!(html.contains("&#8226; three"));
        assert!(!html.contains("&#8226; four"));
        assert!(html.contains("skill11"));
        assert!(!html.contains("skill12"));
    }

    #[test]
    fn test_project_link_gets_scheme() {
        let resume = make_resume();
        let html = render_with(&resume, &[SectionId::Projects]);
        assert!(html.contains(r#"href="https://github.com/asha/folio""#));
    }

    #[test]
    fn test_hidden_section_never_rendered() {
        let mut resume = make_resume();
        resume.hidden_sections = vec!["summary".into()];
        let hidden = parse_hidden(&resume.hidden_sections);
        let plan = resolve_section_order(None, &hidden);
        let html = render_with(&resume, &plan);
        assert!(!html.contains("CAREER SUMMARY"));
        assert!(html.contains("WORK EXPERIENCE"));
    }
}
