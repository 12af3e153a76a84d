//! "Identity Training" print layout: left contact column with a photo frame,
//! upper-case section titles, entries kept whole across page breaks.

use crate::layout::{PdfFont, SectionId};
use crate::render::pdf::canvas::{
    grid, paragraph, Block, PageGeometry, PdfCanvas, Rgb, Row, Span, TextStyle,
};
use crate::render::pdf::PdfContext;
use crate::templates::content::{contact_phone, ensure_url_scheme, present, section_has_content};

const PAGE_PADDING: f32 = 30.0;
const PAGE_PADDING_TOP: f32 = 25.0;
const PHOTO_WIDTH: f32 = 80.0;
const PHOTO_HEIGHT: f32 = 90.0;
const PHOTO_GAP: f32 = 10.0;
const HEADER_GAP: f32 = 8.0;
const SECTION_GAP: f32 = 8.0;
const BULLET_INDENT: f32 = 8.0;
const LINK_INDENT: f32 = 15.0;

pub fn compose(ctx: &PdfContext<'_>) -> PdfCanvas {
    let mut canvas = PdfCanvas::new(PageGeometry::a4(
        PAGE_PADDING_TOP,
        PAGE_PADDING,
        PAGE_PADDING,
    ));
    draw_header(ctx, &mut canvas);

    let mut blocks = Vec::new();
    for section in ctx.sections {
        if section_has_content(ctx.resume, *section) {
            section_blocks(ctx, *section, canvas.geometry().content_width(), &mut blocks);
        }
    }
    canvas.flow(&blocks);
    canvas
}

fn draw_header(ctx: &PdfContext<'_>, canvas: &mut PdfCanvas) {
    let info = &ctx.resume.personal_info;
    let scale = ctx.scale;
    let geometry = *canvas.geometry();
    let left = geometry.margin_left;
    let top = geometry.content_top();
    let column_width = geometry.content_width() - PHOTO_WIDTH - PHOTO_GAP;

    let mut rows = vec![
        Row::text(Span::new(info.name.trim(), PdfFont::Bold, scale.name), 0.0, 1.2),
        Row::Spacer(3.0),
        Row::text(
            Span::new(
                format!(
                    "Ph. No: {}",
                    contact_phone(&info.phone, ctx.dial_code, ctx.policy.prefix_dial_code)
                ),
                PdfFont::Regular,
                scale.content,
            ),
            0.0,
            1.25,
        ),
        Row::text(
            Span::new(format!("E-Mail: {}", info.email.trim()), PdfFont::Regular, scale.content),
            0.0,
            1.25,
        ),
    ];
    for (url, label) in [(&info.linkedin, "LinkedIn Profile"), (&info.github, "GitHub Profile")] {
        if let Some(url) = present(url) {
            rows.push(Row::Spacer(2.0));
            rows.push(Row::text(
                Span::new(label, PdfFont::Regular, scale.content)
                    .color(Rgb::LINK)
                    .link(ensure_url_scheme(url)),
                0.0,
                1.2,
            ));
        }
    }

    let mut y = top;
    for row in &rows {
        y -= canvas.draw_row(row, left, y, column_width);
    }

    let photo_x = geometry.width - geometry.margin_right - PHOTO_WIDTH;
    canvas.draw_rect(
        photo_x,
        top - PHOTO_HEIGHT,
        PHOTO_WIDTH,
        PHOTO_HEIGHT,
        1.5,
        Rgb::BLACK,
    );
    // Raster photos are not embedded; only an unset photo gets the label.
    if present(&info.photo).is_none() {
        let label = Row::centered(
            vec![Span::new("PHOTO", PdfFont::Regular, scale.heading + 1.0).color(Rgb::GRAY)],
            PHOTO_WIDTH,
            1.2,
        );
        let label_top = top - (PHOTO_HEIGHT - label.height()) / 2.0;
        canvas.draw_row(&label, photo_x, label_top, PHOTO_WIDTH);
    }

    let header_bottom = y.min(top - PHOTO_HEIGHT);
    canvas.set_cursor(header_bottom - HEADER_GAP);
}

fn title_block(ctx: &PdfContext<'_>, title: &str) -> Block {
    Block {
        rows: vec![Row::text(Span::new(title, PdfFont::Bold, ctx.scale.heading), 0.0, 1.2)],
        keep_together: true,
        keep_with_next: true,
        space_after: 4.0,
    }
}

fn entry(rows: Vec<Row>, space_after: f32) -> Block {
    Block {
        rows,
        keep_together: true,
        keep_with_next: false,
        space_after,
    }
}

fn muted(text: impl Into<String>, size: f32) -> Row {
    Row::text(Span::new(text, PdfFont::Regular, size).color(Rgb::GRAY), 0.0, 1.25)
}

fn view_link(url: &str, size: f32, indent: f32) -> Row {
    Row::text(
        Span::new("View", PdfFont::Regular, size)
            .color(Rgb::LINK)
            .link(ensure_url_scheme(url)),
        indent,
        1.3,
    )
}

fn section_blocks(ctx: &PdfContext<'_>, section: SectionId, width: f32, blocks: &mut Vec<Block>) {
    let resume = ctx.resume;
    let scale = ctx.scale;

    match section {
        SectionId::Summary => {
            blocks.push(title_block(ctx, "CAREER SUMMARY"));
            blocks.push(Block {
                rows: paragraph(
                    resume.summary.trim(),
                    TextStyle::new(PdfFont::Regular, scale.content, 1.4),
                    0.0,
                    width,
                    true,
                ),
                ..Default::default()
            });
        }
        SectionId::Education => {
            blocks.push(title_block(ctx, "EDUCATION"));
            for edu in &resume.education {
                let mut rows = vec![
                    Row::split(
                        Span::new(&edu.degree, PdfFont::Bold, scale.heading),
                        Span::new(&edu.graduation_date, PdfFont::Regular, scale.content)
                            .color(Rgb::GRAY),
                        width,
                        1.25,
                    ),
                    muted(format!("{} | {}", edu.school, edu.location), scale.content),
                ];
                if let Some(grade) = present(&edu.grade) {
                    rows.push(muted(grade, scale.content));
                }
                blocks.push(entry(rows, 5.0));
            }
        }
        SectionId::Experience => {
            blocks.push(title_block(ctx, "WORK EXPERIENCE"));
            for exp in &resume.experience {
                let mut rows = vec![
                    Row::split(
                        Span::new(&exp.job_title, PdfFont::Bold, scale.heading),
                        Span::new(
                            format!("{} - {}", exp.start_date, exp.end_date),
                            PdfFont::Regular,
                            scale.content,
                        )
                        .color(Rgb::GRAY),
                        width,
                        1.25,
                    ),
                    muted(format!("{} | {}", exp.company, exp.location), scale.content),
                ];
                for line in ctx.policy.description_lines(&exp.description) {
                    rows.extend(paragraph(
                        &format!("\u{2022} {line}"),
                        TextStyle::new(PdfFont::Regular, scale.content, 1.3),
                        BULLET_INDENT,
                        width,
                        false,
                    ));
                }
                blocks.push(entry(rows, 8.0));
            }
        }
        SectionId::Skills => {
            blocks.push(title_block(ctx, "SKILLS"));
            let spans = ctx
                .policy
                .skills(resume)
                .iter()
                .map(|skill| Span::new(format!("\u{2022} {skill}"), PdfFont::Regular, scale.content))
                .collect();
            blocks.push(Block {
                rows: grid(spans, 3, width, 1.4),
                ..Default::default()
            });
        }
        SectionId::Projects => {
            blocks.push(title_block(ctx, "PROJECTS"));
            for proj in &resume.projects {
                let mut rows = vec![Row::text(
                    Span::new(&proj.name, PdfFont::Bold, scale.heading),
                    0.0,
                    1.25,
                )];
                rows.extend(paragraph(
                    &proj.description,
                    TextStyle::new(PdfFont::Regular, scale.content, 1.3).color(Rgb::DARK),
                    0.0,
                    width,
                    false,
                ));
                if let Some(link) = present(&proj.link) {
                    rows.push(view_link(link, scale.small, 0.0));
                }
                blocks.push(entry(rows, 5.0));
            }
        }
        SectionId::Certifications => {
            blocks.push(title_block(ctx, "CERTIFICATIONS"));
            for cert in &resume.certifications {
                let mut rows = paragraph(
                    &format!("\u{2022} {} - {} ({})", cert.name, cert.authority, cert.date),
                    TextStyle::new(PdfFont::Regular, scale.content, 1.3),
                    BULLET_INDENT,
                    width,
                    false,
                );
                if let Some(link) = present(&cert.link) {
                    rows.push(view_link(link, scale.small, LINK_INDENT));
                }
                blocks.push(entry(rows, 1.5));
            }
        }
        SectionId::Awards => {
            blocks.push(title_block(ctx, "RANK ACHIEVED"));
            for award in &resume.awards {
                let mut rows = paragraph(
                    &format!("\u{2022} {}", award.name),
                    TextStyle::new(PdfFont::Regular, scale.content, 1.3),
                    BULLET_INDENT,
                    width,
                    false,
                );
                if let Some(link) = present(&award.link) {
                    rows.push(view_link(link, scale.small, LINK_INDENT));
                }
                blocks.push(entry(rows, 1.5));
            }
        }
        SectionId::Volunteer => {
            blocks.push(title_block(ctx, "VOLUNTEER EXPERIENCE"));
            for vol in &resume.volunteer_experience {
                let mut rows = vec![
                    Row::split(
                        Span::new(&vol.role, PdfFont::Bold, scale.heading),
                        Span::new(&vol.dates, PdfFont::Regular, scale.content).color(Rgb::GRAY),
                        width,
                        1.25,
                    ),
                    muted(&vol.organization, scale.content),
                ];
                if !vol.description.trim().is_empty() {
                    rows.extend(paragraph(
                        vol.description.trim(),
                        TextStyle::new(PdfFont::Regular, scale.content, 1.3),
                        0.0,
                        width,
                        false,
                    ));
                }
                blocks.push(entry(rows, 5.0));
            }
        }
        SectionId::Languages => {
            blocks.push(title_block(ctx, "LANGUAGES"));
            let rows = resume
                .languages
                .iter()
                .map(|lang| {
                    Row::spans(
                        vec![
                            Span::new(format!("{}:", lang.name), PdfFont::Bold, scale.content),
                            Span::new(format!(" {}", lang.proficiency), PdfFont::Regular, scale.content),
                        ],
                        0.0,
                        1.4,
                    )
                })
                .collect();
            blocks.push(entry(rows, 0.0));
        }
        SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore => return,
    }

    blocks.push(Block {
        rows: vec![Row::Spacer(SECTION_GAP)],
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontSize, DEFAULT_SECTION_ORDER};
    use crate::models::resume::Resume;
    use crate::render::pdf::canvas::DocumentMeta;
    use crate::render::pdf::tests::{page_text, sample_resume};
    use crate::templates::content::ContentPolicy;
    use crate::templates::ResumeTemplate;
    use chrono::Utc;

    fn render(resume: &Resume, sections: &[SectionId]) -> (String, usize) {
        let ctx = PdfContext {
            resume,
            sections,
            scale: FontSize::DEFAULT.pdf_scale(),
            policy: ContentPolicy::for_template(ResumeTemplate::Identity),
            dial_code: "+91",
        };
        let canvas = compose(&ctx);
        let pages = canvas.page_count();
        let bytes = canvas
            .finish(&DocumentMeta {
                title: "t".into(),
                author: "a".into(),
                created: Utc::now(),
            })
            .unwrap();
        (page_text(&bytes), pages)
    }

    #[test]
    fn test_header_prefixes_dial_code_and_shows_placeholder() {
        let (text, _) = render(&sample_resume(), &[]);
        assert!(text.contains("(Ph. No: +91 9876543210)"));
        assert!(text.contains("(E-Mail: jane@example.com)"));
        assert!(text.contains("(LinkedIn Profile)"));
        assert!(text.contains("(GitHub Profile)"));
        assert!(text.contains("(PHOTO)"));
    }

    #[test]
    fn test_set_photo_leaves_frame_empty() {
        let mut resume = sample_resume();
        resume.personal_info.photo = Some("https://img.example/p.jpg".into());
        let (text, _) = render(&resume, &[]);
        assert!(!text.contains("(PHOTO)"));
        assert!(text.contains(" re"));
    }

    #[test]
    fn test_caps_description_lines_and_skills() {
        let (text, _) = render(&sample_resume(), &DEFAULT_SECTION_ORDER);
        assert!(text.contains("Mentored four engineers"));
        assert!(!text.contains("Fourth line"));
        assert!(text.contains("Skill11"));
        assert!(!text.contains("Skill12"));
    }

    #[test]
    fn test_bullets_use_win_ansi_byte() {
        let resume = sample_resume();
        let ctx = PdfContext {
            resume: &resume,
            sections: &[SectionId::Skills],
            scale: FontSize::DEFAULT.pdf_scale(),
            policy: ContentPolicy::for_template(ResumeTemplate::Identity),
            dial_code: "+91",
        };
        let bytes = compose(&ctx)
            .finish(&DocumentMeta {
                title: "t".into(),
                author: "a".into(),
                created: Utc::now(),
            })
            .unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        let bullet = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok())
            .any(|bytes| bytes.starts_with(&[0x95, b' ']));
        assert!(bullet);
    }

    #[test]
    fn test_section_order_and_empty_sections() {
        let (text, _) = render(
            &sample_resume(),
            &[SectionId::Projects, SectionId::Education, SectionId::Awards],
        );
        let projects = text.find("(PROJECTS)").unwrap();
        let education = text.find("(EDUCATION)").unwrap();
        assert!(projects < education);
        assert!(!text.contains("RANK ACHIEVED"));
    }

    #[test]
    fn test_long_resume_paginates() {
        let mut resume = sample_resume();
        let template = resume.experience[0].clone();
        resume.experience = (0..40)
            .map(|i| {
                let mut e = template.clone();
                e.id = format!("ex{i}");
                e
            })
            .collect();
        let (_, pages) = render(&resume, &[SectionId::Experience]);
        assert!(pages > 1);
    }
}
