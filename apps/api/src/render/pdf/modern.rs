//! "Modern Professional" print layout: centered header, navy title-case
//! headings with a rule underneath.

use crate::layout::{PdfFont, SectionId};
use crate::render::pdf::canvas::{
    paragraph, Block, PageGeometry, PdfCanvas, Rgb, Row, Span, TextStyle,
};
use crate::render::pdf::PdfContext;
use crate::templates::content::{contact_phone, ensure_url_scheme, present, section_has_content};

const MARGIN: f32 = 40.0;
const SEPARATOR: &str = " \u{B7} ";

pub fn compose(ctx: &PdfContext<'_>) -> PdfCanvas {
    let mut canvas = PdfCanvas::new(PageGeometry::a4(MARGIN, MARGIN, MARGIN));
    let width = canvas.geometry().content_width();

    let mut blocks = vec![header_block(ctx, width)];
    for section in ctx.sections {
        if section_has_content(ctx.resume, *section) {
            section_blocks(ctx, *section, width, &mut blocks);
        }
    }
    canvas.flow(&blocks);
    canvas
}

fn header_block(ctx: &PdfContext<'_>, width: f32) -> Block {
    let info = &ctx.resume.personal_info;
    let size = ctx.scale.content;

    let mut items: Vec<Span> = Vec::new();
    let phone = contact_phone(&info.phone, ctx.dial_code, ctx.policy.prefix_dial_code);
    for text in [info.email.trim(), phone.as_str()]
        .into_iter()
        .chain(present(&info.location))
    {
        if !text.is_empty() {
            items.push(Span::new(text, PdfFont::Regular, size).color(Rgb::DARK));
        }
    }
    for (url, label) in [
        (&info.linkedin, "LinkedIn"),
        (&info.github, "GitHub"),
        (&info.website, "Website"),
    ] {
        if let Some(url) = present(url) {
            items.push(
                Span::new(label, PdfFont::Regular, size)
                    .color(Rgb::LINK)
                    .link(ensure_url_scheme(url)),
            );
        }
    }

    let mut contact = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            contact.push(Span::new(SEPARATOR, PdfFont::Regular, size).color(Rgb::GRAY));
        }
        contact.push(item);
    }

    let mut rows = vec![Row::centered(
        vec![Span::new(info.name.trim(), PdfFont::Bold, ctx.scale.name + 5.0)],
        width,
        1.3,
    )];
    if !contact.is_empty() {
        rows.push(Row::centered(contact, width, 1.5));
    }
    Block {
        rows,
        keep_together: true,
        keep_with_next: false,
        space_after: 10.0,
    }
}

fn heading_block(ctx: &PdfContext<'_>, title: &str) -> Block {
    Block {
        rows: vec![
            Row::text(
                Span::new(title, PdfFont::Bold, ctx.scale.heading + 1.0).color(Rgb::NAVY),
                0.0,
                1.3,
            ),
            Row::Rule {
                thickness: 0.75,
                color: Rgb::NAVY,
                gap: 5.0,
            },
        ],
        keep_together: true,
        keep_with_next: true,
        space_after: 2.0,
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

/// Bold title on the left, muted dates on the right.
fn title_row(ctx: &PdfContext<'_>, title: String, dates: &str, width: f32) -> Row {
    Row::split(
        Span::new(title, PdfFont::Bold, ctx.scale.content + 1.0),
        Span::new(dates, PdfFont::Regular, ctx.scale.content).color(Rgb::GRAY),
        width,
        1.35,
    )
}

fn body(ctx: &PdfContext<'_>) -> TextStyle {
    TextStyle::new(PdfFont::Regular, ctx.scale.content, 1.45)
}

fn section_blocks(ctx: &PdfContext<'_>, section: SectionId, width: f32, blocks: &mut Vec<Block>) {
    let resume = ctx.resume;
    let size = ctx.scale.content;

    match section {
        SectionId::Summary => {
            blocks.push(heading_block(ctx, "Professional Summary"));
            blocks.push(Block {
                rows: paragraph(resume.summary.trim(), body(ctx), 0.0, width, true),
                ..Default::default()
            });
        }
        SectionId::Education => {
            blocks.push(heading_block(ctx, "Education"));
            for edu in &resume.education {
                let mut line = edu.degree.clone();
                if !edu.location.trim().is_empty() {
                    line.push_str(", ");
                    line.push_str(edu.location.trim());
                }
                if let Some(grade) = present(&edu.grade) {
                    line.push_str(SEPARATOR);
                    line.push_str(grade);
                }
                let mut rows = vec![title_row(ctx, edu.school.clone(), &edu.graduation_date, width)];
                rows.extend(paragraph(&line, body(ctx), 0.0, width, false));
                blocks.push(entry(rows, 6.0));
            }
        }
        SectionId::Experience => {
            blocks.push(heading_block(ctx, "Experience"));
            for exp in &resume.experience {
                let mut rows = vec![title_row(
                    ctx,
                    format!("{}{SEPARATOR}{}", exp.job_title, exp.company),
                    &format!("{} - {}", exp.start_date, exp.end_date),
                    width,
                )];
                if !exp.location.trim().is_empty() {
                    rows.push(Row::text(
                        Span::new(exp.location.trim(), PdfFont::Oblique, size).color(Rgb::GRAY),
                        0.0,
                        1.35,
                    ));
                }
                for line in ctx.policy.description_lines(&exp.description) {
                    rows.extend(paragraph(
                        &format!("\u{2022} {line}"),
                        body(ctx),
                        10.0,
                        width,
                        false,
                    ));
                }
                blocks.push(entry(rows, 6.0));
            }
        }
        SectionId::Skills => {
            blocks.push(heading_block(ctx, "Skills"));
            let skills = ctx.policy.skills(resume).join(", ");
            blocks.push(Block {
                rows: paragraph(&skills, body(ctx), 0.0, width, false),
                ..Default::default()
            });
        }
        SectionId::Projects => {
            blocks.push(heading_block(ctx, "Projects"));
            for proj in &resume.projects {
                let mut title = vec![Span::new(&proj.name, PdfFont::Bold, size + 1.0)];
                if let Some(link) = present(&proj.link) {
                    title.push(Span::new("  ", PdfFont::Regular, size));
                    title.push(
                        Span::new("View", PdfFont::Regular, size)
                            .color(Rgb::LINK)
                            .link(ensure_url_scheme(link)),
                    );
                }
                let mut rows = vec![Row::spans(title, 0.0, 1.35)];
                rows.extend(paragraph(&proj.description, body(ctx), 0.0, width, false));
                blocks.push(entry(rows, 6.0));
            }
        }
        SectionId::Certifications => {
            blocks.push(heading_block(ctx, "Certifications"));
            for cert in &resume.certifications {
                let mut left = vec![
                    Span::new(&cert.name, PdfFont::Bold, size),
                    Span::new(format!(", {}", cert.authority), PdfFont::Regular, size),
                ];
                if let Some(link) = present(&cert.link) {
                    left.push(Span::new("  ", PdfFont::Regular, size));
                    left.push(
                        Span::new("View", PdfFont::Regular, size)
                            .color(Rgb::LINK)
                            .link(ensure_url_scheme(link)),
                    );
                }
                let row = Row::split_spans(
                    left,
                    Span::new(&cert.date, PdfFont::Regular, size).color(Rgb::GRAY),
                    width,
                    1.45,
                );
                blocks.push(entry(vec![row], 2.0));
            }
        }
        SectionId::Awards => {
            blocks.push(heading_block(ctx, "Awards"));
            for award in &resume.awards {
                let mut spans = vec![Span::new(&award.name, PdfFont::Regular, size)];
                if let Some(link) = present(&award.link) {
                    spans.push(Span::new("  ", PdfFont::Regular, size));
                    spans.push(
                        Span::new("View", PdfFont::Regular, size)
                            .color(Rgb::LINK)
                            .link(ensure_url_scheme(link)),
                    );
                }
                blocks.push(entry(vec![Row::spans(spans, 0.0, 1.45)], 2.0));
            }
        }
        SectionId::Volunteer => {
            blocks.push(heading_block(ctx, "Volunteer Experience"));
            for vol in &resume.volunteer_experience {
                let mut rows = vec![title_row(
                    ctx,
                    format!("{}{SEPARATOR}{}", vol.role, vol.organization),
                    &vol.dates,
                    width,
                )];
                if !vol.description.trim().is_empty() {
                    rows.extend(paragraph(vol.description.trim(), body(ctx), 0.0, width, false));
                }
                blocks.push(entry(rows, 6.0));
            }
        }
        SectionId::Languages => {
            blocks.push(heading_block(ctx, "Languages"));
            let mut spans = Vec::new();
            for (i, lang) in resume.languages.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::new(", ", PdfFont::Regular, size));
                }
                spans.push(Span::new(&lang.name, PdfFont::Bold, size));
                spans.push(Span::new(format!(" ({})", lang.proficiency), PdfFont::Regular, size));
            }
            blocks.push(entry(vec![Row::spans(spans, 0.0, 1.45)], 0.0));
        }
        SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore => return,
    }

    blocks.push(Block {
        rows: vec![Row::Spacer(8.0)],
        ..Default::default()
    });
}
