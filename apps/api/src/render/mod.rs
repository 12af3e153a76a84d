//! Single entry point for turning a résumé into HTML or a PDF job.
//!
//! Both outputs go through [`plan`], so the preview and the download always
//! agree on template, font size, and section order.

pub mod handlers;
pub mod pdf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layout::{parse_hidden, resolve_section_order, FontSize, SectionId};
use crate::models::resume::Resume;
use crate::templates::content::ContentPolicy;
use crate::templates::html::{render_document, render_fragment, HtmlContext};
use crate::templates::{ResumeTemplate, TemplateSelection};

use pdf::PdfJob;

/// Per-request overrides. Anything left out falls back to the document, then
/// to the server defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub template: Option<ResumeTemplate>,
    pub section_order: Option<Vec<String>>,
    pub font_size: Option<FontSize>,
}

/// The resolved layout for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPlan {
    pub template: ResumeTemplate,
    pub font_size: FontSize,
    pub sections: Vec<SectionId>,
    pub hidden: Vec<SectionId>,
}

pub fn plan(resume: &Resume, options: &RenderOptions, defaults: &TemplateSelection) -> SectionPlan {
    let template = defaults.resolve(options.template, resume.template);
    let font_size = options.font_size.unwrap_or(defaults.font_size);

    let hidden = parse_hidden(&resume.hidden_sections);
    let requested = options
        .section_order
        .as_deref()
        .or(resume.section_order.as_deref());
    let sections = resolve_section_order(requested, &hidden);

    let mut hidden: Vec<SectionId> = hidden.into_iter().collect();
    hidden.sort_by_key(|id| id.as_str());

    SectionPlan {
        template,
        font_size,
        sections,
        hidden,
    }
}

/// Renders the preview markup. With `fragment`, only the template's root
/// element is returned; otherwise a standalone page with its stylesheet.
pub fn render_html(resume: &Resume, plan: &SectionPlan, dial_code: &str, fragment: bool) -> String {
    let ctx = HtmlContext {
        resume,
        sections: &plan.sections,
        scale: plan.font_size.html_scale(),
        policy: ContentPolicy::for_template(plan.template),
        dial_code,
    };
    let body = render_fragment(plan.template, &ctx);
    if fragment {
        return body;
    }
    let title = match resume.display_name() {
        Some(name) => format!("{name} - Resume"),
        None => "Resume".to_string(),
    };
    render_document(&title, &body, &ctx.scale)
}

pub fn pdf_job(resume: Resume, plan: SectionPlan) -> PdfJob {
    PdfJob {
        render_id: Uuid::new_v4(),
        resume,
        template: plan.template,
        sections: plan.sections,
        font_size: plan.font_size,
    }
}
