//! PDF export: a page-flow canvas over lopdf, one layout per template, and
//! the lazily loaded toolchain that serves download requests.

pub mod canvas;
pub mod identity;
pub mod modern;
pub mod toolchain;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::layout::{FontSize, PdfTypeScale, SectionId, DEFAULT_SECTION_ORDER};
use crate::models::resume::{ExperienceEntry, PersonalInfo, Resume};
use crate::templates::content::ContentPolicy;
use crate::templates::ResumeTemplate;

use canvas::DocumentMeta;

pub use toolchain::{PdfBackend, PdfToolchain, ToolchainStatus};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF serialization failed: {0}")]
    Serialize(#[from] lopdf::Error),

    #[error("PDF engine failed to load: {0}")]
    Load(String),

    #[error("PDF render task failed: {0}")]
    Task(String),
}

/// Everything a PDF layout needs for one render pass.
pub struct PdfContext<'a> {
    pub resume: &'a Resume,
    pub sections: &'a [SectionId],
    pub scale: PdfTypeScale,
    pub policy: ContentPolicy,
    pub dial_code: &'a str,
}

/// One queued download.
#[derive(Debug, Clone)]
pub struct PdfJob {
    pub render_id: Uuid,
    pub resume: Resume,
    pub template: ResumeTemplate,
    pub sections: Vec<SectionId>,
    pub font_size: FontSize,
}

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub pages: usize,
    pub template: ResumeTemplate,
}

/// The loaded PDF engine. Loading renders a warm-up document so metric and
/// serialization problems surface at load time rather than on a user's
/// first download.
#[derive(Debug)]
pub struct PdfEngine {
    dial_code: String,
}

impl PdfEngine {
    pub fn load(dial_code: &str) -> Result<Self, PdfError> {
        let engine = PdfEngine {
            dial_code: dial_code.to_string(),
        };
        for template in ResumeTemplate::ALL {
            let job = PdfJob {
                render_id: Uuid::nil(),
                resume: warm_up_resume(),
                template,
                sections: DEFAULT_SECTION_ORDER.to_vec(),
                font_size: FontSize::DEFAULT,
            };
            let rendered = engine.render(&job)?;
            if rendered.pages == 0 || !rendered.bytes.starts_with(b"%PDF") {
                return Err(PdfError::Load(format!(
                    "warm-up render for template '{template}' produced no document"
                )));
            }
        }
        debug!("PDF engine warm-up complete");
        Ok(engine)
    }

    /// Lays out and serializes one document. CPU-bound.
    pub fn render(&self, job: &PdfJob) -> Result<RenderedPdf, PdfError> {
        let ctx = PdfContext {
            resume: &job.resume,
            sections: &job.sections,
            scale: job.font_size.pdf_scale(),
            policy: ContentPolicy::for_template(job.template),
            dial_code: &self.dial_code,
        };
        let canvas = match job.template {
            ResumeTemplate::Identity => identity::compose(&ctx),
            ResumeTemplate::Modern => modern::compose(&ctx),
        };

        let name = job.resume.display_name().unwrap_or("Resume");
        let meta = DocumentMeta {
            title: format!("{name} - Resume"),
            author: name.to_string(),
            created: Utc::now(),
        };
        let pages = canvas.page_count();
        let bytes = canvas.finish(&meta)?;

        Ok(RenderedPdf {
            bytes,
            file_name: job.resume.download_file_name(),
            pages,
            template: job.template,
        })
    }
}

fn warm_up_resume() -> Resume {
    Resume {
        personal_info: PersonalInfo {
            name: "Warm Up".into(),
            email: "warm.up@example.com".into(),
            phone: "0000000000".into(),
            linkedin: Some("linkedin.com/in/warm-up".into()),
            ..Default::default()
        },
        summary: "Sample summary used to exercise text layout.".into(),
        experience: vec![ExperienceEntry {
            id: "warm-up".into(),
            job_title: "Engineer".into(),
            company: "Example".into(),
            start_date: "2020".into(),
            end_date: "Present".into(),
            description: "- First line\n- Second line".into(),
            ..Default::default()
        }],
        skills: vec!["Rust".into(), "PDF".into()],
        ..Default::default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ProjectEntry};
    use lopdf::Document;

    pub(crate) fn sample_resume() -> Resume {
        Resume {
            personal_info: PersonalInfo {
                name: "Jane Q Doe".into(),
                email: "jane@example.com".into(),
                phone: "9876543210".into(),
                linkedin: Some("linkedin.com/in/jane".into()),
                github: Some("github.com/jane".into()),
                ..Default::default()
            },
            summary: "Platform engineer with a decade of distributed systems work.".into(),
            education: vec![EducationEntry {
                id: "ed1".into(),
                school: "State University".into(),
                degree: "B.Sc. Computer Science".into(),
                location: "Springfield".into(),
                graduation_date: "2014".into(),
                grade: Some("GPA 3.8".into()),
            }],
            experience: vec![ExperienceEntry {
                id: "ex1".into(),
                job_title: "Staff Engineer".into(),
                company: "Acme".into(),
                location: "Remote".into(),
                start_date: "2019".into(),
                end_date: "Present".into(),
                description: "- Built the billing pipeline\n- Led the storage migration\n- Mentored four engineers\n- Fourth line".into(),
            }],
            skills: (0..15).map(|i| format!("Skill{i}")).collect(),
            projects: vec![ProjectEntry {
                id: "p1".into(),
                name: "Ledger".into(),
                description: "Double-entry accounting library.".into(),
                link: Some("github.com/jane/ledger".into()),
            }],
            ..Default::default()
        }
    }

    pub(crate) fn page_text(bytes: &[u8]) -> String {
        let doc = Document::load_mem(bytes).unwrap();
        let mut text = String::new();
        for (_, page_id) in doc.get_pages() {
            let content = doc.get_page_content(page_id).unwrap();
            text.push_str(&String::from_utf8_lossy(&content));
        }
        text
    }

    fn job(template: ResumeTemplate) -> PdfJob {
        PdfJob {
            render_id: Uuid::new_v4(),
            resume: sample_resume(),
            template,
            sections: DEFAULT_SECTION_ORDER.to_vec(),
            font_size: FontSize::DEFAULT,
        }
    }

    #[test]
    fn test_engine_load_warms_up() {
        assert!(PdfEngine::load("+91").is_ok());
    }

    #[test]
    fn test_render_sets_file_name_and_info() {
        let engine = PdfEngine::load("+91").unwrap();
        let rendered = engine.render(&job(ResumeTemplate::Identity)).unwrap();
        assert_eq!(rendered.file_name, "Jane_Q_Doe.pdf");
        assert_eq!(rendered.pages, 1);

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_ref).unwrap();
        let title = info.get(b"Title").unwrap().as_str().unwrap();
        assert_eq!(title, b"Jane Q Doe - Resume");
    }

    #[test]
    fn test_render_modern_and_identity_differ() {
        let engine = PdfEngine::load("+91").unwrap();
        let identity = page_text(&engine.render(&job(ResumeTemplate::Identity)).unwrap().bytes);
        let modern = page_text(&engine.render(&job(ResumeTemplate::Modern)).unwrap().bytes);
        assert!(identity.contains("(CAREER SUMMARY)"));
        assert!(modern.contains("(Professional Summary)"));
    }
}
