//! Per-section content rules shared by the HTML and PDF flavours of a template.

use crate::layout::SectionId;
use crate::models::resume::Resume;
use crate::templates::ResumeTemplate;

/// Caps applied to list content for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentPolicy {
    /// Maximum number of skills shown; `None` shows all.
    pub skills_limit: Option<usize>,
    /// Maximum description lines per experience entry; `None` shows all.
    pub description_line_limit: Option<usize>,
    /// Prefix the dial code onto bare phone numbers.
    pub prefix_dial_code: bool,
}

impl ContentPolicy {
    pub fn for_template(template: ResumeTemplate) -> Self {
        match template {
            ResumeTemplate::Identity => ContentPolicy {
                skills_limit: Some(12),
                description_line_limit: Some(3),
                prefix_dial_code: true,
            },
            ResumeTemplate::Modern => ContentPolicy {
                skills_limit: None,
                description_line_limit: None,
                prefix_dial_code: false,
            },
        }
    }

    pub fn skills<'a>(&self, resume: &'a Resume) -> &'a [String] {
        let skills = resume.skills.as_slice();
        match self.skills_limit {
            Some(limit) => &skills[..skills.len().min(limit)],
            None => skills,
        }
    }

    pub fn description_lines<'a>(&self, description: &'a str) -> Vec<&'a str> {
        description_lines(description, self.description_line_limit)
    }
}

/// Adds `https://` to links typed without a scheme. Empty stays empty.
pub fn ensure_url_scheme(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Splits an experience description into display lines: blank lines are
/// dropped and a leading "- " marker is stripped.
pub fn description_lines(description: &str, limit: Option<usize>) -> Vec<&str> {
    let lines = description
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.strip_prefix("- ").unwrap_or(line).trim_end());
    match limit {
        Some(limit) => lines.take(limit).collect(),
        None => lines.collect(),
    }
}

/// Phone as printed in a header. Numbers that already carry a `+` country
/// code are left alone.
pub fn contact_phone(phone: &str, dial_code: &str, prefix: bool) -> String {
    let phone = phone.trim();
    if !prefix || phone.is_empty() || phone.starts_with('+') || dial_code.is_empty() {
        phone.to_string()
    } else {
        format!("{dial_code} {phone}")
    }
}

/// Returns a non-blank optional field.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// True when the section has anything to show. Empty sections are skipped by
/// every renderer rather than printing a bare heading.
pub fn section_has_content(resume: &Resume, section: SectionId) -> bool {
    match section {
        SectionId::Summary => !resume.summary.trim().is_empty(),
        SectionId::Education => !resume.education.is_empty(),
        SectionId::Experience => !resume.experience.is_empty(),
        SectionId::Skills => !resume.skills.is_empty(),
        SectionId::Projects => !resume.projects.is_empty(),
        SectionId::Certifications => !resume.certifications.is_empty(),
        SectionId::Awards => !resume.awards.is_empty(),
        SectionId::Volunteer => !resume.volunteer_experience.is_empty(),
        SectionId::Languages => !resume.languages.is_empty(),
        SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore => false,
    }
}
