// Template catalog and selection. HTML renderers live in the submodules; the
// print flavours of the same templates live in render::pdf.

pub mod content;
pub mod handlers;
pub mod html;
pub mod identity;
pub mod modern;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::FontSize;

/// Visual layout variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Modern,
    Identity,
}

impl ResumeTemplate {
    pub const ALL: [ResumeTemplate; 2] = [ResumeTemplate::Modern, ResumeTemplate::Identity];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeTemplate::Modern => "modern",
            ResumeTemplate::Identity => "identity",
        }
    }

    pub fn info(&self) -> TemplateInfo {
        match self {
            ResumeTemplate::Modern => TemplateInfo {
                id: *self,
                name: "Modern Professional",
                description: "Clean and minimalist design for all industries",
                preview: "/template-modern.svg",
            },
            ResumeTemplate::Identity => TemplateInfo {
                id: *self,
                name: "Identity Training",
                description: "Traditional format with photo and detailed sections",
                preview: "/template-identity.svg",
            },
        }
    }
}

impl fmt::Display for ResumeTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResumeTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(ResumeTemplate::Modern),
            "identity" => Ok(ResumeTemplate::Identity),
            other => Err(anyhow::anyhow!("unknown template '{other}'")),
        }
    }
}

/// Catalog card for the template picker.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: ResumeTemplate,
    pub name: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
}

pub fn catalog() -> Vec<TemplateInfo> {
    ResumeTemplate::ALL.iter().map(|t| t.info()).collect()
}

/// The picker's current choice of template and font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    pub template: ResumeTemplate,
    pub font_size: FontSize,
}

impl TemplateSelection {
    pub fn new(template: ResumeTemplate, font_size: FontSize) -> Self {
        Self {
            template,
            font_size,
        }
    }

    pub fn select_template(&mut self, template: ResumeTemplate) {
        self.template = template;
    }

    pub fn select_font_size(&mut self, font_size: FontSize) {
        self.font_size = font_size;
    }

    pub fn is_selected(&self, template: ResumeTemplate) -> bool {
        self.template == template
    }

    /// Picks the template for one render: explicit request first, then the
    /// document's own choice, then this selection.
    pub fn resolve(
        &self,
        requested: Option<ResumeTemplate>,
        document: Option<ResumeTemplate>,
    ) -> ResumeTemplate {
        requested.or(document).unwrap_or(self.template)
    }
}

impl Default for TemplateSelection {
    fn default() -> Self {
        Self::new(ResumeTemplate::default(), FontSize::default())
    }
}
