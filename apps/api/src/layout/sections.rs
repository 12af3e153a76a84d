//! Section policy — which résumé blocks render, and in what order.
//!
//! Both the HTML and the PDF renderers consume the plan produced here, so the
//! two presentations cannot drift apart on ordering or visibility.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Section vocabulary
// ────────────────────────────────────────────────────────────────────────────

/// Every section id the editor knows about.
///
/// `PersonalInfo`, `JobDescription` and `AtsScore` are editor panels: they may
/// appear in a section order but never render as a body section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    PersonalInfo,
    JobDescription,
    AtsScore,
    Summary,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Awards,
    #[serde(alias = "volunteerExperience")]
    Volunteer,
    Languages,
}

/// Body order used when the caller does not supply one.
pub const DEFAULT_SECTION_ORDER: [SectionId; 9] = [
    SectionId::Summary,
    SectionId::Education,
    SectionId::Experience,
    SectionId::Skills,
    SectionId::Projects,
    SectionId::Certifications,
    SectionId::Awards,
    SectionId::Volunteer,
    SectionId::Languages,
];

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::PersonalInfo => "personal-info",
            SectionId::JobDescription => "job-description",
            SectionId::AtsScore => "ats-score",
            SectionId::Summary => "summary",
            SectionId::Education => "education",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Certifications => "certifications",
            SectionId::Awards => "awards",
            SectionId::Volunteer => "volunteer",
            SectionId::Languages => "languages",
        }
    }

    /// True for ids that render as a block in the résumé body.
    pub fn is_body(&self) -> bool {
        !matches!(
            self,
            SectionId::PersonalInfo | SectionId::JobDescription | SectionId::AtsScore
        )
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section id '{}'", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s.trim() {
            "personal-info" | "personalInfo" => SectionId::PersonalInfo,
            "job-description" => SectionId::JobDescription,
            "ats-score" => SectionId::AtsScore,
            "summary" => SectionId::Summary,
            "education" => SectionId::Education,
            "experience" => SectionId::Experience,
            "skills" => SectionId::Skills,
            "projects" => SectionId::Projects,
            "certifications" => SectionId::Certifications,
            "awards" => SectionId::Awards,
            "volunteer" | "volunteerExperience" => SectionId::Volunteer,
            "languages" => SectionId::Languages,
            other => return Err(UnknownSection(other.to_string())),
        };
        Ok(id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plan resolution
// ────────────────────────────────────────────────────────────────────────────

/// Parses a set of hidden-section ids, ignoring anything outside the vocabulary.
pub fn parse_hidden(hidden: &[String]) -> HashSet<SectionId> {
    hidden.iter().filter_map(|s| s.parse().ok()).collect()
}

/// Resolves the ordered list of body sections to render.
///
/// - no requested order → [`DEFAULT_SECTION_ORDER`]
/// - unknown ids are skipped, editor-only ids removed, duplicates collapse to
///   their first occurrence
/// - a requested order naming no body section falls back to the default
/// - hidden sections are removed in every case
pub fn resolve_section_order(
    requested: Option<&[String]>,
    hidden: &HashSet<SectionId>,
) -> Vec<SectionId> {
    let mut order: Vec<SectionId> = Vec::new();

    if let Some(requested) = requested {
        for raw in requested {
            match raw.parse::<SectionId>() {
                Ok(id) if id.is_body() && !order.contains(&id) => order.push(id),
                Ok(_) => {}
                Err(e) => debug!("Ignoring section order entry: {e}"),
            }
        }
    }

    if order.is_empty() {
        order = DEFAULT_SECTION_ORDER.to_vec();
    }

    order.retain(|id| !hidden.contains(id));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_order_when_none_requested() {
        let order = resolve_section_order(None, &HashSet::new());
        assert_eq!(order, DEFAULT_SECTION_ORDER.to_vec());
    }

    #[test]
    fn test_fixed_ids_always_excluded() {
        let requested = strings(&["personal-info", "skills", "job-description", "summary"]);
        let order = resolve_section_order(Some(&requested), &HashSet::new());
        assert_eq!(order, vec![SectionId::Skills, SectionId::Summary]);
    }

    #[test]
    fn test_hidden_sections_removed_from_requested_order() {
        let requested = strings(&["education", "skills", "awards"]);
        let hidden = parse_hidden(&strings(&["skills"]));
        let order = resolve_section_order(Some(&requested), &hidden);
        assert_eq!(order, vec![SectionId::Education, SectionId::Awards]);
    }

    #[test]
    fn test_hidden_sections_removed_from_default_order() {
        let hidden = parse_hidden(&strings(&["summary", "languages"]));
        let order = resolve_section_order(None, &hidden);
        assert_eq!(order.len(), DEFAULT_SECTION_ORDER.len() - 2);
        assert!(!order.contains(&SectionId::Summary));
        assert!(!order.contains(&SectionId::Languages));
    }

    #[test]
    fn test_unknown_and_duplicate_ids_skipped() {
        let requested = strings(&["projects", "hobbies", "projects", "summary"]);
        let order = resolve_section_order(Some(&requested), &HashSet::new());
        assert_eq!(order, vec![SectionId::Projects, SectionId::Summary]);
    }

    #[test]
    fn test_volunteer_alias_accepted() {
        let requested = strings(&["volunteerExperience"]);
        let order = resolve_section_order(Some(&requested), &HashSet::new());
        assert_eq!(order, vec![SectionId::Volunteer]);
    }

    #[test]
    fn test_order_with_only_fixed_ids_falls_back_to_default() {
        let requested = strings(&["personal-info", "job-description"]);
        let hidden = parse_hidden(&strings(&["awards"]));
        let order = resolve_section_order(Some(&requested), &hidden);
        assert_eq!(order.len(), DEFAULT_SECTION_ORDER.len() - 1);
        assert_eq!(order[0], SectionId::Summary);
    }

    #[test]
    fn test_everything_hidden_yields_empty_plan() {
        let all: Vec<String> = DEFAULT_SECTION_ORDER
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        let hidden = parse_hidden(&all);
        assert!(resolve_section_order(Some(&all), &hidden).is_empty());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SectionId::PersonalInfo).unwrap();
        assert_eq!(json, "\"personal-info\"");
        let parsed: SectionId = serde_json::from_str("\"volunteerExperience\"").unwrap();
        assert_eq!(parsed, SectionId::Volunteer);
    }
}
