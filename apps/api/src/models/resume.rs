use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::templates::ResumeTemplate;

/// The résumé document as sent by the editor.
///
/// Wire format is camelCase JSON. The document is owned by the client and is
/// passed in whole on every render call; nothing here mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub awards: Vec<AwardEntry>,
    pub volunteer_experience: Vec<VolunteerEntry>,
    pub languages: Vec<LanguageEntry>,
    /// Section ids suppressed in every renderer.
    pub hidden_sections: Vec<String>,
    pub template: Option<ResumeTemplate>,
    pub section_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    /// Image URL or data URI.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub location: String,
    pub graduation_date: String,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Newline separated; a leading "- " on a line is a bullet marker.
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub authority: String,
    pub date: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwardEntry {
    pub id: String,
    pub name: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerEntry {
    pub id: String,
    pub role: String,
    pub organization: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageEntry {
    pub id: String,
    pub name: String,
    pub proficiency: String,
}

impl Resume {
    /// Checks the identifier invariant: every list entry carries a non-empty id
    /// that is unique within its list.
    pub fn validate(&self) -> Result<(), AppError> {
        check_ids("education", self.education.iter().map(|e| e.id.as_str()))?;
        check_ids("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        check_ids("projects", self.projects.iter().map(|e| e.id.as_str()))?;
        check_ids(
            "certifications",
            self.certifications.iter().map(|e| e.id.as_str()),
        )?;
        check_ids("awards", self.awards.iter().map(|e| e.id.as_str()))?;
        check_ids(
            "volunteerExperience",
            self.volunteer_experience.iter().map(|e| e.id.as_str()),
        )?;
        check_ids("languages", self.languages.iter().map(|e| e.id.as_str()))?;
        Ok(())
    }

    /// Trimmed display name, `None` when blank.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.personal_info.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// `Jane Q Doe` → `Jane_Q_Doe.pdf`; blank names fall back to `resume.pdf`.
    pub fn download_file_name(&self) -> String {
        match self.display_name() {
            Some(name) => {
                let stem: Vec<&str> = name.split_whitespace().collect();
                format!("{}.pdf", stem.join("_"))
            }
            None => "resume.pdf".to_string(),
        }
    }
}

fn check_ids<'a>(list: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.enumerate() {
        if id.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "{list}[{index}] is missing an id"
            )));
        }
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "{list} contains duplicate id '{id}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_resume(name: &str) -> Resume {
        Resume {
            personal_info: PersonalInfo {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_camel_case_document() {
        let json = r#"{
            "personalInfo": { "name": "Asha Rao", "email": "asha@example.com", "phone": "9876543210" },
            "summary": "Backend engineer",
            "experience": [{
                "id": "exp-1", "jobTitle": "Engineer", "company": "Acme",
                "location": "Pune", "startDate": "2021", "endDate": "Present",
                "description": "- Built things\n- Shipped things"
            }],
            "volunteerExperience": [{ "id": "v1", "role": "Mentor", "organization": "Code Club", "dates": "2020", "description": "" }],
            "hiddenSections": ["awards"],
            "template": "identity",
            "sectionOrder": ["personal-info", "experience", "summary"]
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.personal_info.name, "Asha Rao");
        assert_eq!(resume.experience[0].job_title, "Engineer");
        assert_eq!(resume.volunteer_experience[0].role, "Mentor");
        assert_eq!(resume.hidden_sections, vec!["awards".to_string()]);
        assert_eq!(resume.template, Some(ResumeTemplate::Identity));
        assert_eq!(resume.section_order.as_ref().map(Vec::len), Some(3));
        assert!(resume.education.is_empty());
    }

    #[test]
    fn test_validate_accepts_unique_ids() {
        let mut resume = make_resume("A");
        resume.languages = vec![
            LanguageEntry {
                id: "l1".into(),
                name: "English".into(),
                proficiency: "Fluent".into(),
            },
            LanguageEntry {
                id: "l2".into(),
                name: "Hindi".into(),
                proficiency: "Native".into(),
            },
        ];
        assert!(resume.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut resume = make_resume("A");
        resume.awards = vec![
            AwardEntry {
                id: "a".into(),
                name: "First".into(),
                link: None,
            },
            AwardEntry {
                id: "a".into(),
                name: "Second".into(),
                link: None,
            },
        ];
        let err = resume.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        let mut resume = make_resume("A");
        resume.projects = vec![ProjectEntry {
            id: "  ".into(),
            name: "Folio".into(),
            ..Default::default()
        }];
        assert!(matches!(
            resume.validate(),
            Err(AppError::Validation(ref msg)) if msg.contains("projects[0]")
        ));
    }

    #[test]
    fn test_download_file_name_collapses_whitespace() {
        assert_eq!(
            make_resume("  Jane   Q Doe ").download_file_name(),
            "Jane_Q_Doe.pdf"
        );
    }

    #[test]
    fn test_download_file_name_falls_back_when_blank() {
        assert_eq!(make_resume("   ").download_file_name(), "resume.pdf");
        assert_eq!(make_resume("").display_name(), None);
    }
}
