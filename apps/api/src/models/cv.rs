//! CV data model: everything the user enters across the wizard steps.
//!
//! `CvData` is only mutated through the operations defined here. The
//! experience and education lists never drop below one entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
}

impl PersonalInfo {
    pub fn set(&mut self, field: PersonalField, value: String) {
        let slot = match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Website => &mut self.website,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    /// Free text; may carry user-authored bullet lines.
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Role,
    StartDate,
    EndDate,
    Description,
}

impl ExperienceEntry {
    fn empty(id: String) -> Self {
        Self {
            id,
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        let slot = match field {
            ExperienceField::Company => &mut self.company,
            ExperienceField::Role => &mut self.role,
            ExperienceField::StartDate => &mut self.start_date,
            ExperienceField::EndDate => &mut self.end_date,
            ExperienceField::Description => &mut self.description,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    School,
    Degree,
    Year,
}

impl EducationEntry {
    fn empty(id: String) -> Self {
        Self {
            id,
            school: String::new(),
            degree: String::new(),
            year: String::new(),
        }
    }

    fn set(&mut self, field: EducationField, value: String) {
        let slot = match field {
            EducationField::School => &mut self.school,
            EducationField::Degree => &mut self.degree,
            EducationField::Year => &mut self.year,
        };
        *slot = value;
    }
}

/// The four comma-delimited list inputs on the education & extras step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelimitedList {
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl DelimitedList {
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            "certifications" => Some(Self::Certifications),
            "languages" => Some(Self::Languages),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvData {
    pub personal: PersonalInfo,
    pub about_me: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub references: String,
}

impl Default for CvData {
    fn default() -> Self {
        Self {
            personal: PersonalInfo::default(),
            about_me: String::new(),
            experience: vec![ExperienceEntry::empty("1".to_string())],
            education: vec![EducationEntry::empty("1".to_string())],
            skills: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            references: String::new(),
        }
    }
}

impl CvData {
    /// Appends an empty experience entry and returns its id.
    pub fn add_experience(&mut self) -> String {
        let id = fresh_id();
        self.experience.push(ExperienceEntry::empty(id.clone()));
        id
    }

    /// Removes the entry with `id`. No-op when it is the last one left or
    /// when no entry carries that id. Returns whether anything was removed.
    pub fn remove_experience(&mut self, id: &str) -> bool {
        remove_guarded(&mut self.experience, |e| e.id == id)
    }

    /// Returns false when no entry has `id`.
    pub fn update_experience(&mut self, id: &str, field: ExperienceField, value: String) -> bool {
        match self.experience.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn add_education(&mut self) -> String {
        let id = fresh_id();
        self.education.push(EducationEntry::empty(id.clone()));
        id
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        remove_guarded(&mut self.education, |e| e.id == id)
    }

    pub fn update_education(&mut self, id: &str, field: EducationField, value: String) -> bool {
        match self.education.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Overwrites the named list with the split form of `raw`.
    pub fn set_delimited_list(&mut self, which: DelimitedList, raw: &str) {
        let items = split_delimited(raw);
        match which {
            DelimitedList::Skills => self.skills = items,
            DelimitedList::Projects => self.projects = items,
            DelimitedList::Certifications => self.certifications = items,
            DelimitedList::Languages => self.languages = items,
        }
    }

    pub fn list(&self, which: DelimitedList) -> &[String] {
        match which {
            DelimitedList::Skills => &self.skills,
            DelimitedList::Projects => &self.projects,
            DelimitedList::Certifications => &self.certifications,
            DelimitedList::Languages => &self.languages,
        }
    }
}

/// Splits on `,` and trims each piece. Empty pieces are kept, so `"a,,b"`
/// gives three items and a trailing comma gives a trailing `""`.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

fn remove_guarded<T>(entries: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    if entries.len() <= 1 {
        return false;
    }
    match entries.iter().position(matches) {
        Some(pos) => {
            entries.remove(pos);
            true
        }
        None => false,
    }
}

// Ids only need to be unique within one list at a time; a v4 uuid is enough.
fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}
