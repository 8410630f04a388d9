//! Optional shape checks over the entered CV.
//!
//! Advisory only: warnings are reported to the front-end and never block
//! navigation or submit.

use serde::{Deserialize, Serialize};

use crate::models::cv::CvData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    /// Dotted path of the field, e.g. `personal.email` or `experience.<id>.role`.
    pub field: String,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub passed: bool,
    pub warnings: Vec<FieldWarning>,
}

/// Email shape: one `@`, non-empty local part, a dot in the domain that is
/// neither first nor last, no whitespace.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// URL shape: optional http(s) scheme, then a host with a dot, no whitespace.
pub fn looks_like_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value);
    let host = rest.split('/').next().unwrap_or_default();
    host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

pub fn validate_cv(cv: &CvData) -> ValidationReport {
    let mut warnings = Vec::new();
    let personal = &cv.personal;

    if personal.full_name.trim().is_empty() {
        warnings.push(FieldWarning {
            field: "personal.fullName".to_string(),
            reason: "Full name is empty".to_string(),
            suggestion: "Add your name; the CV header shows a placeholder otherwise".to_string(),
        });
    }

    if !personal.email.trim().is_empty() && !looks_like_email(&personal.email) {
        warnings.push(FieldWarning {
            field: "personal.email".to_string(),
            reason: format!("'{}' does not look like an email address", personal.email),
            suggestion: "Use the form name@example.com".to_string(),
        });
    }

    for (field, value) in [
        ("personal.linkedin", &personal.linkedin),
        ("personal.website", &personal.website),
    ] {
        if !value.trim().is_empty() && !looks_like_url(value) {
            warnings.push(FieldWarning {
                field: field.to_string(),
                reason: format!("'{value}' does not look like a web address"),
                suggestion: "Use a full address such as https://example.com".to_string(),
            });
        }
    }

    // Partially filled entries are the common slip; fully empty ones are fine.
    for entry in &cv.experience {
        let filled = [&entry.company, &entry.role, &entry.start_date, &entry.end_date, &entry.description]
            .iter()
            .any(|v| !v.trim().is_empty());
        if !filled {
            continue;
        }
        for (name, value) in [("company", &entry.company), ("role", &entry.role)] {
            if value.trim().is_empty() {
                warnings.push(FieldWarning {
                    field: format!("experience.{}.{}", entry.id, name),
                    reason: format!("Experience entry has no {name}"),
                    suggestion: format!("Fill in the {name} or remove the entry"),
                });
            }
        }
    }

    for entry in &cv.education {
        let filled = [&entry.school, &entry.degree, &entry.year]
            .iter()
            .any(|v| !v.trim().is_empty());
        if filled && entry.school.trim().is_empty() {
            warnings.push(FieldWarning {
                field: format!("education.{}.school", entry.id),
                reason: "Education entry has no institution".to_string(),
                suggestion: "Fill in the institution or remove the entry".to_string(),
            });
        }
    }

    ValidationReport {
        passed: warnings.is_empty(),
        warnings,
    }
}
