//! Generation request builder: turns a CV snapshot into the provider prompt.
//!
//! Pure: reads `CvData`, never mutates it. Every field of the CV appears in
//! the rendered prompt.

use serde::Serialize;
use serde_json::Value;

use crate::generation::prompts::{
    style_list, GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM_TEMPLATE,
};
use crate::generation::schema::response_schema;
use crate::i18n::Language;
use crate::llm_client::prompts::{IMPACT_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::models::cv::{CvData, DelimitedList};

/// Everything one provider call needs. Built fresh on every submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub language: Language,
    pub system_instruction: String,
    pub prompt: String,
    pub response_schema: Value,
}

pub fn build_generation_request(cv: &CvData, language: Language) -> GenerationRequest {
    GenerationRequest {
        language,
        system_instruction: build_system_instruction(language),
        prompt: build_prompt(cv),
        response_schema: response_schema(),
    }
}

fn build_system_instruction(language: Language) -> String {
    let styles = style_list();
    fill_template(
        GENERATION_SYSTEM_TEMPLATE,
        &[
            ("output_language", language.output_language_name()),
            ("impact_instruction", IMPACT_INSTRUCTION),
            ("style_list", styles.as_str()),
            ("json_only", JSON_ONLY_SYSTEM),
        ],
    )
}

fn build_prompt(cv: &CvData) -> String {
    let personal = compact_json(&cv.personal);
    let experience = compact_json(&cv.experience);
    let education = compact_json(&cv.education);
    let skills = cv.list(DelimitedList::Skills).join(", ");
    let projects = cv.list(DelimitedList::Projects).join(", ");
    let certifications = cv.list(DelimitedList::Certifications).join(", ");
    let languages = cv.list(DelimitedList::Languages).join(", ");

    fill_template(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("personal", personal.as_str()),
            ("summary", cv.about_me.as_str()),
            ("experience", experience.as_str()),
            ("education", education.as_str()),
            ("skills", skills.as_str()),
            ("projects", projects.as_str()),
            ("certifications", certifications.as_str()),
            ("languages", languages.as_str()),
            ("references", cv.references.as_str()),
        ],
    )
}

/// Single-pass `{key}` substitution. Substituted values are never rescanned,
/// so user text that happens to contain `{...}` is copied verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

// These types hold only strings and vectors of strings, so serialization cannot fail.
fn compact_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{DelimitedList, EducationField, ExperienceField, PersonalField};

    fn populated_cv() -> CvData {
        let mut cv = CvData::default();
        cv.personal.set(PersonalField::FullName, "Ada Lovelace".to_string());
        cv.personal.set(PersonalField::Email, "ada@example.com".to_string());
        cv.personal.set(PersonalField::Linkedin, "linkedin.com/in/ada".to_string());
        cv.about_me = "Analyst of engines".to_string();
        cv.update_experience("1", ExperienceField::Company, "Acme".to_string());
        cv.update_experience("1", ExperienceField::Description, "- Built the engine".to_string());
        cv.update_education("1", EducationField::School, "Cambridge".to_string());
        cv.set_delimited_list(DelimitedList::Skills, "Math, Poetry");
        cv.set_delimited_list(DelimitedList::Projects, "Note G");
        cv.set_delimited_list(DelimitedList::Certifications, "Royal Society");
        cv.set_delimited_list(DelimitedList::Languages, "English, French");
        cv.references = "Charles Babbage".to_string();
        cv
    }

    #[test]
    fn test_prompt_contains_every_populated_field() {
        let cv = populated_cv();
        let request = build_generation_request(&cv, Language::En);
        for needle in [
            "Ada Lovelace",
            "ada@example.com",
            "linkedin.com/in/ada",
            "Summary: Analyst of engines",
            "\"company\":\"Acme\"",
            "- Built the engine",
            "\"school\":\"Cambridge\"",
            "Skills: Math, Poetry",
            "Projects: Note G",
            "Certs: Royal Society",
            "Languages: English, French",
            "References: Charles Babbage",
        ] {
            assert!(request.prompt.contains(needle), "prompt is missing {needle:?}");
        }
    }

    #[test]
    fn test_builder_does_not_mutate_and_is_deterministic() {
        let cv = populated_cv();
        let snapshot = cv.clone();
        let first = build_generation_request(&cv, Language::Tr);
        let second = build_generation_request(&cv, Language::Tr);
        assert_eq!(cv, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_system_instruction_names_all_styles_and_language() {
        let request = build_generation_request(&CvData::default(), Language::Tr);
        for style in [
            "Corporate Professional",
            "Startup / Tech Focused",
            "Minimal & Direct",
            "Creative & Storytelling",
            "Executive Level",
            "International English Optimized",
            "ATS-Optimized Version",
        ] {
            assert!(request.system_instruction.contains(style));
        }
        assert!(request.system_instruction.contains("maximize hiring impact in Turkish"));
        assert!(request.system_instruction.contains("\"versions\""));
        assert!(request.system_instruction.contains("styleSlug"));
        assert_eq!(request.language, Language::Tr);
    }

    #[test]
    fn test_empty_lists_render_as_empty_values() {
        let request = build_generation_request(&CvData::default(), Language::En);
        assert!(request.prompt.contains("Skills: \n"));
        assert!(request.prompt.contains("\"id\":\"1\""));
    }

    #[test]
    fn test_fill_template_leaves_unknown_keys() {
        let out = fill_template("a {x} {y} {", &[("x", "1")]);
        assert_eq!(out, "a 1 {y} {");
    }

    #[test]
    fn test_user_text_with_placeholder_is_not_expanded() {
        let mut cv = CvData::default();
        cv.about_me = "I love {references}".to_string();
        cv.references = "See {summary}".to_string();
        let request = build_generation_request(&cv, Language::En);
        assert!(request.prompt.contains("Summary: I love {references}"));
        assert!(request.prompt.contains("References: See {summary}"));
    }
}
