// All LLM prompt text for CV generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// The seven style archetypes, in the order the model is asked to produce them.
/// `(title, guidance)`.
pub const STYLE_ARCHETYPES: [(&str, &str); 7] = [
    (
        "Corporate Professional",
        "Traditional, polished, formal language",
    ),
    (
        "Startup / Tech Focused",
        "Action-oriented, focuses on tools and agility",
    ),
    (
        "Minimal & Direct",
        "Extremely concise, high-impact keywords only",
    ),
    (
        "Creative & Storytelling",
        "Narrative approach to professional growth",
    ),
    (
        "Executive Level",
        "Focus on leadership, strategy, and business outcomes",
    ),
    (
        "International English Optimized",
        "Neutral global standards, clean phrasing",
    ),
    (
        "ATS-Optimized Version",
        "Keyword dense, simple structure for machines",
    ),
];

/// System instruction template.
/// Replace: {output_language}, {impact_instruction}, {style_list}, {json_only}
pub const GENERATION_SYSTEM_TEMPLATE: &str = r#"You are an elite CV strategist and recruiter.
Rewrite the user's content to maximize hiring impact in {output_language}.
{impact_instruction}

You must generate 7 different CV versions:
{style_list}

Return a JSON object with an array called "versions". Each version should have:
- title: The name of the style
- description: A short 1-sentence explanation of why this style works.
- htmlContent: A complete, self-contained HTML block (no <html> or <body> tags, just the inner content) for the CV sections. Use semantic tags like <h3> for sections, <ul> and <li> for points. Use tailwind-like classes where appropriate for typography (e.g., text-xl, font-bold).
- styleSlug: A simple identifier (e.g. "corporate", "startup").

{json_only}"#;

/// User prompt template carrying the serialized CV.
/// Replace: {personal}, {summary}, {experience}, {education}, {skills},
///          {projects}, {certifications}, {languages}, {references}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Input Data:
Personal: {personal}
Summary: {summary}
Experience: {experience}
Education: {education}
Skills: {skills}
Projects: {projects}
Certs: {certifications}
Languages: {languages}
References: {references}

Generate the 7 styles now. Output MUST be valid JSON."#;

/// Renders the numbered archetype list embedded in the system instruction.
pub fn style_list() -> String {
    STYLE_ARCHETYPES
        .iter()
        .enumerate()
        .map(|(i, (title, guidance))| format!("{}. {} ({})", i + 1, title, guidance))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_list_numbers_all_archetypes() {
        let list = style_list();
        assert_eq!(list.lines().count(), 7);
        assert!(list.starts_with("1. Corporate Professional ("));
        assert!(list.contains("7. ATS-Optimized Version (Keyword dense"));
    }
}
