// Cross-cutting prompt fragments shared by every caller of llm_client.
// Task-specific prompts live next to the service that uses them.

/// Appended to system prompts that expect a JSON object back.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Writing-quality rules applied to every rewrite of user content.
pub const IMPACT_INSTRUCTION: &str = "\
    Use measurable achievements and metrics where possible. \
    If the user provided vague descriptions, estimate realistic impact metrics \
    (e.g., \"Increased efficiency by 20%\"). \
    Eliminate weak phrasing. Keep a professional tone. No fluff. Clear bullet points.";
