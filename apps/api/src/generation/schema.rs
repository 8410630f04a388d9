use serde_json::{json, Value};

/// Response schema sent with every generation call, in Gemini's OpenAPI
/// subset. Mirrors `GenerationResult`: a required `versions` array whose
/// items require all four string fields.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "versions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "htmlContent": { "type": "STRING" },
                        "styleSlug": { "type": "STRING" }
                    },
                    "required": ["title", "description", "htmlContent", "styleSlug"]
                }
            }
        },
        "required": ["versions"]
    })
}
