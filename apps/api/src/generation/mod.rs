// CV generation: prompt construction, response schema, provider client.
// All provider calls go through llm_client; nothing here talks to Gemini directly.

pub mod client;
pub mod prompts;
pub mod request;
pub mod schema;
