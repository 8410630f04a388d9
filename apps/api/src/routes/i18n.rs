use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::i18n::{lookup, translations, Language};

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Dotted key such as `placeholders.email`.
    pub key: Option<String>,
}

/// GET /api/v1/i18n/:lang
/// Returns the whole table, or a single string when `?key=` is given.
pub async fn handle_get_translations(
    Path(lang): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Value>, AppError> {
    let language = Language::from_code(&lang)
        .ok_or_else(|| AppError::Validation(format!("Unsupported language '{lang}'. Use EN or TR")))?;

    match query.key {
        Some(key) => {
            let value = lookup(language, &key)
                .ok_or_else(|| AppError::NotFound(format!("No string for key '{key}'")))?;
            Ok(Json(json!({ "key": key, "value": value })))
        }
        None => {
            let table = serde_json::to_value(translations(language))
                .map_err(|e| AppError::Internal(e.into()))?;
            Ok(Json(table))
        }
    }
}
