//! Axum route handlers for the wizard session API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::cv::{CvData, DelimitedList, EducationField, ExperienceField, PersonalField};
use crate::presenter::{build_result_view, copy_text, printable_document, ResultView};
use crate::sessions::{Session, SessionHandle};
use crate::state::AppState;
use crate::wizard::controller::{SubmitOutcome, Theme, WizardStep};
use crate::wizard::validation::{validate_cv, ValidationReport};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Snapshot of one session as the front-end renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub step: WizardStep,
    pub form_position: Option<u8>,
    pub language: Language,
    pub theme: Theme,
    pub is_generating: bool,
    pub cv: CvData,
    pub version_count: Option<usize>,
    pub selected_version_index: Option<usize>,
    /// Failure notice, delivered in exactly one response.
    pub notice: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub step: WizardStep,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesRequest {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    /// Flips the current theme; applied after `theme`.
    #[serde(default)]
    pub toggle_theme: bool,
}

#[derive(Debug, Deserialize)]
pub struct PersonalFieldRequest {
    pub field: PersonalField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceFieldRequest {
    pub field: ExperienceField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EducationFieldRequest {
    pub field: EducationField,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCreatedResponse {
    pub entry_id: String,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn load_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// Builds the view, handing over any pending notice.
fn session_view(id: Uuid, session: &mut Session) -> SessionView {
    let wizard = &mut session.wizard;
    let notice = wizard.take_notice();
    SessionView {
        id,
        step: wizard.step(),
        form_position: wizard.step().form_position(),
        language: wizard.language(),
        theme: wizard.theme(),
        is_generating: wizard.is_generating(),
        cv: wizard.cv().clone(),
        version_count: wizard.result().map(|r| r.len()),
        selected_version_index: wizard.selected_version(),
        notice,
        created_at: session.created_at,
        last_active: session.last_active,
    }
}

/// Runs `mutate` on the session under its lock and returns the fresh view.
async fn mutate_session<F>(state: &AppState, id: Uuid, mutate: F) -> Result<Json<SessionView>, AppError>
where
    F: FnOnce(&mut Session) -> Result<(), AppError>,
{
    let handle = load_session(state, id).await?;
    let mut session = handle.lock().await;
    mutate(&mut session)?;
    session.touch();
    Ok(Json(session_view(id, &mut session)))
}

fn has_experience(session: &Session, entry: &str) -> Result<(), AppError> {
    if session.wizard.cv().experience.iter().any(|e| e.id == entry) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Experience entry {entry} not found")))
    }
}

fn has_education(session: &Session, entry: &str) -> Result<(), AppError> {
    if session.wizard.cv().education.iter().any(|e| e.id == entry) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Education entry {entry} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let (id, handle) = state.sessions.create().await;
    let mut session = handle.lock().await;
    (StatusCode::CREATED, Json(session_view(id, &mut session)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |_| Ok(())).await
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation & preferences
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/step
pub async fn handle_go_to_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StepRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.go_to_step(req.step);
        Ok(())
    })
    .await
}

/// POST /api/v1/sessions/:id/back-to-edit
pub async fn handle_back_to_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.back_to_edit();
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/preferences
pub async fn handle_set_preferences(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PreferencesRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        if let Some(language) = req.language {
            s.wizard.set_language(language);
        }
        if let Some(theme) = req.theme {
            s.wizard.set_theme(theme);
        }
        if req.toggle_theme {
            s.wizard.toggle_theme();
        }
        Ok(())
    })
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Field updates
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PersonalFieldRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.update_personal_field(req.field, req.value);
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/about
pub async fn handle_set_about(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.set_about_me(req.value);
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/references
pub async fn handle_set_references(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.set_references(req.value);
        Ok(())
    })
    .await
}

/// POST /api/v1/sessions/:id/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EntryCreatedResponse>), AppError> {
    let handle = load_session(&state, id).await?;
    let mut session = handle.lock().await;
    let entry_id = session.wizard.add_experience();
    session.touch();
    Ok((
        StatusCode::CREATED,
        Json(EntryCreatedResponse {
            entry_id,
            session: session_view(id, &mut session),
        }),
    ))
}

/// PATCH /api/v1/sessions/:id/experience/:entry
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((id, entry)): Path<(Uuid, String)>,
    Json(req): Json<ExperienceFieldRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        has_experience(s, &entry)?;
        s.wizard.update_experience_field(&entry, req.field, req.value);
        Ok(())
    })
    .await
}

/// DELETE /api/v1/sessions/:id/experience/:entry
///
/// Removing the last remaining entry is accepted and changes nothing.
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path((id, entry)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        has_experience(s, &entry)?;
        if !s.wizard.remove_experience(&entry) {
            debug!("Kept experience entry {entry}: it is the only one left");
        }
        Ok(())
    })
    .await
}

/// POST /api/v1/sessions/:id/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<EntryCreatedResponse>), AppError> {
    let handle = load_session(&state, id).await?;
    let mut session = handle.lock().await;
    let entry_id = session.wizard.add_education();
    session.touch();
    Ok((
        StatusCode::CREATED,
        Json(EntryCreatedResponse {
            entry_id,
            session: session_view(id, &mut session),
        }),
    ))
}

/// PATCH /api/v1/sessions/:id/education/:entry
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path((id, entry)): Path<(Uuid, String)>,
    Json(req): Json<EducationFieldRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        has_education(s, &entry)?;
        s.wizard.update_education_field(&entry, req.field, req.value);
        Ok(())
    })
    .await
}

/// DELETE /api/v1/sessions/:id/education/:entry
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path((id, entry)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        has_education(s, &entry)?;
        if !s.wizard.remove_education(&entry) {
            debug!("Kept education entry {entry}: it is the only one left");
        }
        Ok(())
    })
    .await
}

/// PUT /api/v1/sessions/:id/lists/:list
pub async fn handle_set_list(
    State(state): State<AppState>,
    Path((id, list)): Path<(Uuid, String)>,
    Json(req): Json<ListRequest>,
) -> Result<Json<SessionView>, AppError> {
    let which = DelimitedList::from_path(&list).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown list '{list}'. Expected skills, projects, certifications or languages"
        ))
    })?;
    mutate_session(&state, id, |s| {
        s.wizard.set_delimited_list(which, &req.raw);
        Ok(())
    })
    .await
}

/// GET /api/v1/sessions/:id/warnings
pub async fn handle_get_warnings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ValidationReport>, AppError> {
    let handle = load_session(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(validate_cv(session.wizard.cv())))
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/submit
///
/// Waits for the provider. The session lock is released during the call so
/// the session stays readable; a second submit meanwhile is a no-op. The
/// call runs on its own task so a dropped connection cannot leave the
/// session stuck in the generating state.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let handle = load_session(&state, id).await?;

    let request = {
        let mut session = handle.lock().await;
        session.touch();
        match session.wizard.begin_submit() {
            Some(request) => request,
            None => {
                return Ok(Json(SubmitResponse {
                    outcome: SubmitOutcome::AlreadyGenerating,
                    session: session_view(id, &mut session),
                }))
            }
        }
    };

    info!("Session {id}: generation started");

    let generator = state.generator.clone();
    let sessions = state.sessions.clone();
    let task_handle = handle.clone();
    let task = tokio::spawn(async move {
        let outcome = generator.generate(&request).await;
        if !sessions.contains(id).await {
            debug!("Session {id} ended during generation; dropping the response");
            return None;
        }
        let mut session = task_handle.lock().await;
        session.touch();
        Some(session.wizard.finish_submit(outcome))
    });

    let finished = task
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Generation task failed: {e}")))?;

    let Some(outcome) = finished else {
        return Err(AppError::NotFound(format!("Session {id} ended during generation")));
    };

    let mut session = handle.lock().await;
    Ok(Json(SubmitResponse {
        outcome,
        session: session_view(id, &mut session),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/selection
///
/// Out-of-range indices are ignored; the view shows the unchanged selection.
pub async fn handle_select_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SessionView>, AppError> {
    mutate_session(&state, id, |s| {
        s.wizard.select_version(req.index);
        Ok(())
    })
    .await
}

/// GET /api/v1/sessions/:id/result
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultView>, AppError> {
    let handle = load_session(&state, id).await?;
    let session = handle.lock().await;
    let wizard = &session.wizard;
    let result = wizard
        .result()
        .ok_or_else(|| AppError::NotFound(format!("Session {id} has no generated CVs yet")))?;

    Ok(Json(build_result_view(
        result,
        wizard.selected_version(),
        &wizard.cv().personal,
        state.config.html_policy,
    )))
}

/// GET /api/v1/sessions/:id/result/text
pub async fn handle_copy_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = load_session(&state, id).await?;
    let session = handle.lock().await;
    let wizard = &session.wizard;
    let version = wizard
        .selected_version()
        .and_then(|i| wizard.result().and_then(|r| r.get(i)))
        .ok_or_else(|| AppError::NotFound(format!("Session {id} has no selected CV")))?;

    let text = copy_text(version, &wizard.cv().personal);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// GET /api/v1/sessions/:id/result/document
pub async fn handle_printable_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let handle = load_session(&state, id).await?;
    let session = handle.lock().await;
    let wizard = &session.wizard;
    let version = wizard
        .selected_version()
        .and_then(|i| wizard.result().and_then(|r| r.get(i)))
        .ok_or_else(|| AppError::NotFound(format!("Session {id} has no selected CV")))?;

    Ok(Html(printable_document(
        version,
        &wizard.cv().personal,
        state.config.html_policy,
    )))
}
