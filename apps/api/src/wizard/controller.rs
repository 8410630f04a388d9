//! Wizard Controller: one owned state object per session.
//!
//! Flow: Landing → Personal → Experience → EducationExtras → (submit) → Result.
//! Navigation is never gated on field completeness. `submit` is split into
//! `begin_submit` / `finish_submit` so a caller holding the wizard behind a
//! lock can release it while the provider call is outstanding.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::generation::client::GenerationFailure;
use crate::generation::request::{build_generation_request, GenerationRequest};
use crate::i18n::{translations, Language};
use crate::models::cv::{
    CvData, DelimitedList, EducationField, ExperienceField, PersonalField,
};
use crate::models::version::GenerationResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Landing,
    Personal,
    Experience,
    EducationExtras,
    Result,
}

impl WizardStep {
    /// Position shown as "n / 3" on the form steps.
    pub fn form_position(&self) -> Option<u8> {
        match self {
            WizardStep::Personal => Some(1),
            WizardStep::Experience => Some(2),
            WizardStep::EducationExtras => Some(3),
            WizardStep::Landing | WizardStep::Result => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// What a finished (or refused) submit did to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Another request was already in flight; nothing happened.
    AlreadyGenerating,
    Generated { versions: usize },
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    cv: CvData,
    language: Language,
    theme: Theme,
    is_generating: bool,
    result: Option<GenerationResult>,
    selected_version: Option<usize>,
    notice: Option<String>,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn cv(&self) -> &CvData {
        &self.cv
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn selected_version(&self) -> Option<usize> {
        self.selected_version
    }

    /// Hands the pending failure notice to the caller once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // ── navigation ──────────────────────────────────────────────────────────

    /// Moves to `step`. The only refusal is entering Result without a
    /// result to show. Returns whether the step changed.
    pub fn go_to_step(&mut self, step: WizardStep) -> bool {
        if step == WizardStep::Result && self.result.is_none() {
            debug!("Ignoring move to result step: nothing generated yet");
            return false;
        }
        let changed = self.step != step;
        self.step = step;
        changed
    }

    /// Result → EducationExtras, keeping the entered data and the result.
    /// Ignored on any other step. Returns whether the step changed.
    pub fn back_to_edit(&mut self) -> bool {
        if self.step != WizardStep::Result {
            debug!("Ignoring back-to-edit outside the result step");
            return false;
        }
        self.step = WizardStep::EducationExtras;
        true
    }

    // ── preferences ─────────────────────────────────────────────────────────

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme
    }

    // ── field updates ───────────────────────────────────────────────────────

    pub fn update_personal_field(&mut self, field: PersonalField, value: String) -> &CvData {
        self.cv.personal.set(field, value);
        &self.cv
    }

    pub fn set_about_me(&mut self, value: String) -> &CvData {
        self.cv.about_me = value;
        &self.cv
    }

    pub fn set_references(&mut self, value: String) -> &CvData {
        self.cv.references = value;
        &self.cv
    }

    pub fn add_experience(&mut self) -> String {
        self.cv.add_experience()
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        self.cv.remove_experience(id)
    }

    pub fn update_experience_field(
        &mut self,
        id: &str,
        field: ExperienceField,
        value: String,
    ) -> bool {
        self.cv.update_experience(id, field, value)
    }

    pub fn add_education(&mut self) -> String {
        self.cv.add_education()
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        self.cv.remove_education(id)
    }

    pub fn update_education_field(&mut self, id: &str, field: EducationField, value: String) -> bool {
        self.cv.update_education(id, field, value)
    }

    pub fn set_delimited_list(&mut self, which: DelimitedList, raw: &str) -> &CvData {
        self.cv.set_delimited_list(which, raw);
        &self.cv
    }

    // ── generation ──────────────────────────────────────────────────────────

    /// Marks a generation as in flight and returns the request to send, or
    /// `None` when one is already outstanding.
    pub fn begin_submit(&mut self) -> Option<GenerationRequest> {
        if self.is_generating {
            debug!("Submit ignored: generation already in flight");
            return None;
        }
        self.is_generating = true;
        Some(build_generation_request(&self.cv, self.language))
    }

    /// Applies the provider outcome. All or nothing: a failure touches
    /// neither the CV data nor the step and records a single notice.
    pub fn finish_submit(
        &mut self,
        outcome: Result<GenerationResult, GenerationFailure>,
    ) -> SubmitOutcome {
        self.is_generating = false;
        match outcome {
            Ok(result) => {
                let versions = result.len();
                self.selected_version = (!result.is_empty()).then_some(0);
                self.result = Some(result);
                self.step = WizardStep::Result;
                info!("Generation finished with {versions} versions");
                SubmitOutcome::Generated { versions }
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                self.notice = Some(translations(self.language).generation_failed.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    // ── result selection ────────────────────────────────────────────────────

    /// Selects a version on the result step. Out-of-range indices and calls
    /// from other steps are ignored.
    pub fn select_version(&mut self, index: usize) -> bool {
        if self.step != WizardStep::Result {
            return false;
        }
        match &self.result {
            Some(result) if index < result.len() => {
                self.selected_version = Some(index);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::generation::client::CvGenerator;
    use crate::models::version::CvVersion;

    /// Begin, await the generator, finish: what the submit handler does
    /// around its lock.
    async fn submit(wizard: &mut Wizard, generator: &dyn CvGenerator) -> SubmitOutcome {
        let Some(request) = wizard.begin_submit() else {
            return SubmitOutcome::AlreadyGenerating;
        };
        let outcome = generator.generate(&request).await;
        wizard.finish_submit(outcome)
    }

    struct FixedGenerator {
        outcome: fn() -> Result<GenerationResult, GenerationFailure>,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn new(outcome: fn() -> Result<GenerationResult, GenerationFailure>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CvGenerator for FixedGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GenerationResult, GenerationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn one_version() -> Result<GenerationResult, GenerationFailure> {
        Ok(GenerationResult {
            versions: vec![CvVersion {
                title: "Corporate".to_string(),
                description: "d".to_string(),
                html_content: "<p>x</p>".to_string(),
                style_slug: "corporate".to_string(),
            }],
        })
    }

    fn three_versions() -> Result<GenerationResult, GenerationFailure> {
        let versions = ["corporate", "startup", "minimal"]
            .iter()
            .map(|slug| CvVersion {
                title: slug.to_string(),
                description: String::new(),
                html_content: format!("<p>{slug}</p>"),
                style_slug: slug.to_string(),
            })
            .collect();
        Ok(GenerationResult { versions })
    }

    fn malformed() -> Result<GenerationResult, GenerationFailure> {
        Err(GenerationFailure::MissingVersions)
    }

    fn wizard_at_extras() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.go_to_step(WizardStep::EducationExtras);
        wizard
    }

    #[test]
    fn test_new_wizard_starts_on_landing() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), WizardStep::Landing);
        assert!(!wizard.is_generating());
        assert!(wizard.result().is_none());
        assert!(wizard.selected_version().is_none());
        assert_eq!(wizard.language(), Language::En);
        assert_eq!(wizard.theme(), Theme::Light);
    }

    #[test]
    fn test_navigation_is_unconditional_between_form_steps() {
        let mut wizard = Wizard::new();
        assert!(wizard.go_to_step(WizardStep::EducationExtras));
        assert!(wizard.go_to_step(WizardStep::Personal));
        assert!(!wizard.go_to_step(WizardStep::Personal));
        assert!(wizard.go_to_step(WizardStep::Landing));
        assert_eq!(wizard.step(), WizardStep::Landing);
    }

    #[test]
    fn test_result_step_requires_a_result() {
        let mut wizard = wizard_at_extras();
        assert!(!wizard.go_to_step(WizardStep::Result));
        assert_eq!(wizard.step(), WizardStep::EducationExtras);
    }

    #[test]
    fn test_form_positions() {
        assert_eq!(WizardStep::Personal.form_position(), Some(1));
        assert_eq!(WizardStep::EducationExtras.form_position(), Some(3));
        assert_eq!(WizardStep::Result.form_position(), None);
    }

    #[test]
    fn test_remove_sole_experience_keeps_entry_unchanged() {
        let mut wizard = Wizard::new();
        wizard.update_experience_field("1", ExperienceField::Company, "Acme".to_string());
        let before = wizard.cv().experience.clone();
        assert!(!wizard.remove_experience("1"));
        assert_eq!(wizard.cv().experience, before);
        assert_eq!(wizard.cv().experience.len(), 1);
    }

    #[test]
    fn test_field_updates_go_through_to_cv() {
        let mut wizard = Wizard::new();
        wizard.update_personal_field(PersonalField::FullName, "Ada".to_string());
        wizard.set_about_me("About".to_string());
        wizard.set_references("Refs".to_string());
        let id = wizard.add_education();
        wizard.update_education_field(&id, EducationField::Year, "1833".to_string());
        let cv = wizard.set_delimited_list(DelimitedList::Skills, "a, b ,c");
        assert_eq!(cv.skills, vec!["a", "b", "c"]);
        assert_eq!(wizard.cv().personal.full_name, "Ada");
        assert_eq!(wizard.cv().about_me, "About");
        assert_eq!(wizard.cv().references, "Refs");
        assert_eq!(wizard.cv().education[1].year, "1833");
    }

    #[test]
    fn test_toggle_theme_and_language() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.toggle_theme(), Theme::Dark);
        assert_eq!(wizard.toggle_theme(), Theme::Light);
        wizard.set_language(Language::Tr);
        assert_eq!(wizard.language(), Language::Tr);
    }

    #[tokio::test]
    async fn test_successful_submit_moves_to_result() {
        let mut wizard = wizard_at_extras();
        wizard.update_experience_field("1", ExperienceField::Company, "Acme".to_string());
        let generator = FixedGenerator::new(one_version);

        let outcome = submit(&mut wizard, &generator).await;

        assert_eq!(outcome, SubmitOutcome::Generated { versions: 1 });
        assert_eq!(wizard.step(), WizardStep::Result);
        assert_eq!(wizard.result().map(|r| r.len()), Some(1));
        assert_eq!(wizard.selected_version(), Some(0));
        assert!(!wizard.is_generating());
        assert!(wizard.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_state_untouched() {
        let mut wizard = wizard_at_extras();
        wizard.update_personal_field(PersonalField::Email, "ada@example.com".to_string());
        wizard.set_delimited_list(DelimitedList::Projects, "x,,y");
        let cv_before = wizard.cv().clone();
        let generator = FixedGenerator::new(malformed);

        let outcome = submit(&mut wizard, &generator).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(wizard.cv(), &cv_before);
        assert_eq!(wizard.step(), WizardStep::EducationExtras);
        assert!(!wizard.is_generating());
        assert!(wizard.result().is_none());
        assert!(wizard.take_notice().is_some());
        assert!(wizard.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_failure_notice_follows_language() {
        let mut wizard = wizard_at_extras();
        wizard.set_language(Language::Tr);
        submit(&mut wizard, &FixedGenerator::new(malformed)).await;
        assert_eq!(
            wizard.take_notice().as_deref(),
            Some(translations(Language::Tr).generation_failed)
        );
    }

    #[tokio::test]
    async fn test_failure_after_success_keeps_previous_result() {
        let mut wizard = wizard_at_extras();
        submit(&mut wizard, &FixedGenerator::new(three_versions)).await;
        wizard.select_version(2);
        wizard.back_to_edit();

        submit(&mut wizard, &FixedGenerator::new(malformed)).await;

        assert_eq!(wizard.step(), WizardStep::EducationExtras);
        assert_eq!(wizard.result().map(|r| r.len()), Some(3));
        assert_eq!(wizard.selected_version(), Some(2));
    }

    #[tokio::test]
    async fn test_resubmit_while_generating_is_noop() {
        let mut wizard = wizard_at_extras();
        let request = wizard.begin_submit();
        assert!(request.is_some());
        assert!(wizard.is_generating());

        let generator = FixedGenerator::new(one_version);
        assert_eq!(submit(&mut wizard, &generator).await, SubmitOutcome::AlreadyGenerating);
        assert!(wizard.begin_submit().is_none());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert!(wizard.is_generating());

        wizard.finish_submit(one_version());
        assert!(!wizard.is_generating());
    }

    #[tokio::test]
    async fn test_select_version_bounds() {
        let mut wizard = wizard_at_extras();
        submit(&mut wizard, &FixedGenerator::new(three_versions)).await;

        assert!(wizard.select_version(2));
        assert_eq!(wizard.selected_version(), Some(2));
        assert!(!wizard.select_version(3));
        assert!(!wizard.select_version(usize::MAX));
        assert_eq!(wizard.selected_version(), Some(2));
    }

    #[tokio::test]
    async fn test_select_version_only_on_result_step() {
        let mut wizard = wizard_at_extras();
        submit(&mut wizard, &FixedGenerator::new(three_versions)).await;
        wizard.back_to_edit();
        assert!(!wizard.select_version(1));
        assert_eq!(wizard.selected_version(), Some(0));
    }

    #[tokio::test]
    async fn test_back_to_edit_keeps_data_and_allows_return() {
        let mut wizard = wizard_at_extras();
        wizard.update_personal_field(PersonalField::FullName, "Ada".to_string());
        submit(&mut wizard, &FixedGenerator::new(one_version)).await;

        wizard.back_to_edit();
        assert_eq!(wizard.step(), WizardStep::EducationExtras);
        assert_eq!(wizard.cv().personal.full_name, "Ada");
        assert!(wizard.go_to_step(WizardStep::Result));
    }

    #[test]
    fn test_back_to_edit_only_from_result() {
        let mut wizard = Wizard::new();
        assert!(!wizard.back_to_edit());
        assert_eq!(wizard.step(), WizardStep::Landing);
        wizard.go_to_step(WizardStep::Experience);
        assert!(!wizard.back_to_edit());
        assert_eq!(wizard.step(), WizardStep::Experience);
    }

    #[tokio::test]
    async fn test_empty_result_has_no_selection() {
        fn empty() -> Result<GenerationResult, GenerationFailure> {
            Ok(GenerationResult { versions: vec![] })
        }
        let mut wizard = wizard_at_extras();
        let outcome = submit(&mut wizard, &FixedGenerator::new(empty)).await;
        assert_eq!(outcome, SubmitOutcome::Generated { versions: 0 });
        assert_eq!(wizard.step(), WizardStep::Result);
        assert!(wizard.selected_version().is_none());
        assert!(!wizard.select_version(0));
    }
}
