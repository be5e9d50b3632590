//! Three-step onboarding wizard.
//!
//! ```text
//! PersonalInfo -> Aesthetics -> ClothingPreferences -> Submitting -> Done
//!                                       ^                   |
//!                                       +------ Failed -----+
//! ```
//!
//! The draft lives only in the wizard. Moving forward validates the current
//! step locally; nothing is sent until [`OnboardingWizard::submit`], which
//! issues the profile update and then, once it has completed, the preferences
//! update.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::api::ProfileApi;
use crate::config;
use crate::connection::Connection;
use crate::error::{DrobbError, Result};
use crate::models::{Aesthetic, Gender, PreferencesUpdate, ProfileUpdate};
use crate::notice::{Destination, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    PersonalInfo,
    Aesthetics,
    ClothingPreferences,
    Submitting,
    Done,
    Failed,
}

/// Form state accumulated across the three steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub name: String,
    /// `YYYY-MM-DD`, as typed.
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub aesthetics: BTreeSet<Aesthetic>,
    pub clothing_preferences: BTreeSet<String>,
}

impl OnboardingDraft {
    fn validate_personal_info(&self) -> Result<NaiveDate> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.date_of_birth.trim().is_empty() {
            missing.push("date of birth");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if !missing.is_empty() {
            return Err(DrobbError::Validation(format!(
                "Please fill all the fields: {}",
                missing.join(", ")
            )));
        }
        NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").map_err(|_| {
            DrobbError::Validation("Date of birth must be in YYYY-MM-DD format".into())
        })
    }

    fn validate_aesthetics(&self) -> Result<()> {
        if self.aesthetics.is_empty() {
            return Err(DrobbError::Validation(
                "Please select at least one aesthetic".into(),
            ));
        }
        Ok(())
    }

    fn validate_clothing(&self) -> Result<()> {
        if self.clothing_preferences.is_empty() {
            return Err(DrobbError::Validation(
                "Please select at least one clothing preference".into(),
            ));
        }
        Ok(())
    }
}

/// Result of a submission attempt, ready for the caller's toast and router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: Notice,
    pub destination: Destination,
}

pub struct OnboardingWizard {
    step: OnboardingStep,
    draft: OnboardingDraft,
    last_error: Option<String>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::PersonalInfo,
            draft: OnboardingDraft::default(),
            last_error: None,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// The form the user is looking at. A failed submission leaves the user
    /// on the clothing form so they can retry.
    pub fn form(&self) -> OnboardingStep {
        match self.step {
            OnboardingStep::Failed => OnboardingStep::ClothingPreferences,
            other => other,
        }
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    /// Message of the most recent failed submission.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -- Field setters -----------------------------------------------------

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_date_of_birth(&mut self, dob: &str) {
        // The form field holds at most `YYYY-MM-DD`.
        self.draft.date_of_birth = dob.chars().take(10).collect();
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.draft.gender = Some(gender);
    }

    /// Select or deselect an aesthetic. Returns whether it is now selected.
    pub fn toggle_aesthetic(&mut self, aesthetic: Aesthetic) -> bool {
        if self.draft.aesthetics.remove(&aesthetic) {
            false
        } else {
            self.draft.aesthetics.insert(aesthetic);
            true
        }
    }

    /// Select or deselect a clothing category. Returns whether it is now selected.
    ///
    /// Names match [`config::CLOTHING_CATEGORIES`] case-insensitively and are
    /// stored in their canonical spelling; anything else is ignored.
    pub fn toggle_clothing(&mut self, category: &str) -> bool {
        let category = category.trim();
        let Some(canonical) = config::CLOTHING_CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(category))
        else {
            tracing::debug!(category, "ignoring unknown clothing category");
            return false;
        };
        if self.draft.clothing_preferences.remove(*canonical) {
            false
        } else {
            self.draft.clothing_preferences.insert(canonical.to_string());
            true
        }
    }

    // -- Navigation --------------------------------------------------------

    /// Advance one step after validating the current one.
    ///
    /// On a validation error the step is unchanged.
    pub fn next(&mut self) -> Result<OnboardingStep> {
        let next = match self.form() {
            OnboardingStep::PersonalInfo => {
                self.draft.validate_personal_info()?;
                OnboardingStep::Aesthetics
            }
            OnboardingStep::Aesthetics => {
                self.draft.validate_aesthetics()?;
                OnboardingStep::ClothingPreferences
            }
            other => {
                return Err(DrobbError::InvalidArgument(format!(
                    "cannot advance from {:?}",
                    other
                )))
            }
        };
        tracing::debug!(from = ?self.step, to = ?next, "onboarding step");
        self.step = next;
        Ok(next)
    }

    /// Go back one step. Entered values are kept.
    pub fn back(&mut self) -> OnboardingStep {
        self.step = match self.form() {
            OnboardingStep::Aesthetics => OnboardingStep::PersonalInfo,
            OnboardingStep::ClothingPreferences => OnboardingStep::Aesthetics,
            _ => self.step,
        };
        self.step
    }

    // -- Submission --------------------------------------------------------

    /// Submit the draft from the clothing step.
    ///
    /// Validation failures leave the step untouched and send nothing. Network
    /// or auth failures move to `Failed`, whose form is still the clothing
    /// step, with the draft intact; submitting again is allowed.
    pub fn submit(&mut self, conn: &Connection) -> Result<()> {
        if self.form() != OnboardingStep::ClothingPreferences {
            return Err(DrobbError::InvalidArgument(format!(
                "cannot submit from {:?}",
                self.step
            )));
        }
        let birth_date = self.draft.validate_personal_info()?;
        self.draft.validate_aesthetics()?;
        self.draft.validate_clothing()?;

        self.step = OnboardingStep::Submitting;
        match self.send(conn, birth_date) {
            Ok(()) => {
                self.step = OnboardingStep::Done;
                self.last_error = None;
                tracing::info!("onboarding completed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("onboarding submission failed: {}", e);
                self.last_error = Some(e.user_message());
                self.step = OnboardingStep::Failed;
                Err(e)
            }
        }
    }

    /// [`submit`](Self::submit), translated into a notice and a destination.
    pub fn complete(&mut self, conn: &Connection) -> SubmitOutcome {
        match self.submit(conn) {
            Ok(()) => SubmitOutcome {
                notice: Notice::success("Success", "Onboarding completed"),
                destination: Destination::Home,
            },
            Err(e) => SubmitOutcome {
                notice: Notice::from_error("Error", &e),
                destination: Destination::Stay,
            },
        }
    }

    fn send(&self, conn: &Connection, birth_date: NaiveDate) -> Result<()> {
        let gender = self
            .draft
            .gender
            .ok_or_else(|| DrobbError::Validation("Please fill all the fields: gender".into()))?;
        let profile = ProfileUpdate {
            name: self.draft.name.trim().to_string(),
            gender,
            birth_date: birth_date.format("%Y-%m-%d").to_string(),
            aesthetic: self.draft.aesthetics.iter().copied().collect(),
        };
        let prefs = PreferencesUpdate::new(
            self.draft.aesthetics.iter().map(|a| a.as_str()),
            self.draft.clothing_preferences.iter(),
        );

        let api = ProfileApi::new(conn);
        api.update(&profile)?;
        api.update_preferences(&prefs)?;
        Ok(())
    }
}
