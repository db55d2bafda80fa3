use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{
    truncate_chars, Category, CqcAnswers, UqcAnswers, UqcQuestion, Verdict,
    CATEGORY_FREE_TEXT_MAX_CHARS, FEEDBACK_MAX_CHARS, MAX_SECONDARY_CATEGORIES,
};
use super::scoring::{cqc_answered, cqc_questions, required_answers, uqc_complete, CqcQuestion};

/// Position of a review in the two-stage workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStage {
    UqcInProgress,
    UqcComplete,
    CqcInProgress,
    ReadyToSubmit,
    Submitting,
}

impl ReviewStage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UqcInProgress,
            Self::UqcComplete,
            Self::CqcInProgress,
            Self::ReadyToSubmit,
            Self::Submitting,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UqcInProgress => "UQC In Progress",
            Self::UqcComplete => "UQC Complete",
            Self::CqcInProgress => "CQC In Progress",
            Self::ReadyToSubmit => "Ready To Submit",
            Self::Submitting => "Submitting",
        }
    }

    /// The category checklist accepts input.
    pub const fn cqc_enabled(self) -> bool {
        matches!(
            self,
            Self::UqcComplete | Self::CqcInProgress | Self::ReadyToSubmit
        )
    }

    pub const fn submit_enabled(self) -> bool {
        matches!(self, Self::ReadyToSubmit)
    }

    pub const fn cancel_enabled(self) -> bool {
        !matches!(self, Self::Submitting)
    }
}

impl fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete reviewer input applied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReviewAction {
    SetUqcAnswer {
        question: UqcQuestion,
        verdict: Verdict,
    },
    SetAnsa {
        value: bool,
    },
    SelectPrimaryCategory {
        category: Option<Category>,
    },
    SetSecondaryCategories {
        categories: Vec<Category>,
    },
    ToggleSecondaryCategory {
        category: Category,
    },
    SetCqcAnswer {
        question_id: String,
        value: bool,
    },
    SetCategoryFreeText {
        text: String,
    },
    SetFeedback {
        text: String,
    },
    SetFlagged {
        value: bool,
    },
}

/// Rejected reviewer input. The session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("complete every UQC question before filling in the category checklist")]
    CqcLocked,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("select a primary category first")]
    NoPrimaryCategory,
    #[error("question `{question_id}` is not part of the {category} checklist")]
    UnknownQuestion {
        category: Category,
        question_id: String,
    },
    #[error("{0} is the primary category and cannot also be a secondary category")]
    SecondaryIsPrimary(Category),
    #[error("at most two secondary categories may be selected")]
    TooManySecondaryCategories,
    #[error("a category code can only be entered when the primary category is Others")]
    FreeTextNotApplicable,
    #[error("review is not ready to submit (stage: {0})")]
    NotReady(ReviewStage),
}

/// Mutable record of one reviewer's in-progress evaluation.
///
/// Every mutation goes through a guarded method so the stage gates hold at all times: CQC
/// input is refused until UQC is complete, nothing changes while a submission is in
/// flight, and CQC answers only ever hold the active category's question ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationSession {
    uqc: UqcAnswers,
    primary_category: Option<Category>,
    secondary_categories: Vec<Category>,
    category_free_text: String,
    cqc: CqcAnswers,
    feedback: String,
    flagged: bool,
    submitting: bool,
}

impl EvaluationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uqc(&self) -> &UqcAnswers {
        &self.uqc
    }

    pub fn primary_category(&self) -> Option<Category> {
        self.primary_category
    }

    pub fn secondary_categories(&self) -> &[Category] {
        &self.secondary_categories
    }

    pub fn category_free_text(&self) -> &str {
        &self.category_free_text
    }

    pub fn cqc(&self) -> &CqcAnswers {
        &self.cqc
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub fn flagged(&self) -> bool {
        self.flagged
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Checklist for the active primary category; empty when none is selected.
    pub fn cqc_questions(&self) -> &'static [CqcQuestion] {
        self.primary_category.map(cqc_questions).unwrap_or(&[])
    }

    pub fn cqc_answered(&self) -> usize {
        cqc_answered(self.cqc_questions(), &self.cqc)
    }

    pub fn cqc_required(&self) -> usize {
        required_answers(self.cqc_questions().len())
    }

    pub fn stage(&self) -> ReviewStage {
        if self.submitting {
            return ReviewStage::Submitting;
        }
        if !uqc_complete(&self.uqc) {
            return ReviewStage::UqcInProgress;
        }
        if self.primary_category.is_none() {
            return ReviewStage::UqcComplete;
        }
        if self.cqc_answered() >= self.cqc_required() {
            ReviewStage::ReadyToSubmit
        } else {
            ReviewStage::CqcInProgress
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&mut self, action: ReviewAction) -> Result<(), SessionError> {
        match action {
            ReviewAction::SetUqcAnswer { question, verdict } => {
                self.set_uqc_answer(question, verdict)
            }
            ReviewAction::SetAnsa { value } => self.set_ansa(value),
            ReviewAction::SelectPrimaryCategory { category } => {
                self.select_primary_category(category)
            }
            ReviewAction::SetSecondaryCategories { categories } => {
                self.set_secondary_categories(categories)
            }
            ReviewAction::ToggleSecondaryCategory { category } => {
                self.toggle_secondary_category(category)
            }
            ReviewAction::SetCqcAnswer { question_id, value } => {
                self.set_cqc_answer(&question_id, value)
            }
            ReviewAction::SetCategoryFreeText { text } => self.set_category_free_text(&text),
            ReviewAction::SetFeedback { text } => self.set_feedback(&text),
            ReviewAction::SetFlagged { value } => self.set_flagged(value),
        }
    }

    pub fn set_uqc_answer(
        &mut self,
        question: UqcQuestion,
        verdict: Verdict,
    ) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.uqc.set(question, Some(verdict));
        Ok(())
    }

    pub fn set_ansa(&mut self, value: bool) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.uqc.ansa = value;
        Ok(())
    }

    /// Switch the primary category. A different category starts a fresh checklist and
    /// drops the category code unless the new category is `Others`.
    pub fn select_primary_category(
        &mut self,
        category: Option<Category>,
    ) -> Result<(), SessionError> {
        self.ensure_cqc_unlocked()?;
        if category == self.primary_category {
            return Ok(());
        }

        self.primary_category = category;
        self.cqc = match category {
            Some(category) => {
                CqcAnswers::blank(cqc_questions(category).iter().map(|question| question.id))
            }
            None => CqcAnswers::default(),
        };
        if category != Some(Category::Others) {
            self.category_free_text.clear();
        }
        if let Some(primary) = category {
            self.secondary_categories.retain(|secondary| *secondary != primary);
        }
        Ok(())
    }

    pub fn set_secondary_categories(
        &mut self,
        categories: Vec<Category>,
    ) -> Result<(), SessionError> {
        self.ensure_cqc_unlocked()?;

        let mut selected = Vec::with_capacity(categories.len());
        for category in categories {
            if Some(category) == self.primary_category {
                return Err(SessionError::SecondaryIsPrimary(category));
            }
            if !selected.contains(&category) {
                selected.push(category);
            }
        }
        if selected.len() > MAX_SECONDARY_CATEGORIES {
            return Err(SessionError::TooManySecondaryCategories);
        }

        self.secondary_categories = selected;
        Ok(())
    }

    pub fn toggle_secondary_category(&mut self, category: Category) -> Result<(), SessionError> {
        self.ensure_cqc_unlocked()?;

        if let Some(position) = self
            .secondary_categories
            .iter()
            .position(|secondary| *secondary == category)
        {
            self.secondary_categories.remove(position);
            return Ok(());
        }
        if Some(category) == self.primary_category {
            return Err(SessionError::SecondaryIsPrimary(category));
        }
        if self.secondary_categories.len() >= MAX_SECONDARY_CATEGORIES {
            return Err(SessionError::TooManySecondaryCategories);
        }

        self.secondary_categories.push(category);
        Ok(())
    }

    pub fn set_cqc_answer(&mut self, question_id: &str, value: bool) -> Result<(), SessionError> {
        self.ensure_cqc_unlocked()?;
        let category = self
            .primary_category
            .ok_or(SessionError::NoPrimaryCategory)?;

        if self.cqc.set(question_id, Some(value)) {
            Ok(())
        } else {
            Err(SessionError::UnknownQuestion {
                category,
                question_id: question_id.to_string(),
            })
        }
    }

    /// Record the category code for `Others`, keeping at most 12 characters.
    pub fn set_category_free_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_cqc_unlocked()?;
        if self.primary_category != Some(Category::Others) {
            return Err(SessionError::FreeTextNotApplicable);
        }

        self.category_free_text = truncate_chars(text, CATEGORY_FREE_TEXT_MAX_CHARS);
        Ok(())
    }

    /// Record reviewer feedback, keeping at most 300 characters.
    pub fn set_feedback(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.feedback = truncate_chars(text, FEEDBACK_MAX_CHARS);
        Ok(())
    }

    pub fn set_flagged(&mut self, value: bool) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.flagged = value;
        Ok(())
    }

    /// Enter the submitting stage. Only a session that is ready may submit.
    pub fn begin_submission(&mut self) -> Result<(), SessionError> {
        match self.stage() {
            ReviewStage::ReadyToSubmit => {
                self.submitting = true;
                Ok(())
            }
            ReviewStage::Submitting => Err(SessionError::SubmissionInFlight),
            other => Err(SessionError::NotReady(other)),
        }
    }

    /// Leave the submitting stage after a failed delivery, keeping every answer.
    pub fn abort_submission(&mut self) {
        self.submitting = false;
    }

    /// Reset after a successful delivery.
    pub fn complete_submission(&mut self) {
        *self = Self::default();
    }

    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        *self = Self::default();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        if self.submitting {
            Err(SessionError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    fn ensure_cqc_unlocked(&self) -> Result<(), SessionError> {
        self.ensure_editable()?;
        if uqc_complete(&self.uqc) {
            Ok(())
        } else {
            Err(SessionError::CqcLocked)
        }
    }
}
