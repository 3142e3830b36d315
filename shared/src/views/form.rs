use crate::model::{ReviewSubmitRequest, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Select which model was correct")]
    MissingVerdict,
    #[error("Enter the reviewer name")]
    MissingReviewer,
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("This task has already been reviewed")]
    AlreadyReviewed,
}

/// Input and submission state of the verdict form for one task.
///
/// Validation happens before any request is built, so an incomplete form
/// never reaches the network. A failed request leaves every field as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    pub verdict: Option<Verdict>,
    pub comment: String,
    pub reviewer_name: String,
    submitting: bool,
    error: Option<String>,
}

impl ReviewForm {
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<ReviewSubmitRequest, FormError> {
        if self.submitting {
            return Err(FormError::AlreadySubmitting);
        }
        let verdict = self.verdict.ok_or(FormError::MissingVerdict)?;
        let reviewed_by = self.reviewer_name.trim();
        if reviewed_by.is_empty() {
            return Err(FormError::MissingReviewer);
        }
        let comment = self.comment.trim();
        Ok(ReviewSubmitRequest {
            verdict,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
            reviewed_by: reviewed_by.to_string(),
        })
    }

    /// Builds the request and enters the submitting state. `already_reviewed`
    /// is the `reviewed` flag of the loaded detail.
    pub fn begin_submit(&mut self, already_reviewed: bool) -> Result<ReviewSubmitRequest, FormError> {
        if already_reviewed {
            return Err(FormError::AlreadyReviewed);
        }
        let request = self.validate()?;
        self.submitting = true;
        self.error = None;
        Ok(request)
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    pub fn succeed(&mut self) {
        self.submitting = false;
        self.error = None;
    }
}
