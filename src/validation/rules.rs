//! Synchronous field rules.

use super::ValidationFailure;
use crate::attachment::{domain::AttachmentStatus, services::UploadRequest};
use crate::config::ValidationLimits;
use crate::project::{domain::ProjectChanges, services::CreateProjectRequest};
use crate::task::{
    domain::{Hours, TaskChanges, TaskPriority},
    services::CreateTaskRequest,
};
use chrono::NaiveDate;

/// Applies field rules using configured limits.
///
/// Each method checks every rule and reports all violations together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestValidator {
    limits: ValidationLimits,
}

impl RequestValidator {
    /// Creates a validator enforcing `limits`.
    #[must_use]
    pub const fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Returns the enforced limits.
    #[must_use]
    pub const fn limits(&self) -> ValidationLimits {
        self.limits
    }

    /// Checks a task creation request.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn task_request(&self, request: &CreateTaskRequest) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        self.check_title(&mut failure, "title", Some(request.title()));
        check_date_order(
            &mut failure,
            "due_date",
            request.start_date(),
            request.due_date(),
        );
        if let Some(hours) = request.estimated_hours() {
            if !hours.is_finite() || hours.is_sign_negative() {
                failure.push("estimated_hours", "must be a number of at least 0");
            }
        }
        failure.into_result()
    }

    /// Checks a task update.
    ///
    /// The date-order rule only applies here when both dates are part of
    /// the update. An update touching one date is checked against the stored
    /// task when it is applied.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn task_changes(&self, changes: &TaskChanges) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        self.check_title(&mut failure, "title", changes.title());
        if let (Some(start), Some(due)) = (changes.start_date(), changes.due_date()) {
            check_date_order(&mut failure, "due_date", start, due);
        }
        failure.into_result()
    }

    /// Checks a project creation request.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn project_request(&self, request: &CreateProjectRequest) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        self.check_title(&mut failure, "name", Some(request.name()));
        check_date_order(
            &mut failure,
            "end_date",
            request.start_date(),
            request.end_date(),
        );
        failure.into_result()
    }

    /// Checks a project update.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn project_changes(&self, changes: &ProjectChanges) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        self.check_title(&mut failure, "name", changes.name());
        if let (Some(start), Some(end)) = (changes.start_date(), changes.end_date()) {
            check_date_order(&mut failure, "end_date", start, end);
        }
        failure.into_result()
    }

    /// Checks a comment body.
    ///
    /// # Errors
    ///
    /// Returns a violation for a blank body.
    pub fn comment_content(&self, content: &str) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        if content.trim().is_empty() {
            failure.push("content", "is required");
        }
        failure.into_result()
    }

    /// Checks an upload.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    pub fn upload(&self, request: &UploadRequest) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();
        let size = u64::try_from(request.bytes().len()).unwrap_or(u64::MAX);
        if size == 0 {
            failure.push("file", "is required");
        } else if size > self.limits.max_upload_bytes {
            failure.push(
                "file",
                format!("must not exceed {} bytes", self.limits.max_upload_bytes),
            );
        }
        if request.original_filename().trim().is_empty() {
            failure.push("file", "must have a name");
        }
        failure.into_result()
    }

    /// Parses a task priority from raw input.
    ///
    /// # Errors
    ///
    /// Returns a violation naming the accepted values.
    pub fn priority(&self, raw: &str) -> Result<TaskPriority, ValidationFailure> {
        TaskPriority::try_from(raw).map_err(|_| {
            single(
                "priority",
                "must be one of: low, medium, high, urgent",
            )
        })
    }

    /// Parses an attachment status from raw input.
    ///
    /// # Errors
    ///
    /// Returns a violation naming the accepted values.
    pub fn attachment_status(&self, raw: &str) -> Result<AttachmentStatus, ValidationFailure> {
        AttachmentStatus::try_from(raw)
            .map_err(|_| single("status", "must be one of: pending, approved, rejected"))
    }

    /// Converts and checks an amount of logged work.
    ///
    /// # Errors
    ///
    /// Returns a violation when the amount is below the configured minimum or
    /// not a valid number of hours. The minimum is compared against the raw
    /// input, before rounding to hundredths.
    pub fn logged_hours(&self, hours: f64) -> Result<Hours, ValidationFailure> {
        let minimum = self.limits.min_logged_hours;
        let below_minimum = hours.is_nan() || hours < minimum.as_f64();
        match Hours::from_f64(hours) {
            Ok(value) if !below_minimum && !value.is_zero() => Ok(value),
            _ => Err(single("hours", format!("must be at least {minimum}"))),
        }
    }

    fn check_title(&self, failure: &mut ValidationFailure, field: &'static str, value: Option<&str>) {
        let Some(text) = value else {
            return;
        };
        if text.trim().is_empty() {
            failure.push(field, "is required");
        } else if text.chars().count() > self.limits.max_title_chars {
            failure.push(
                field,
                format!(
                    "must not exceed {} characters",
                    self.limits.max_title_chars
                ),
            );
        }
    }
}

fn check_date_order(
    failure: &mut ValidationFailure,
    field: &'static str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let (Some(start_date), Some(end_date)) = (start, end) {
        if end_date < start_date {
            failure.push(field, "must be on or after the start date");
        }
    }
}

fn single(field: &'static str, message: impl Into<String>) -> ValidationFailure {
    let mut failure = ValidationFailure::new();
    failure.push(field, message);
    failure
}
