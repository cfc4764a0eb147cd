use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationError;

/// A single to-do record as stored by the backend and rendered by the client.
///
/// `completed_at` is present exactly when `completed` is true. Only
/// [`Task::apply`] changes the completion flag, and it keeps the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deleted: bool,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/tasks`.
///
/// Both fields are optional on the wire so a missing one surfaces as a
/// [`ValidationError`] rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub due_date: DateTime<Utc>,
}

/// Body of `PUT /api/tasks/{id}`: a partial patch, absent fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    pub fn new(text: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            text: Some(text.into()),
            due_date: Some(due_date),
        }
    }

    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let text = match self.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(ValidationError::MissingText),
        };
        let due_date = self.due_date.ok_or(ValidationError::MissingDueDate)?;
        Ok(NewTask { text, due_date })
    }
}

impl UpdateTaskRequest {
    /// Patch flipping the completion flag of `task`.
    pub fn toggle(task: &Task) -> Self {
        Self {
            completed: Some(!task.completed),
            ..Self::default()
        }
    }

    /// Patch replacing only the text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none() && self.due_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.text {
            Some(text) if text.trim().is_empty() => Err(ValidationError::EmptyText),
            _ => Ok(()),
        }
    }
}

impl Task {
    pub fn new(new_task: NewTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: new_task.text,
            completed: false,
            deleted: false,
            due_date: new_task.due_date,
            completed_at: None,
        }
    }

    /// Shallow-merges `patch` onto the record.
    ///
    /// Setting `completed` to true stamps `completed_at` with `now`, even when
    /// the task was already completed; setting it to false clears the stamp.
    pub fn apply(&mut self, patch: UpdateTaskRequest, now: DateTime<Utc>) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
            self.completed_at = completed.then_some(now);
        }
    }

    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    /// Not deleted and not completed.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 9, 30, 0).unwrap()
    }

    fn task() -> Task {
        Task::new(CreateTaskRequest::new("buy milk", due()).validate().unwrap())
    }

    #[test]
    fn new_task_starts_pending_and_visible() {
        let task = task();
        assert_eq!(task.text, "buy milk");
        assert_eq!(task.due_date, due());
        assert!(!task.completed);
        assert!(!task.deleted);
        assert!(task.completed_at.is_none());
        assert!(task.is_active());
    }

    #[rstest]
    #[case(None, Some(due()), ValidationError::MissingText)]
    #[case(Some(""), Some(due()), ValidationError::MissingText)]
    #[case(Some("   "), Some(due()), ValidationError::MissingText)]
    #[case(Some("buy milk"), None, ValidationError::MissingDueDate)]
    #[case(None, None, ValidationError::MissingText)]
    fn create_request_rejects_missing_fields(
        #[case] text: Option<&str>,
        #[case] due_date: Option<DateTime<Utc>>,
        #[case] expected: ValidationError,
    ) {
        let request = CreateTaskRequest {
            text: text.map(str::to_owned),
            due_date,
        };
        assert_eq!(request.validate(), Err(expected));
    }

    #[test]
    fn completing_stamps_and_reopening_clears() {
        let mut task = task();
        let now = due() - Duration::hours(3);

        task.apply(UpdateTaskRequest::toggle(&task), now);
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now));

        task.apply(UpdateTaskRequest::toggle(&task), now + Duration::minutes(1));
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn completing_again_gets_a_fresh_stamp() {
        let mut task = task();
        let first = due() - Duration::hours(5);
        let second = first + Duration::hours(1);

        task.apply(UpdateTaskRequest { completed: Some(true), ..Default::default() }, first);
        task.apply(UpdateTaskRequest { completed: Some(false), ..Default::default() }, first);
        task.apply(UpdateTaskRequest { completed: Some(true), ..Default::default() }, second);

        assert!(task.completed);
        assert_eq!(task.completed_at, Some(second));
    }

    #[test]
    fn text_patch_leaves_completion_untouched() {
        let mut task = task();
        let stamp = due() - Duration::days(1);
        task.apply(UpdateTaskRequest::toggle(&task), stamp);

        task.apply(UpdateTaskRequest::text("buy oat milk"), stamp + Duration::hours(2));

        assert_eq!(task.text, "buy oat milk");
        assert!(task.completed);
        assert_eq!(task.completed_at, Some(stamp));
    }

    #[test]
    fn due_date_patch_moves_deadline() {
        let mut task = task();
        let later = due() + Duration::days(2);
        task.apply(
            UpdateTaskRequest { due_date: Some(later), ..Default::default() },
            due(),
        );
        assert_eq!(task.due_date, later);
        assert_eq!(task.text, "buy milk");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut task = task();
        let before = task.clone();
        let patch = UpdateTaskRequest::default();
        assert!(patch.is_empty());
        assert!(patch.validate().is_ok());

        task.apply(patch, due());
        assert_eq!(task, before);
    }

    #[test]
    fn blank_text_patch_is_rejected() {
        assert_eq!(
            UpdateTaskRequest::text("  ").validate(),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn soft_delete_only_sets_the_flag() {
        let mut task = task();
        let before = task.clone();
        task.soft_delete();
        assert!(task.deleted);
        assert_eq!(Task { deleted: false, ..task }, before);
    }

    #[test]
    fn serializes_camel_case_and_omits_missing_completion() {
        let task = task();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["text"], "buy milk");
        assert_eq!(value["dueDate"], "2026-11-01T09:30:00Z");
        assert_eq!(value["completed"], false);
        assert_eq!(value["deleted"], false);
        assert!(value.get("completedAt").is_none());
    }

    #[test]
    fn patch_ignores_fields_it_does_not_own() {
        let patch: UpdateTaskRequest =
            serde_json::from_str(r#"{"deleted":true,"completedAt":"2020-01-01T00:00:00Z","completed":true}"#)
                .unwrap();
        assert_eq!(patch.completed, Some(true));
        assert!(patch.text.is_none());
        assert!(patch.due_date.is_none());
    }
}
