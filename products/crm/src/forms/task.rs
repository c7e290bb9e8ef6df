use chrono::NaiveDate;
use entity::{
    RecordId,
    tasks::{Priority, Task},
};

use super::{Draft, FormField, Mode, ValidationContext, optional_text, require, require_text};
use crate::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Assignee,
    Client,
    Campaign,
    Priority,
}

impl FormField for TaskField {
    fn name(self) -> &'static str {
        match self {
            TaskField::Title => "title",
            TaskField::Description => "description",
            TaskField::DueDate => "dueDate",
            TaskField::Assignee => "assignedTo",
            TaskField::Client => "relatedClientId",
            TaskField::Campaign => "relatedCampaignId",
            TaskField::Priority => "priority",
        }
    }
}

/// Task form state. `None` in a link field means "unassigned" or "none".
#[derive(Clone, Debug, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub assigned_to: Option<RecordId>,
    pub related_client_id: Option<RecordId>,
    pub related_campaign_id: Option<RecordId>,
    pub priority: Option<Priority>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: None,
            assigned_to: None,
            related_client_id: None,
            related_campaign_id: None,
            priority: Some(Priority::Medium),
        }
    }
}

impl TaskDraft {
    /// Blank task pre-linked to a client, as opened from a client page.
    pub fn for_client(client_id: RecordId) -> Self {
        Self {
            related_client_id: Some(client_id),
            ..Self::default()
        }
    }
}

impl Draft for TaskDraft {
    type Record = Task;
    type Field = TaskField;

    const NOUN: &'static str = "Task";

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: Some(task.due_date),
            assigned_to: task.assigned_to.clone(),
            related_client_id: task.related_client_id.clone(),
            related_campaign_id: task.related_campaign_id.clone(),
            priority: Some(task.priority),
        }
    }

    fn validate(&self, _mode: Mode, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title, "Title is required");
        require(&mut errors, "dueDate", &self.due_date, "Due date is required");
        require(&mut errors, "priority", &self.priority, "Priority is required");
        errors
    }

    /// Completion state and creation time survive an edit untouched.
    fn build(&self, original: Option<&Task>, ctx: &ValidationContext) -> Task {
        let (id, is_completed, created_at) = match original {
            Some(task) => (task.id.clone(), task.is_completed, task.created_at),
            None => (RecordId::generate("task"), false, ctx.now),
        };
        Task {
            id,
            title: self.title.trim().to_string(),
            description: optional_text(&self.description),
            due_date: self
                .due_date
                .or(original.map(|task| task.due_date))
                .unwrap_or_else(|| ctx.today()),
            assigned_to: self.assigned_to.clone(),
            related_client_id: self.related_client_id.clone(),
            related_campaign_id: self.related_campaign_id.clone(),
            priority: self.priority.unwrap_or_default(),
            is_completed,
            created_at,
        }
    }

    fn label(task: &Task) -> &str {
        &task.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    #[test]
    fn blank_task_defaults_to_medium_priority() {
        let draft = TaskDraft::blank();
        assert_eq!(draft.priority, Some(Priority::Medium));
        let errors = draft.validate(Mode::Create, &ctx());
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("dueDate"), Some("Due date is required"));
        assert!(!errors.contains("priority"));
    }

    #[test]
    fn edit_preserves_completion_and_creation_time() {
        let original = Task {
            id: "task2".into(),
            title: "Create proposal".into(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            assigned_to: Some("user2".into()),
            related_client_id: Some("client2".into()),
            related_campaign_id: None,
            priority: Priority::Medium,
            is_completed: true,
            created_at: ctx().now,
        };
        let mut draft = TaskDraft::from_record(&original);
        draft.assigned_to = None;
        draft.priority = Some(Priority::High);
        let later = ValidationContext::on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let updated = draft.build(Some(&original), &later);
        assert!(updated.is_completed);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.assigned_to, None);
        assert_eq!(updated.priority, Priority::High);
    }

    #[test]
    fn client_page_prefills_the_client() {
        let draft = TaskDraft::for_client("client3".into());
        assert_eq!(draft.related_client_id, Some(RecordId::from("client3")));
        assert_eq!(draft.assigned_to, None);
    }
}
