use entity::{RecordId, tasks::Task};

use super::{Choice, Filter, SortValue, Sortable, TextSearch};
use crate::references::References;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Completed,
    Pending,
}

impl Completion {
    pub fn of(task: &Task) -> Self {
        if task.is_completed {
            Completion::Completed
        } else {
            Completion::Pending
        }
    }
}

/// Task list filters. The search covers the title, the description and the
/// display names of the assignee, client and campaign.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    pub completion: Choice<Completion>,
    pub assignee: Choice<RecordId>,
    pub client: Choice<RecordId>,
    pub campaign: Choice<RecordId>,
    pub search: TextSearch,
}

impl Filter<Task> for TaskFilter {
    fn matches(&self, task: &Task, refs: &References) -> bool {
        self.completion.admits(&Completion::of(task))
            && self.assignee.admits_opt(task.assigned_to.as_ref())
            && self.client.admits_opt(task.related_client_id.as_ref())
            && self.campaign.admits_opt(task.related_campaign_id.as_ref())
            && self.search.matches_any([
                Some(task.title.as_str()),
                task.description.as_deref(),
                task.assigned_to.as_ref().and_then(|id| refs.user_name(id)),
                task.related_client_id
                    .as_ref()
                    .and_then(|id| refs.client_name(id)),
                task.related_campaign_id
                    .as_ref()
                    .and_then(|id| refs.campaign_name(id)),
            ])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskSortKey {
    Title,
    DueDate,
    Priority,
    Status,
    Assignee,
    CreatedAt,
}

impl Sortable for Task {
    type Key = TaskSortKey;

    fn sort_value(&self, key: TaskSortKey, refs: &References) -> Option<SortValue> {
        match key {
            TaskSortKey::Title => Some(SortValue::text(&self.title)),
            TaskSortKey::DueDate => Some(SortValue::Date(self.due_date)),
            TaskSortKey::Priority => Some(SortValue::Rank(self.priority.rank())),
            TaskSortKey::Status => Some(SortValue::Flag(self.is_completed)),
            TaskSortKey::Assignee => self
                .assigned_to
                .as_ref()
                .and_then(|id| refs.user_name(id))
                .map(SortValue::text),
            TaskSortKey::CreatedAt => Some(SortValue::Instant(self.created_at)),
        }
    }
}
