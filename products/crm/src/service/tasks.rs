use std::sync::Arc;

use entity::{RecordId, tasks::Task};
use platform_db::MemoryStore;
use tracing::{info, instrument};

use super::{DataAccess, StatusControl, check_reference};
use crate::{
    CrmError, CrmResult, FieldErrors,
    forms::{Draft, Mode, TaskDraft, ValidationContext},
    listing::{
        ListPage, ListQuery,
        tasks::{Completion, TaskFilter, TaskSortKey},
        transform,
    },
    notify::Notifications,
    references::References,
};

#[derive(Clone)]
pub struct TaskService {
    store: Arc<MemoryStore>,
}

impl TaskService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    async fn check_links(&self, draft: &TaskDraft, errors: &mut FieldErrors) {
        check_reference(
            self.store.users(),
            draft.assigned_to.as_ref(),
            errors,
            "assignedTo",
            "Selected assignee does not exist.",
        )
        .await;
        check_reference(
            self.store.clients(),
            draft.related_client_id.as_ref(),
            errors,
            "relatedClientId",
            "Selected client does not exist.",
        )
        .await;
        check_reference(
            self.store.campaigns(),
            draft.related_campaign_id.as_ref(),
            errors,
            "relatedCampaignId",
            "Selected campaign does not exist.",
        )
        .await;
    }

    /// Flip the completion flag and say so.
    #[instrument(name = "crm.tasks.toggle", skip(self, notices), fields(task = %id))]
    pub async fn toggle_completed(
        &self,
        id: &RecordId,
        notices: &mut Notifications,
    ) -> CrmResult<Task> {
        let result = self
            .store
            .tasks()
            .modify(id, |task: &mut Task| {
                task.is_completed = !task.is_completed;
                Ok::<(), CrmError>(())
            })
            .await;
        match result {
            Ok(task) => {
                let (title, state) = if task.is_completed {
                    ("Task Completed", "completed")
                } else {
                    ("Task Reopened", "reopened")
                };
                notices.success(title, format!("\"{}\" marked as {}.", task.title, state));
                Ok(task)
            }
            Err(err) => {
                notices.error("Error", format!("Failed to update task: {}", err));
                Err(err)
            }
        }
    }
}

impl DataAccess for TaskService {
    type Record = Task;
    type Filter = TaskFilter;
    type Draft = TaskDraft;

    #[instrument(name = "crm.tasks.list", skip_all, fields(page = query.page, sort = ?query.sort, has_q = !query.filter.search.is_empty()))]
    async fn list(&self, query: &ListQuery<TaskFilter, TaskSortKey>) -> CrmResult<ListPage<Task>> {
        let records = self.store.tasks().all().await?;
        let refs = References::load(&self.store).await;
        Ok(transform(records, query, &refs))
    }

    #[instrument(name = "crm.tasks.get", skip(self))]
    async fn get(&self, id: &RecordId) -> CrmResult<Task> {
        Ok(self.store.tasks().find(id).await?)
    }

    #[instrument(name = "crm.tasks.create", skip_all)]
    async fn create(&self, draft: &TaskDraft) -> CrmResult<Task> {
        let ctx = ValidationContext::now();
        let mut errors = draft.validate(Mode::Create, &ctx);
        self.check_links(draft, &mut errors).await;
        errors.into_result()?;
        let task = self.store.tasks().insert(draft.build(None, &ctx)).await?;
        info!(task = %task.id, "task created");
        Ok(task)
    }

    #[instrument(name = "crm.tasks.update", skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &TaskDraft) -> CrmResult<Task> {
        let ctx = ValidationContext::now();
        let mut errors = patch.validate(Mode::Edit, &ctx);
        self.check_links(patch, &mut errors).await;
        errors.into_result()?;
        self.store
            .tasks()
            .modify(id, |task: &mut Task| {
                *task = patch.build(Some(&*task), &ctx);
                Ok::<(), CrmError>(())
            })
            .await
    }
}

/// A task's status is its completion flag.
impl StatusControl for TaskService {
    type Status = Completion;

    #[instrument(name = "crm.tasks.set_status", skip(self))]
    async fn set_status(&self, id: &RecordId, status: Completion) -> CrmResult<Task> {
        self.store
            .tasks()
            .modify(id, |task: &mut Task| {
                task.is_completed = status == Completion::Completed;
                Ok::<(), CrmError>(())
            })
            .await
    }
}
