use async_graphql::{Enum, ID, InputObject, MaybeUndefined};
use chrono::NaiveDate;
use entity::RecordId;
use products_crm::{
    forms::{CampaignDraft, ClientDraft, InteractionDraft, TaskDraft, UserDraft},
    listing::{
        Choice, DateRange, Direction, ListQuery, PAGE_SIZE, Sort, TextSearch,
        campaigns::{CampaignFilter, CampaignSortKey},
        clients::{ClientFilter, ClientSortKey},
        interactions::{InteractionFilter, InteractionSortKey},
        tasks::{TaskFilter, TaskSortKey},
        users::{UserFilter, UserSortKey},
    },
};

use super::types::{
    CampaignStatus, ClientStatus, InteractionType, TaskPriority, TaskStatus, UserRole,
    UserStatus, record_id,
};

pub const MAX_PAGE_SIZE: i32 = 100;

/// Build the list request the resolvers hand to a service. A missing page is
/// page 1; out-of-range pages are clamped by the pipeline.
pub fn list_query<F, K>(
    filter: F,
    sort: Option<Sort<K>>,
    page: Option<i32>,
    page_size: Option<i32>,
) -> ListQuery<F, K> {
    ListQuery {
        filter,
        sort,
        page: page.unwrap_or(1).max(1) as usize,
        page_size: page_size
            .map(|size| size.clamp(1, MAX_PAGE_SIZE) as usize)
            .unwrap_or(PAGE_SIZE),
    }
}

fn choice<T>(value: Option<T>) -> Choice<T> {
    Choice::from(value)
}

fn choice_id(value: Option<ID>) -> Choice<RecordId> {
    Choice::from(value.map(record_id))
}

fn search(value: Option<String>) -> TextSearch {
    TextSearch::new(value.as_deref().unwrap_or_default())
}

/// Apply a nullable patch field: absent keeps, `null` clears.
fn patch<T>(slot: &mut Option<T>, value: MaybeUndefined<T>) {
    match value {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => *slot = None,
        MaybeUndefined::Value(value) => *slot = Some(value),
    }
}

fn patch_text(slot: &mut String, value: MaybeUndefined<String>) {
    match value {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => slot.clear(),
        MaybeUndefined::Value(value) => *slot = value,
    }
}

fn patch_id(slot: &mut Option<RecordId>, value: MaybeUndefined<ID>) {
    patch(slot, value.map_value(record_id));
}

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for Direction {
    fn from(value: SortDirection) -> Self {
        match value {
            SortDirection::Asc => Direction::Asc,
            SortDirection::Desc => Direction::Desc,
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct ClientFilterInput {
    pub status: Option<ClientStatus>,
    pub manager_id: Option<ID>,
    pub search: Option<String>,
}

impl From<ClientFilterInput> for ClientFilter {
    fn from(input: ClientFilterInput) -> Self {
        Self {
            status: choice(input.status.map(Into::into)),
            manager: choice_id(input.manager_id),
            search: search(input.search),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClientSortField {
    Name,
    Email,
    Company,
    Status,
    LastInteraction,
    Manager,
}

#[derive(InputObject, Clone, Copy)]
pub struct ClientSortInput {
    pub field: ClientSortField,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<ClientSortInput> for Sort<ClientSortKey> {
    fn from(input: ClientSortInput) -> Self {
        let key = match input.field {
            ClientSortField::Name => ClientSortKey::Name,
            ClientSortField::Email => ClientSortKey::Email,
            ClientSortField::Company => ClientSortKey::Company,
            ClientSortField::Status => ClientSortKey::Status,
            ClientSortField::LastInteraction => ClientSortKey::LastInteraction,
            ClientSortField::Manager => ClientSortKey::Manager,
        };
        Sort {
            key,
            direction: input.direction.into(),
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct CampaignFilterInput {
    pub client_id: Option<ID>,
    pub status: Option<CampaignStatus>,
    /// Campaigns must start on or after this day.
    pub from: Option<NaiveDate>,
    /// Campaigns must end on or before this day. Ignored without `from`.
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl From<CampaignFilterInput> for CampaignFilter {
    fn from(input: CampaignFilterInput) -> Self {
        Self {
            client: choice_id(input.client_id),
            status: choice(input.status.map(Into::into)),
            dates: DateRange::new(input.from, input.to),
            search: search(input.search),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum CampaignSortField {
    Name,
    Client,
    StartDate,
    EndDate,
    Budget,
    Status,
}

#[derive(InputObject, Clone, Copy)]
pub struct CampaignSortInput {
    pub field: CampaignSortField,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<CampaignSortInput> for Sort<CampaignSortKey> {
    fn from(input: CampaignSortInput) -> Self {
        let key = match input.field {
            CampaignSortField::Name => CampaignSortKey::Name,
            CampaignSortField::Client => CampaignSortKey::Client,
            CampaignSortField::StartDate => CampaignSortKey::StartDate,
            CampaignSortField::EndDate => CampaignSortKey::EndDate,
            CampaignSortField::Budget => CampaignSortKey::Budget,
            CampaignSortField::Status => CampaignSortKey::Status,
        };
        Sort {
            key,
            direction: input.direction.into(),
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct TaskFilterInput {
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<ID>,
    pub client_id: Option<ID>,
    pub campaign_id: Option<ID>,
    pub search: Option<String>,
}

impl From<TaskFilterInput> for TaskFilter {
    fn from(input: TaskFilterInput) -> Self {
        Self {
            completion: choice(input.status.map(Into::into)),
            assignee: choice_id(input.assigned_to),
            client: choice_id(input.client_id),
            campaign: choice_id(input.campaign_id),
            search: search(input.search),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaskSortField {
    Title,
    DueDate,
    Priority,
    Status,
    Assignee,
    CreatedAt,
}

#[derive(InputObject, Clone, Copy)]
pub struct TaskSortInput {
    pub field: TaskSortField,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<TaskSortInput> for Sort<TaskSortKey> {
    fn from(input: TaskSortInput) -> Self {
        let key = match input.field {
            TaskSortField::Title => TaskSortKey::Title,
            TaskSortField::DueDate => TaskSortKey::DueDate,
            TaskSortField::Priority => TaskSortKey::Priority,
            TaskSortField::Status => TaskSortKey::Status,
            TaskSortField::Assignee => TaskSortKey::Assignee,
            TaskSortField::CreatedAt => TaskSortKey::CreatedAt,
        };
        Sort {
            key,
            direction: input.direction.into(),
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct UserFilterInput {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

impl From<UserFilterInput> for UserFilter {
    fn from(input: UserFilterInput) -> Self {
        Self {
            role: choice(input.role.map(Into::into)),
            status: choice(input.status.map(Into::into)),
            search: search(input.search),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserSortField {
    Name,
    Email,
    Role,
    Status,
}

#[derive(InputObject, Clone, Copy)]
pub struct UserSortInput {
    pub field: UserSortField,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<UserSortInput> for Sort<UserSortKey> {
    fn from(input: UserSortInput) -> Self {
        let key = match input.field {
            UserSortField::Name => UserSortKey::Name,
            UserSortField::Email => UserSortKey::Email,
            UserSortField::Role => UserSortKey::Role,
            UserSortField::Status => UserSortKey::Status,
        };
        Sort {
            key,
            direction: input.direction.into(),
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct InteractionFilterInput {
    pub client_id: Option<ID>,
    #[graphql(name = "type")]
    pub kind: Option<InteractionType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl From<InteractionFilterInput> for InteractionFilter {
    fn from(input: InteractionFilterInput) -> Self {
        Self {
            client: choice_id(input.client_id),
            kind: choice(input.kind.map(Into::into)),
            dates: DateRange::new(input.from, input.to),
            search: search(input.search),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum InteractionSortField {
    Date,
    Type,
}

#[derive(InputObject, Clone, Copy)]
pub struct InteractionSortInput {
    pub field: InteractionSortField,
    #[graphql(default)]
    pub direction: SortDirection,
}

impl From<InteractionSortInput> for Sort<InteractionSortKey> {
    fn from(input: InteractionSortInput) -> Self {
        let key = match input.field {
            InteractionSortField::Date => InteractionSortKey::Date,
            InteractionSortField::Type => InteractionSortKey::Kind,
        };
        Sort {
            key,
            direction: input.direction.into(),
        }
    }
}

/// Form fields for a client. Omitted fields keep the current value on update
/// and start blank on create.
#[derive(InputObject, Clone, Default)]
pub struct ClientInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: MaybeUndefined<String>,
    pub phone: MaybeUndefined<String>,
    pub status: MaybeUndefined<ClientStatus>,
    pub assigned_manager_id: MaybeUndefined<ID>,
    pub notes: MaybeUndefined<String>,
    pub tags: Option<Vec<String>>,
}

impl ClientInput {
    pub fn apply(self, draft: &mut ClientDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        patch_text(&mut draft.company, self.company);
        patch_text(&mut draft.phone, self.phone);
        patch(&mut draft.status, self.status.map_value(Into::into));
        patch_id(&mut draft.assigned_manager_id, self.assigned_manager_id);
        patch_text(&mut draft.notes, self.notes);
        if let Some(tags) = self.tags {
            draft.tags = tags;
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct CampaignInput {
    pub name: Option<String>,
    pub client_id: MaybeUndefined<ID>,
    pub start_date: MaybeUndefined<NaiveDate>,
    pub end_date: MaybeUndefined<NaiveDate>,
    /// Raw amount as typed; parsed and checked on submit.
    pub budget: Option<String>,
    pub status: MaybeUndefined<CampaignStatus>,
    pub description: MaybeUndefined<String>,
}

impl CampaignInput {
    pub fn apply(self, draft: &mut CampaignDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        patch_id(&mut draft.client_id, self.client_id);
        patch(&mut draft.start_date, self.start_date);
        patch(&mut draft.end_date, self.end_date);
        if let Some(budget) = self.budget {
            draft.budget = budget;
        }
        patch(&mut draft.status, self.status.map_value(Into::into));
        patch_text(&mut draft.description, self.description);
    }
}

#[derive(InputObject, Clone, Default)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: MaybeUndefined<String>,
    pub due_date: MaybeUndefined<NaiveDate>,
    pub assigned_to: MaybeUndefined<ID>,
    pub related_client_id: MaybeUndefined<ID>,
    pub related_campaign_id: MaybeUndefined<ID>,
    pub priority: MaybeUndefined<TaskPriority>,
}

impl TaskInput {
    pub fn apply(self, draft: &mut TaskDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        patch_text(&mut draft.description, self.description);
        patch(&mut draft.due_date, self.due_date);
        patch_id(&mut draft.assigned_to, self.assigned_to);
        patch_id(&mut draft.related_client_id, self.related_client_id);
        patch_id(&mut draft.related_campaign_id, self.related_campaign_id);
        patch(&mut draft.priority, self.priority.map_value(Into::into));
    }
}

#[derive(InputObject, Clone, Default)]
pub struct UserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: MaybeUndefined<UserRole>,
    /// Only read when creating a user.
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl UserInput {
    pub fn apply(self, draft: &mut UserDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        patch(&mut draft.role, self.role.map_value(Into::into));
        if let Some(password) = self.password {
            draft.password = password;
        }
        if let Some(confirm) = self.confirm_password {
            draft.confirm_password = confirm;
        }
    }
}

#[derive(InputObject, Clone, Default)]
pub struct InteractionInput {
    pub client_id: MaybeUndefined<ID>,
    #[graphql(name = "type")]
    pub kind: MaybeUndefined<InteractionType>,
    pub date: MaybeUndefined<NaiveDate>,
    pub notes: Option<String>,
}

impl InteractionInput {
    pub fn apply(self, draft: &mut InteractionDraft) {
        patch_id(&mut draft.client_id, self.client_id);
        patch(&mut draft.kind, self.kind.map_value(Into::into));
        patch(&mut draft.date, self.date);
        if let Some(notes) = self.notes {
            draft.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use products_crm::forms::Draft;

    use super::*;

    #[test]
    fn page_arguments_are_clamped() {
        let query: ListQuery<ClientFilter, ClientSortKey> =
            list_query(ClientFilter::default(), None, Some(-3), Some(1_000));
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, MAX_PAGE_SIZE as usize);

        let query: ListQuery<ClientFilter, ClientSortKey> =
            list_query(ClientFilter::default(), None, None, None);
        assert_eq!(query.page_size, PAGE_SIZE);
    }

    #[test]
    fn undefined_keeps_and_null_clears() {
        let mut draft = TaskDraft::blank();
        draft.assigned_to = Some(RecordId::from("user1"));
        draft.related_client_id = Some(RecordId::from("client1"));
        TaskInput {
            title: Some("Call back".into()),
            related_client_id: MaybeUndefined::Null,
            ..TaskInput::default()
        }
        .apply(&mut draft);
        assert_eq!(draft.title, "Call back");
        assert_eq!(draft.assigned_to, Some(RecordId::from("user1")));
        assert_eq!(draft.related_client_id, None);
    }
}
