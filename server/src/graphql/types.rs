use async_graphql::{Enum, ID, OutputType, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use entity::{
    RecordId,
    campaigns::{self, Campaign},
    clients::{self, Client},
    interactions::{self, Interaction},
    tasks::{self, Task},
    users::{self, User},
};
use platform_api::FieldIssue;
use products_crm::{
    FieldErrors, Notification,
    dashboard::{ClientOverview, DashboardSummary},
    listing::{ListPage, tasks::Completion},
    notify::Level,
};

pub fn node_id(id: &RecordId) -> ID {
    ID::from(id.to_string())
}

pub fn record_id(id: ID) -> RecordId {
    RecordId::new(id.0)
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClientStatus {
    Lead,
    Active,
    Inactive,
}

impl From<clients::Status> for ClientStatus {
    fn from(value: clients::Status) -> Self {
        match value {
            clients::Status::Lead => Self::Lead,
            clients::Status::Active => Self::Active,
            clients::Status::Inactive => Self::Inactive,
        }
    }
}

impl From<ClientStatus> for clients::Status {
    fn from(value: ClientStatus) -> Self {
        match value {
            ClientStatus::Lead => Self::Lead,
            ClientStatus::Active => Self::Active,
            ClientStatus::Inactive => Self::Inactive,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    Planning,
    Active,
    Paused,
    Completed,
}

impl From<campaigns::Status> for CampaignStatus {
    fn from(value: campaigns::Status) -> Self {
        match value {
            campaigns::Status::Planning => Self::Planning,
            campaigns::Status::Active => Self::Active,
            campaigns::Status::Paused => Self::Paused,
            campaigns::Status::Completed => Self::Completed,
        }
    }
}

impl From<CampaignStatus> for campaigns::Status {
    fn from(value: CampaignStatus) -> Self {
        match value {
            CampaignStatus::Planning => Self::Planning,
            CampaignStatus::Active => Self::Active,
            CampaignStatus::Paused => Self::Paused,
            CampaignStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl From<tasks::Priority> for TaskPriority {
    fn from(value: tasks::Priority) -> Self {
        match value {
            tasks::Priority::Low => Self::Low,
            tasks::Priority::Medium => Self::Medium,
            tasks::Priority::High => Self::High,
        }
    }
}

impl From<TaskPriority> for tasks::Priority {
    fn from(value: TaskPriority) -> Self {
        match value {
            TaskPriority::Low => Self::Low,
            TaskPriority::Medium => Self::Medium,
            TaskPriority::High => Self::High,
        }
    }
}

/// A task's status is whether it is done.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaskStatus {
    Completed,
    Pending,
}

impl From<TaskStatus> for Completion {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Completed => Completion::Completed,
            TaskStatus::Pending => Completion::Pending,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserRole {
    Admin,
    Manager,
}

impl From<users::Role> for UserRole {
    fn from(value: users::Role) -> Self {
        match value {
            users::Role::Admin => Self::Admin,
            users::Role::Manager => Self::Manager,
        }
    }
}

impl From<UserRole> for users::Role {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Admin => Self::Admin,
            UserRole::Manager => Self::Manager,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum UserStatus {
    Active,
    Suspended,
}

impl From<users::Status> for UserStatus {
    fn from(value: users::Status) -> Self {
        match value {
            users::Status::Active => Self::Active,
            users::Status::Suspended => Self::Suspended,
        }
    }
}

impl From<UserStatus> for users::Status {
    fn from(value: UserStatus) -> Self {
        match value {
            UserStatus::Active => Self::Active,
            UserStatus::Suspended => Self::Suspended,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum InteractionType {
    Email,
    Call,
    Meeting,
    Note,
}

impl From<interactions::Kind> for InteractionType {
    fn from(value: interactions::Kind) -> Self {
        match value {
            interactions::Kind::Email => Self::Email,
            interactions::Kind::Call => Self::Call,
            interactions::Kind::Meeting => Self::Meeting,
            interactions::Kind::Note => Self::Note,
        }
    }
}

impl From<InteractionType> for interactions::Kind {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Email => Self::Email,
            InteractionType::Call => Self::Call,
            InteractionType::Meeting => Self::Meeting,
            InteractionType::Note => Self::Note,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Client")]
pub struct ClientNode {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: ClientStatus,
    pub last_interaction: NaiveDate,
    pub assigned_manager_id: Option<ID>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl From<Client> for ClientNode {
    fn from(model: Client) -> Self {
        Self {
            id: node_id(&model.id),
            name: model.name,
            email: model.email,
            company: model.company,
            status: model.status.into(),
            last_interaction: model.last_interaction,
            assigned_manager_id: model.assigned_manager_id.as_ref().map(node_id),
            phone: model.phone,
            notes: model.notes,
            tags: model.tags,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Campaign")]
pub struct CampaignNode {
    pub id: ID,
    pub name: String,
    pub client_id: ID,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub status: CampaignStatus,
    pub description: Option<String>,
}

impl From<Campaign> for CampaignNode {
    fn from(model: Campaign) -> Self {
        Self {
            id: node_id(&model.id),
            name: model.name,
            client_id: node_id(&model.client_id),
            start_date: model.start_date,
            end_date: model.end_date,
            budget: model.budget,
            status: model.status.into(),
            description: model.description,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Task")]
pub struct TaskNode {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub assigned_to: Option<ID>,
    pub related_client_id: Option<ID>,
    pub related_campaign_id: Option<ID>,
    pub priority: TaskPriority,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskNode {
    fn from(model: Task) -> Self {
        Self {
            id: node_id(&model.id),
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            assigned_to: model.assigned_to.as_ref().map(node_id),
            related_client_id: model.related_client_id.as_ref().map(node_id),
            related_campaign_id: model.related_campaign_id.as_ref().map(node_id),
            priority: model.priority.into(),
            is_completed: model.is_completed,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "User")]
pub struct UserNode {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl From<User> for UserNode {
    fn from(model: User) -> Self {
        Self {
            id: node_id(&model.id),
            name: model.name,
            email: model.email,
            role: model.role.into(),
            status: model.status.into(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Interaction")]
pub struct InteractionNode {
    pub id: ID,
    pub client_id: ID,
    pub date: NaiveDate,
    #[graphql(name = "type")]
    pub kind: InteractionType,
    pub notes: String,
}

impl From<Interaction> for InteractionNode {
    fn from(model: Interaction) -> Self {
        Self {
            id: node_id(&model.id),
            client_id: node_id(&model.client_id),
            date: model.date,
            kind: model.kind.into(),
            notes: model.notes,
        }
    }
}

/// One page of a filtered, sorted list.
#[derive(Clone, Debug, SimpleObject)]
#[graphql(concrete(name = "ClientPage", params(ClientNode)))]
#[graphql(concrete(name = "CampaignPage", params(CampaignNode)))]
#[graphql(concrete(name = "TaskPage", params(TaskNode)))]
#[graphql(concrete(name = "UserPage", params(UserNode)))]
#[graphql(concrete(name = "InteractionPage", params(InteractionNode)))]
pub struct Page<T: OutputType> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T: OutputType> Page<T> {
    pub fn from_list<R>(list: ListPage<R>) -> Self
    where
        T: From<R>,
    {
        let has_next = list.has_next();
        let has_previous = list.has_previous();
        Self {
            total: list.total as u64,
            page: list.page as u64,
            page_size: list.page_size as u64,
            total_pages: list.total_pages as u64,
            has_next,
            has_previous,
            items: list.items.into_iter().map(T::from).collect(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Notification")]
pub struct NotificationNode {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl From<Notification> for NotificationNode {
    fn from(notice: Notification) -> Self {
        Self {
            level: match notice.level {
                Level::Success => NotificationLevel::Success,
                Level::Error => NotificationLevel::Error,
            },
            title: notice.title,
            description: notice.description,
        }
    }
}

pub fn field_issues(errors: &FieldErrors) -> Vec<FieldIssue> {
    errors
        .iter()
        .map(|(field, message)| FieldIssue::new(field, message))
        .collect()
}

/// Result of a create, update or status mutation. `record` is set only when
/// the write went through; otherwise `errors` and/or `notification` say why.
#[derive(Clone, Debug, SimpleObject)]
#[graphql(concrete(name = "ClientPayload", params(ClientNode)))]
#[graphql(concrete(name = "CampaignPayload", params(CampaignNode)))]
#[graphql(concrete(name = "TaskPayload", params(TaskNode)))]
#[graphql(concrete(name = "UserPayload", params(UserNode)))]
#[graphql(concrete(name = "InteractionPayload", params(InteractionNode)))]
pub struct Payload<T: OutputType> {
    pub ok: bool,
    pub record: Option<T>,
    pub errors: Vec<FieldIssue>,
    pub notification: Option<NotificationNode>,
}

impl<T: OutputType> Payload<T> {
    pub fn new<R>(
        record: Option<R>,
        errors: Vec<FieldIssue>,
        notification: Option<Notification>,
    ) -> Self
    where
        T: From<R>,
    {
        Self {
            ok: record.is_some(),
            record: record.map(T::from),
            errors,
            notification: notification.map(NotificationNode::from),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Dashboard")]
pub struct DashboardNode {
    pub total_clients: u64,
    pub active_campaigns: u64,
    pub upcoming_tasks: u64,
    pub recent_interactions: Vec<InteractionNode>,
}

impl From<DashboardSummary> for DashboardNode {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_clients: summary.total_clients as u64,
            active_campaigns: summary.active_campaigns as u64,
            upcoming_tasks: summary.upcoming_tasks as u64,
            recent_interactions: summary
                .recent_interactions
                .into_iter()
                .map(InteractionNode::from)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "ClientOverview")]
pub struct ClientOverviewNode {
    pub client: ClientNode,
    pub manager: Option<UserNode>,
    pub interactions: Vec<InteractionNode>,
    pub campaigns: Vec<CampaignNode>,
    pub tasks: Vec<TaskNode>,
}

impl From<ClientOverview> for ClientOverviewNode {
    fn from(view: ClientOverview) -> Self {
        Self {
            client: view.client.into(),
            manager: view.manager.map(UserNode::from),
            interactions: view.interactions.into_iter().map(Into::into).collect(),
            campaigns: view.campaigns.into_iter().map(Into::into).collect(),
            tasks: view.tasks.into_iter().map(Into::into).collect(),
        }
    }
}
