//! Per-entity data access over the shared [`MemoryStore`].
//!
//! Every service re-validates what it is handed and checks that referenced
//! records exist before anything is written.

mod campaigns;
mod clients;
mod interactions;
mod tasks;
mod users;

use std::{fmt::Debug, future::Future, sync::Arc};

use chrono::NaiveDate;
use entity::{RecordId, clients::Client};
use platform_db::{MemoryStore, Record};
use tracing::instrument;

use crate::{
    CrmError, CrmResult, FieldErrors,
    dashboard::{self, ClientOverview, DashboardSummary},
    forms::Draft,
    listing::{Filter, ListPage, ListQuery, Sortable},
    references::References,
};

pub use campaigns::CampaignService;
pub use clients::ClientService;
pub use interactions::InteractionService;
pub use tasks::TaskService;
pub use users::UserService;

/// list / get / create / update for one record type.
pub trait DataAccess: Send + Sync {
    type Record: Record + Sortable + Debug;
    type Filter: Filter<Self::Record> + Default + Clone + Send + Sync;
    type Draft: Draft<Record = Self::Record>;

    fn list(
        &self,
        query: &ListQuery<Self::Filter, <Self::Record as Sortable>::Key>,
    ) -> impl Future<Output = CrmResult<ListPage<Self::Record>>> + Send;

    fn get(&self, id: &RecordId) -> impl Future<Output = CrmResult<Self::Record>> + Send;

    fn create(&self, draft: &Self::Draft) -> impl Future<Output = CrmResult<Self::Record>> + Send;

    fn update(
        &self,
        id: &RecordId,
        patch: &Self::Draft,
    ) -> impl Future<Output = CrmResult<Self::Record>> + Send;
}

/// Records with a soft status that can be set directly.
pub trait StatusControl: DataAccess {
    type Status: Copy + Debug + Send + Sync;

    fn set_status(
        &self,
        id: &RecordId,
        status: Self::Status,
    ) -> impl Future<Output = CrmResult<Self::Record>> + Send;
}

/// Entry point to the services. Cloning is cheap; every clone shares the
/// same store.
#[derive(Clone)]
pub struct CrmService {
    store: Arc<MemoryStore>,
}

impl CrmService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn clients(&self) -> ClientService {
        ClientService::new(self.store.clone())
    }

    pub fn campaigns(&self) -> CampaignService {
        CampaignService::new(self.store.clone())
    }

    pub fn tasks(&self) -> TaskService {
        TaskService::new(self.store.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn interactions(&self) -> InteractionService {
        InteractionService::new(self.store.clone())
    }

    pub async fn references(&self) -> References {
        References::load(&self.store).await
    }

    #[instrument(name = "crm.dashboard", skip(self))]
    pub async fn dashboard(&self, today: NaiveDate) -> CrmResult<DashboardSummary> {
        let clients = self.store.clients().all().await?;
        let campaigns = self.store.campaigns().all().await?;
        let tasks = self.store.tasks().all().await?;
        let interactions = self.store.interactions().all().await?;
        Ok(dashboard::summarize(
            &clients,
            &campaigns,
            &tasks,
            interactions,
            today,
        ))
    }

    #[instrument(name = "crm.clients.overview", skip(self), fields(client = %id))]
    pub async fn client_overview(&self, id: &RecordId) -> CrmResult<ClientOverview> {
        let client: Client = self.store.clients().find(id).await?;
        let manager = match &client.assigned_manager_id {
            Some(manager_id) => self
                .store
                .users()
                .snapshot()
                .await
                .into_iter()
                .find(|user| &user.id == manager_id),
            None => None,
        };
        let interactions = self.store.interactions().all().await?;
        let campaigns = self.store.campaigns().all().await?;
        let tasks = self.store.tasks().all().await?;
        Ok(dashboard::overview(
            client,
            manager,
            interactions,
            campaigns,
            tasks,
        ))
    }
}

/// Add a field error when `id` is set but missing from `table`.
pub(crate) async fn check_reference<R: Record>(
    table: &platform_db::Table<R>,
    id: Option<&RecordId>,
    errors: &mut FieldErrors,
    field: &'static str,
    message: &str,
) {
    if let Some(id) = id {
        if !table.contains(id).await {
            errors.insert(field, message);
        }
    }
}

pub(crate) fn already(kind: &str, name: &str, state: &str) -> CrmError {
    CrmError::InvalidTransition(format!("{} {} is already {}", kind, name, state))
}
