use std::sync::Arc;

use entity::{
    RecordId,
    clients::{Client, Status},
};
use platform_db::MemoryStore;
use tracing::{info, instrument};

use super::{DataAccess, StatusControl, already, check_reference};
use crate::{
    CrmError, CrmResult,
    forms::{ClientDraft, Draft, Mode, ValidationContext},
    listing::{ListPage, ListQuery, clients::{ClientFilter, ClientSortKey}, transform},
    references::References,
};

#[derive(Clone)]
pub struct ClientService {
    store: Arc<MemoryStore>,
}

impl ClientService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Soft-delete: the client becomes Inactive.
    #[instrument(name = "crm.clients.archive", skip(self), fields(client = %id))]
    pub async fn archive(&self, id: &RecordId) -> CrmResult<Client> {
        let client = self
            .store
            .clients()
            .modify(id, |client: &mut Client| {
                if client.status == Status::Inactive {
                    return Err(already("Client", &client.name, "inactive"));
                }
                client.status = Status::Inactive;
                Ok(())
            })
            .await?;
        info!("client archived");
        Ok(client)
    }
}

impl DataAccess for ClientService {
    type Record = Client;
    type Filter = ClientFilter;
    type Draft = ClientDraft;

    #[instrument(name = "crm.clients.list", skip_all, fields(page = query.page, sort = ?query.sort))]
    async fn list(
        &self,
        query: &ListQuery<ClientFilter, ClientSortKey>,
    ) -> CrmResult<ListPage<Client>> {
        let records = self.store.clients().all().await?;
        let refs = References::load(&self.store).await;
        Ok(transform(records, query, &refs))
    }

    #[instrument(name = "crm.clients.get", skip(self))]
    async fn get(&self, id: &RecordId) -> CrmResult<Client> {
        Ok(self.store.clients().find(id).await?)
    }

    #[instrument(name = "crm.clients.create", skip_all)]
    async fn create(&self, draft: &ClientDraft) -> CrmResult<Client> {
        let ctx = ValidationContext::now();
        let mut errors = draft.validate(Mode::Create, &ctx);
        check_reference(
            self.store.users(),
            draft.assigned_manager_id.as_ref(),
            &mut errors,
            "assignedManagerId",
            "Selected manager does not exist.",
        )
        .await;
        errors.into_result()?;
        let client = self.store.clients().insert(draft.build(None, &ctx)).await?;
        info!(client = %client.id, "client created");
        Ok(client)
    }

    #[instrument(name = "crm.clients.update", skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &ClientDraft) -> CrmResult<Client> {
        let ctx = ValidationContext::now();
        let mut errors = patch.validate(Mode::Edit, &ctx);
        check_reference(
            self.store.users(),
            patch.assigned_manager_id.as_ref(),
            &mut errors,
            "assignedManagerId",
            "Selected manager does not exist.",
        )
        .await;
        errors.into_result()?;
        self.store
            .clients()
            .modify(id, |client: &mut Client| {
                *client = patch.build(Some(&*client), &ctx);
                Ok::<(), CrmError>(())
            })
            .await
    }
}

impl StatusControl for ClientService {
    type Status = Status;

    #[instrument(name = "crm.clients.set_status", skip(self))]
    async fn set_status(&self, id: &RecordId, status: Status) -> CrmResult<Client> {
        self.store
            .clients()
            .modify(id, |client: &mut Client| {
                client.status = status;
                Ok::<(), CrmError>(())
            })
            .await
    }
}
