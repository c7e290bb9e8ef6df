use std::sync::Arc;

use entity::{RecordId, clients::Client, interactions::Interaction};
use platform_db::MemoryStore;
use tracing::{info, instrument, warn};

use super::{DataAccess, check_reference};
use crate::{
    CrmError, CrmResult,
    forms::{Draft, InteractionDraft, Mode, ValidationContext},
    listing::{
        ListPage, ListQuery, Sort, filter_records,
        interactions::{InteractionFilter, InteractionSortKey},
        sort_records, transform,
    },
    references::References,
};

#[derive(Clone)]
pub struct InteractionService {
    store: Arc<MemoryStore>,
}

impl InteractionService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// A client's log, newest first.
    pub async fn for_client(&self, client_id: &RecordId) -> CrmResult<Vec<Interaction>> {
        let filter = InteractionFilter::for_client(client_id.clone());
        let refs = References::new();
        let records = self.store.interactions().all().await?;
        Ok(sort_records(
            filter_records(records, &filter, &refs),
            Sort::desc(InteractionSortKey::Date),
            &refs,
        ))
    }

    /// Move the client's last-interaction date forward when `interaction`
    /// is newer. A failure here does not undo the logged interaction.
    async fn touch_client(&self, interaction: &Interaction) {
        let date = interaction.date;
        let result = self
            .store
            .clients()
            .modify(&interaction.client_id, |client: &mut Client| {
                if date > client.last_interaction {
                    client.last_interaction = date;
                }
                Ok::<(), CrmError>(())
            })
            .await;
        if let Err(err) = result {
            warn!(client = %interaction.client_id, error = %err, "last interaction not updated");
        }
    }
}

impl DataAccess for InteractionService {
    type Record = Interaction;
    type Filter = InteractionFilter;
    type Draft = InteractionDraft;

    #[instrument(name = "crm.interactions.list", skip_all, fields(page = query.page, sort = ?query.sort))]
    async fn list(
        &self,
        query: &ListQuery<InteractionFilter, InteractionSortKey>,
    ) -> CrmResult<ListPage<Interaction>> {
        let records = self.store.interactions().all().await?;
        Ok(transform(records, query, &References::new()))
    }

    #[instrument(name = "crm.interactions.get", skip(self))]
    async fn get(&self, id: &RecordId) -> CrmResult<Interaction> {
        Ok(self.store.interactions().find(id).await?)
    }

    #[instrument(name = "crm.interactions.create", skip_all)]
    async fn create(&self, draft: &InteractionDraft) -> CrmResult<Interaction> {
        let ctx = ValidationContext::now();
        let mut errors = draft.validate(Mode::Create, &ctx);
        check_reference(
            self.store.clients(),
            draft.client_id.as_ref(),
            &mut errors,
            "clientId",
            "Selected client does not exist.",
        )
        .await;
        errors.into_result()?;
        let interaction = self
            .store
            .interactions()
            .insert(draft.build(None, &ctx))
            .await?;
        self.touch_client(&interaction).await;
        info!(interaction = %interaction.id, client = %interaction.client_id, "interaction logged");
        Ok(interaction)
    }

    #[instrument(name = "crm.interactions.update", skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &InteractionDraft) -> CrmResult<Interaction> {
        let ctx = ValidationContext::now();
        let mut errors = patch.validate(Mode::Edit, &ctx);
        check_reference(
            self.store.clients(),
            patch.client_id.as_ref(),
            &mut errors,
            "clientId",
            "Selected client does not exist.",
        )
        .await;
        errors.into_result()?;
        let interaction = self
            .store
            .interactions()
            .modify(id, |interaction: &mut Interaction| {
                *interaction = patch.build(Some(&*interaction), &ctx);
                Ok::<(), CrmError>(())
            })
            .await?;
        self.touch_client(&interaction).await;
        Ok(interaction)
    }
}
