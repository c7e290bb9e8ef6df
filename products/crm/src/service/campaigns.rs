use std::sync::Arc;

use entity::{
    RecordId,
    campaigns::{Campaign, Status},
};
use platform_db::MemoryStore;
use tracing::{info, instrument};

use super::{DataAccess, StatusControl, already, check_reference};
use crate::{
    CrmError, CrmResult,
    forms::{CampaignDraft, Draft, Mode, ValidationContext},
    listing::{ListPage, ListQuery, campaigns::{CampaignFilter, CampaignSortKey}, transform},
    references::References,
};

#[derive(Clone)]
pub struct CampaignService {
    store: Arc<MemoryStore>,
}

impl CampaignService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Pause a running or planned campaign. Paused and completed campaigns
    /// cannot be archived.
    #[instrument(name = "crm.campaigns.archive", skip(self), fields(campaign = %id))]
    pub async fn archive(&self, id: &RecordId) -> CrmResult<Campaign> {
        let campaign = self
            .store
            .campaigns()
            .modify(id, |campaign: &mut Campaign| match campaign.status {
                Status::Paused => Err(already("Campaign", &campaign.name, "paused")),
                Status::Completed => Err(already("Campaign", &campaign.name, "completed")),
                Status::Planning | Status::Active => {
                    campaign.status = Status::Paused;
                    Ok(())
                }
            })
            .await?;
        info!("campaign archived");
        Ok(campaign)
    }

    pub async fn for_client(&self, client_id: &RecordId) -> CrmResult<Vec<Campaign>> {
        let campaigns = self.store.campaigns().all().await?;
        Ok(campaigns
            .into_iter()
            .filter(|campaign| &campaign.client_id == client_id)
            .collect())
    }
}

impl DataAccess for CampaignService {
    type Record = Campaign;
    type Filter = CampaignFilter;
    type Draft = CampaignDraft;

    #[instrument(name = "crm.campaigns.list", skip_all, fields(page = query.page, sort = ?query.sort))]
    async fn list(
        &self,
        query: &ListQuery<CampaignFilter, CampaignSortKey>,
    ) -> CrmResult<ListPage<Campaign>> {
        let records = self.store.campaigns().all().await?;
        let refs = References::load(&self.store).await;
        Ok(transform(records, query, &refs))
    }

    #[instrument(name = "crm.campaigns.get", skip(self))]
    async fn get(&self, id: &RecordId) -> CrmResult<Campaign> {
        Ok(self.store.campaigns().find(id).await?)
    }

    #[instrument(name = "crm.campaigns.create", skip_all)]
    async fn create(&self, draft: &CampaignDraft) -> CrmResult<Campaign> {
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
        let campaign = self
            .store
            .campaigns()
            .insert(draft.build(None, &ctx))
            .await?;
        info!(campaign = %campaign.id, "campaign created");
        Ok(campaign)
    }

    #[instrument(name = "crm.campaigns.update", skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &CampaignDraft) -> CrmResult<Campaign> {
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
        self.store
            .campaigns()
            .modify(id, |campaign: &mut Campaign| {
                *campaign = patch.build(Some(&*campaign), &ctx);
                Ok::<(), CrmError>(())
            })
            .await
    }
}

impl StatusControl for CampaignService {
    type Status = Status;

    #[instrument(name = "crm.campaigns.set_status", skip(self))]
    async fn set_status(&self, id: &RecordId, status: Status) -> CrmResult<Campaign> {
        self.store
            .campaigns()
            .modify(id, |campaign: &mut Campaign| {
                campaign.status = status;
                Ok::<(), CrmError>(())
            })
            .await
    }
}
