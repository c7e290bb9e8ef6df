use entity::{
    RecordId,
    campaigns::{Campaign, Status},
};

use super::{Choice, DateRange, Filter, SortValue, Sortable, TextSearch};
use crate::references::References;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignFilter {
    pub client: Choice<RecordId>,
    pub status: Choice<Status>,
    /// Applied to the whole campaign span.
    pub dates: DateRange,
    pub search: TextSearch,
}

impl Filter<Campaign> for CampaignFilter {
    fn matches(&self, campaign: &Campaign, _refs: &References) -> bool {
        self.client.admits(&campaign.client_id)
            && self.status.admits(&campaign.status)
            && self
                .dates
                .contains_span(campaign.start_date, campaign.end_date)
            && self.search.matches(&campaign.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignSortKey {
    Name,
    Client,
    StartDate,
    EndDate,
    Budget,
    Status,
}

impl Sortable for Campaign {
    type Key = CampaignSortKey;

    fn sort_value(&self, key: CampaignSortKey, refs: &References) -> Option<SortValue> {
        match key {
            CampaignSortKey::Name => Some(SortValue::text(&self.name)),
            CampaignSortKey::Client => refs.client_name(&self.client_id).map(SortValue::text),
            CampaignSortKey::StartDate => Some(SortValue::Date(self.start_date)),
            CampaignSortKey::EndDate => Some(SortValue::Date(self.end_date)),
            CampaignSortKey::Budget => Some(SortValue::Number(self.budget)),
            CampaignSortKey::Status => Some(SortValue::text(self.status.as_str())),
        }
    }
}
