use entity::{
    RecordId,
    clients::{Client, Status},
};

use super::{Choice, Filter, SortValue, Sortable, TextSearch};
use crate::references::References;

/// Client list filters: status, manager and a search over name and company.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientFilter {
    pub status: Choice<Status>,
    pub manager: Choice<RecordId>,
    pub search: TextSearch,
}

impl Filter<Client> for ClientFilter {
    fn matches(&self, client: &Client, _refs: &References) -> bool {
        self.status.admits(&client.status)
            && self.manager.admits_opt(client.assigned_manager_id.as_ref())
            && self
                .search
                .matches_any([Some(client.name.as_str()), Some(client.company.as_str())])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientSortKey {
    Name,
    Email,
    Company,
    Status,
    LastInteraction,
    Manager,
}

impl Sortable for Client {
    type Key = ClientSortKey;

    fn sort_value(&self, key: ClientSortKey, refs: &References) -> Option<SortValue> {
        match key {
            ClientSortKey::Name => Some(SortValue::text(&self.name)),
            ClientSortKey::Email => Some(SortValue::text(&self.email)),
            ClientSortKey::Company => Some(SortValue::text(&self.company)),
            ClientSortKey::Status => Some(SortValue::text(self.status.as_str())),
            ClientSortKey::LastInteraction => Some(SortValue::Date(self.last_interaction)),
            ClientSortKey::Manager => self
                .assigned_manager_id
                .as_ref()
                .and_then(|id| refs.user_name(id))
                .map(SortValue::text),
        }
    }
}
