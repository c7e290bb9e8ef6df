use std::collections::HashMap;

use entity::{RecordId, campaigns::Campaign, clients::Client, users::User};
use platform_db::MemoryStore;

/// Display names of the records other records point at. Sorting and text
/// search over a reference go through here instead of the raw id.
#[derive(Clone, Debug, Default)]
pub struct References {
    users: HashMap<RecordId, String>,
    clients: HashMap<RecordId, String>,
    campaigns: HashMap<RecordId, String>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(users: &[User], clients: &[Client], campaigns: &[Campaign]) -> Self {
        Self {
            users: users
                .iter()
                .map(|user| (user.id.clone(), user.name.clone()))
                .collect(),
            clients: clients
                .iter()
                .map(|client| (client.id.clone(), client.name.clone()))
                .collect(),
            campaigns: campaigns
                .iter()
                .map(|campaign| (campaign.id.clone(), campaign.name.clone()))
                .collect(),
        }
    }

    /// Resolve against the current contents of the store without paying a
    /// network round trip.
    pub async fn load(store: &MemoryStore) -> Self {
        let users = store.users().snapshot().await;
        let clients = store.clients().snapshot().await;
        let campaigns = store.campaigns().snapshot().await;
        Self::from_records(&users, &clients, &campaigns)
    }

    pub fn with_user(mut self, id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        self.users.insert(id.into(), name.into());
        self
    }

    pub fn with_client(mut self, id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        self.clients.insert(id.into(), name.into());
        self
    }

    pub fn with_campaign(mut self, id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        self.campaigns.insert(id.into(), name.into());
        self
    }

    pub fn user_name(&self, id: &RecordId) -> Option<&str> {
        self.users.get(id).map(String::as_str)
    }

    pub fn client_name(&self, id: &RecordId) -> Option<&str> {
        self.clients.get(id).map(String::as_str)
    }

    pub fn campaign_name(&self, id: &RecordId) -> Option<&str> {
        self.campaigns.get(id).map(String::as_str)
    }
}
