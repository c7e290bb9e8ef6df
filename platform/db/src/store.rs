use std::{collections::HashMap, sync::Arc};

use entity::{
    RecordId, campaigns::Campaign, clients::Client, interactions::Interaction, tasks::Task,
    users::User,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::{SeedRecords, SimulatedNetwork, StoreSettings, Table, seed_records};

/// Process-wide record store, built once and shared by reference with every
/// view and service.
pub struct MemoryStore {
    network: Arc<SimulatedNetwork>,
    users: Table<User>,
    clients: Table<Client>,
    campaigns: Table<Campaign>,
    tasks: Table<Task>,
    interactions: Table<Interaction>,
    password_hashes: RwLock<HashMap<RecordId, String>>,
}

/// Row counts per table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub clients: usize,
    pub campaigns: usize,
    pub tasks: usize,
    pub interactions: usize,
}

impl MemoryStore {
    pub fn from_settings(settings: &StoreSettings) -> Self {
        let network = Arc::new(SimulatedNetwork::from_settings(settings));
        let records = if settings.seed {
            seed_records()
        } else {
            SeedRecords {
                users: Vec::new(),
                clients: Vec::new(),
                campaigns: Vec::new(),
                tasks: Vec::new(),
                interactions: Vec::new(),
            }
        };
        info!(
            seeded = settings.seed,
            latency_ms = settings.latency_ms,
            jitter_ms = settings.jitter_ms,
            failure_rate = settings.failure_rate,
            "memory store initialized"
        );
        Self::with_records(records, network)
    }

    pub fn with_records(records: SeedRecords, network: Arc<SimulatedNetwork>) -> Self {
        Self {
            users: Table::new(records.users, network.clone()),
            clients: Table::new(records.clients, network.clone()),
            campaigns: Table::new(records.campaigns, network.clone()),
            tasks: Table::new(records.tasks, network.clone()),
            interactions: Table::new(records.interactions, network.clone()),
            network,
            password_hashes: RwLock::new(HashMap::new()),
        }
    }

    /// Seeded store with no latency and no failures.
    pub fn instant() -> Self {
        Self::from_settings(&StoreSettings::instant())
    }

    pub fn network(&self) -> &SimulatedNetwork {
        &self.network
    }

    pub fn users(&self) -> &Table<User> {
        &self.users
    }

    pub fn clients(&self) -> &Table<Client> {
        &self.clients
    }

    pub fn campaigns(&self) -> &Table<Campaign> {
        &self.campaigns
    }

    pub fn tasks(&self) -> &Table<Task> {
        &self.tasks
    }

    pub fn interactions(&self) -> &Table<Interaction> {
        &self.interactions
    }

    pub async fn set_password_hash(&self, user_id: &RecordId, hash: String) {
        self.password_hashes
            .write()
            .await
            .insert(user_id.clone(), hash);
    }

    pub async fn password_hash(&self, user_id: &RecordId) -> Option<String> {
        self.password_hashes.read().await.get(user_id).cloned()
    }

    pub async fn summary(&self) -> SeedSummary {
        SeedSummary {
            users: self.users.len().await,
            clients: self.clients.len().await,
            campaigns: self.campaigns.len().await,
            tasks: self.tasks.len().await,
            interactions: self.interactions.len().await,
        }
    }
}
