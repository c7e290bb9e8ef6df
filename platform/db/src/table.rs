use std::sync::Arc;

use entity::{
    RecordId, campaigns::Campaign, clients::Client, interactions::Interaction, tasks::Task,
    users::User,
};
use tokio::sync::RwLock;

use crate::{DbError, DbResult, SimulatedNetwork};

/// A record kept in a [`Table`].
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn id(&self) -> &RecordId;
}

impl Record for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Campaign {
    const KIND: &'static str = "campaign";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Interaction {
    const KIND: &'static str = "interaction";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Insertion-ordered rows of one record type. Operations that stand in for a
/// backend call pay a [`SimulatedNetwork`] round trip; `snapshot` and
/// `contains` are local reads.
pub struct Table<R> {
    rows: RwLock<Vec<R>>,
    network: Arc<SimulatedNetwork>,
}

impl<R: Record> Table<R> {
    pub fn new(rows: Vec<R>, network: Arc<SimulatedNetwork>) -> Self {
        Self {
            rows: RwLock::new(rows),
            network,
        }
    }

    pub async fn all(&self) -> DbResult<Vec<R>> {
        self.network.round_trip(R::KIND, "list").await?;
        Ok(self.rows.read().await.clone())
    }

    pub async fn find(&self, id: &RecordId) -> DbResult<R> {
        self.network.round_trip(R::KIND, "get").await?;
        self.rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<R>(id))
    }

    pub async fn insert(&self, record: R) -> DbResult<R> {
        self.network.round_trip(R::KIND, "create").await?;
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id() == record.id()) {
            return Err(DbError::DuplicateId {
                kind: R::KIND,
                id: record.id().to_string(),
            });
        }
        rows.push(record.clone());
        Ok(record)
    }

    /// Apply `change` to a copy of the row and store the copy only when the
    /// closure succeeds.
    pub async fn modify<F, E>(&self, id: &RecordId, change: F) -> Result<R, E>
    where
        F: FnOnce(&mut R) -> Result<(), E>,
        E: From<DbError>,
    {
        self.network.round_trip(R::KIND, "update").await?;
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| not_found::<R>(id))?;
        let mut updated = slot.clone();
        change(&mut updated)?;
        *slot = updated.clone();
        Ok(updated)
    }

    pub async fn snapshot(&self) -> Vec<R> {
        self.rows.read().await.clone()
    }

    pub async fn contains(&self, id: &RecordId) -> bool {
        self.rows.read().await.iter().any(|row| row.id() == id)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

fn not_found<R: Record>(id: &RecordId) -> DbError {
    DbError::NotFound {
        kind: R::KIND,
        id: id.to_string(),
    }
}
