use std::sync::Arc;

use entity::{
    RecordId,
    users::{Status, User},
};
use platform_db::{MemoryStore, hash_password, verify_password};
use tracing::{info, instrument};

use super::{DataAccess, StatusControl};
use crate::{
    CrmError, CrmResult, FieldErrors,
    forms::{Draft, Mode, UserDraft, ValidationContext},
    listing::{ListPage, ListQuery, transform, users::{UserFilter, UserSortKey}},
    references::References,
};

#[derive(Clone)]
pub struct UserService {
    store: Arc<MemoryStore>,
}

impl UserService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Active users become Suspended and vice versa.
    #[instrument(name = "crm.users.toggle_status", skip(self), fields(user = %id))]
    pub async fn toggle_status(&self, id: &RecordId) -> CrmResult<User> {
        let user = self
            .store
            .users()
            .modify(id, |user: &mut User| {
                user.status = user.status.toggled();
                Ok::<(), CrmError>(())
            })
            .await?;
        info!(status = user.status.as_str(), "user status toggled");
        Ok(user)
    }

    /// Check a password against the stored hash. Users created from the seed
    /// have no password and never match.
    pub async fn check_password(&self, id: &RecordId, password: &str) -> bool {
        match self.store.password_hash(id).await {
            Some(hash) => verify_password(password, &hash),
            None => false,
        }
    }

    async fn check_email(&self, email: &str, except: Option<&RecordId>, errors: &mut FieldErrors) {
        if errors.contains("email") {
            return;
        }
        let wanted = email.trim().to_lowercase();
        let taken = self
            .store
            .users()
            .snapshot()
            .await
            .iter()
            .any(|user| Some(&user.id) != except && user.email.to_lowercase() == wanted);
        if taken {
            errors.insert("email", "A user with this email already exists.");
        }
    }
}

impl DataAccess for UserService {
    type Record = User;
    type Filter = UserFilter;
    type Draft = UserDraft;

    #[instrument(name = "crm.users.list", skip_all, fields(page = query.page, sort = ?query.sort))]
    async fn list(&self, query: &ListQuery<UserFilter, UserSortKey>) -> CrmResult<ListPage<User>> {
        let records = self.store.users().all().await?;
        Ok(transform(records, query, &References::new()))
    }

    #[instrument(name = "crm.users.get", skip(self))]
    async fn get(&self, id: &RecordId) -> CrmResult<User> {
        Ok(self.store.users().find(id).await?)
    }

    /// Stores the user and, beside it, an Argon2 hash of the password.
    #[instrument(name = "crm.users.create", skip_all)]
    async fn create(&self, draft: &UserDraft) -> CrmResult<User> {
        let ctx = ValidationContext::now();
        let mut errors = draft.validate(Mode::Create, &ctx);
        self.check_email(&draft.email, None, &mut errors).await;
        errors.into_result()?;
        let hash = hash_password(&draft.password)?;
        let user = self.store.users().insert(draft.build(None, &ctx)).await?;
        self.store.set_password_hash(&user.id, hash).await;
        info!(user = %user.id, role = user.role.as_str(), "user created");
        Ok(user)
    }

    #[instrument(name = "crm.users.update", skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &UserDraft) -> CrmResult<User> {
        let ctx = ValidationContext::now();
        let mut errors = patch.validate(Mode::Edit, &ctx);
        self.check_email(&patch.email, Some(id), &mut errors).await;
        errors.into_result()?;
        self.store
            .users()
            .modify(id, |user: &mut User| {
                *user = patch.build(Some(&*user), &ctx);
                Ok::<(), CrmError>(())
            })
            .await
    }
}

impl StatusControl for UserService {
    type Status = Status;

    #[instrument(name = "crm.users.set_status", skip(self))]
    async fn set_status(&self, id: &RecordId, status: Status) -> CrmResult<User> {
        self.store
            .users()
            .modify(id, |user: &mut User| {
                user.status = status;
                Ok::<(), CrmError>(())
            })
            .await
    }
}
