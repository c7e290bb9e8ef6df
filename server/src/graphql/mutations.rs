use std::future::Future;

use async_graphql::{Context, ID, Object, OutputType, Result};
use platform_api::FieldIssue;
use platform_db::Record;
use products_crm::{
    ConfirmationGate, CrmError, CrmResult, DataAccess, FormController, Notification,
    Notifications, StatusControl, ValidationContext,
    forms::{CampaignDraft, ClientDraft, Draft, InteractionDraft, TaskDraft, UserDraft},
};
use tracing::{debug, instrument};

use super::{
    crm, gql_error,
    inputs::{CampaignInput, ClientInput, InteractionInput, TaskInput, UserInput},
    types::{
        CampaignNode, CampaignStatus, ClientNode, ClientStatus, InteractionNode, Payload,
        TaskNode, TaskStatus, UserNode, UserStatus, field_issues, record_id,
    },
};

#[derive(Default)]
pub struct MutationRoot;

/// What a form or gate run left behind.
struct Outcome<R> {
    record: Option<R>,
    errors: Vec<FieldIssue>,
    notification: Option<Notification>,
}

impl<R> Outcome<R> {
    fn failed(title: &str, err: CrmError) -> Self {
        Outcome {
            record: None,
            errors: Vec::new(),
            notification: Some(Notification::error(title, err.to_string())),
        }
    }

    fn into_payload<T: OutputType + From<R>>(self) -> Payload<T> {
        Payload::new(self.record, self.errors, self.notification)
    }
}

/// Load the record a mutation acts on. An unknown id escapes as a GraphQL
/// error; any other failure comes back as a payload titled `failure`.
async fn load<S: DataAccess>(
    service: &S,
    id: ID,
    failure: &str,
) -> Result<Result<S::Record, Outcome<S::Record>>> {
    match service.get(&record_id(id)).await {
        Ok(record) => Ok(Ok(record)),
        Err(err @ CrmError::NotFound { .. }) => Err(gql_error(err)),
        Err(err) => Ok(Err(Outcome::failed(failure, err))),
    }
}

/// Drive one modal form submission: create when `original` is absent,
/// otherwise edit it with `draft`.
async fn submit<D, S>(backend: &S, original: Option<D::Record>, draft: D) -> Outcome<D::Record>
where
    D: Draft,
    S: DataAccess<Record = D::Record, Draft = D>,
{
    let mut form = FormController::<D>::new();
    match original {
        Some(record) => form.open_edit_with(record, draft),
        None => form.open_create_with(draft),
    }
    let mut notices = Notifications::new();
    let record = match form
        .submit(backend, &ValidationContext::now(), &mut notices, |record| {
            debug!(form = D::NOUN, id = %record.id(), "submission accepted")
        })
        .await
    {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(form = D::NOUN, error = %err, "submission rejected");
            None
        }
    };
    Outcome {
        record,
        errors: field_issues(form.errors()),
        notification: notices.drain().pop(),
    }
}

/// Open `gate` and confirm it straight away.
async fn confirm<R, F, Fut>(gate: ConfirmationGate, action: F) -> Outcome<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = CrmResult<R>>,
{
    gate.open();
    let mut notices = Notifications::new();
    let result = gate.confirm(&mut notices, action).await;
    let errors = match &result {
        Err(CrmError::Validation(errors)) => field_issues(errors),
        _ => Vec::new(),
    };
    Outcome {
        record: result.ok(),
        errors,
        notification: notices.drain().pop(),
    }
}

/// A direct status change. Unknown ids surface as a not-found error; other
/// failures come back in the payload.
async fn set_status<S: StatusControl>(
    service: &S,
    id: ID,
    status: S::Status,
) -> Result<Outcome<S::Record>> {
    match service.set_status(&record_id(id), status).await {
        Ok(record) => Ok(Outcome {
            record: Some(record),
            errors: Vec::new(),
            notification: None,
        }),
        Err(err @ CrmError::NotFound { .. }) => Err(gql_error(err)),
        Err(err) => Ok(Outcome::failed("Error Updating Status", err)),
    }
}

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.clients.create", skip_all)]
    async fn create_client(&self, ctx: &Context<'_>, input: ClientInput) -> Result<Payload<ClientNode>> {
        let service = crm(ctx)?.clients();
        let mut draft = ClientDraft::blank();
        input.apply(&mut draft);
        Ok(submit(&service, None, draft).await.into_payload())
    }

    #[instrument(name = "graphql.clients.update", skip(self, ctx, input))]
    async fn update_client(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: ClientInput,
    ) -> Result<Payload<ClientNode>> {
        let service = crm(ctx)?.clients();
        let client = match load(&service, id, "Error Updating Client").await? {
            Ok(client) => client,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let mut draft = ClientDraft::from_record(&client);
        input.apply(&mut draft);
        Ok(submit(&service, Some(client), draft).await.into_payload())
    }

    /// Set the client Inactive after confirmation.
    #[instrument(name = "graphql.clients.archive", skip(self, ctx))]
    async fn archive_client(&self, ctx: &Context<'_>, id: ID) -> Result<Payload<ClientNode>> {
        let service = crm(ctx)?.clients();
        let client = match load(&service, id, "Error Archiving Client").await? {
            Ok(client) => client,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let gate = ConfirmationGate::archive_client(&client);
        Ok(confirm(gate, || service.archive(&client.id)).await.into_payload())
    }

    #[instrument(name = "graphql.clients.set_status", skip(self, ctx))]
    async fn set_client_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: ClientStatus,
    ) -> Result<Payload<ClientNode>> {
        let service = crm(ctx)?.clients();
        Ok(set_status(&service, id, status.into()).await?.into_payload())
    }

    #[instrument(name = "graphql.campaigns.create", skip_all)]
    async fn create_campaign(
        &self,
        ctx: &Context<'_>,
        input: CampaignInput,
    ) -> Result<Payload<CampaignNode>> {
        let service = crm(ctx)?.campaigns();
        let mut draft = CampaignDraft::blank();
        input.apply(&mut draft);
        Ok(submit(&service, None, draft).await.into_payload())
    }

    #[instrument(name = "graphql.campaigns.update", skip(self, ctx, input))]
    async fn update_campaign(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: CampaignInput,
    ) -> Result<Payload<CampaignNode>> {
        let service = crm(ctx)?.campaigns();
        let campaign = match load(&service, id, "Error Updating Campaign").await? {
            Ok(campaign) => campaign,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let mut draft = CampaignDraft::from_record(&campaign);
        input.apply(&mut draft);
        Ok(submit(&service, Some(campaign), draft).await.into_payload())
    }

    /// Pause the campaign after confirmation.
    #[instrument(name = "graphql.campaigns.archive", skip(self, ctx))]
    async fn archive_campaign(&self, ctx: &Context<'_>, id: ID) -> Result<Payload<CampaignNode>> {
        let service = crm(ctx)?.campaigns();
        let campaign = match load(&service, id, "Error Archiving Campaign").await? {
            Ok(campaign) => campaign,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let gate = ConfirmationGate::archive_campaign(&campaign);
        Ok(confirm(gate, || service.archive(&campaign.id))
            .await
            .into_payload())
    }

    #[instrument(name = "graphql.campaigns.set_status", skip(self, ctx))]
    async fn set_campaign_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: CampaignStatus,
    ) -> Result<Payload<CampaignNode>> {
        let service = crm(ctx)?.campaigns();
        Ok(set_status(&service, id, status.into()).await?.into_payload())
    }

    #[instrument(name = "graphql.tasks.create", skip_all)]
    async fn create_task(&self, ctx: &Context<'_>, input: TaskInput) -> Result<Payload<TaskNode>> {
        let service = crm(ctx)?.tasks();
        let mut draft = TaskDraft::blank();
        input.apply(&mut draft);
        Ok(submit(&service, None, draft).await.into_payload())
    }

    #[instrument(name = "graphql.tasks.update", skip(self, ctx, input))]
    async fn update_task(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: TaskInput,
    ) -> Result<Payload<TaskNode>> {
        let service = crm(ctx)?.tasks();
        let task = match load(&service, id, "Error Updating Task").await? {
            Ok(task) => task,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let mut draft = TaskDraft::from_record(&task);
        input.apply(&mut draft);
        Ok(submit(&service, Some(task), draft).await.into_payload())
    }

    #[instrument(name = "graphql.tasks.toggle", skip(self, ctx))]
    async fn toggle_task_completed(&self, ctx: &Context<'_>, id: ID) -> Result<Payload<TaskNode>> {
        let mut notices = Notifications::new();
        let result = crm(ctx)?
            .tasks()
            .toggle_completed(&record_id(id), &mut notices)
            .await;
        if let Err(err @ CrmError::NotFound { .. }) = result {
            return Err(gql_error(err));
        }
        Ok(Payload::new(result.ok(), Vec::new(), notices.drain().pop()))
    }

    #[instrument(name = "graphql.tasks.set_status", skip(self, ctx))]
    async fn set_task_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: TaskStatus,
    ) -> Result<Payload<TaskNode>> {
        let service = crm(ctx)?.tasks();
        Ok(set_status(&service, id, status.into()).await?.into_payload())
    }

    #[instrument(name = "graphql.users.create", skip_all)]
    async fn create_user(&self, ctx: &Context<'_>, input: UserInput) -> Result<Payload<UserNode>> {
        let service = crm(ctx)?.users();
        let mut draft = UserDraft::blank();
        input.apply(&mut draft);
        Ok(submit(&service, None, draft).await.into_payload())
    }

    #[instrument(name = "graphql.users.update", skip(self, ctx, input))]
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UserInput,
    ) -> Result<Payload<UserNode>> {
        let service = crm(ctx)?.users();
        let user = match load(&service, id, "Error Updating User").await? {
            Ok(user) => user,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let mut draft = UserDraft::from_record(&user);
        input.apply(&mut draft);
        Ok(submit(&service, Some(user), draft).await.into_payload())
    }

    /// Suspend an active user or reactivate a suspended one, after
    /// confirmation.
    #[instrument(name = "graphql.users.toggle", skip(self, ctx))]
    async fn toggle_user_status(&self, ctx: &Context<'_>, id: ID) -> Result<Payload<UserNode>> {
        let service = crm(ctx)?.users();
        let user = match load(&service, id, "Error Updating User").await? {
            Ok(user) => user,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let gate = ConfirmationGate::toggle_user(&user);
        Ok(confirm(gate, || service.toggle_status(&user.id))
            .await
            .into_payload())
    }

    #[instrument(name = "graphql.users.set_status", skip(self, ctx))]
    async fn set_user_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: UserStatus,
    ) -> Result<Payload<UserNode>> {
        let service = crm(ctx)?.users();
        Ok(set_status(&service, id, status.into()).await?.into_payload())
    }

    /// Log an interaction. The date defaults to today.
    #[instrument(name = "graphql.interactions.create", skip_all)]
    async fn create_interaction(
        &self,
        ctx: &Context<'_>,
        input: InteractionInput,
    ) -> Result<Payload<InteractionNode>> {
        let service = crm(ctx)?.interactions();
        let mut draft = InteractionDraft {
            date: Some(ValidationContext::now().today()),
            ..InteractionDraft::blank()
        };
        input.apply(&mut draft);
        Ok(submit(&service, None, draft).await.into_payload())
    }

    #[instrument(name = "graphql.interactions.update", skip(self, ctx, input))]
    async fn update_interaction(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: InteractionInput,
    ) -> Result<Payload<InteractionNode>> {
        let service = crm(ctx)?.interactions();
        let interaction = match load(&service, id, "Error Updating Interaction").await? {
            Ok(interaction) => interaction,
            Err(outcome) => return Ok(outcome.into_payload()),
        };
        let mut draft = InteractionDraft::from_record(&interaction);
        input.apply(&mut draft);
        Ok(submit(&service, Some(interaction), draft)
            .await
            .into_payload())
    }
}
