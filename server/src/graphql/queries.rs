use async_graphql::{Context, ID, Object, Result, SimpleObject};
use chrono::{NaiveDate, Utc};
use products_crm::{
    DataAccess,
    listing::{
        Sort, campaigns::CampaignFilter, clients::ClientFilter, interactions::InteractionFilter,
        tasks::TaskFilter, users::UserFilter,
    },
};
use tracing::instrument;

use super::{
    crm, gql_error,
    inputs::{
        CampaignFilterInput, CampaignSortInput, ClientFilterInput, ClientSortInput,
        InteractionFilterInput, InteractionSortInput, TaskFilterInput, TaskSortInput,
        UserFilterInput, UserSortInput, list_query,
    },
    types::{
        CampaignNode, ClientNode, ClientOverviewNode, DashboardNode, InteractionNode, Page,
        TaskNode, UserNode, record_id,
    },
};

#[derive(Default)]
pub struct QueryRoot;

#[derive(Clone, Debug, SimpleObject)]
pub struct HealthPayload {
    pub ok: bool,
}

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self) -> HealthPayload {
        HealthPayload { ok: true }
    }

    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    #[instrument(name = "graphql.clients", skip_all)]
    async fn clients(
        &self,
        ctx: &Context<'_>,
        filter: Option<ClientFilterInput>,
        sort: Option<ClientSortInput>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<ClientNode>> {
        let query = list_query(
            ClientFilter::from(filter.unwrap_or_default()),
            sort.map(Sort::from),
            page,
            page_size,
        );
        let list = crm(ctx)?.clients().list(&query).await.map_err(gql_error)?;
        Ok(Page::from_list(list))
    }

    #[instrument(name = "graphql.client", skip(self, ctx))]
    async fn client(&self, ctx: &Context<'_>, id: ID) -> Result<ClientNode> {
        let client = crm(ctx)?
            .clients()
            .get(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(client.into())
    }

    #[instrument(name = "graphql.campaigns", skip_all)]
    async fn campaigns(
        &self,
        ctx: &Context<'_>,
        filter: Option<CampaignFilterInput>,
        sort: Option<CampaignSortInput>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<CampaignNode>> {
        let query = list_query(
            CampaignFilter::from(filter.unwrap_or_default()),
            sort.map(Sort::from),
            page,
            page_size,
        );
        let list = crm(ctx)?
            .campaigns()
            .list(&query)
            .await
            .map_err(gql_error)?;
        Ok(Page::from_list(list))
    }

    #[instrument(name = "graphql.campaign", skip(self, ctx))]
    async fn campaign(&self, ctx: &Context<'_>, id: ID) -> Result<CampaignNode> {
        let campaign = crm(ctx)?
            .campaigns()
            .get(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(campaign.into())
    }

    #[instrument(name = "graphql.tasks", skip_all)]
    async fn tasks(
        &self,
        ctx: &Context<'_>,
        filter: Option<TaskFilterInput>,
        sort: Option<TaskSortInput>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<TaskNode>> {
        let query = list_query(
            TaskFilter::from(filter.unwrap_or_default()),
            sort.map(Sort::from),
            page,
            page_size,
        );
        let list = crm(ctx)?.tasks().list(&query).await.map_err(gql_error)?;
        Ok(Page::from_list(list))
    }

    #[instrument(name = "graphql.task", skip(self, ctx))]
    async fn task(&self, ctx: &Context<'_>, id: ID) -> Result<TaskNode> {
        let task = crm(ctx)?
            .tasks()
            .get(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(task.into())
    }

    #[instrument(name = "graphql.users", skip_all)]
    async fn users(
        &self,
        ctx: &Context<'_>,
        filter: Option<UserFilterInput>,
        sort: Option<UserSortInput>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<UserNode>> {
        let query = list_query(
            UserFilter::from(filter.unwrap_or_default()),
            sort.map(Sort::from),
            page,
            page_size,
        );
        let list = crm(ctx)?.users().list(&query).await.map_err(gql_error)?;
        Ok(Page::from_list(list))
    }

    #[instrument(name = "graphql.user", skip(self, ctx))]
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserNode> {
        let user = crm(ctx)?
            .users()
            .get(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(user.into())
    }

    #[instrument(name = "graphql.interactions", skip_all)]
    async fn interactions(
        &self,
        ctx: &Context<'_>,
        filter: Option<InteractionFilterInput>,
        sort: Option<InteractionSortInput>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Page<InteractionNode>> {
        let query = list_query(
            InteractionFilter::from(filter.unwrap_or_default()),
            sort.map(Sort::from),
            page,
            page_size,
        );
        let list = crm(ctx)?
            .interactions()
            .list(&query)
            .await
            .map_err(gql_error)?;
        Ok(Page::from_list(list))
    }

    #[instrument(name = "graphql.interaction", skip(self, ctx))]
    async fn interaction(&self, ctx: &Context<'_>, id: ID) -> Result<InteractionNode> {
        let interaction = crm(ctx)?
            .interactions()
            .get(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(interaction.into())
    }

    /// Headline numbers. `today` defaults to the current UTC date.
    #[instrument(name = "graphql.dashboard", skip(self, ctx))]
    async fn dashboard(&self, ctx: &Context<'_>, today: Option<NaiveDate>) -> Result<DashboardNode> {
        let today = today.unwrap_or_else(|| Utc::now().date_naive());
        let summary = crm(ctx)?.dashboard(today).await.map_err(gql_error)?;
        Ok(summary.into())
    }

    #[instrument(name = "graphql.client_overview", skip(self, ctx))]
    async fn client_overview(&self, ctx: &Context<'_>, id: ID) -> Result<ClientOverviewNode> {
        let overview = crm(ctx)?
            .client_overview(&record_id(id))
            .await
            .map_err(gql_error)?;
        Ok(overview.into())
    }
}
