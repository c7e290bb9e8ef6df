use chrono::NaiveDate;
use entity::{
    campaigns::{self, Campaign},
    clients::Client,
    interactions::Interaction,
    tasks::Task,
    users::User,
};
use serde::Serialize;

pub const RECENT_INTERACTIONS: usize = 5;

/// Headline numbers for the landing page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub active_campaigns: usize,
    /// Open tasks due today or later.
    pub upcoming_tasks: usize,
    pub recent_interactions: Vec<Interaction>,
}

/// Everything the client detail page shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOverview {
    pub client: Client,
    pub manager: Option<User>,
    /// Newest first.
    pub interactions: Vec<Interaction>,
    pub campaigns: Vec<Campaign>,
    pub tasks: Vec<Task>,
}

pub fn summarize(
    clients: &[Client],
    campaigns: &[Campaign],
    tasks: &[Task],
    mut interactions: Vec<Interaction>,
    today: NaiveDate,
) -> DashboardSummary {
    interactions.sort_by(|a, b| b.date.cmp(&a.date));
    interactions.truncate(RECENT_INTERACTIONS);
    DashboardSummary {
        total_clients: clients.len(),
        active_campaigns: campaigns
            .iter()
            .filter(|campaign| campaign.status == campaigns::Status::Active)
            .count(),
        upcoming_tasks: tasks
            .iter()
            .filter(|task| !task.is_completed && task.due_date >= today)
            .count(),
        recent_interactions: interactions,
    }
}

pub fn overview(
    client: Client,
    manager: Option<User>,
    interactions: Vec<Interaction>,
    campaigns: Vec<Campaign>,
    tasks: Vec<Task>,
) -> ClientOverview {
    let mut interactions: Vec<Interaction> = interactions
        .into_iter()
        .filter(|interaction| interaction.client_id == client.id)
        .collect();
    interactions.sort_by(|a, b| b.date.cmp(&a.date));
    let campaigns = campaigns
        .into_iter()
        .filter(|campaign| campaign.client_id == client.id)
        .collect();
    let tasks = tasks
        .into_iter()
        .filter(|task| task.related_client_id.as_ref() == Some(&client.id))
        .collect();
    ClientOverview {
        client,
        manager,
        interactions,
        campaigns,
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use platform_db::seed_records;

    use super::*;

    #[test]
    fn seeded_dashboard_counts() {
        let seed = seed_records();
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let summary = summarize(
            &seed.clients,
            &seed.campaigns,
            &seed.tasks,
            seed.interactions.clone(),
            today,
        );
        assert_eq!(summary.total_clients, 19);
        assert_eq!(summary.active_campaigns, 1);
        // task1 (05-25) and task3 (05-30); task2 is done and task4 was due 05-18
        assert_eq!(summary.upcoming_tasks, 2);
        let dates: Vec<_> = summary
            .recent_interactions
            .iter()
            .map(|interaction| interaction.id.to_string())
            .collect();
        assert_eq!(dates, vec!["int3", "int1", "int2", "int4"]);
    }

    #[test]
    fn overview_keeps_only_the_clients_records() {
        let seed = seed_records();
        let client = seed.clients[0].clone();
        let view = overview(
            client,
            None,
            seed.interactions,
            seed.campaigns,
            seed.tasks,
        );
        assert_eq!(view.interactions.len(), 3);
        assert_eq!(view.interactions[0].id.as_str(), "int1");
        assert!(view.campaigns.iter().all(|c| c.client_id.as_str() == "client1"));
        assert_eq!(view.tasks.len(), 2);
    }
}
