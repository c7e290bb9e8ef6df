mod common;

use chrono::NaiveDate;
use common::{day, service};
use entity::{
    RecordId,
    campaigns::{self, Campaign},
    clients::{self, Client},
    tasks::Task,
};
use platform_db::seed_records;
use products_crm::{
    DataAccess, ListView,
    listing::{
        Choice, DateRange, Filter, ListQuery, Sort, TextSearch,
        campaigns::{CampaignFilter, CampaignSortKey},
        clients::{ClientFilter, ClientSortKey},
        filter_records, paginate, sort_records,
        tasks::{Completion, TaskFilter, TaskSortKey},
        transform,
    },
    references::References,
};

fn client(id: &str, name: &str, status: clients::Status, manager: Option<&str>) -> Client {
    Client {
        id: RecordId::from(id),
        name: name.into(),
        email: format!("{}@example.com", id),
        company: format!("{} Holdings", name),
        status,
        last_interaction: day(2024, 5, 1),
        assigned_manager_id: manager.map(RecordId::from),
        phone: None,
        notes: None,
        tags: Vec::new(),
    }
}

fn campaign(id: &str, name: &str, start: NaiveDate, end: NaiveDate, budget: f64) -> Campaign {
    Campaign {
        id: RecordId::from(id),
        name: name.into(),
        client_id: RecordId::from("client1"),
        start_date: start,
        end_date: end,
        budget,
        status: campaigns::Status::Active,
        description: None,
    }
}

fn ids<R>(records: &[R], id: impl Fn(&R) -> &RecordId) -> Vec<String> {
    records.iter().map(|r| id(r).to_string()).collect()
}

#[test]
fn status_filter_keeps_only_matching_records() {
    let records = vec![
        client("c1", "Active One", clients::Status::Active, None),
        client("c2", "Lead One", clients::Status::Lead, None),
    ];
    let filter = ClientFilter {
        status: Choice::Only(clients::Status::Active),
        ..ClientFilter::default()
    };
    let kept = filter_records(records, &filter, &References::new());
    assert_eq!(ids(&kept, |c| &c.id), vec!["c1"]);
}

#[test]
fn filtered_records_are_a_subset_satisfying_every_predicate() {
    let seed = seed_records();
    let refs = References::from_records(&seed.users, &seed.clients, &seed.campaigns);
    let filter = ClientFilter {
        status: Choice::Only(clients::Status::Active),
        manager: Choice::Only(RecordId::from("user1")),
        search: TextSearch::new("mock"),
    };
    let kept = filter_records(seed.clients.clone(), &filter, &refs);
    assert!(!kept.is_empty());
    for record in &kept {
        assert!(seed.clients.contains(record));
        assert!(filter.matches(record, &refs));
        assert_eq!(record.status, clients::Status::Active);
        assert_eq!(record.assigned_manager_id, Some(RecordId::from("user1")));
    }
}

#[test]
fn name_and_budget_orders_with_missing_reference_last() {
    let records = vec![
        campaign("b", "B", day(2024, 1, 1), day(2024, 2, 1), 10.0),
        campaign("a", "A", day(2024, 1, 1), day(2024, 2, 1), 5.0),
    ];
    let refs = References::new();
    let by_name = sort_records(records.clone(), Sort::asc(CampaignSortKey::Name), &refs);
    assert_eq!(ids(&by_name, |c| &c.id), vec!["a", "b"]);
    let by_budget = sort_records(records, Sort::desc(CampaignSortKey::Budget), &refs);
    assert_eq!(ids(&by_budget, |c| &c.id), vec!["b", "a"]);

    let refs = References::new()
        .with_user("u1", "Zed")
        .with_user("u2", "Amy");
    let managed = vec![
        client("c1", "One", clients::Status::Active, Some("u1")),
        client("c2", "Two", clients::Status::Active, None),
        client("c3", "Three", clients::Status::Active, Some("u2")),
    ];
    let asc = sort_records(managed.clone(), Sort::asc(ClientSortKey::Manager), &refs);
    assert_eq!(ids(&asc, |c| &c.id), vec!["c3", "c1", "c2"]);
    let desc = sort_records(managed, Sort::desc(ClientSortKey::Manager), &refs);
    assert_eq!(ids(&desc, |c| &c.id), vec!["c1", "c3", "c2"]);
}

#[test]
fn sorting_twice_changes_nothing() {
    let seed = seed_records();
    let refs = References::from_records(&seed.users, &seed.clients, &seed.campaigns);
    for key in [
        TaskSortKey::Title,
        TaskSortKey::DueDate,
        TaskSortKey::Priority,
        TaskSortKey::Status,
        TaskSortKey::Assignee,
    ] {
        for sort in [Sort::asc(key), Sort::desc(key)] {
            let once = sort_records(seed.tasks.clone(), sort, &refs);
            let twice = sort_records(once.clone(), sort, &refs);
            assert_eq!(once, twice, "{:?}", sort);
        }
    }
}

#[test]
fn priority_sorts_low_to_high() {
    let seed = seed_records();
    let sorted = sort_records(seed.tasks, Sort::asc(TaskSortKey::Priority), &References::new());
    let order: Vec<_> = sorted.iter().map(|t: &Task| t.priority.as_str()).collect();
    assert_eq!(order, vec!["low", "medium", "medium", "high"]);
}

#[test]
fn twenty_three_records_page_as_ten_ten_three() {
    let records: Vec<usize> = (0..23).collect();
    let sizes: Vec<usize> = (1..=3)
        .map(|page| paginate(records.clone(), page, 10).items.len())
        .collect();
    assert_eq!(sizes, vec![10, 10, 3]);

    let clamped = paginate(records.clone(), 5, 10);
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.total_pages, 3);
    assert_eq!(clamped.items, vec![20, 21, 22]);

    let rebuilt: Vec<usize> = (1..=3)
        .flat_map(|page| paginate(records.clone(), page, 10).items)
        .collect();
    assert_eq!(rebuilt, records);
}

#[test]
fn campaign_date_range_covers_the_whole_span() {
    let records = vec![
        campaign("inside", "Inside", day(2024, 4, 2), day(2024, 4, 20), 1.0),
        campaign("spills", "Spills", day(2024, 4, 2), day(2024, 5, 20), 1.0),
        campaign("early", "Early", day(2024, 3, 20), day(2024, 4, 10), 1.0),
    ];
    let refs = References::new();
    let full = CampaignFilter {
        dates: DateRange::new(Some(day(2024, 4, 1)), Some(day(2024, 4, 30))),
        ..CampaignFilter::default()
    };
    let kept = filter_records(records.clone(), &full, &refs);
    assert_eq!(ids(&kept, |c| &c.id), vec!["inside"]);

    let start_only = CampaignFilter {
        dates: DateRange::new(Some(day(2024, 4, 1)), None),
        ..CampaignFilter::default()
    };
    let kept = filter_records(records, &start_only, &refs);
    assert_eq!(ids(&kept, |c| &c.id), vec!["inside", "spills"]);
}

#[test]
fn task_search_reaches_referenced_names() {
    let seed = seed_records();
    let refs = References::from_records(&seed.users, &seed.clients, &seed.campaigns);
    let by_assignee = TaskFilter {
        search: TextSearch::new("charlie"),
        ..TaskFilter::default()
    };
    let kept = filter_records(seed.tasks.clone(), &by_assignee, &refs);
    assert_eq!(ids(&kept, |t| &t.id), vec!["task3"]);

    let by_campaign = TaskFilter {
        search: TextSearch::new("q1 product"),
        completion: Choice::Only(Completion::Pending),
        ..TaskFilter::default()
    };
    let kept = filter_records(seed.tasks, &by_campaign, &refs);
    assert_eq!(ids(&kept, |t| &t.id), vec!["task1", "task3"]);
}

#[test]
fn unmatched_filter_yields_an_empty_first_page() {
    let seed = seed_records();
    let query = ListQuery::new(ClientFilter {
        search: TextSearch::new("no such client"),
        ..ClientFilter::default()
    })
    .page(4);
    let page = transform(seed.clients, &query, &References::new());
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn service_list_pages_the_seeded_clients() {
    let crm = service();
    let mut view: ListView<Client, ClientFilter> = ListView::new();
    view.toggle_sort(ClientSortKey::Name);
    view.go_to_page(2);

    let page = crm.clients().list(&view.query()).await.unwrap();
    view.sync(&page);
    assert_eq!(page.total, 19);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 9);
    assert_eq!(view.page(), 2);

    view.update_filter(|filter| filter.status = Choice::Only(clients::Status::Inactive));
    assert_eq!(view.page(), 1);
    let page = crm.clients().list(&view.query()).await.unwrap();
    assert!(page.items.iter().all(|c| c.status == clients::Status::Inactive));
    assert_eq!(page.total, 6);
}

#[tokio::test]
async fn campaigns_sort_by_client_name() {
    let crm = service();
    let query = ListQuery::new(CampaignFilter::default())
        .sorted(Sort::desc(CampaignSortKey::Client));
    let page = crm.campaigns().list(&query).await.unwrap();
    // Quantum Leap Inc. sorts after Innovatech Solutions
    assert_eq!(page.items[0].client_id.as_str(), "client2");
    assert_eq!(page.total, 15);
}
