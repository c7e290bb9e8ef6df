use chrono::{NaiveDate, TimeZone, Utc};
use entity::{
    RecordId,
    campaigns::{self, Campaign},
    clients::{self, Client},
    interactions::{Interaction, Kind},
    tasks::{Priority, Task},
    users::{Role, Status, User},
};

/// Demo records loaded into a fresh store.
#[derive(Clone, Debug)]
pub struct SeedRecords {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub campaigns: Vec<Campaign>,
    pub tasks: Vec<Task>,
    pub interactions: Vec<Interaction>,
}

pub fn seed_records() -> SeedRecords {
    let users = seed_users();
    let clients = seed_clients();
    let campaigns = seed_campaigns();
    let tasks = seed_tasks();
    let interactions = seed_interactions();
    SeedRecords {
        users,
        clients,
        campaigns,
        tasks,
        interactions,
    }
}

fn seed_users() -> Vec<User> {
    [
        ("user1", "Alice Wonderland", "alice@example.com", Role::Admin, Status::Active),
        ("user2", "Bob The Builder", "bob@example.com", Role::Manager, Status::Active),
        ("user3", "Charlie Brown", "charlie@example.com", Role::Manager, Status::Active),
        ("user4", "David Copper", "david@example.com", Role::Manager, Status::Suspended),
    ]
    .into_iter()
    .map(|(id, name, email, role, status)| User {
        id: RecordId::from(id),
        name: name.into(),
        email: email.into(),
        role,
        status,
    })
    .collect()
}

fn seed_clients() -> Vec<Client> {
    let mut clients = vec![
        Client {
            id: RecordId::from("client1"),
            name: "Innovatech Solutions".into(),
            email: "contact@innovatech.com".into(),
            company: "Innovatech Ltd.".into(),
            status: clients::Status::Active,
            last_interaction: date(2024, 5, 10),
            assigned_manager_id: Some(RecordId::from("user1")),
            phone: Some("555-0101".into()),
            notes: Some("Key client, interested in Q3 campaign. Prefers morning calls.".into()),
            tags: vec!["Q3 Campaign".into(), "High Value".into(), "Newsletter".into()],
        },
        Client {
            id: RecordId::from("client2"),
            name: "Quantum Leap Inc.".into(),
            email: "info@quantumleap.io".into(),
            company: "Quantum Leap Inc.".into(),
            status: clients::Status::Lead,
            last_interaction: date(2024, 5, 15),
            assigned_manager_id: Some(RecordId::from("user2")),
            phone: Some("555-0102".into()),
            notes: Some("New lead from website. Follow up regarding service package A.".into()),
            tags: vec!["Website Lead".into(), "Service A".into()],
        },
        Client {
            id: RecordId::from("client3"),
            name: "Synergy Corp".into(),
            email: "support@synergy.com".into(),
            company: "Synergy Corp.".into(),
            status: clients::Status::Inactive,
            last_interaction: date(2024, 3, 20),
            assigned_manager_id: Some(RecordId::from("user1")),
            phone: Some("555-0103".into()),
            notes: Some("Paused services. Potential to re-engage in Q4.".into()),
            tags: vec!["Paused".into(), "Re-engage Q4".into()],
        },
        Client {
            id: RecordId::from("client4"),
            name: "Apex Digital".into(),
            email: "hello@apexdigital.com".into(),
            company: "Apex Digital LLC".into(),
            status: clients::Status::Active,
            last_interaction: date(2024, 5, 18),
            assigned_manager_id: Some(RecordId::from("user3")),
            phone: None,
            notes: None,
            tags: Vec::new(),
        },
    ];
    let managers = ["user1", "user2", "user3"];
    for i in 0..15u32 {
        let n = i + 5;
        let status = match i % 3 {
            0 => clients::Status::Active,
            1 => clients::Status::Lead,
            _ => clients::Status::Inactive,
        };
        clients.push(Client {
            id: RecordId::new(format!("client{}", n)),
            name: format!("Mock Client {}", n),
            email: format!("mock{}@example.com", n),
            company: format!("Mock Company {}", n),
            status,
            last_interaction: date(2024, 4, 10 + i),
            assigned_manager_id: Some(RecordId::from(managers[(i % 3) as usize])),
            phone: None,
            notes: None,
            tags: Vec::new(),
        });
    }
    clients
}

fn seed_campaigns() -> Vec<Campaign> {
    let mut campaigns = vec![
        Campaign {
            id: RecordId::from("camp1"),
            name: "Q1 Product Launch".into(),
            client_id: RecordId::from("client1"),
            start_date: date(2024, 1, 15),
            end_date: date(2024, 3, 15),
            budget: 5000.0,
            status: campaigns::Status::Completed,
            description: Some("Launch campaign for the new X1000 Product.".into()),
        },
        Campaign {
            id: RecordId::from("camp2"),
            name: "Spring Sales Drive".into(),
            client_id: RecordId::from("client2"),
            start_date: date(2024, 4, 1),
            end_date: date(2024, 5, 31),
            budget: 7500.0,
            status: campaigns::Status::Active,
            description: Some("Boost spring sales with targeted promotions.".into()),
        },
        Campaign {
            id: RecordId::from("camp3"),
            name: "Summer Awareness Campaign".into(),
            client_id: RecordId::from("client1"),
            start_date: date(2024, 6, 15),
            end_date: date(2024, 8, 15),
            budget: 6000.0,
            status: campaigns::Status::Planning,
            description: Some("Increase brand awareness over the summer period.".into()),
        },
    ];
    let owners = ["client1", "client2"];
    for i in 0..12u32 {
        let month = i % 2 + 1;
        campaigns.push(Campaign {
            id: RecordId::new(format!("camp{}", i + 4)),
            name: format!("Old Campaign {}", i + 1),
            client_id: RecordId::from(owners[(i % 2) as usize]),
            start_date: date(2023, month, 1),
            end_date: date(2023, month + 1, 28),
            budget: 3000.0 + f64::from(i) * 500.0,
            status: campaigns::Status::Completed,
            description: Some(format!("Completed campaign from last year {}", i + 1)),
        });
    }
    campaigns
}

fn seed_tasks() -> Vec<Task> {
    vec![
        task(
            "task1",
            "Follow up with Innovatech about Q3 budget",
            "Schedule a call to discuss budget for the upcoming campaign",
            date(2024, 5, 25),
            ("user1", Some("client1"), Some("camp1")),
            Priority::High,
            false,
            date(2024, 5, 10),
        ),
        task(
            "task2",
            "Create proposal for Quantum Leap",
            "Draft a proposal for the summer marketing campaign",
            date(2024, 5, 20),
            ("user2", Some("client2"), None),
            Priority::Medium,
            true,
            date(2024, 5, 8),
        ),
        task(
            "task3",
            "Review Q1 campaign analytics",
            "Analyze the performance of Q1 Product Launch campaign",
            date(2024, 5, 30),
            ("user3", Some("client1"), Some("camp1")),
            Priority::Low,
            false,
            date(2024, 5, 12),
        ),
        task(
            "task4",
            "Update client meeting notes",
            "Update CRM with notes from client meeting",
            date(2024, 5, 18),
            ("user1", Some("client2"), None),
            Priority::Medium,
            false,
            date(2024, 5, 15),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    description: &str,
    due_date: NaiveDate,
    links: (&str, Option<&str>, Option<&str>),
    priority: Priority,
    is_completed: bool,
    created: NaiveDate,
) -> Task {
    let (assignee, client, campaign) = links;
    Task {
        id: RecordId::from(id),
        title: title.into(),
        description: Some(description.into()),
        due_date,
        assigned_to: Some(RecordId::from(assignee)),
        related_client_id: client.map(RecordId::from),
        related_campaign_id: campaign.map(RecordId::from),
        priority,
        is_completed,
        created_at: Utc.from_utc_datetime(&created.and_hms_opt(9, 0, 0).unwrap_or_default()),
    }
}

fn seed_interactions() -> Vec<Interaction> {
    [
        ("int1", "client1", date(2024, 5, 10), Kind::Call, "Discussed Q3 campaign proposal. Client is very interested."),
        ("int2", "client1", date(2024, 5, 8), Kind::Email, "Sent follow-up email with brochure."),
        ("int3", "client2", date(2024, 5, 15), Kind::Meeting, "Initial consultation. Demoed Service Package A."),
        ("int4", "client1", date(2024, 4, 20), Kind::Note, "Client mentioned budget constraints for Q2."),
    ]
    .into_iter()
    .map(|(id, client, date, kind, notes)| Interaction {
        id: RecordId::from(id),
        client_id: RecordId::from(client),
        date,
        kind,
        notes: notes.into(),
    })
    .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
