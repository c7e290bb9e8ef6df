mod common;

use std::cell::Cell;

use common::{ctx, day, service};
use entity::{RecordId, campaigns, clients, interactions::Kind, tasks::Priority};
use products_crm::{
    CrmError, DataAccess, FormController, Notifications,
    forms::{
        CampaignDraft, CampaignField, ClientDraft, ClientField, InteractionDraft,
        InteractionField, Mode, TaskDraft, TaskField, UserDraft,
    },
    notify::Level,
};

fn valid_campaign() -> CampaignDraft {
    CampaignDraft {
        name: "Autumn Push".into(),
        client_id: Some(RecordId::from("client2")),
        start_date: Some(day(2024, 9, 1)),
        end_date: Some(day(2024, 10, 31)),
        budget: "4200".into(),
        status: Some(campaigns::Status::Planning),
        description: "Seasonal promotion".into(),
    }
}

#[tokio::test]
async fn empty_required_field_blocks_only_itself() {
    let crm = service();
    let mut form: FormController<CampaignDraft> = FormController::new();
    form.open_create_with(CampaignDraft {
        name: String::new(),
        ..valid_campaign()
    });
    let mut notices = Notifications::new();
    let called = Cell::new(false);

    let result = form
        .submit(&crm.campaigns(), &ctx(), &mut notices, |_| called.set(true))
        .await;

    assert!(matches!(result, Err(CrmError::Validation(_))));
    assert_eq!(form.errors().len(), 1);
    assert!(form.error(CampaignField::Name).is_some());
    assert!(!called.get());
    assert!(form.is_open());
    assert_eq!(notices.last().unwrap().title, "Validation Error");
    assert_eq!(crm.store().campaigns().len().await, 15);
}

#[tokio::test]
async fn reversed_campaign_dates_never_reach_the_callback() {
    let crm = service();
    let mut form: FormController<CampaignDraft> = FormController::new();
    form.open_create_with(CampaignDraft {
        start_date: Some(day(2024, 4, 1)),
        end_date: Some(day(2024, 3, 1)),
        ..valid_campaign()
    });
    let mut notices = Notifications::new();
    let called = Cell::new(false);

    let result = form
        .submit(&crm.campaigns(), &ctx(), &mut notices, |_| called.set(true))
        .await;

    assert!(result.is_err());
    assert!(!called.get());
    assert_eq!(
        form.error(CampaignField::EndDate),
        Some("End date cannot be before start date.")
    );
}

#[tokio::test]
async fn editing_a_field_clears_only_its_error() {
    let mut form: FormController<ClientDraft> = FormController::new();
    form.open_create();
    assert!(!form.validate(&ctx()));
    assert!(form.error(ClientField::Name).is_some());
    assert!(form.error(ClientField::Email).is_some());
    assert!(form.error(ClientField::Status).is_some());

    form.edit(ClientField::Name, |draft| draft.name = "Nimbus".into());
    assert_eq!(form.error(ClientField::Name), None);
    assert!(form.error(ClientField::Email).is_some());
    assert!(form.error(ClientField::Status).is_some());
    assert!(form.error(ClientField::AssignedManager).is_some());

    // other messages are only recomputed on submit
    form.edit(ClientField::Company, |draft| draft.email = "broken".into());
    assert_eq!(form.error(ClientField::Email), Some("Email is required."));
}

#[tokio::test]
async fn successful_create_calls_back_notifies_and_closes() {
    let crm = service();
    let mut form: FormController<CampaignDraft> = FormController::new();
    form.open_create_with(valid_campaign());
    let mut notices = Notifications::new();
    let mut created = None;

    let campaign = form
        .submit(&crm.campaigns(), &ctx(), &mut notices, |record| {
            created = Some(record.id.clone())
        })
        .await
        .unwrap();

    assert_eq!(created, Some(campaign.id.clone()));
    assert!(campaign.id.as_str().starts_with("camp-"));
    assert_eq!(campaign.budget, 4200.0);
    assert!(!form.is_open());
    let notice = notices.last().unwrap();
    assert_eq!(notice.level, Level::Success);
    assert_eq!(notice.title, "Campaign Created");
    assert_eq!(crm.campaigns().get(&campaign.id).await.unwrap(), campaign);
}

#[tokio::test]
async fn simulated_failure_keeps_the_draft_and_the_form_open() {
    let crm = service();
    crm.store().network().set_failure_rate(1.0);
    let mut form: FormController<CampaignDraft> = FormController::new();
    form.open_create_with(valid_campaign());
    let mut notices = Notifications::new();

    let result = form.submit(&crm.campaigns(), &ctx(), &mut notices, |_| {}).await;

    assert!(matches!(result, Err(CrmError::Unavailable(_))));
    assert!(form.is_open());
    assert_eq!(form.draft(), &valid_campaign());
    let notice = notices.last().unwrap();
    assert_eq!(notice.level, Level::Error);
    assert_eq!(notice.title, "Error Creating Campaign");

    crm.store().network().set_failure_rate(0.0);
    let retried = form.submit(&crm.campaigns(), &ctx(), &mut notices, |_| {}).await;
    assert_eq!(retried.unwrap().name, "Autumn Push");
    assert!(!form.is_open());
    assert_eq!(notices.last().unwrap().title, "Campaign Created");
}

#[tokio::test]
async fn edit_mirrors_the_record_and_merges_on_submit() {
    let crm = service();
    let task = crm.tasks().get(&RecordId::from("task2")).await.unwrap();
    let mut form: FormController<TaskDraft> = FormController::new();
    form.open_edit(task.clone());
    assert_eq!(form.mode(), Mode::Edit);
    assert_eq!(form.draft().title, task.title);

    form.edit(TaskField::Priority, |draft| draft.priority = Some(Priority::High));
    form.edit(TaskField::Assignee, |draft| draft.assigned_to = None);
    let mut notices = Notifications::new();
    let updated = form
        .submit(&crm.tasks(), &ctx(), &mut notices, |_| {})
        .await
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.assigned_to, None);
    assert!(updated.is_completed);
    assert_eq!(updated.created_at, task.created_at);
    assert_eq!(notices.last().unwrap().title, "Task Updated");
}

#[tokio::test]
async fn retargeting_reinitializes_the_draft() {
    let crm = service();
    let first = crm.clients().get(&RecordId::from("client1")).await.unwrap();
    let second = crm.clients().get(&RecordId::from("client2")).await.unwrap();
    let mut form: FormController<ClientDraft> = FormController::new();

    form.sync(true, Some(&first));
    form.edit(ClientField::Name, |draft| draft.name = "Scratch".into());
    form.sync(true, Some(&first));
    assert_eq!(form.draft().name, "Scratch");

    form.sync(true, Some(&second));
    assert_eq!(form.draft().name, second.name);

    form.sync(false, Some(&second));
    assert!(!form.is_open());
    form.sync(true, Some(&second));
    assert_eq!(form.draft().name, second.name);
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn unknown_manager_is_reported_on_the_field() {
    let crm = service();
    let mut form: FormController<ClientDraft> = FormController::new();
    form.open_create_with(ClientDraft {
        name: "Nimbus".into(),
        email: "hello@nimbus.io".into(),
        status: Some(clients::Status::Lead),
        assigned_manager_id: Some(RecordId::from("user99")),
        ..ClientDraft::default()
    });
    let mut notices = Notifications::new();

    let result = form.submit(&crm.clients(), &ctx(), &mut notices, |_| {}).await;

    assert!(matches!(result, Err(CrmError::Validation(_))));
    assert_eq!(
        form.error(ClientField::AssignedManager),
        Some("Selected manager does not exist.")
    );
    assert!(form.is_open());
}

#[tokio::test]
async fn logging_an_interaction_bumps_the_client() {
    let crm = service();
    let mut form: FormController<InteractionDraft> = FormController::new();
    form.open_create_with(InteractionDraft::for_client(RecordId::from("client4"), &ctx()));
    form.edit(InteractionField::Kind, |draft| draft.kind = Some(Kind::Meeting));
    form.edit(InteractionField::Notes, |draft| draft.notes = "Quarterly review".into());
    let mut notices = Notifications::new();

    let interaction = form
        .submit(&crm.interactions(), &ctx(), &mut notices, |_| {})
        .await
        .unwrap();

    assert_eq!(interaction.date, day(2024, 5, 20));
    let client = crm.clients().get(&RecordId::from("client4")).await.unwrap();
    assert_eq!(client.last_interaction, day(2024, 5, 20));
    let log = crm
        .interactions()
        .for_client(&RecordId::from("client4"))
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn new_user_password_is_stored_only_as_a_hash() {
    let crm = service();
    let mut form: FormController<UserDraft> = FormController::new();
    form.open_create_with(UserDraft {
        name: "Erin Hale".into(),
        email: "erin@example.com".into(),
        role: Some(entity::users::Role::Manager),
        password: "correct horse".into(),
        confirm_password: "correct horse".into(),
    });
    let mut notices = Notifications::new();

    let user = form
        .submit(&crm.users(), &ctx(), &mut notices, |_| {})
        .await
        .unwrap();

    let hash = crm.store().password_hash(&user.id).await.unwrap();
    assert!(!hash.contains("correct horse"));
    assert!(crm.users().check_password(&user.id, "correct horse").await);
    assert!(!crm.users().check_password(&user.id, "wrong horse").await);
}

#[tokio::test]
async fn duplicate_user_email_is_rejected() {
    let crm = service();
    let mut form: FormController<UserDraft> = FormController::new();
    form.open_create_with(UserDraft {
        name: "Alice Again".into(),
        email: "ALICE@example.com".into(),
        role: Some(entity::users::Role::Admin),
        password: "long enough".into(),
        confirm_password: "long enough".into(),
    });
    let mut notices = Notifications::new();

    let result = form.submit(&crm.users(), &ctx(), &mut notices, |_| {}).await;

    assert!(result.is_err());
    assert_eq!(
        form.errors().get("email"),
        Some("A user with this email already exists.")
    );
}
