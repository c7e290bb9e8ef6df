use std::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use entity::{campaigns::Campaign, clients::Client, users::User};
use tracing::debug;

use crate::{
    CrmError, CrmResult,
    notify::{Notification, Notifications},
};

pub const BUSY_LABEL: &str = "Processing...";

/// Yes/no dialog in front of a status change.
///
/// While the confirmed operation runs both buttons are disabled and the
/// confirm button reads [`BUSY_LABEL`]. Success closes the gate and pushes
/// the success notice, if any; failure leaves it open and pushes an error
/// notification.
#[derive(Debug)]
pub struct ConfirmationGate {
    title: String,
    description: String,
    confirm_label: String,
    success: Option<Notification>,
    error_title: String,
    open: AtomicBool,
    busy: AtomicBool,
}

/// Clears the busy flag however the confirmed future ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ConfirmationGate {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        confirm_label: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            confirm_label: confirm_label.into(),
            success: None,
            error_title: "Error".into(),
            open: AtomicBool::new(false),
            busy: AtomicBool::new(false),
        }
    }

    /// Notice pushed after the action succeeds.
    pub fn with_success(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.success = Some(Notification::success(title, description));
        self
    }

    pub fn with_error_title(mut self, title: impl Into<String>) -> Self {
        self.error_title = title.into();
        self
    }

    pub fn archive_client(client: &Client) -> Self {
        Self::new(
            "Archive Client?",
            format!(
                "Are you sure you want to archive {}? Their status will be set to Inactive.",
                client.name
            ),
            "Yes, Archive Client",
        )
        .with_success(
            "Client Archived",
            format!(
                "{} has been successfully archived and set to Inactive.",
                client.name
            ),
        )
        .with_error_title("Error Archiving Client")
    }

    pub fn archive_campaign(campaign: &Campaign) -> Self {
        Self::new(
            "Archive Campaign?",
            format!(
                "Are you sure you want to archive \"{}\"? Its status will be set to Paused.",
                campaign.name
            ),
            "Yes, Archive Campaign",
        )
        .with_success(
            "Campaign Archived",
            format!("{} has been archived (status set to Paused).", campaign.name),
        )
        .with_error_title("Error Archiving Campaign")
    }

    pub fn toggle_user(user: &User) -> Self {
        let outcome = format!(
            "{} has been {}.",
            user.name,
            user.status.toggled().as_str().to_lowercase()
        );
        let gate = if user.is_active() {
            Self::new(
                "Suspend User?",
                format!(
                    "Are you sure you want to suspend {}? They will lose access until reactivated.",
                    user.name
                ),
                "Suspend",
            )
        } else {
            Self::new(
                "Activate User?",
                format!("Are you sure you want to activate {}?", user.name),
                "Activate",
            )
        };
        gate.with_success("Success", outcome)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn confirm_label(&self) -> &str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            &self.confirm_label
        }
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn can_confirm(&self) -> bool {
        self.is_open() && !self.is_busy()
    }

    pub fn can_cancel(&self) -> bool {
        !self.is_busy()
    }

    pub fn cancel(&self) -> CrmResult<()> {
        if self.is_busy() {
            return Err(CrmError::Busy);
        }
        self.open.store(false, Ordering::Release);
        Ok(())
    }

    /// Run `action` once. A second call while the first is pending is
    /// rejected with [`CrmError::Busy`].
    pub async fn confirm<T, F, Fut>(&self, notices: &mut Notifications, action: F) -> CrmResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CrmResult<T>>,
    {
        if !self.is_open() {
            return Err(CrmError::InvalidTransition(format!(
                "\"{}\" is not open",
                self.title
            )));
        }
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(CrmError::Busy);
        }
        let result = {
            let _guard = BusyGuard(&self.busy);
            action().await
        };
        match result {
            Ok(value) => {
                self.open.store(false, Ordering::Release);
                debug!(gate = %self.title, "confirmed");
                if let Some(notice) = &self.success {
                    notices.push(notice.clone());
                }
                Ok(value)
            }
            Err(err) => {
                notices.error(self.error_title.clone(), err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;

    #[tokio::test]
    async fn success_closes_the_gate() {
        let gate = ConfirmationGate::new("Archive Client?", "Sure?", "Yes, Archive Client");
        gate.open();
        let mut notices = Notifications::new();
        let value = gate.confirm(&mut notices, || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert!(!gate.is_open());
        assert!(notices.is_empty());
    }

    #[tokio::test]
    async fn failure_keeps_the_gate_open() {
        let gate = ConfirmationGate::new("Suspend User?", "Sure?", "Suspend");
        gate.open();
        let mut notices = Notifications::new();
        let result: CrmResult<()> = gate
            .confirm(&mut notices, || async {
                Err(CrmError::Unavailable("simulated update on user failed".into()))
            })
            .await;
        assert!(result.is_err());
        assert!(gate.is_open());
        assert!(!gate.is_busy());
        assert_eq!(gate.confirm_label(), "Suspend");
        assert!(notices.last().unwrap().is_error());
    }

    #[tokio::test]
    async fn pending_confirm_disables_both_actions() {
        let gate = Arc::new(ConfirmationGate::new("Archive Campaign?", "Sure?", "Yes"));
        gate.open();
        let release = Arc::new(Notify::new());
        let started = Arc::new(Notify::new());

        let task = {
            let gate = gate.clone();
            let release = release.clone();
            let started = started.clone();
            tokio::spawn(async move {
                let mut notices = Notifications::new();
                gate.confirm(&mut notices, || async move {
                    started.notify_one();
                    release.notified().await;
                    Ok(())
                })
                .await
            })
        };

        started.notified().await;
        assert!(gate.is_busy());
        assert_eq!(gate.confirm_label(), BUSY_LABEL);
        assert!(!gate.can_cancel());
        assert_eq!(gate.cancel(), Err(CrmError::Busy));
        let mut notices = Notifications::new();
        let second = gate.confirm(&mut notices, || async { Ok(()) }).await;
        assert_eq!(second, Err(CrmError::Busy));

        release.notify_one();
        task.await.unwrap().unwrap();
        assert!(!gate.is_open());
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn closed_gate_refuses_to_confirm() {
        let gate = ConfirmationGate::new("Archive Client?", "Sure?", "Yes");
        let mut notices = Notifications::new();
        let result = gate.confirm(&mut notices, || async { Ok(()) }).await;
        assert!(matches!(result, Err(CrmError::InvalidTransition(_))));
    }

    #[test]
    fn user_toggle_wording_follows_status() {
        let mut user = User {
            id: "user4".into(),
            name: "David Copper".into(),
            email: "david@example.com".into(),
            role: entity::users::Role::Manager,
            status: entity::users::Status::Suspended,
        };
        assert_eq!(ConfirmationGate::toggle_user(&user).confirm_label(), "Activate");
        user.status = entity::users::Status::Active;
        assert_eq!(ConfirmationGate::toggle_user(&user).title(), "Suspend User?");
    }

    #[tokio::test]
    async fn preset_gates_announce_their_outcome() {
        let user = User {
            id: "user2".into(),
            name: "Bob The Builder".into(),
            email: "bob@example.com".into(),
            role: entity::users::Role::Manager,
            status: entity::users::Status::Active,
        };
        let gate = ConfirmationGate::toggle_user(&user);
        gate.open();
        let mut notices = Notifications::new();
        gate.confirm(&mut notices, || async { Ok(()) }).await.unwrap();
        let notice = notices.last().unwrap();
        assert_eq!(notice.title, "Success");
        assert_eq!(notice.description, "Bob The Builder has been suspended.");
    }
}
