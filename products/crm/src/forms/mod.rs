//! Create/edit form controllers.
//!
//! A [`FormController`] owns the draft for one record type, validates it when
//! submitted and hands the draft to a [`DataAccess`] backend. Validation rules
//! and the draft-to-record merge live with each draft type.

pub mod campaign;
pub mod client;
pub mod interaction;
pub mod task;
pub mod user;

use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use platform_db::Record;
use regex::Regex;
use tracing::{Instrument, debug, info_span};

use crate::{CrmError, CrmResult, FieldErrors, notify::Notifications, service::DataAccess};

pub use campaign::{CampaignDraft, CampaignField};
pub use client::{ClientDraft, ClientField};
pub use interaction::{InteractionDraft, InteractionField};
pub use task::{TaskDraft, TaskField};
pub use user::{UserDraft, UserField};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|err| panic!("email pattern must compile: {err}"))
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit,
}

impl Mode {
    fn verb(self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Edit => "update",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Mode::Create => "Created",
            Mode::Edit => "Updated",
        }
    }
}

/// Wall-clock reading shared by validation and record building, so a form
/// can be checked against a fixed "today".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationContext {
    pub now: DateTime<Utc>,
}

impl ValidationContext {
    /// Today is the UTC date, so interaction dates are checked against UTC.
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn on(day: NaiveDate) -> Self {
        Self {
            now: day.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

pub trait FormField: Copy + Eq + Debug {
    /// Key the field's error message is stored under.
    fn name(self) -> &'static str;
}

/// Uncommitted form state for one record type.
pub trait Draft: Clone + Debug + Send + Sync + 'static {
    type Record: Record + Debug;
    type Field: FormField;

    /// Noun used in notification titles, e.g. "Client".
    const NOUN: &'static str;

    fn blank() -> Self;

    fn from_record(record: &Self::Record) -> Self;

    fn validate(&self, mode: Mode, ctx: &ValidationContext) -> FieldErrors;

    /// Merge the draft onto `original`, or synthesize a new record with a
    /// fresh id when there is none.
    fn build(&self, original: Option<&Self::Record>, ctx: &ValidationContext) -> Self::Record;

    fn label(record: &Self::Record) -> &str;
}

pub(crate) fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

pub(crate) fn require<T>(errors: &mut FieldErrors, field: &'static str, value: &Option<T>, message: &str) {
    if value.is_none() {
        errors.insert(field, message);
    }
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Mirrors one record in a modal dialog.
///
/// Opening or retargeting the controller re-initializes the draft and clears
/// errors. Validation runs on submit; editing a field drops only that field's
/// error. `submit` borrows the controller mutably, so one controller never
/// has two submissions in flight.
#[derive(Debug)]
pub struct FormController<D: Draft> {
    mode: Mode,
    open: bool,
    original: Option<D::Record>,
    draft: D,
    errors: FieldErrors,
}

impl<D: Draft> Default for FormController<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Draft> FormController<D> {
    pub fn new() -> Self {
        Self {
            mode: Mode::Create,
            open: false,
            original: None,
            draft: D::blank(),
            errors: FieldErrors::new(),
        }
    }

    pub fn open_create(&mut self) {
        self.open_create_with(D::blank());
    }

    /// Open in create mode with some fields already chosen.
    pub fn open_create_with(&mut self, draft: D) {
        self.mode = Mode::Create;
        self.original = None;
        self.draft = draft;
        self.errors = FieldErrors::new();
        self.open = true;
    }

    pub fn open_edit(&mut self, record: D::Record) {
        self.mode = Mode::Edit;
        self.draft = D::from_record(&record);
        self.original = Some(record);
        self.errors = FieldErrors::new();
        self.open = true;
    }

    /// Edit `record` starting from a draft prepared elsewhere, e.g. a
    /// request body.
    pub fn open_edit_with(&mut self, record: D::Record, draft: D) {
        self.open_edit(record);
        self.draft = draft;
    }

    /// Follow the dialog's `open` flag and target record. The draft is only
    /// rebuilt when either of them changes.
    pub fn sync(&mut self, open: bool, target: Option<&D::Record>) {
        let same_target = match (&self.original, target) {
            (Some(current), Some(next)) => current.id() == next.id(),
            (None, None) => true,
            _ => false,
        };
        if open == self.open && same_target {
            return;
        }
        if !open {
            self.open = false;
            return;
        }
        match target {
            Some(record) => self.open_edit(record.clone()),
            None => self.open_create(),
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn original(&self) -> Option<&D::Record> {
        self.original.as_ref()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: D::Field) -> Option<&str> {
        self.errors.get(field.name())
    }

    /// Change one field. Clears that field's error and leaves the rest alone.
    pub fn edit(&mut self, field: D::Field, change: impl FnOnce(&mut D)) {
        change(&mut self.draft);
        self.errors.remove(field.name());
    }

    pub fn validate(&mut self, ctx: &ValidationContext) -> bool {
        self.errors = self.draft.validate(self.mode, ctx);
        self.errors.is_empty()
    }

    /// Validate, then create or update through `backend`.
    ///
    /// On success `on_success` receives the stored record, a success
    /// notification is pushed and the form closes. Any failure keeps the form
    /// open with the draft intact.
    pub async fn submit<S>(
        &mut self,
        backend: &S,
        ctx: &ValidationContext,
        notices: &mut Notifications,
        on_success: impl FnOnce(&D::Record),
    ) -> CrmResult<D::Record>
    where
        S: DataAccess<Record = D::Record, Draft = D>,
    {
        if !self.validate(ctx) {
            notices.error("Validation Error", "Please check the form for errors.");
            return Err(CrmError::Validation(self.errors.clone()));
        }

        let mode = self.mode;
        let span = info_span!("crm.form.submit", form = D::NOUN, mode = mode.verb());
        let result = match (mode, &self.original) {
            (Mode::Edit, Some(original)) => {
                backend
                    .update(original.id(), &self.draft)
                    .instrument(span)
                    .await
            }
            _ => backend.create(&self.draft).instrument(span).await,
        };

        match result {
            Ok(record) => {
                on_success(&record);
                notices.success(
                    format!("{} {}", D::NOUN, mode.past()),
                    format!("{} has been successfully {}.", D::label(&record), mode.past().to_lowercase()),
                );
                debug!(form = D::NOUN, id = %record.id(), "form submitted");
                if mode == Mode::Edit {
                    self.original = Some(record.clone());
                }
                self.open = false;
                Ok(record)
            }
            Err(CrmError::Validation(errors)) => {
                self.errors = errors.clone();
                notices.error("Validation Error", "Please check the form for errors.");
                Err(CrmError::Validation(errors))
            }
            Err(err) => {
                notices.error(
                    format!("Error {} {}", gerund(mode), D::NOUN),
                    format!("Failed to {} {}: {}", mode.verb(), D::NOUN.to_lowercase(), err),
                );
                Err(err)
            }
        }
    }
}

fn gerund(mode: Mode) -> &'static str {
    match mode {
        Mode::Create => "Creating",
        Mode::Edit => "Updating",
    }
}
