//! CRM vertical slice: list views, create/edit forms, confirmation gates and
//! the per-entity services they talk to.
//!
//! ```text
//! ListView ──query──▶ DataAccess::list ──▶ listing::transform
//! FormController ──submit──▶ DataAccess::create / update
//! ConfirmationGate ──confirm──▶ archive / toggle / set_status
//! ```

pub mod confirm;
pub mod dashboard;
mod error;
pub mod forms;
pub mod listing;
pub mod notify;
pub mod references;
pub mod service;
pub mod view;

pub use confirm::ConfirmationGate;
pub use error::{CrmError, CrmResult, FieldErrors};
pub use forms::{FormController, ValidationContext};
pub use notify::{Notification, Notifications};
pub use service::{CrmService, DataAccess, StatusControl};
pub use view::ListView;
