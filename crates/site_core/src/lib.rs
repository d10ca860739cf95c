//! View-model logic for the portfolio: the experience timeline, the contact
//! form state machine and its outbound delivery, icon lookup and motion hints.

pub mod contact;
pub mod icons;
pub mod motion;
pub mod outbox;
pub mod timeline;

pub use contact::{validate_field, ContactForm, FormField, SubmitOutcome, SubmitStart};
pub use motion::MotionPreference;
pub use outbox::{ContactMessage, Delivery, MailtoOutbox, Outbox, OutboxError, WebhookOutbox};
pub use timeline::{format_duration, group_by_year, timeline_view, YearGroup};
