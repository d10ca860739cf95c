//! Contact form validation and submission lifecycle.
//!
//! One [`ContactForm`] lives for a single visit. Status moves
//! `idle -> submitting -> success | error`; the two outcomes stay put until
//! the visitor submits again.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use shared::protocol::{ContactRequest, FormStatus};
use tracing::{debug, info, warn};

use crate::outbox::{ContactMessage, Delivery, Outbox, OutboxError};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Message for the first rule `value` breaks, if any.
pub fn validate_field(field: FormField, value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    match field {
        FormField::Name => {
            if trimmed.is_empty() {
                Some("Name is required")
            } else if chars < NAME_MIN_CHARS {
                Some("Name must be at least 2 characters")
            } else if chars > NAME_MAX_CHARS {
                Some("Name must be less than 100 characters")
            } else {
                None
            }
        }
        FormField::Email => {
            if trimmed.is_empty() {
                Some("Email is required")
            } else if !EMAIL_RE.is_match(value) {
                Some("Please enter a valid email address")
            } else {
                None
            }
        }
        FormField::Message => {
            if trimmed.is_empty() {
                Some("Message is required")
            } else if chars < MESSAGE_MIN_CHARS {
                Some("Message must be at least 10 characters")
            } else if chars > MESSAGE_MAX_CHARS {
                Some("Message must be less than 1000 characters")
            } else {
                None
            }
        }
    }
}

pub fn success_notice(contact_email: &str, handoff: bool) -> String {
    if handoff {
        format!(
            "Your email client should open now. If it doesn't, please email me directly at {contact_email}"
        )
    } else {
        "Thanks for reaching out! Your message has been sent.".to_string()
    }
}

pub fn failure_notice(contact_email: &str) -> String {
    format!("Something went wrong. Please try again or email me directly at {contact_email}")
}

/// Result of asking the form to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Status is now `submitting`; hand this payload to the outbox.
    Deliver(ContactMessage),
    /// Decoy was filled in; status reports `success` and nothing is sent.
    Trapped,
    /// At least one visible field failed validation; errors are populated.
    Invalid,
    /// A submission is already in flight.
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered(Delivery),
    Trapped,
    Invalid,
    InFlight,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    decoy: String,
    errors: BTreeMap<FormField, &'static str>,
    status: FormStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form as if the visitor had typed the request's values, nothing validated yet.
    pub fn from_request(request: ContactRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            message: request.message,
            decoy: request.decoy,
            ..Self::default()
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn decoy(&self) -> &str {
        &self.decoy
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &BTreeMap<FormField, &'static str> {
        &self.errors
    }

    pub fn errors_by_name(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str().to_string(), (*message).to_string()))
            .collect()
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    pub fn message_char_count(&self) -> usize {
        self.message.chars().count()
    }

    pub fn is_message_over_limit(&self) -> bool {
        self.message_char_count() > MESSAGE_MAX_CHARS
    }

    /// Updates a field and clears the error shown for it.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
        self.errors.remove(&field);
    }

    pub fn set_decoy(&mut self, value: impl Into<String>) {
        self.decoy = value.into();
    }

    /// Validates a field once it loses focus.
    pub fn blur(&mut self, field: FormField) {
        self.record(field);
    }

    /// Validates every visible field; true when all pass.
    pub fn validate_all(&mut self) -> bool {
        for field in FormField::ALL {
            self.record(field);
        }
        self.errors.is_empty()
    }

    fn record(&mut self, field: FormField) {
        match validate_field(field, self.value(field)) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.status == FormStatus::Submitting {
            return SubmitStart::InFlight;
        }
        if !self.decoy.is_empty() {
            info!("contact decoy field filled; reporting success without sending");
            self.status = FormStatus::Success;
            return SubmitStart::Trapped;
        }
        if !self.validate_all() {
            debug!(invalid = self.errors.len(), "contact submission blocked by validation");
            return SubmitStart::Invalid;
        }

        self.status = FormStatus::Submitting;
        SubmitStart::Deliver(ContactMessage {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Settles an in-flight submission. Success clears the visible fields;
    /// failure keeps them for another attempt.
    pub fn complete_submit<T>(&mut self, result: &Result<T, OutboxError>) {
        if self.status != FormStatus::Submitting {
            debug!(status = ?self.status, "ignoring completion with no submission in flight");
            return;
        }
        match result {
            Ok(_) => {
                self.status = FormStatus::Success;
                self.name.clear();
                self.email.clear();
                self.message.clear();
            }
            Err(error) => {
                warn!(%error, "contact message delivery failed");
                self.status = FormStatus::Error;
            }
        }
    }

    pub async fn submit<O>(&mut self, outbox: &O) -> SubmitOutcome
    where
        O: Outbox + ?Sized,
    {
        let message = match self.begin_submit() {
            SubmitStart::Deliver(message) => message,
            SubmitStart::Trapped => return SubmitOutcome::Trapped,
            SubmitStart::Invalid => return SubmitOutcome::Invalid,
            SubmitStart::InFlight => return SubmitOutcome::InFlight,
        };

        let result = outbox.deliver(&message).await;
        self.complete_submit(&result);
        match result {
            Ok(delivery) => SubmitOutcome::Delivered(delivery),
            Err(_) => SubmitOutcome::Failed,
        }
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
