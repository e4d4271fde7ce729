//! Newsletter and contact form validation.
//!
//! # Responsibility
//! - Validate submitted values with the site's permissive email shape check.
//! - Show the outcome inline and reset the form only on success.
//!
//! # Invariants
//! - The email check is exactly `^\S+@\S+\.\S+$`; it is not an RFC parser.
//! - A rejected submission never touches field values.
//! - Nothing leaves the page; "sending" is the success message.

use crate::dom::DomPort;
use crate::error::{PageError, PageResult};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email shape regex"));

pub const ERROR_COLOR: &str = "#b33";
pub const SUCCESS_COLOR: &str = "#064";

pub const NEWSLETTER_FORM_ID: &str = "newsletter-form";
pub const NEWSLETTER_EMAIL_ID: &str = "nl-email";
pub const NEWSLETTER_MESSAGE_ID: &str = "nl-msg";

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_NAME_ID: &str = "name";
pub const CONTACT_EMAIL_ID: &str = "email";
pub const CONTACT_BODY_ID: &str = "message";
pub const CONTACT_MESSAGE_ID: &str = "contact-msg";

/// Shape-only email check used by both forms.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE_RE.is_match(value)
}

/// Reasons a submission is rejected. `Display` is the inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    InvalidSubscriberEmail,
    MissingRequiredFields,
    InvalidContactEmail,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSubscriberEmail => write!(f, "Please enter a valid email."),
            Self::MissingRequiredFields => write!(f, "Please fill all required fields."),
            Self::InvalidContactEmail => write!(f, "Enter a valid email."),
        }
    }
}

impl Error for FormError {}

/// Validates a newsletter signup email as typed (no trimming).
pub fn validate_newsletter(email: &str) -> Result<(), FormError> {
    if email.is_empty() || !is_email_shaped(email) {
        return Err(FormError::InvalidSubscriberEmail);
    }
    Ok(())
}

/// Values read from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Presence is checked on trimmed values; the email shape on the raw one.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(FormError::MissingRequiredFields);
        }
        if !is_email_shaped(&self.email) {
            return Err(FormError::InvalidContactEmail);
        }
        Ok(())
    }
}

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Newsletter,
    Contact,
}

impl FormKind {
    pub fn form_id(self) -> &'static str {
        match self {
            Self::Newsletter => NEWSLETTER_FORM_ID,
            Self::Contact => CONTACT_FORM_ID,
        }
    }

    pub fn message_id(self) -> &'static str {
        match self {
            Self::Newsletter => NEWSLETTER_MESSAGE_ID,
            Self::Contact => CONTACT_MESSAGE_ID,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Newsletter => "Thanks! You are subscribed.",
            Self::Contact => "Message sent. We will contact you soon.",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Newsletter => "newsletter",
            Self::Contact => "contact",
        }
    }
}

/// Result of one handled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    pub kind: FormKind,
    /// `Err` carries the rejection shown inline.
    pub result: Result<(), FormError>,
}

impl FormOutcome {
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }

    /// Text written into the form's message element.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(()) => self.kind.success_message().to_string(),
            Err(err) => err.to_string(),
        }
    }
}

/// Forms present on the page at startup.
#[derive(Debug, Clone)]
pub struct Forms<N> {
    newsletter: Option<N>,
    contact: Option<N>,
}

impl<N: Clone + PartialEq> Forms<N> {
    pub fn wire<D: DomPort<Node = N>>(dom: &D) -> Self {
        Self {
            newsletter: dom.find_by_id(NEWSLETTER_FORM_ID),
            contact: dom.find_by_id(CONTACT_FORM_ID),
        }
    }

    pub fn form(&self, kind: FormKind) -> Option<&N> {
        match kind {
            FormKind::Newsletter => self.newsletter.as_ref(),
            FormKind::Contact => self.contact.as_ref(),
        }
    }

    pub fn kind_of(&self, node: &N) -> Option<FormKind> {
        if self.newsletter.as_ref() == Some(node) {
            Some(FormKind::Newsletter)
        } else if self.contact.as_ref() == Some(node) {
            Some(FormKind::Contact)
        } else {
            None
        }
    }

    /// Validates the form's current values and writes the inline message.
    ///
    /// Resets the form on success. Returns `Ok(None)` when the page has no
    /// such form.
    pub fn submit<D: DomPort<Node = N>>(
        &self,
        dom: &mut D,
        kind: FormKind,
    ) -> PageResult<Option<FormOutcome>> {
        let Some(form) = self.form(kind) else {
            return Ok(None);
        };

        let result = match kind {
            FormKind::Newsletter => validate_newsletter(&field(dom, NEWSLETTER_EMAIL_ID)?),
            FormKind::Contact => ContactSubmission {
                name: field(dom, CONTACT_NAME_ID)?,
                email: field(dom, CONTACT_EMAIL_ID)?,
                message: field(dom, CONTACT_BODY_ID)?,
            }
            .validate(),
        };
        let outcome = FormOutcome { kind, result };

        let message_node = dom
            .find_by_id(kind.message_id())
            .ok_or(PageError::MissingElement(kind.message_id()))?;
        dom.set_text(&message_node, &outcome.message())?;
        let color = if outcome.accepted() {
            SUCCESS_COLOR
        } else {
            ERROR_COLOR
        };
        dom.set_style(&message_node, "color", color)?;

        if outcome.accepted() {
            dom.reset_form(form)?;
            info!(
                "event=form_submitted module=forms status=ok form={}",
                kind.as_str()
            );
        } else {
            debug!(
                "event=form_rejected module=forms status=invalid form={} reason={:?}",
                kind.as_str(),
                outcome.result
            );
        }
        Ok(Some(outcome))
    }
}

fn field<D: DomPort>(dom: &D, id: &'static str) -> PageResult<String> {
    let node = dom.find_by_id(id).ok_or(PageError::MissingElement(id))?;
    Ok(dom.field_value(&node))
}
