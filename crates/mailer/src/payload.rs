//! Mailjet wire payload types.
//!
//! The batch send endpoint takes `{"messages": [...]}` where each entry is a
//! fully personalized email with Mailjet's PascalCase field names (and the
//! literal `HTMLPart` key for the HTML body).

use serde::{Deserialize, Serialize};

use techconf_common::types::Attendee;

/// Fixed sender identity for all dispatched notifications.
pub const FROM_EMAIL: &str = "udacity_course@eon-orchestra.com";
pub const FROM_NAME: &str = "info@techconf.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Name")]
    pub name: String,
}

/// One personalized email in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(rename = "From")]
    pub from: EmailAddress,
    #[serde(rename = "To")]
    pub to: Vec<EmailAddress>,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "HTMLPart")]
    pub html_part: String,
}

impl EmailMessage {
    /// Compose the email for one attendee: the subject is prefixed with the
    /// attendee's full name, the HTML body is the notification message
    /// verbatim.
    pub fn personalized(attendee: &Attendee, subject: &str, html_body: &str) -> Self {
        let full_name = attendee.full_name();

        Self {
            from: EmailAddress {
                email: FROM_EMAIL.to_string(),
                name: FROM_NAME.to_string(),
            },
            to: vec![EmailAddress {
                email: attendee.email.clone(),
                name: full_name.clone(),
            }],
            subject: format!("Dear {full_name}, {subject}"),
            html_part: html_body.to_string(),
        }
    }
}
