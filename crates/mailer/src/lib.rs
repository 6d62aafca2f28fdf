//! Mailjet batch email client for the notification worker.

pub mod client;
pub mod payload;

pub use client::MailjetClient;
pub use payload::EmailMessage;
