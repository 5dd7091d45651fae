//! # Webhook callback schemas
//!
//! These schemas define the JSON payload structure delivered by the
//! Messenger Platform webhook. Every callback is a page-scoped envelope:
//! `{"object": "page", "entry": [...]}`. During moments of high load the
//! platform may batch several entries, each carrying several messaging
//! events, into a single callback, so consumers must iterate through all of
//! them.

use serde::{Deserialize, Serialize};

use super::outgoing::Attachment;

/// Root webhook payload from the Messenger Platform.
///
/// The `object` discriminator must equal `"page"` for the callback to be
/// valid; anything else is a malformed or adversarial request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Callback {
    /// The object type, `"page"` for all Messenger webhooks
    pub object: String,
    /// Batch of entries covering one page's events in a time window
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// A batch unit within a [`Callback`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    /// Page ID
    pub id: String,
    /// Time of the update, epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Messaging events within this entry
    #[serde(default)]
    pub messaging: Vec<Messaging>,
}

/// A single messaging event within an [`Entry`].
///
/// Exactly one of the event fields is populated in practice, but the schema
/// keeps them all optional: absence means "not this event type".
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Messaging {
    /// Sender of the event
    pub sender: User,
    /// Recipient of the event (the page)
    pub recipient: User,
    /// Event timestamp. Every event except message-delivered carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Set if the event is an inbound message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<InboundMessage>,
    /// Set if the event is a postback (Postback button, Get Started button,
    /// persistent menu or structured message tap)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postback: Option<InboundPayload>,
    /// Set if the event is a 'Send to Messenger' plugin opt-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optin: Option<Optin>,
    /// Set if the event reports message(s) as delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<StatusUpdate>,
    /// Set if the event reports message(s) as read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<StatusUpdate>,
}

/// A Messenger Platform user reference.
///
/// User ids are page-scoped IDs (PSID): unique per page, not globally.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// Page-scoped user ID
    pub id: String,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An inbound message sent by a user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InboundMessage {
    /// Message ID
    pub mid: String,
    /// Message sequence number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
    /// Text of the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attachments included with the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Set if the message is the result of a quick reply tap
    #[serde(rename = "quick_reply", skip_serializing_if = "Option::is_none")]
    pub quick_reply: Option<InboundPayload>,
}

/// Developer-defined metadata echoed back through the webhook.
///
/// The payload is set on a previous outbound message (a quick reply or
/// postback button) or in app configuration (Get Started button, persistent
/// menu) and comes back verbatim when the user taps it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InboundPayload {
    /// Custom data defined when the button was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

/// Wrapper for the `data-ref` field of the 'Send to Messenger' plugin,
/// used to associate a plugin tap with a callback.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Optin {
    /// `data-ref` parameter defined with the entry point
    #[serde(rename = "ref")]
    pub data_ref: String,
}

/// A delivered or read status update on previously sent message(s).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatusUpdate {
    /// The affected message IDs. May be absent, in which case the watermark
    /// must be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mids: Option<Vec<String>>,
    /// All messages sent before this timestamp are covered by the update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<i64>,
    /// Sequence number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
}
