//! # Send-API schemas
//!
//! These schemas define the JSON payload structure for sending messages
//! through the Messenger Platform send API, plus the success and error
//! response bodies it returns.
//!
//! Attachments and buttons are tagged unions with per-kind constructors, so
//! a value that typechecks is well-formed on the wire. [`OutboundMessage`]
//! itself stays permissive (text XOR attachment is a convention, not a type
//! invariant) to keep the escape hatch of
//! [`MessengerClient::send_outbound_message`](crate::client::MessengerClient::send_outbound_message)
//! open.

use serde::{Deserialize, Serialize};

use super::incoming::User;

/// Soft limit on generic template titles and subtitles. The platform, not
/// this client, is authoritative on hard limits, so violations are reported
/// but never block a send.
pub const MAX_ELEMENT_TEXT_LENGTH: usize = 80;

/// Maximum number of quick replies the platform accepts per message.
pub const MAX_QUICK_REPLIES: usize = 10;

/// An attachment on an inbound or outbound message. It can be as simple as
/// an image or as complicated as a template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Attachment {
    /// An image hosted at a URL
    Image(MediaPayload),
    /// An audio clip hosted at a URL
    Audio(MediaPayload),
    /// A video hosted at a URL
    Video(MediaPayload),
    /// An arbitrary file hosted at a URL
    File(MediaPayload),
    /// A structured template rendered as cards or buttons
    Template(TemplatePayload),
    /// An attachment type this crate does not model. The platform delivers
    /// more types inbound than can be sent (`location`, `fallback`, ...);
    /// their payloads are discarded on parse so the callback as a whole
    /// still deserializes. Never constructed for outbound messages.
    #[serde(other)]
    Unknown,
}

impl Attachment {
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image(MediaPayload { url: url.into() })
    }

    pub fn audio(url: impl Into<String>) -> Self {
        Self::Audio(MediaPayload { url: url.into() })
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::Video(MediaPayload { url: url.into() })
    }

    pub fn file(url: impl Into<String>) -> Self {
        Self::File(MediaPayload { url: url.into() })
    }

    /// A generic template: a horizontally scrollable set of card bubbles.
    pub fn generic_template(elements: Vec<Element>) -> Self {
        Self::Template(TemplatePayload::Generic { elements })
    }

    /// A button template: a text message with call-to-action buttons.
    pub fn button_template(text: impl Into<String>, buttons: Vec<Button>) -> Self {
        Self::Template(TemplatePayload::Button {
            text: text.into(),
            buttons,
        })
    }
}

/// Payload of a media attachment (image, audio, video, file).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaPayload {
    /// URL location of the media
    pub url: String,
}

/// Payload of a template attachment, discriminated by `template_type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "template_type", rename_all = "snake_case")]
pub enum TemplatePayload {
    /// Card bubbles rendered from [`Element`]s
    Generic {
        /// Data rendered in the template, one element per bubble
        elements: Vec<Element>,
    },
    /// A text message with buttons
    Button {
        /// The message text shown above the buttons
        text: String,
        /// The buttons displayed in the message
        buttons: Vec<Button>,
    },
    /// A template type this crate does not model (receipts, boarding
    /// passes, ...). Never constructed for outbound messages.
    #[serde(other)]
    Unknown,
}

/// One card bubble of a generic template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Element {
    /// Bubble title. Required.
    pub title: String,
    /// URL opened when the bubble is tapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_url: Option<String>,
    /// Bubble image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Bubble subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl Element {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_url: None,
            image_url: None,
            subtitle: None,
        }
    }

    pub fn with_item_url(mut self, item_url: impl Into<String>) -> Self {
        self.item_url = Some(item_url.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Describes a title or subtitle exceeding the platform's soft limit of
    /// [`MAX_ELEMENT_TEXT_LENGTH`] characters, if any. Oversized text is
    /// truncated by the platform, not rejected, so this is a diagnostic
    /// rather than a validation failure.
    pub fn overlength_warning(&self) -> Option<String> {
        let title_len = self.title.chars().count();
        let subtitle_len = self
            .subtitle
            .as_ref()
            .map(|s| s.chars().count())
            .unwrap_or(0);

        if title_len > MAX_ELEMENT_TEXT_LENGTH || subtitle_len > MAX_ELEMENT_TEXT_LENGTH {
            Some(format!(
                "element '{}' exceeds the {} character soft limit (title: {}, subtitle: {})",
                self.title, MAX_ELEMENT_TEXT_LENGTH, title_len, subtitle_len
            ))
        } else {
            None
        }
    }
}

/// A button usable in a button template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Button {
    /// Opens a URL in a mobile browser when tapped
    WebUrl {
        /// Button title
        title: String,
        /// URL opened when the button is tapped
        url: String,
    },
    /// Sends the payload back through the webhook when tapped
    Postback {
        /// Button title
        title: String,
        /// Custom data echoed back via the webhook
        payload: String,
    },
    /// Dials a phone number when tapped
    PhoneNumber {
        /// Button title
        title: String,
        /// A well formatted phone number
        payload: String,
    },
}

/// A suggested-reply button attached to an outbound message. When tapped,
/// the title is sent in the conversation with the developer-defined payload
/// echoed back in the callback, and the remaining buttons are dismissed so
/// users cannot tap buttons attached to old messages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuickReply {
    /// Value must be `"text"`. Required.
    #[serde(default = "QuickReply::default_content_type")]
    pub content_type: String,
    /// Caption of the button. Required.
    pub title: String,
    /// Custom data echoed back via the webhook. Required.
    pub payload: String,
}

impl QuickReply {
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            content_type: Self::default_content_type(),
            title: title.into(),
            payload: payload.into(),
        }
    }

    fn default_content_type() -> String {
        "text".to_string()
    }
}

/// An outbound message body. Exactly one of `text` and `attachment` should
/// be populated; this is the caller's responsibility when constructing
/// messages by hand for the send escape hatch.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct OutboundMessage {
    /// Text of the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Attachment of the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Up to [`MAX_QUICK_REPLIES`] quick replies shown with the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            attachment: Some(attachment),
            ..Self::default()
        }
    }

    /// Attaches quick replies. An empty list is treated as "none" so the
    /// field is omitted from the wire payload.
    pub fn with_quick_replies(mut self, quick_replies: Vec<QuickReply>) -> Self {
        self.quick_replies = if quick_replies.is_empty() {
            None
        } else {
            Some(quick_replies)
        };
        self
    }
}

/// The exact request body POSTed to the send API: a recipient paired with
/// an outbound message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageRequest {
    /// The user the message is sent to
    pub recipient: User,
    /// The message body
    pub message: OutboundMessage,
}

impl MessageRequest {
    pub fn new(recipient_id: impl Into<String>, message: OutboundMessage) -> Self {
        Self {
            recipient: User::new(recipient_id),
            message,
        }
    }
}

/// The response body returned by the send API when a message is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageResponse {
    /// Page-scoped ID of the recipient
    pub recipient_id: String,
    /// ID assigned to the sent message
    pub message_id: String,
}

/// The response body returned by the send API when a message is rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// The nested error object
    pub error: ErrorPayload,
}

/// The error object nested in an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorPayload {
    /// Human-readable description of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error category, e.g. `"OAuthException"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Platform error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Platform error subcode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_subcode: Option<i64>,
    /// Trace ID for support requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fbtrace_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_attachment_wire_shape() {
        let attachment = Attachment::image("https://cdn.example.com/pic.png");

        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({"type": "image", "payload": {"url": "https://cdn.example.com/pic.png"}})
        );
    }

    #[test]
    fn generic_template_wire_shape() {
        let attachment = Attachment::generic_template(vec![
            Element::new("First card")
                .with_image_url("https://cdn.example.com/a.png")
                .with_subtitle("details"),
        ]);

        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "type": "template",
                "payload": {
                    "template_type": "generic",
                    "elements": [{
                        "title": "First card",
                        "image_url": "https://cdn.example.com/a.png",
                        "subtitle": "details"
                    }]
                }
            })
        );
    }

    #[test]
    fn button_template_wire_shape() {
        let attachment = Attachment::button_template(
            "Pick one",
            vec![
                Button::WebUrl {
                    title: "Open".to_string(),
                    url: "https://example.com".to_string(),
                },
                Button::Postback {
                    title: "Reply".to_string(),
                    payload: "PICKED_REPLY".to_string(),
                },
                Button::PhoneNumber {
                    title: "Call".to_string(),
                    payload: "+15551234567".to_string(),
                },
            ],
        );

        assert_eq!(
            serde_json::to_value(&attachment).unwrap(),
            json!({
                "type": "template",
                "payload": {
                    "template_type": "button",
                    "text": "Pick one",
                    "buttons": [
                        {"type": "web_url", "title": "Open", "url": "https://example.com"},
                        {"type": "postback", "title": "Reply", "payload": "PICKED_REPLY"},
                        {"type": "phone_number", "title": "Call", "payload": "+15551234567"}
                    ]
                }
            })
        );
    }

    #[test]
    fn message_request_omits_absent_fields() {
        let request = MessageRequest::new("recipient-1", OutboundMessage::text("hello"));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"recipient": {"id": "recipient-1"}, "message": {"text": "hello"}})
        );
        // No nulls anywhere on the wire
        assert!(!serde_json::to_string(&request).unwrap().contains("null"));
    }

    #[test]
    fn quick_replies_default_content_type() {
        let reply = QuickReply::new("Yes", "ANSWER_YES");
        assert_eq!(reply.content_type, "text");

        let message = OutboundMessage::text("pick").with_quick_replies(vec![reply]);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "text": "pick",
                "quick_replies": [
                    {"content_type": "text", "title": "Yes", "payload": "ANSWER_YES"}
                ]
            })
        );
    }

    #[test]
    fn empty_quick_replies_are_omitted() {
        let message = OutboundMessage::text("hello").with_quick_replies(vec![]);
        assert!(message.quick_replies.is_none());
    }

    #[test]
    fn message_request_round_trip() {
        let request = MessageRequest::new(
            "recipient-1",
            OutboundMessage::attachment(Attachment::generic_template(vec![Element::new(
                "card",
            )]))
            .with_quick_replies(vec![QuickReply::new("Go", "GO")]),
        );

        let json = serde_json::to_string(&request).unwrap();
        let parsed: MessageRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn unmodeled_attachment_and_template_types_parse_as_unknown() {
        let attachment: Attachment = serde_json::from_str(
            r#"{"type": "location", "payload": {"coordinates": {"lat": 47.6, "long": -122.3}}}"#,
        )
        .unwrap();
        assert_eq!(attachment, Attachment::Unknown);

        let attachment: Attachment = serde_json::from_str(
            r#"{"type": "template", "payload": {"template_type": "receipt", "order_number": "12345"}}"#,
        )
        .unwrap();
        assert_eq!(attachment, Attachment::Template(TemplatePayload::Unknown));
    }

    #[test]
    fn deserializes_message_response() {
        let response: MessageResponse =
            serde_json::from_str(r#"{"recipient_id":"R1","message_id":"M1"}"#).unwrap();
        assert_eq!(response.recipient_id, "R1");
        assert_eq!(response.message_id, "M1");
    }

    #[test]
    fn deserializes_error_response() {
        let response: ErrorResponse = serde_json::from_str(
            r#"{
                "error": {
                    "message": "Invalid OAuth access token.",
                    "type": "OAuthException",
                    "code": 190,
                    "error_subcode": 1234567,
                    "fbtrace_id": "BLBz/WZt8dN"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            response.error.message.as_deref(),
            Some("Invalid OAuth access token.")
        );
        assert_eq!(response.error.error_type.as_deref(), Some("OAuthException"));
        assert_eq!(response.error.code, Some(190));
        assert_eq!(response.error.error_subcode, Some(1234567));
        assert_eq!(response.error.fbtrace_id.as_deref(), Some("BLBz/WZt8dN"));
    }

    #[test]
    fn overlength_warning_on_long_title() {
        let long = "x".repeat(MAX_ELEMENT_TEXT_LENGTH + 1);

        assert!(Element::new(long.as_str()).overlength_warning().is_some());
        assert!(
            Element::new("short")
                .with_subtitle(long.as_str())
                .overlength_warning()
                .is_some()
        );
        assert!(Element::new("short").overlength_warning().is_none());
    }
}
