//! # Messenger Platform client
//!
//! [`MessengerClient`] deserializes webhook callbacks, verifies their
//! signatures and sends outbound messages. Multiple pages can be served by
//! one client: the page access token is a parameter on every method that
//! calls the send API.

use std::time::Duration;

use crate::error::SendError;
use crate::schemas::{
    Attachment, Callback, Element, ErrorResponse, MAX_QUICK_REPLIES, MessageRequest,
    MessageResponse, OutboundMessage, QuickReply,
};
use crate::security;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Versioned Graph API endpoint the page access token is appended to.
pub const DEFAULT_MESSAGE_ENDPOINT: &str =
    "https://graph.facebook.com/v2.6/me/messages?access_token=";

/// Connect and request timeout for calls to the send API.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CALLBACK_OBJECT_PAGE: &str = "page";

/// Client for the Messenger Platform webhook and send APIs.
///
/// Holds only the endpoint template and a transport handle, both read-only
/// after construction, so one instance can be shared across tasks.
pub struct MessengerClient {
    /// Send-API endpoint; the page access token is appended per call
    message_endpoint: String,
    /// HTTP transport for send-API calls
    transport: Box<dyn HttpTransport>,
}

impl MessengerClient {
    /// Creates a client against [`DEFAULT_MESSAGE_ENDPOINT`] with
    /// [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(DEFAULT_MESSAGE_ENDPOINT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client against a custom endpoint template and timeout.
    pub fn with_config(
        message_endpoint: impl Into<String>,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        Ok(Self::with_transport(
            message_endpoint,
            Box::new(ReqwestTransport::new(request_timeout)?),
        ))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        message_endpoint: impl Into<String>,
        transport: Box<dyn HttpTransport>,
    ) -> Self {
        Self {
            message_endpoint: message_endpoint.into(),
            transport,
        }
    }

    /// Parses a raw webhook delivery into a [`Callback`].
    ///
    /// Returns `None` for blank input, invalid JSON, or a callback whose
    /// `object` discriminator is not `"page"`. All Messenger webhooks are
    /// page-scoped, so anything else is a malformed or adversarial request
    /// the caller should silently drop; a diagnostic is logged in each case.
    /// Unknown fields in the payload are ignored.
    ///
    /// Blank input is a caller bug, not a normal "ignore this delivery"
    /// outcome: the platform never sends an empty body, so a blank argument
    /// here means the host is not passing the raw request body through.
    pub fn deserialize_callback(callback_json: &str) -> Option<Callback> {
        if callback_json.trim().is_empty() {
            log::warn!("callback JSON is blank; ignoring delivery");
            return None;
        }

        match serde_json::from_str::<Callback>(callback_json) {
            Ok(callback) if callback.object == CALLBACK_OBJECT_PAGE => Some(callback),
            Ok(callback) => {
                log::error!("callback is not a page object: {}", callback.object);
                None
            }
            Err(e) => {
                log::error!("error deserializing callback JSON: {e}");
                None
            }
        }
    }

    /// Verifies the `X-Hub-Signature` header of a webhook delivery against
    /// the raw request body using the app secret key.
    ///
    /// Returns `false` on mismatch or on any malformed input; see
    /// [`security::is_valid_request`].
    pub fn is_valid_request(app_secret_key: &str, signature: &str, request_body: &str) -> bool {
        security::is_valid_request(app_secret_key, signature, request_body)
    }

    /// Sends a generic template message. There must be at least one
    /// [`Element`], and up to [`MAX_QUICK_REPLIES`] quick replies may be
    /// included. Element titles and subtitles beyond the platform's soft
    /// length limit are logged as warnings but do not block the send.
    pub async fn send_generic_message(
        &self,
        page_access_token: &str,
        recipient_id: &str,
        elements: Vec<Element>,
        quick_replies: Vec<QuickReply>,
    ) -> Result<MessageResponse, SendError> {
        if elements.is_empty() {
            return Err(SendError::InvalidArgument(
                "elements cannot be empty".to_string(),
            ));
        }
        if quick_replies.len() > MAX_QUICK_REPLIES {
            return Err(SendError::InvalidArgument(format!(
                "the platform supports at most {MAX_QUICK_REPLIES} quick replies per message"
            )));
        }

        for element in &elements {
            if let Some(warning) = element.overlength_warning() {
                log::warn!("{warning}");
            }
        }

        let message = OutboundMessage::attachment(Attachment::generic_template(elements))
            .with_quick_replies(quick_replies);

        self.send_outbound_message(page_access_token, recipient_id, message)
            .await
    }

    /// Sends an image attachment.
    pub async fn send_image_message(
        &self,
        page_access_token: &str,
        recipient_id: &str,
        image_url: &str,
    ) -> Result<MessageResponse, SendError> {
        require_non_blank(image_url, "image_url")?;

        self.send_outbound_message(
            page_access_token,
            recipient_id,
            OutboundMessage::attachment(Attachment::image(image_url)),
        )
        .await
    }

    /// Sends a text message.
    pub async fn send_text_message(
        &self,
        page_access_token: &str,
        recipient_id: &str,
        message_text: &str,
    ) -> Result<MessageResponse, SendError> {
        require_non_blank(message_text, "message_text")?;

        self.send_outbound_message(
            page_access_token,
            recipient_id,
            OutboundMessage::text(message_text),
        )
        .await
    }

    /// Sends a caller-constructed [`OutboundMessage`] verbatim. The message
    /// shape is not validated in any way; it is up to the caller to ensure
    /// the populated fields form a request payload the platform will accept.
    pub async fn send_outbound_message(
        &self,
        page_access_token: &str,
        recipient_id: &str,
        message: OutboundMessage,
    ) -> Result<MessageResponse, SendError> {
        require_non_blank(page_access_token, "page_access_token")?;
        require_non_blank(recipient_id, "recipient_id")?;

        self.send_message_request(page_access_token, &MessageRequest::new(recipient_id, message))
            .await
    }

    /// Serializes the request envelope, POSTs it and interprets the reply:
    /// 2xx parses as [`MessageResponse`], any other status parses as an
    /// error body and surfaces as [`SendError::Rejected`], and a transport
    /// failure surfaces as [`SendError::Transport`].
    async fn send_message_request(
        &self,
        page_access_token: &str,
        message_request: &MessageRequest,
    ) -> Result<MessageResponse, SendError> {
        let url = format!("{}{}", self.message_endpoint, page_access_token);
        let body = serde_json::to_string(message_request).map_err(SendError::Decode)?;

        let reply = self
            .transport
            .post_json(&url, body)
            .await
            .map_err(|e| {
                log::error!("transport failure sending message request: {e:#}");
                SendError::Transport(e)
            })?;

        if (200..300).contains(&reply.status) {
            log::debug!("message accepted by the send api");
            serde_json::from_str(&reply.body).map_err(SendError::Decode)
        } else {
            log::info!(
                "send api rejected the message request with status {}",
                reply.status
            );
            let error_response: ErrorResponse =
                serde_json::from_str(&reply.body).map_err(SendError::Decode)?;
            Err(SendError::Rejected(error_response.error))
        }
    }
}

fn require_non_blank(value: &str, name: &str) -> Result<(), SendError> {
    if value.trim().is_empty() {
        return Err(SendError::InvalidArgument(format!(
            "{name} cannot be blank"
        )));
    }
    Ok(())
}
