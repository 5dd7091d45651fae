//! Typed send-failure taxonomy.
//!
//! Every way a send can fail flows through [`SendError`], so callers decide
//! retry policy from one channel: a contract violation is a caller bug, a
//! rejection carries the platform's verdict verbatim, and a transport
//! failure means the platform was never reached.

use std::fmt;

use derive_more::{Display, Error};

use crate::schemas::ErrorPayload;

/// Failure of a send operation. No variant is ever retried internally; a
/// single attempt is made per call.
#[derive(Debug, Display, Error)]
pub enum SendError {
    /// A required argument was blank, empty, or oversized. Raised before
    /// any I/O; indicates a programming error in the caller.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),

    /// The platform answered with a non-2xx status and a parseable error
    /// body. Carries the upstream message, code and subcode verbatim.
    #[display("send api rejected the message: {_0}")]
    Rejected(#[error(not(source))] ErrorPayload),

    /// No HTTP status was obtained (connect failure, timeout, IO error).
    #[display("could not reach the send api: {_0}")]
    Transport(#[error(not(source))] anyhow::Error),

    /// The response body did not match the documented wire shape.
    #[display("unexpected response body from the send api: {_0}")]
    Decode(serde_json::Error),
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or("unknown error"))?;
        if let Some(code) = self.code {
            write!(f, " (code {code}")?;
            if let Some(subcode) = self.error_subcode {
                write!(f, ", subcode {subcode}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
