//! # Messenger Platform wire schemas
//!
//! Data structures for the Messenger Platform APIs.
//!
//! - `incoming`: webhook callback schemas (events received from the platform)
//! - `outgoing`: send-API schemas (messages sent to the platform, plus the
//!   success and error response bodies)
//!
//! All types are transient value records: constructed per call, serialized or
//! deserialized, and discarded. Unknown wire fields are ignored on
//! deserialization and absent optional fields are omitted on serialization
//! (never emitted as `null`).

pub mod incoming;
pub mod outgoing;

// Re-export commonly used types
pub use incoming::*;
pub use outgoing::*;
