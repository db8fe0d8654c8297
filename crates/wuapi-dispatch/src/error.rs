//! Error types for transport calls and fixture loading.

use thiserror::Error;

/// `E_FAIL`, reported for exceptions that carry no more specific code.
pub const E_FAIL: u32 = 0x8000_4005;

/// An error raised by the automation call itself.
///
/// The marshaling layer never inspects or retries these; they are handed back
/// to the caller exactly as the transport produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The object has no property or method with this name.
    #[error("unknown member: {name}")]
    UnknownMember { name: String },

    /// An indexed read was outside the collection.
    #[error("index {index} out of range for {name}")]
    IndexOutOfRange { name: String, index: i32 },

    /// The handle does not refer to a live object.
    #[error("invalid object handle: {0}")]
    InvalidHandle(String),

    /// The server raised an exception while servicing the call.
    #[error("exception 0x{code:08X}: {description}")]
    Exception { code: u32, description: String },

    /// The connection to an out-of-process server was lost.
    #[error("automation server disconnected")]
    Disconnected,
}

impl TransportError {
    /// A generic `E_FAIL` exception with the given description.
    pub fn exception(description: impl Into<String>) -> Self {
        TransportError::Exception {
            code: E_FAIL,
            description: description.into(),
        }
    }
}

/// Convenience type alias for transport calls.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors produced while building an object graph from a JSON fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture was not valid JSON.
    #[error("invalid fixture json: {0}")]
    Json(#[from] serde_json::Error),

    /// A `$tag` object carried a value of the wrong shape.
    #[error("invalid {tag} value: {reason}")]
    InvalidTag { tag: String, reason: String },

    /// A single-key object used a `$tag` this loader does not know.
    #[error("unknown fixture tag: {0}")]
    UnknownTag(String),

    /// A JSON number that fits none of the integer or float tags.
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),

    /// `$error` used somewhere other than a property value or collection item.
    #[error("$error is only valid as a property value or collection item")]
    MisplacedError,

    /// The graph under construction rejected an update.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
