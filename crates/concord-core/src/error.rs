//! Shared error type across Concord crates.

use thiserror::Error;

/// Stable error codes (logged and asserted by test vectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Buffer shorter than a field requires.
    OutOfBounds,
    /// Unexpected option tag or enum byte.
    InvalidTag,
    /// Discriminant not in the registry.
    UnknownEventType,
    /// Direction of a variant not implemented for this role.
    NotSupported,
    /// Inconsistent length, trailing bytes, bad UTF-8, or a value too wide.
    Malformed,
    /// Version byte without a known schema.
    UnsupportedVersion,
    /// Frame exceeds the configured limit.
    FrameTooLarge,
    /// Invalid configuration.
    BadConfig,
    /// Transport failed to accept a frame.
    Transport,
    /// No response arrived in time.
    Timeout,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::OutOfBounds => "OUT_OF_BOUNDS",
            ErrorCode::InvalidTag => "INVALID_TAG",
            ErrorCode::UnknownEventType => "UNKNOWN_EVENT_TYPE",
            ErrorCode::NotSupported => "NOT_SUPPORTED",
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::FrameTooLarge => "FRAME_TOO_LARGE",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// True for failures caused by the bytes of a single frame.
    ///
    /// The session drops such a frame and keeps going.
    pub fn is_protocol_error(self) -> bool {
        matches!(
            self,
            ErrorCode::OutOfBounds
                | ErrorCode::InvalidTag
                | ErrorCode::UnknownEventType
                | ErrorCode::NotSupported
                | ErrorCode::Malformed
                | ErrorCode::UnsupportedVersion
                | ErrorCode::FrameTooLarge
        )
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ConcordError>;

/// Unified error type used by the codec and the client session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConcordError {
    #[error("out of bounds: need {needed} bytes at offset {offset}, have {available}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("invalid tag {tag} for {field}")]
    InvalidTag { field: &'static str, tag: u8 },
    #[error("unknown event type: {0}")]
    UnknownEventType(u16),
    #[error("{op} not supported for {kind}")]
    NotSupported {
        kind: &'static str,
        op: &'static str,
    },
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("request {0} timed out")]
    Timeout(u32),
    #[error("internal: {0}")]
    Internal(String),
}

impl ConcordError {
    /// Map to the stable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConcordError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            ConcordError::InvalidTag { .. } => ErrorCode::InvalidTag,
            ConcordError::UnknownEventType(_) => ErrorCode::UnknownEventType,
            ConcordError::NotSupported { .. } => ErrorCode::NotSupported,
            ConcordError::Malformed(_) => ErrorCode::Malformed,
            ConcordError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            ConcordError::FrameTooLarge { .. } => ErrorCode::FrameTooLarge,
            ConcordError::BadConfig(_) => ErrorCode::BadConfig,
            ConcordError::Transport(_) => ErrorCode::Transport,
            ConcordError::Timeout(_) => ErrorCode::Timeout,
            ConcordError::Internal(_) => ErrorCode::Internal,
        }
    }
}
