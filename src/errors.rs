//! Issuer errors

use std::io;

use thiserror::Error;

/// Errors raised while building an [`IssuerConfig`](crate::IssuerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shared secret is empty; any signature computed with it is meaningless.
    #[error("shared secret must not be empty")]
    EmptySecret,
}

/// Errors that can occur while issuing a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// A text field is longer than its 16-bit length prefix can describe.
    #[error("{field} is {len} characters long, the limit is {max}", max = u16::MAX)]
    FieldTooLong {
        /// Name of the offending field
        field: &'static str,

        /// Text length of the field
        len: usize,
    },

    /// A text field contains non-ASCII characters, so its length prefix is ambiguous.
    #[error("{field} must be ASCII to be encoded in a permission buffer")]
    NonAsciiField {
        /// Name of the offending field
        field: &'static str,
    },

    /// Issuance time plus lifetime does not fit in the 32-bit expiry field.
    #[error("absolute expiry {issued_at} + {expire} does not fit in 32 bits")]
    ExpiryOutOfRange {
        /// Issuance time in unix seconds
        issued_at: i64,

        /// Requested lifetime in seconds
        expire: u32,
    },

    /// The HMAC implementation rejected the shared secret as a key.
    #[error("shared secret is not a usable HMAC key")]
    InvalidKey,

    /// The zlib encoder failed.
    #[error("failed to compress token payload")]
    Compression(#[source] io::Error),
}

/// Errors that can occur while decoding an issued token for inspection.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The token is not valid base64 after reversing the URL-safe substitution.
    #[error("token is not valid base64")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a valid zlib stream.
    #[error("token payload could not be inflated")]
    Inflate(#[source] io::Error),

    /// The inflated payload is not UTF-8 text.
    #[error("token payload is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The payload text is not the expected JSON document.
    #[error("token payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),

    /// The permission buffer ended before all fields were read.
    #[error("permission buffer is truncated")]
    TruncatedBuffer,

    /// The permission buffer has an unknown room kind flag.
    #[error("permission buffer has unknown room kind {0}")]
    UnknownRoomKind(u8),

    /// The permission buffer has bytes after its last field.
    #[error("permission buffer has {0} trailing bytes")]
    TrailingBytes(usize),

    /// A text field in the permission buffer is not UTF-8.
    #[error("permission buffer field {0} is not UTF-8")]
    BufferText(&'static str),
}
