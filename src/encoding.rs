//! URL-safe token text.
//!
//! Tokens are standard base64 with `+`, `/` and `=` replaced by `*`, `-` and `_`.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;

use crate::{buffer::UserBuf, compress, errors::DecodeError};

/// Encode compressed payload bytes as token text.
#[must_use]
pub fn finalize(compressed: &[u8]) -> String {
    BASE64
        .encode(compressed)
        .chars()
        .map(|c| match c {
            '+' => '*',
            '/' => '-',
            '=' => '_',
            other => other,
        })
        .collect()
}

/// Reverse [`finalize`], returning the compressed payload bytes.
///
/// # Errors
///
/// Returns an error when the text is not valid base64 after substitution.
pub fn unfinalize(token: &str) -> Result<Vec<u8>, DecodeError> {
    let standard: String = token
        .trim()
        .chars()
        .map(|c| match c {
            '*' => '+',
            '-' => '/',
            '_' => '=',
            other => other,
        })
        .collect();

    Ok(BASE64.decode(standard)?)
}

/// Recover the payload text of an issued token.
///
/// # Errors
///
/// Returns an error when the token is not valid base64, not a zlib stream, or not
/// UTF-8.
pub fn decode_token(token: &str) -> Result<String, DecodeError> {
    let compressed = unfinalize(token)?;
    let payload = compress::decompress(&compressed).map_err(DecodeError::Inflate)?;

    Ok(String::from_utf8(payload)?)
}

/// Parsed payload of an issued token, for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Payload format version
    #[serde(rename = "TLS.ver")]
    pub version: String,

    /// User identifier
    #[serde(rename = "TLS.identifier")]
    pub identifier: String,

    /// Application id
    #[serde(rename = "TLS.sdkappid")]
    pub sdk_app_id: u32,

    /// Lifetime in seconds
    #[serde(rename = "TLS.expire")]
    pub expire: u32,

    /// Issuance time in unix seconds
    #[serde(rename = "TLS.time")]
    pub issued_at: i64,

    /// Base64 HMAC-SHA256 signature
    #[serde(rename = "TLS.sig")]
    pub signature: String,

    /// Base64 permission buffer, present on private map keys
    #[serde(rename = "TLS.userbuf", default)]
    pub userbuf: Option<String>,
}

impl TokenClaims {
    /// Decode and parse an issued token.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be decoded or its payload is not the
    /// expected document.
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(&decode_token(token)?)?)
    }

    /// Decode the embedded permission buffer, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the buffer is not valid base64 or not a valid layout.
    pub fn user_buf(&self) -> Result<Option<UserBuf>, DecodeError> {
        self.userbuf
            .as_deref()
            .map(|userbuf| UserBuf::decode(&BASE64.decode(userbuf)?))
            .transpose()
    }
}
