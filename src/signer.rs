//! Canonical signing string and HMAC-SHA256 signature.

use std::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{config::IssuerConfig, errors::TokenError};

type HmacSha256 = Hmac<Sha256>;

/// Fields covered by a token signature.
#[derive(Debug, Clone, Copy)]
pub struct SigningFields<'a> {
    /// User identifier
    pub identifier: &'a str,

    /// Application id
    pub sdk_app_id: u32,

    /// Issuance time in unix seconds
    pub issued_at: i64,

    /// Lifetime in seconds
    pub expire: u32,

    /// Base64 of the permission buffer, when the token carries one.
    pub userbuf: Option<&'a str>,
}

/// Build the canonical string for `fields`.
///
/// Every line, including the optional userbuf line, ends with `\n`. The platform
/// recomputes this text byte for byte, so neither the order nor the terminators may
/// change.
#[must_use]
pub fn canonical_string(fields: &SigningFields<'_>) -> String {
    let mut content = format!(
        "TLS.identifier:{}\nTLS.sdkappid:{}\nTLS.time:{}\nTLS.expire:{}\n",
        fields.identifier, fields.sdk_app_id, fields.issued_at, fields.expire,
    );

    if let Some(userbuf) = fields.userbuf {
        // Writing into a String cannot fail.
        _ = writeln!(content, "TLS.userbuf:{userbuf}");
    }

    content
}

/// Canonical string plus the signature computed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningMaterial {
    /// Text the signature covers.
    pub canonical: String,

    /// Standard, padded base64 of the HMAC-SHA256 output.
    pub signature: String,
}

/// Signs canonical strings with the issuer's shared secret.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalSigner<'a> {
    config: &'a IssuerConfig,
}

impl<'a> CanonicalSigner<'a> {
    /// Signer keyed with the secret in `config`.
    #[must_use]
    pub const fn new(config: &'a IssuerConfig) -> Self {
        Self { config }
    }

    /// Sign `identifier` issued at `issued_at` for `expire` seconds, optionally binding
    /// the base64 permission buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidKey`] if the HMAC implementation rejects the key.
    pub fn sign(
        &self,
        identifier: &str,
        issued_at: i64,
        expire: u32,
        userbuf: Option<&str>,
    ) -> Result<SigningMaterial, TokenError> {
        let canonical = canonical_string(&SigningFields {
            identifier,
            sdk_app_id: self.config.sdk_app_id(),
            issued_at,
            expire,
            userbuf,
        });

        let mut mac = HmacSha256::new_from_slice(self.config.secret().as_bytes())
            .map_err(|_invalid_length| TokenError::InvalidKey)?;

        mac.update(canonical.as_bytes());

        let signature = BASE64.encode(mac.finalize().into_bytes());

        Ok(SigningMaterial {
            canonical,
            signature,
        })
    }
}
