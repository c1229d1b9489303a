//! Issuer configuration: the application id and its shared secret.

use std::fmt;

use zeroize::Zeroize;

use crate::errors::ConfigError;

/// Shared secret used as the HMAC key.
///
/// The bytes are wiped on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] when `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();

        if bytes.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        Ok(Self { bytes })
    }

    /// Raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Immutable issuer settings, owned for the lifetime of the issuing service.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    sdk_app_id: u32,
    secret: SharedSecret,
}

impl IssuerConfig {
    /// Build a configuration from an application id and the secret key text or bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] when the secret is empty.
    pub fn new(sdk_app_id: u32, secret: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        Ok(Self {
            sdk_app_id,
            secret: SharedSecret::new(secret.as_ref())?,
        })
    }

    /// Application id bound into every token.
    #[must_use]
    pub const fn sdk_app_id(&self) -> u32 {
        self.sdk_app_id
    }

    /// Shared secret used as the HMAC key.
    #[must_use]
    pub const fn secret(&self) -> &SharedSecret {
        &self.secret
    }
}
