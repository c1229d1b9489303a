//! Token issuing.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::{debug, trace};

use crate::{
    buffer::{RoomRef, UserBuf},
    clock::{Clock, SystemClock},
    compress,
    config::IssuerConfig,
    encoding,
    errors::TokenError,
    payload::Payload,
    privilege::PrivilegeMap,
    signer::CanonicalSigner,
};

/// Default token lifetime: 180 days.
pub const DEFAULT_EXPIRE_SECONDS: u32 = 180 * 86_400;

/// Everything needed to issue one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    /// User identifier the token is issued to
    pub identifier: String,

    /// Lifetime in seconds, counted from issuance
    pub expire: u32,

    /// Room scope; `None` issues a plain `UserSig`
    pub room: Option<RoomRef>,

    /// Capabilities inside `room`
    pub privilege_map: PrivilegeMap,

    /// Account type tag carried in the permission buffer
    pub account_type: u32,
}

impl CredentialRequest {
    /// Request a `UserSig`, which carries no permission buffer.
    pub fn user_sig(identifier: impl Into<String>, expire: u32) -> Self {
        Self {
            identifier: identifier.into(),
            expire,
            room: None,
            privilege_map: PrivilegeMap::NONE,
            account_type: 0,
        }
    }

    /// Request a `PrivateMapKey` scoped to `room`.
    pub fn private_map_key(
        identifier: impl Into<String>,
        expire: u32,
        room: RoomRef,
        privilege_map: PrivilegeMap,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            expire,
            room: Some(room),
            privilege_map,
            account_type: 0,
        }
    }

    /// Set the account type tag written into the permission buffer.
    #[must_use]
    pub fn with_account_type(self, account_type: u32) -> Self {
        Self {
            account_type,
            ..self
        }
    }
}

/// An issued token together with the values it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// URL-safe token text
    pub token: String,

    /// Issuance time in unix seconds
    pub issued_at: i64,

    /// Expiry in unix seconds
    pub expires_at: i64,

    /// Text the signature covers
    pub canonical: String,

    /// Base64 HMAC-SHA256 signature
    pub signature: String,

    /// Payload text before compression
    pub payload: String,
}

/// Issues tokens for one application.
///
/// Holds only immutable configuration, so one issuer can be shared across threads.
#[derive(Debug, Clone)]
pub struct Issuer<C = SystemClock> {
    config: IssuerConfig,
    clock: C,
}

impl Issuer<SystemClock> {
    /// Build an issuer that reads issuance time from the system clock.
    #[must_use]
    pub const fn new(config: IssuerConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Issuer<C> {
    /// Build an issuer that reads issuance time from `clock`.
    pub const fn with_clock(config: IssuerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Configuration this issuer signs with.
    #[must_use]
    pub const fn config(&self) -> &IssuerConfig {
        &self.config
    }

    /// Issue a `UserSig` for `identifier`, valid for `expire` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if compression fails.
    pub fn issue_user_sig(&self, identifier: &str, expire: u32) -> Result<String, TokenError> {
        self.issue(&CredentialRequest::user_sig(identifier, expire))
    }

    /// Issue a `PrivateMapKey` for a numeric room id.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier cannot be encoded in the permission buffer
    /// or the absolute expiry does not fit in 32 bits.
    pub fn issue_private_map_key(
        &self,
        identifier: &str,
        expire: u32,
        room_id: u32,
        privilege_map: PrivilegeMap,
    ) -> Result<String, TokenError> {
        self.issue(&CredentialRequest::private_map_key(
            identifier,
            expire,
            RoomRef::Numeric(room_id),
            privilege_map,
        ))
    }

    /// Issue a `PrivateMapKey` for a named room.
    ///
    /// An empty `room_name` issues the same buffer as numeric room 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier or room name cannot be encoded in the
    /// permission buffer or the absolute expiry does not fit in 32 bits.
    pub fn issue_private_map_key_by_room_name(
        &self,
        identifier: &str,
        expire: u32,
        room_name: &str,
        privilege_map: PrivilegeMap,
    ) -> Result<String, TokenError> {
        self.issue(&CredentialRequest::private_map_key(
            identifier,
            expire,
            RoomRef::Named(room_name.to_string()),
            privilege_map,
        ))
    }

    /// Issue a token for `request`.
    ///
    /// # Errors
    ///
    /// See [`Issuer::issue_with_material`].
    pub fn issue(&self, request: &CredentialRequest) -> Result<String, TokenError> {
        self.issue_with_material(request).map(|issued| issued.token)
    }

    /// Issue a token for `request` and return the intermediate values as well.
    ///
    /// The clock is read once; the permission buffer expiry and the signed issuance
    /// time both derive from that reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the permission buffer cannot be encoded, the expiry is out of
    /// range, or compression fails.
    pub fn issue_with_material(
        &self,
        request: &CredentialRequest,
    ) -> Result<IssuedToken, TokenError> {
        let issued_at = self.clock.now().as_second();
        let expires_at = issued_at + i64::from(request.expire);

        let userbuf = request
            .room
            .as_ref()
            .map(|room| self.encode_user_buf(request, room, issued_at, expires_at))
            .transpose()?;

        let material = CanonicalSigner::new(&self.config).sign(
            &request.identifier,
            issued_at,
            request.expire,
            userbuf.as_deref(),
        )?;

        trace!(
            canonical_len = material.canonical.len(),
            "computed token signature"
        );

        let payload = Payload {
            identifier: &request.identifier,
            sdk_app_id: self.config.sdk_app_id(),
            expire: request.expire,
            issued_at,
            signature: &material.signature,
            userbuf: userbuf.as_deref(),
        }
        .render();

        let compressed =
            compress::compress(payload.as_bytes()).map_err(TokenError::Compression)?;
        let token = encoding::finalize(&compressed);

        debug!(
            identifier = %request.identifier,
            sdk_app_id = self.config.sdk_app_id(),
            issued_at,
            expires_at,
            private_map_key = userbuf.is_some(),
            "issued token"
        );

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
            canonical: material.canonical,
            signature: material.signature,
            payload,
        })
    }

    fn encode_user_buf(
        &self,
        request: &CredentialRequest,
        room: &RoomRef,
        issued_at: i64,
        expires_at: i64,
    ) -> Result<String, TokenError> {
        let Ok(expires_at) = u32::try_from(expires_at) else {
            return Err(TokenError::ExpiryOutOfRange {
                issued_at,
                expire: request.expire,
            });
        };

        let bytes = UserBuf {
            account: request.identifier.clone(),
            sdk_app_id: self.config.sdk_app_id(),
            room: room.clone(),
            expires_at,
            privilege_map: request.privilege_map,
            account_type: request.account_type,
        }
        .encode()?;

        Ok(BASE64.encode(bytes))
    }
}
