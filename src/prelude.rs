//! TLS Sig prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    buffer::{RoomRef, UserBuf},
    clock::{Clock, MockClock, SystemClock},
    config::{IssuerConfig, SharedSecret},
    encoding::{TokenClaims, decode_token},
    errors::{ConfigError, DecodeError, TokenError},
    identifier::{IdentifierError, validate_identifier},
    issuer::{CredentialRequest, DEFAULT_EXPIRE_SECONDS, IssuedToken, Issuer},
    privilege::PrivilegeMap,
};
