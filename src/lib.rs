//! TLS Sig
//!
//! Issues `UserSig` and `PrivateMapKey` tokens for a realtime-communication platform.
//!
//! A token is a compact, signed payload: the identifier, application id, issuance time
//! and lifetime are signed with HMAC-SHA256 using the application's shared secret,
//! assembled into a fixed JSON-shaped text, zlib-compressed and base64-encoded with a
//! URL-safe substitution. A `PrivateMapKey` also carries a binary permission buffer
//! that restricts the identifier to one room and a set of capabilities.
//!
//! ```rust,no_run
//! use tls_sig::{Issuer, IssuerConfig, PrivilegeMap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let issuer = Issuer::new(IssuerConfig::new(1_400_000_000, "my-secret")?);
//!
//! let user_sig = issuer.issue_user_sig("alice", 86_400)?;
//! let map_key = issuer.issue_private_map_key(
//!     "alice",
//!     86_400,
//!     1234,
//!     PrivilegeMap::JOIN_ROOM | PrivilegeMap::RECV_AUDIO | PrivilegeMap::RECV_VIDEO,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod clock;
pub mod compress;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod identifier;
pub mod issuer;
pub mod payload;
pub mod prelude;
pub mod privilege;
pub mod signer;

pub use clock::{Clock, MockClock, SystemClock};
pub use config::{IssuerConfig, SharedSecret};
pub use errors::{ConfigError, DecodeError, TokenError};
pub use issuer::{CredentialRequest, DEFAULT_EXPIRE_SECONDS, IssuedToken, Issuer};
pub use privilege::PrivilegeMap;
