//! Permission buffer ("userbuf") encoding.
//!
//! Layout, all integers big-endian:
//!
//! | field | width |
//! |---|---|
//! | room kind (0 numeric or empty name, 1 named) | 1 |
//! | account length | 2 |
//! | account | variable |
//! | sdk app id | 4 |
//! | numeric room id (0 when named) | 4 |
//! | absolute expiry, unix seconds | 4 |
//! | privilege map | 4 |
//! | account type | 4 |
//! | room name length (named only) | 2 |
//! | room name (named only) | variable |

use crate::{
    errors::{DecodeError, TokenError},
    privilege::PrivilegeMap,
};

const ROOM_KIND_NUMERIC: u8 = 0;
const ROOM_KIND_NAMED: u8 = 1;

/// Fixed-width fields between the account and the optional room name.
const FIXED_FIELDS_LEN: usize = 20;

/// Room a permission buffer is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomRef {
    /// Numeric room id.
    Numeric(u32),

    /// Free-form room name.
    Named(String),
}

impl RoomRef {
    /// Name written after the fixed fields. An empty name encodes as numeric room 0.
    fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) if !name.is_empty() => Some(name.as_str()),
            Self::Numeric(_) | Self::Named(_) => None,
        }
    }

    const fn numeric_id(&self) -> u32 {
        match self {
            Self::Numeric(id) => *id,
            Self::Named(_) => 0,
        }
    }
}

/// Decoded form of a permission buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBuf {
    /// Identifier the permissions apply to
    pub account: String,

    /// Application id
    pub sdk_app_id: u32,

    /// Room the permissions are scoped to
    pub room: RoomRef,

    /// Absolute expiry in unix seconds
    pub expires_at: u32,

    /// Capabilities inside the room
    pub privilege_map: PrivilegeMap,

    /// Account type tag, 0 unless the platform says otherwise
    pub account_type: u32,
}

impl UserBuf {
    /// Serialize into the binary layout the platform verifies.
    ///
    /// # Errors
    ///
    /// Returns an error when the account or room name is non-ASCII or longer than
    /// `u16::MAX`.
    pub fn encode(&self) -> Result<Vec<u8>, TokenError> {
        let account_len = text_len("account", &self.account)?;

        let room_name = self
            .room
            .name()
            .map(|name| text_len("room name", name).map(|len| (len, name)))
            .transpose()?;

        let capacity = 3
            + self.account.len()
            + FIXED_FIELDS_LEN
            + room_name.map_or(0, |(_, name)| 2 + name.len());

        let mut writer = BinaryWriter::with_capacity(capacity);

        writer.write_u8(if room_name.is_some() {
            ROOM_KIND_NAMED
        } else {
            ROOM_KIND_NUMERIC
        });
        writer.write_u16(account_len);
        writer.write_bytes(self.account.as_bytes());
        writer.write_u32(self.sdk_app_id);
        writer.write_u32(self.room.numeric_id());
        writer.write_u32(self.expires_at);
        writer.write_u32(self.privilege_map.bits());
        writer.write_u32(self.account_type);

        if let Some((len, name)) = room_name {
            writer.write_u16(len);
            writer.write_bytes(name.as_bytes());
        }

        Ok(writer.into_inner())
    }

    /// Parse a buffer produced by [`UserBuf::encode`].
    ///
    /// # Errors
    ///
    /// Returns an error for truncated input, an unknown room kind, non-UTF-8 text or
    /// trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = BinaryReader::new(bytes);

        let kind = reader.read_u8()?;
        let account_len = reader.read_u16()?;
        let account = reader.read_text(account_len, "account")?;
        let sdk_app_id = reader.read_u32()?;
        let numeric_id = reader.read_u32()?;
        let expires_at = reader.read_u32()?;
        let privilege_map = PrivilegeMap::from_bits(reader.read_u32()?);
        let account_type = reader.read_u32()?;

        let room = match kind {
            ROOM_KIND_NUMERIC => RoomRef::Numeric(numeric_id),
            ROOM_KIND_NAMED => {
                let name_len = reader.read_u16()?;
                RoomRef::Named(reader.read_text(name_len, "room name")?)
            }
            other => return Err(DecodeError::UnknownRoomKind(other)),
        };

        reader.finish()?;

        Ok(Self {
            account,
            sdk_app_id,
            room,
            expires_at,
            privilege_map,
            account_type,
        })
    }
}

/// Length prefix for a text field.
///
/// The prefix counts characters. For ASCII that equals the byte count, which is the
/// only case where the platform's reading of the field is unambiguous.
fn text_len(field: &'static str, value: &str) -> Result<u16, TokenError> {
    if !value.is_ascii() {
        return Err(TokenError::NonAsciiField { field });
    }

    let Ok(len) = u16::try_from(value.len()) else {
        return Err(TokenError::FieldTooLong {
            field,
            len: value.len(),
        });
    };

    Ok(len)
}

/// Append-only big-endian writer.
#[derive(Debug, Default)]
struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_bytes(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }

    fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

#[derive(Debug)]
struct BinaryReader<'a> {
    rest: &'a [u8],
}

impl<'a> BinaryReader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let (head, rest) = self
            .rest
            .split_first_chunk::<N>()
            .ok_or(DecodeError::TruncatedBuffer)?;

        self.rest = rest;

        Ok(*head)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_array::<1>().map(u8::from_be_bytes)
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array::<2>().map(u16::from_be_bytes)
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array::<4>().map(u32::from_be_bytes)
    }

    fn read_text(&mut self, len: u16, field: &'static str) -> Result<String, DecodeError> {
        let (head, rest) = self
            .rest
            .split_at_checked(usize::from(len))
            .ok_or(DecodeError::TruncatedBuffer)?;

        self.rest = rest;

        String::from_utf8(head.to_vec()).map_err(|_utf8| DecodeError::BufferText(field))
    }

    fn finish(self) -> Result<(), DecodeError> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes(self.rest.len()))
        }
    }
}
