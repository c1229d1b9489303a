//! Room privilege bitmap.

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
    str::FromStr,
};

use thiserror::Error;

/// Capabilities granted inside one room, one bit per capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrivilegeMap(u32);

impl PrivilegeMap {
    /// No capabilities.
    pub const NONE: Self = Self(0);

    /// Create the room.
    pub const CREATE_ROOM: Self = Self(1);

    /// Enter the room.
    pub const JOIN_ROOM: Self = Self(1 << 1);

    /// Send audio.
    pub const SEND_AUDIO: Self = Self(1 << 2);

    /// Receive audio.
    pub const RECV_AUDIO: Self = Self(1 << 3);

    /// Send video.
    pub const SEND_VIDEO: Self = Self(1 << 4);

    /// Receive video.
    pub const RECV_VIDEO: Self = Self(1 << 5);

    /// Send the screen-share substream.
    pub const SEND_SCREEN: Self = Self(1 << 6);

    /// Receive the screen-share substream.
    pub const RECV_SCREEN: Self = Self(1 << 7);

    /// Every capability.
    pub const ALL: Self = Self(0xFF);

    const NAMED: [(&'static str, Self); 9] = [
        ("create-room", Self::CREATE_ROOM),
        ("join-room", Self::JOIN_ROOM),
        ("send-audio", Self::SEND_AUDIO),
        ("recv-audio", Self::RECV_AUDIO),
        ("send-video", Self::SEND_VIDEO),
        ("recv-video", Self::RECV_VIDEO),
        ("send-screen", Self::SEND_SCREEN),
        ("recv-screen", Self::RECV_SCREEN),
        ("all", Self::ALL),
    ];

    /// Wrap a raw bitmap.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bitmap.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for PrivilegeMap {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PrivilegeMap {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for PrivilegeMap {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<u8> for PrivilegeMap {
    fn from(bits: u8) -> Self {
        Self(u32::from(bits))
    }
}

impl fmt::Display for PrivilegeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A privilege name that is not one of the known capabilities.
#[derive(Debug, Error)]
#[error("unknown privilege {0:?}")]
pub struct ParsePrivilegeError(String);

/// Parses either a decimal bitmap (`"42"`) or a comma-separated list of capability
/// names (`"join-room,recv-audio,recv-video"`).
impl FromStr for PrivilegeMap {
    type Err = ParsePrivilegeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if let Ok(bits) = value.parse::<u32>() {
            return Ok(Self(bits));
        }

        value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .try_fold(Self::NONE, |acc, name| {
                Self::NAMED
                    .iter()
                    .find(|(known, _)| known.eq_ignore_ascii_case(name))
                    .map(|(_, privilege)| acc | *privilege)
                    .ok_or_else(|| ParsePrivilegeError(name.to_string()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_match_platform_values() {
        let expected = [1, 2, 4, 8, 16, 32, 64, 128];
        let actual = [
            PrivilegeMap::CREATE_ROOM,
            PrivilegeMap::JOIN_ROOM,
            PrivilegeMap::SEND_AUDIO,
            PrivilegeMap::RECV_AUDIO,
            PrivilegeMap::SEND_VIDEO,
            PrivilegeMap::RECV_VIDEO,
            PrivilegeMap::SEND_SCREEN,
            PrivilegeMap::RECV_SCREEN,
        ]
        .map(PrivilegeMap::bits);

        assert_eq!(actual, expected);
    }

    #[test]
    fn join_and_receive_is_42() {
        let map = PrivilegeMap::JOIN_ROOM | PrivilegeMap::RECV_AUDIO | PrivilegeMap::RECV_VIDEO;

        assert_eq!(map.bits(), 42);
        assert!(map.contains(PrivilegeMap::RECV_AUDIO), "map should contain recv-audio");
        assert!(!map.contains(PrivilegeMap::SEND_AUDIO), "map should not contain send-audio");
    }

    #[test]
    fn parses_numbers_and_names() -> Result<(), ParsePrivilegeError> {
        assert_eq!("255".parse::<PrivilegeMap>()?, PrivilegeMap::ALL);
        assert_eq!(
            "join-room, recv-audio,RECV-VIDEO".parse::<PrivilegeMap>()?,
            PrivilegeMap::from_bits(42)
        );

        Ok(())
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("join-room,fly".parse::<PrivilegeMap>().is_err(), "fly is not a privilege");
    }
}
