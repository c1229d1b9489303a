//! Issuance clock.

use jiff::Timestamp;
use mockall::automock;

/// Source of the issuance instant.
///
/// Issuing reads the clock once per token; every time-dependent field is derived
/// from that single reading.
#[automock]
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
