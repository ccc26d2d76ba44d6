//! Admin session and lockout records plus the guard's fixed policy.
//!
//! Both records live in the key-value store under the keys below. They are
//! plain data; the guard in the API crate owns the read/write cycle.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

pub const KEY_PROJECTS: &str = "portfolioProjects";
pub const KEY_SESSION: &str = "adminAuth";
pub const KEY_LOCKOUT: &str = "adminLockout";
pub const KEY_PASSWORD: &str = "adminPassword";

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Consecutive failed logins that trigger a lockout.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Lockout duration in minutes.
pub const LOCKOUT_MINUTES: i64 = 5;

/// Session lifetime in hours.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Minimum length (in characters) of a new admin password.
pub const MIN_PASSWORD_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// The single admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub authenticated: bool,
    /// Absolute expiry, milliseconds since the Unix epoch.
    pub expires: i64,
    /// SHA-256 hex digest of the token held in the browser cookie.
    pub token_hash: String,
}

impl SessionRecord {
    pub fn issue(now: Timestamp, token_hash: String) -> Self {
        Self {
            authenticated: true,
            expires: (now + chrono::Duration::hours(SESSION_TTL_HOURS)).timestamp_millis(),
            token_hash,
        }
    }

    /// Parse a stored record. Anything that does not decode is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn is_valid(&self, now: Timestamp) -> bool {
        self.authenticated && self.expires > now.timestamp_millis()
    }
}

// ---------------------------------------------------------------------------
// LockoutRecord
// ---------------------------------------------------------------------------

/// When the current login lockout ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutRecord {
    /// Milliseconds since the Unix epoch.
    pub until: i64,
}

impl LockoutRecord {
    pub fn starting(now: Timestamp) -> Self {
        Self {
            until: (now + chrono::Duration::minutes(LOCKOUT_MINUTES)).timestamp_millis(),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(|until| Self { until })
    }

    pub fn encode(&self) -> String {
        self.until.to_string()
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        now.timestamp_millis() < self.until
    }

    /// Whole minutes left, rounded up.
    pub fn minutes_remaining(&self, now: Timestamp) -> i64 {
        let remaining_ms = (self.until - now.timestamp_millis()).max(0);
        (remaining_ms + 59_999) / 60_000
    }
}
