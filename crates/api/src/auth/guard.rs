//! Session guard for the single admin account.
//!
//! Owns the failed-attempt counter and the read/write cycle of the session,
//! lockout and credential records in the key-value store. Every check is
//! computed from the stored records at call time; nothing is cached.

use std::sync::Arc;

use portfolio_core::clock::Clock;
use portfolio_core::error::CoreError;
use portfolio_core::session::{
    LockoutRecord, SessionRecord, KEY_LOCKOUT, KEY_PASSWORD, KEY_SESSION, LOCKOUT_MINUTES,
    MAX_FAILED_ATTEMPTS, MIN_PASSWORD_LENGTH,
};
use portfolio_core::types::Timestamp;
use portfolio_db::repositories::KvRepo;
use portfolio_db::DbPool;
use tokio::sync::Mutex;

use crate::auth::password::{hash_password, matches_stored, validate_password_strength};
use crate::auth::token::{generate_session_token, hash_session_token};

pub struct SessionGuard {
    pool: DbPool,
    clock: Arc<dyn Clock>,
    default_password: String,
    /// Consecutive failed logins. Held for the whole login so attempts are
    /// counted one at a time.
    failed_attempts: Mutex<u32>,
}

impl SessionGuard {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>, default_password: String) -> Self {
        Self {
            pool,
            clock,
            default_password,
            failed_attempts: Mutex::new(0),
        }
    }

    /// Check `password` and open a session.
    ///
    /// Returns the plaintext session token for the cookie. Fails with
    /// `TooManyAttempts` while locked out (the password is not looked at) and
    /// when this failure engages the lockout, otherwise with `Unauthorized`
    /// reporting the attempts left.
    pub async fn login(&self, password: &str) -> Result<String, CoreError> {
        let mut failed = self.failed_attempts.lock().await;
        let now = self.clock.now();

        if let Some(lockout) = self.active_lockout(&mut failed, now).await? {
            let minutes = lockout.minutes_remaining(now);
            tracing::warn!(minutes, "Admin login rejected during lockout");
            return Err(CoreError::TooManyAttempts(lockout_message(minutes)));
        }

        if self.password_matches(password).await? {
            *failed = 0;
            let (token, token_hash) = generate_session_token();
            let record = SessionRecord::issue(now, token_hash);
            let raw = serde_json::to_string(&record)
                .map_err(|e| CoreError::Internal(format!("Failed to encode session: {e}")))?;
            KvRepo::set(&self.pool, KEY_SESSION, &raw, now)
                .await
                .map_err(persistence)?;
            tracing::info!("Admin signed in");
            return Ok(token);
        }

        *failed += 1;
        if *failed >= MAX_FAILED_ATTEMPTS {
            let lockout = LockoutRecord::starting(now);
            KvRepo::set(&self.pool, KEY_LOCKOUT, &lockout.encode(), now)
                .await
                .map_err(persistence)?;
            tracing::warn!(attempts = *failed, "Admin login locked out");
            return Err(CoreError::TooManyAttempts(lockout_message(LOCKOUT_MINUTES)));
        }

        let remaining = MAX_FAILED_ATTEMPTS - *failed;
        tracing::warn!(attempts = *failed, remaining, "Failed admin login");
        Err(CoreError::Unauthorized(format!(
            "Invalid password. Attempts remaining: {remaining}"
        )))
    }

    /// Destroy the session record. Succeeds whether or not one existed.
    pub async fn logout(&self) -> Result<(), CoreError> {
        KvRepo::remove(&self.pool, KEY_SESSION)
            .await
            .map_err(persistence)?;
        tracing::info!("Admin signed out");
        Ok(())
    }

    /// Whether `token` belongs to the current, unexpired session.
    ///
    /// An expired or unreadable session record is removed as a side effect.
    pub async fn is_authenticated(&self, token: Option<&str>) -> Result<bool, CoreError> {
        let Some(raw) = KvRepo::get(&self.pool, KEY_SESSION)
            .await
            .map_err(persistence)?
        else {
            return Ok(false);
        };

        let now = self.clock.now();
        let record = match SessionRecord::parse(&raw) {
            Some(record) if record.is_valid(now) => record,
            _ => {
                tracing::debug!("Discarding expired or malformed admin session");
                KvRepo::remove(&self.pool, KEY_SESSION)
                    .await
                    .map_err(persistence)?;
                return Ok(false);
            }
        };

        Ok(token.is_some_and(|t| hash_session_token(t) == record.token_hash))
    }

    /// Replace the admin password.
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), CoreError> {
        if !self.password_matches(current).await? {
            return Err(CoreError::Unauthorized(
                "Current password is incorrect".into(),
            ));
        }
        if new != confirm {
            return Err(CoreError::Validation("New passwords do not match".into()));
        }
        validate_password_strength(new, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;

        let hash = hash_password(new)
            .map_err(|e| CoreError::Internal(format!("Failed to hash password: {e}")))?;
        KvRepo::set(&self.pool, KEY_PASSWORD, &hash, self.clock.now())
            .await
            .map_err(persistence)?;
        tracing::info!("Admin password changed");
        Ok(())
    }

    /// Current failure count, after clearing an elapsed lockout.
    pub async fn failed_attempts(&self) -> Result<u32, CoreError> {
        let mut failed = self.failed_attempts.lock().await;
        let now = self.clock.now();
        self.active_lockout(&mut failed, now).await?;
        Ok(*failed)
    }

    /// The lockout in force at `now`, if any. An elapsed or unreadable record
    /// is removed and the counter reset.
    async fn active_lockout(
        &self,
        failed: &mut u32,
        now: Timestamp,
    ) -> Result<Option<LockoutRecord>, CoreError> {
        let Some(raw) = KvRepo::get(&self.pool, KEY_LOCKOUT)
            .await
            .map_err(persistence)?
        else {
            return Ok(None);
        };

        match LockoutRecord::parse(&raw) {
            Some(lockout) if lockout.is_active(now) => Ok(Some(lockout)),
            _ => {
                KvRepo::remove(&self.pool, KEY_LOCKOUT)
                    .await
                    .map_err(persistence)?;
                *failed = 0;
                tracing::info!("Admin login lockout lifted");
                Ok(None)
            }
        }
    }

    async fn password_matches(&self, candidate: &str) -> Result<bool, CoreError> {
        let stored = KvRepo::get(&self.pool, KEY_PASSWORD)
            .await
            .map_err(persistence)?;
        match stored {
            Some(stored) => matches_stored(candidate, &stored)
                .map_err(|e| CoreError::Internal(format!("Stored password is unreadable: {e}"))),
            None => Ok(candidate == self.default_password),
        }
    }
}

fn lockout_message(minutes: i64) -> String {
    format!("Too many failed attempts. Try again in {minutes} minutes.")
}

fn persistence(err: sqlx::Error) -> CoreError {
    CoreError::Persistence(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use portfolio_core::clock::ManualClock;

    async fn guard() -> (SessionGuard, Arc<ManualClock>, DbPool) {
        let pool = portfolio_db::create_pool("sqlite::memory:").await.unwrap();
        portfolio_db::run_migrations(&pool).await.unwrap();
        let clock = Arc::new(ManualClock::new(
            chrono::Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        ));
        let guard = SessionGuard::new(pool.clone(), clock.clone(), "admin".into());
        (guard, clock, pool)
    }

    #[tokio::test]
    async fn correct_password_opens_a_session() {
        let (guard, _, _) = guard().await;
        let token = guard.login("admin").await.unwrap();
        assert!(guard.is_authenticated(Some(&token)).await.unwrap());
        assert!(!guard.is_authenticated(Some("forged")).await.unwrap());
        assert!(!guard.is_authenticated(None).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_reports_attempts_left() {
        let (guard, _, _) = guard().await;
        assert_matches!(
            guard.login("nope").await,
            Err(CoreError::Unauthorized(msg)) if msg.ends_with("Attempts remaining: 4")
        );
        assert_eq!(guard.failed_attempts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fifth_failure_locks_and_sixth_skips_the_password_check() {
        let (guard, clock, _) = guard().await;
        for _ in 0..4 {
            assert_matches!(guard.login("bad").await, Err(CoreError::Unauthorized(_)));
        }
        assert_matches!(guard.login("bad").await, Err(CoreError::TooManyAttempts(_)));

        // The right password is still refused inside the window.
        clock.advance(chrono::Duration::seconds(90));
        assert_matches!(
            guard.login("admin").await,
            Err(CoreError::TooManyAttempts(msg)) if msg.contains("4 minutes")
        );
        assert_eq!(guard.failed_attempts().await.unwrap(), MAX_FAILED_ATTEMPTS);

        clock.advance(chrono::Duration::minutes(4));
        assert_eq!(guard.failed_attempts().await.unwrap(), 0);
        assert!(guard.login("admin").await.is_ok());
    }

    #[tokio::test]
    async fn expired_session_is_discarded() {
        let (guard, clock, pool) = guard().await;
        let token = guard.login("admin").await.unwrap();
        clock.advance(chrono::Duration::hours(24));
        assert!(!guard.is_authenticated(Some(&token)).await.unwrap());
        assert_eq!(KvRepo::get(&pool, KEY_SESSION).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_session_record_is_no_session() {
        let (guard, clock, pool) = guard().await;
        KvRepo::set(&pool, KEY_SESSION, "{broken", clock.now()).await.unwrap();
        assert!(!guard.is_authenticated(Some("anything")).await.unwrap());
        assert_eq!(KvRepo::get(&pool, KEY_SESSION).await.unwrap(), None);
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let (guard, _, _) = guard().await;
        let token = guard.login("admin").await.unwrap();
        guard.logout().await.unwrap();
        assert!(!guard.is_authenticated(Some(&token)).await.unwrap());
        // Idempotent.
        guard.logout().await.unwrap();
    }

    #[tokio::test]
    async fn mismatched_confirmation_leaves_password_unchanged() {
        let (guard, _, pool) = guard().await;
        assert_matches!(
            guard.change_password("admin", "new", "new2").await,
            Err(CoreError::Validation(msg)) if msg.contains("do not match")
        );
        assert_eq!(KvRepo::get(&pool, KEY_PASSWORD).await.unwrap(), None);
        assert!(guard.login("admin").await.is_ok());
    }

    #[tokio::test]
    async fn change_password_checks_current_and_length() {
        let (guard, _, _) = guard().await;
        assert_matches!(
            guard.change_password("wrong", "abcd", "abcd").await,
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(
            guard.change_password("admin", "abc", "abc").await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn changed_password_replaces_the_default() {
        let (guard, _, _) = guard().await;
        guard.change_password("admin", "hunter2", "hunter2").await.unwrap();
        assert_matches!(guard.login("admin").await, Err(CoreError::Unauthorized(_)));
        assert!(guard.login("hunter2").await.is_ok());
    }

    #[tokio::test]
    async fn legacy_plain_override_is_honoured() {
        let (guard, clock, pool) = guard().await;
        KvRepo::set(&pool, KEY_PASSWORD, "plainpass", clock.now()).await.unwrap();
        assert!(guard.login("plainpass").await.is_ok());
    }
}
