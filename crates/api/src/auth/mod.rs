//! Authentication primitives for the single admin account.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Opaque session tokens and their SHA-256 digests.
//! - [`cookie`] -- The `admin_auth` session cookie.
//! - [`guard`] -- Login, lockout, session checks and password change.

pub mod cookie;
pub mod guard;
pub mod password;
pub mod token;
