//! Outbound notifications.
//!
//! - [`telegram`] -- Contact form delivery through the Telegram Bot API.

pub mod telegram;
