//! Domain layer for the portfolio site.
//!
//! Holds the project record model and its validation, the session and lockout
//! records used by the admin guard, the typed form adapter, and the HTML
//! renderer. Nothing in here touches the network or the database.

pub mod clock;
pub mod contact;
pub mod error;
pub mod form;
pub mod project;
pub mod render;
pub mod session;
pub mod site;
pub mod types;
