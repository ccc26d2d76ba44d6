pub mod admin_panel;
pub mod auth;
pub mod contact;
pub mod portfolio;
pub mod project;
pub mod site;
