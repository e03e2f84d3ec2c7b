//! Entity Module

pub mod admin;
pub mod admin_session;
pub mod login_attempts;
