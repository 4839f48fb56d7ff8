//! Validation, policy and retry helpers.

pub mod phone;
pub mod quiet_hours;
pub mod retry;
pub mod text;
