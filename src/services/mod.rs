//! Domain services used by the HTTP routes.
//!
//! Service modules own business logic so route handlers can stay focused on
//! protocol translation.

pub mod booking;
pub mod suggestion;
