//! API route handlers

pub mod actions;
pub mod auth;
pub mod challenges;
pub mod dashboard;
pub mod habits;
pub mod health;
pub mod ranking;
