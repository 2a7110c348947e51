//! Utility functions for the application

pub mod crypto;
pub mod password;
pub mod path;
