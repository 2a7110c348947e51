//! EcoTrack server: eco-habit logging, weekly challenges and a community ranking

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
