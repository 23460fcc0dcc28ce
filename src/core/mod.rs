//! Core translation engine module

pub mod batch;
pub mod client;
pub mod config;
pub mod errors;
pub mod languages;
pub mod models;
