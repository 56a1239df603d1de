//! Biblion Library Catalog Server
//!
//! A Rust implementation of the Biblion catalog management server, providing
//! a REST JSON API for bibliographic records, contributors, taxonomies, and
//! user administration.

use std::sync::Arc;

pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod marcxml;
pub mod models;
pub mod repository;
pub mod services;
pub mod slug;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
