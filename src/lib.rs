//! Foyer Visitor Sign-In Server
//!
//! A Rust implementation of the front-desk visitor sign-in service,
//! providing a REST JSON API for check-ins, pre-registrations, badge
//! tracking, and activity export.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
