// Handlers Module
// This module contains the HTTP endpoint handlers

pub mod health;
pub mod page;
pub mod results;
pub mod submit;

pub use health::health_check;
pub use page::get_page;
pub use results::get_results;
pub use submit::submit_amount;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Repositories;

/// Shared server state
pub struct ServerState {
    pub config: AppConfig,
    pub repositories: Repositories,
}

// Type alias for the application state
pub type AppState = Arc<ServerState>;
