pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use api::{ApiClient, ApiError};
pub use app::router;
pub use config::{Config, DayBoundary};
pub use state::AppState;
pub use storage::load_session;
