//! FxStrength Server
//!
//! HTTP layer exposing the status endpoints and the cached currency
//! strength snapshot.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
