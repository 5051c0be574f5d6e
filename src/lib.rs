pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use app::create_app;
pub use state::AppState;
