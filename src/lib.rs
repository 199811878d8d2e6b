pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod focus;
pub mod handlers;
pub mod health;
pub mod ledger;
pub mod models;
pub mod state;
pub mod storage;
pub mod ticker;
pub mod tips;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
