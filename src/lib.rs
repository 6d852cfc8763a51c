pub mod aggregate;
pub mod app;
pub mod calendar;
pub mod color;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod off;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{resolve_data_dir, Shim};
pub use store::Store;
