pub mod error;
pub mod navigation;
pub mod notice;
pub mod state;
pub mod views;

pub use error::{AppError, AppResult};
pub use state::AppState;
