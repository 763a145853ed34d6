pub mod types;
pub mod settings;
pub mod error;
pub mod bindings;

pub use error::{AppError, AppResult};
