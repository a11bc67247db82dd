pub mod error;
pub mod export;
pub mod health;
pub mod translations;

pub use error::AppError;
