pub mod client;
pub mod errors;
pub mod models;
pub mod services;

pub use client::*;
pub use errors::*;
pub use models::*;
pub use services::*;
