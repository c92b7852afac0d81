pub mod config;
pub mod memory;
pub mod remote;
pub mod store;

pub use config::*;
pub use memory::*;
pub use remote::*;
pub use store::*;
