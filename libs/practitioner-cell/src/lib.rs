pub mod handlers;
pub mod memory;
pub mod models;
pub mod ports;
pub mod router;
pub mod services;

pub use handlers::*;
pub use models::*;
pub use router::*;
