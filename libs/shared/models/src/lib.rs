pub mod error;
pub mod storage;

pub use error::AppError;
pub use storage::StorageError;
