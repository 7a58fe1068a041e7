pub mod error;
pub mod record;
pub mod service;

pub use error::ReadingError;
pub use service::ReadingService;
