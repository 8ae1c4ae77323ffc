pub mod authentication;
pub mod error_handler;
pub mod logging;

pub use authentication::{Authentication, ACCESS_TOKEN_ENV};
pub use error_handler::error_handler;
pub use error_handler::ErrorHandlerMiddleware;
pub use logging::Logging;
pub use logging::LoggingMiddleware;
