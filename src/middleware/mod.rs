pub mod error_handler;
pub mod request_id;
pub mod session_guard;

pub use error_handler::ErrorHandler;
pub use request_id::RequestId;
pub use session_guard::{CurrentUser, SessionGuard};
