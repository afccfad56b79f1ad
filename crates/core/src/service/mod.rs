mod error;

pub use error::{service_error_to_status_code, Result, ServiceError};
