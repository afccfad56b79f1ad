mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{namespace_prefix, namespace_tracking_key, students_key, STUDENTS_NAMESPACE};
pub use serialization::{deserialize_students, serialize_students, SerializationError};
pub use traits::{Cache, CacheBackendStats};
