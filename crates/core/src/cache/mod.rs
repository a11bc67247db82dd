mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{extract_translation_id, translation_key, TRANSLATION_KEY_PREFIX};
pub use serialization::{deserialize_translation, serialize_translation, SerializationError};
pub use traits::Cache;
