mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::TranslationStore;
pub use types::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
