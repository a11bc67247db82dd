mod error;
mod operations;
mod requests;
mod types;
mod view;

pub use error::TranslationError;
pub use operations::{
    distinct_tag_names, normalize_tag_name, validate_changes, validate_new_translation,
    validate_search_query, MAX_KEY_LEN, MAX_LOCALE_LEN, MAX_TAG_NAME_LEN,
};
pub use requests::{
    AssignTagsRequest, CreateTranslationRequest, ListTranslationsQuery, SearchQuery,
    UpdateTranslationRequest,
};
pub use types::{NewTranslation, Tag, Translation, TranslationChanges};
pub use view::{to_views, TagView, TranslationPage, TranslationView};
