mod error;
mod snapshot;
mod traits;

pub use error::{ExportError, Result};
pub use snapshot::{
    export_file_path, render_snapshot, temp_path_for, EXPORT_CHUNK_SIZE, EXPORT_FILE_NAME,
};
pub use traits::ExportQueue;
