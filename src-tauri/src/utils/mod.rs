pub mod error;
pub mod fs;
pub mod naming;
pub mod validation;

pub use error::{ConvertError, ConvertResult, NO_FOLDER_MESSAGE};
pub use fs::{output_path, write_output};
pub use naming::{output_name, strip_extension, TARGET_EXTENSION};
pub use validation::{resolve_quality, DEFAULT_QUALITY};
