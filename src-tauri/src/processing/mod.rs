mod batch;
mod webp;

pub use batch::{convert_batch, FolderPicker};
pub use webp::{ImageEncoder, WebpEncoder};
