pub mod storage;

pub use storage::{ImageStore, StoredImage, WEB_IMAGE_PREFIX};
