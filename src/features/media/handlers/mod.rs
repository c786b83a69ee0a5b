pub mod media_handler;

pub use media_handler::{__path_upload_media, upload_media};
