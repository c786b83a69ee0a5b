pub mod media_dto;

pub use media_dto::{MediaFile, MediaKind, UploadMediaFormDto, UploadedMediaDto};
