//! Image upload. Validates the multipart file, derives a resize directive and
//! forwards the bytes to the configured [`host::ImageHost`].

pub mod cloudinary;
pub mod handlers;
pub mod host;
pub mod transform;
