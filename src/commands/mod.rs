pub mod info;
pub mod upload;
pub mod version;
